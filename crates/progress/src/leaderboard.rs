//! Monthly leaderboard ranking.
//!
//! Records are ranked per category. A record's category comes only from
//! the roster; records whose member is not in the roster never rank and
//! are reported in [`Ranking::unresolved`] instead.

use std::collections::HashMap;

use canteen_core::{Category, CompetitionRecord, Member, MemberId};
use serde::Serialize;

/// Registered members keyed by id.
pub type Roster = HashMap<MemberId, Member>;

/// Index a member list by id.
pub fn build_roster(members: impl IntoIterator<Item = Member>) -> Roster {
    members.into_iter().map(|m| (m.id.clone(), m)).collect()
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based position
    pub rank: usize,
    /// Member
    pub member_id: MemberId,
    /// Name from the roster
    pub display_name: String,
    /// Points earned in the period
    pub points: u64,
    /// Amount spent in the period
    pub amount_spent: u64,
    /// Transactions in the period
    pub transaction_count: u64,
}

impl RankedEntry {
    /// Medal for the podium, `#n` below it.
    pub fn badge(&self) -> String {
        match self.rank {
            1 => "🥇".to_string(),
            2 => "🥈".to_string(),
            3 => "🥉".to_string(),
            n => format!("#{n}"),
        }
    }
}

/// A record whose member id is not in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedEntry {
    /// Raw id from the competition sheet
    pub member_id: MemberId,
    /// Label derived from the id
    pub label: String,
    /// Points earned in the period
    pub points: u64,
}

/// A category's leaderboard as seen by one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    /// Category ranked
    pub category: Category,
    /// Entries, best first
    pub ranked: Vec<RankedEntry>,
    /// Viewer's rank, 0 when the viewer is not ranked
    pub viewer_rank: usize,
    /// Records that could not be attributed to any member
    pub unresolved: Vec<UnresolvedEntry>,
}

impl Ranking {
    /// A ranking with no entries.
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            ranked: Vec::new(),
            viewer_rank: 0,
            unresolved: Vec::new(),
        }
    }

    /// The viewer's row, if ranked.
    pub fn viewer_entry(&self) -> Option<&RankedEntry> {
        self.viewer_rank
            .checked_sub(1)
            .and_then(|i| self.ranked.get(i))
    }
}

/// Rank `records` for one category.
///
/// Order is points descending; equal points keep their order in `records`.
/// Ranks are consecutive with no shared places.
pub fn rank_leaderboard(
    records: &[CompetitionRecord],
    roster: &Roster,
    category: Category,
    viewer: &MemberId,
) -> Ranking {
    let mut unresolved = Vec::new();
    let mut eligible: Vec<(&CompetitionRecord, &Member)> = Vec::new();

    for record in records {
        match roster.get(&record.member_id) {
            Some(member) if member.category() == category => eligible.push((record, member)),
            Some(_) => {}
            None => unresolved.push(UnresolvedEntry {
                member_id: record.member_id.clone(),
                label: record.member_id.fallback_label().to_string(),
                points: record.points,
            }),
        }
    }

    // `sort_by` is stable
    eligible.sort_by(|(a, _), (b, _)| b.points.cmp(&a.points));

    let ranked: Vec<RankedEntry> = eligible
        .into_iter()
        .enumerate()
        .map(|(i, (record, member))| RankedEntry {
            rank: i + 1,
            member_id: record.member_id.clone(),
            display_name: member.full_name.clone(),
            points: record.points,
            amount_spent: record.amount_spent,
            transaction_count: record.transaction_count,
        })
        .collect();

    let viewer_rank = ranked
        .iter()
        .find(|e| &e.member_id == viewer)
        .map_or(0, |e| e.rank);

    Ranking {
        category,
        ranked,
        viewer_rank,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_core::{BirthDate, Gender, Profile};
    use chrono::Utc;

    fn member(id: &str, category: Category) -> Member {
        let profile = match category {
            Category::Santri => Profile::Santri {
                unit_education: "SMA DU 3".to_string(),
                asrama: "Asrama XV Al Falah".to_string(),
            },
            Category::Mahasiswa => Profile::Mahasiswa {
                phone_number: "+62811".to_string(),
                faculty: "Sains & Teknologi".to_string(),
                major: "S1 Matematika".to_string(),
                residence: "Rumah/Kos".to_string(),
            },
            Category::GuruDosen => Profile::GuruDosen {
                phone_number: "+62811".to_string(),
                institution: "Unipdu".to_string(),
                work_location: "Laboratorium".to_string(),
            },
        };
        Member {
            id: MemberId::from(id),
            full_name: format!("Member {id}"),
            gender: Gender::LakiLaki,
            date_of_birth: BirthDate::parse("01-01-2000").unwrap(),
            email: format!("{id}@example.com"),
            profile,
            points: 0,
            created_at: Utc::now(),
        }
    }

    fn santri_roster(ids: &[&str]) -> Roster {
        build_roster(ids.iter().map(|id| member(id, Category::Santri)))
    }

    fn records(pairs: &[(&str, u64)]) -> Vec<CompetitionRecord> {
        pairs.iter().map(|(id, p)| CompetitionRecord::new(*id, *p)).collect()
    }

    fn order(ranking: &Ranking) -> Vec<&str> {
        ranking.ranked.iter().map(|e| e.member_id.as_str()).collect()
    }

    #[test]
    fn test_ties_keep_input_order() {
        let roster = santri_roster(&["A", "B", "C", "D"]);
        let recs = records(&[("A", 50), ("B", 80), ("C", 80), ("D", 20)]);

        let ranking = rank_leaderboard(&recs, &roster, Category::Santri, &MemberId::from("D"));
        assert_eq!(order(&ranking), vec!["B", "C", "A", "D"]);
        let ranks: Vec<usize> = ranking.ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(ranking.viewer_rank, 4);
        assert_eq!(ranking.viewer_entry().unwrap().member_id, MemberId::from("D"));

        let swapped = records(&[("A", 50), ("C", 80), ("B", 80), ("D", 20)]);
        let ranking = rank_leaderboard(&swapped, &roster, Category::Santri, &MemberId::from("D"));
        assert_eq!(order(&ranking), vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn test_absent_viewer_has_rank_zero() {
        let roster = santri_roster(&["A", "B"]);
        let recs = records(&[("A", 5), ("B", 6)]);
        let ranking = rank_leaderboard(&recs, &roster, Category::Santri, &MemberId::from("Z"));
        assert_eq!(ranking.viewer_rank, 0);
        assert!(ranking.viewer_entry().is_none());
    }

    #[test]
    fn test_category_filter_excludes_top_scorer() {
        let mut roster = santri_roster(&["A", "B"]);
        roster.insert(MemberId::from("M"), member("M", Category::Mahasiswa));
        let recs = records(&[("A", 10), ("M", 1000), ("B", 20)]);

        let santri = rank_leaderboard(&recs, &roster, Category::Santri, &MemberId::from("M"));
        assert_eq!(order(&santri), vec!["B", "A"]);
        assert_eq!(santri.viewer_rank, 0);

        let mahasiswa = rank_leaderboard(&recs, &roster, Category::Mahasiswa, &MemberId::from("M"));
        assert_eq!(order(&mahasiswa), vec!["M"]);
        assert_eq!(mahasiswa.viewer_rank, 1);

        let guru = rank_leaderboard(&recs, &roster, Category::GuruDosen, &MemberId::from("M"));
        assert!(guru.ranked.is_empty());
    }

    #[test]
    fn test_unresolved_records_are_reported_not_ranked() {
        let roster = santri_roster(&["A"]);
        let recs = records(&[("Ghost_1700000000", 500), ("A", 1)]);

        let ranking = rank_leaderboard(&recs, &roster, Category::Santri, &MemberId::from("A"));
        assert_eq!(order(&ranking), vec!["A"]);
        assert_eq!(ranking.viewer_rank, 1);
        assert_eq!(ranking.unresolved.len(), 1);
        assert_eq!(ranking.unresolved[0].label, "Ghost");
        assert_eq!(ranking.unresolved[0].points, 500);
    }

    #[test]
    fn test_display_name_and_stats_from_sources() {
        let roster = santri_roster(&["A"]);
        let mut rec = CompetitionRecord::new("A", 7);
        rec.amount_spent = 35_000;
        rec.transaction_count = 2;

        let ranking = rank_leaderboard(&[rec], &roster, Category::Santri, &MemberId::from("A"));
        let entry = &ranking.ranked[0];
        assert_eq!(entry.display_name, "Member A");
        assert_eq!(entry.amount_spent, 35_000);
        assert_eq!(entry.transaction_count, 2);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let roster = santri_roster(&["A", "B", "C"]);
        let recs = records(&[("A", 3), ("B", 3), ("C", 9)]);
        let viewer = MemberId::from("B");

        let first = rank_leaderboard(&recs, &roster, Category::Santri, &viewer);
        let second = rank_leaderboard(&recs, &roster, Category::Santri, &viewer);
        assert_eq!(first, second);
        assert_eq!(recs, records(&[("A", 3), ("B", 3), ("C", 9)]));
    }

    #[test]
    fn test_badges() {
        let roster = santri_roster(&["A", "B", "C", "D"]);
        let recs = records(&[("A", 4), ("B", 3), ("C", 2), ("D", 1)]);
        let ranking = rank_leaderboard(&recs, &roster, Category::Santri, &MemberId::from("A"));
        let badges: Vec<String> = ranking.ranked.iter().map(RankedEntry::badge).collect();
        assert_eq!(badges, vec!["🥇", "🥈", "🥉", "#4"]);
    }

    #[test]
    fn test_empty_inputs() {
        let ranking = rank_leaderboard(&[], &Roster::new(), Category::Santri, &MemberId::from("A"));
        assert_eq!(ranking, Ranking::empty(Category::Santri));
    }
}
