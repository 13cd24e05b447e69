//! Progress tracking service.

use std::sync::Arc;

use async_trait::async_trait;
use canteen_core::{Category, Member, MemberId, MilestoneLadder, Period};
use canteen_storage::{MemberStore, MemberSubscription, Result};
use serde::Serialize;
use tracing::debug;

use crate::leaderboard::{build_roster, rank_leaderboard, Ranking};
use crate::milestones::{compute_progress, Progress};

/// A member together with their progress.
#[derive(Debug, Clone, Serialize)]
pub struct MemberProgress {
    /// Member document the progress was computed from
    pub member: Member,
    /// Progress along the ladder
    pub progress: Progress,
}

/// Progress tracking service.
#[async_trait]
pub trait ProgressTracker: Send + Sync {
    /// Get a member's milestone progress. `None` if the member is unknown.
    async fn member_progress(&self, id: &MemberId) -> Result<Option<MemberProgress>>;

    /// Get a category leaderboard for a period as seen by `viewer`.
    async fn leaderboard(&self, category: Category, period: Period, viewer: &MemberId) -> Result<Ranking>;
}

/// Progress tracker reading straight from a [`MemberStore`].
pub struct BasicProgressTracker<S: MemberStore> {
    storage: Arc<S>,
    ladder: MilestoneLadder,
}

impl<S: MemberStore> BasicProgressTracker<S> {
    /// Create a tracker using the default milestone ladder.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            ladder: MilestoneLadder::default(),
        }
    }

    /// Use a different milestone ladder.
    pub fn with_ladder(mut self, ladder: MilestoneLadder) -> Self {
        self.ladder = ladder;
        self
    }

    /// Milestone ladder in use.
    pub fn ladder(&self) -> &MilestoneLadder {
        &self.ladder
    }

    /// Follow a member's progress as their points change.
    pub async fn watch(&self, id: &MemberId) -> Result<ProgressWatch> {
        let subscription = self.storage.subscribe(id).await?;
        Ok(ProgressWatch {
            subscription,
            ladder: self.ladder.clone(),
        })
    }
}

#[async_trait]
impl<S: MemberStore + 'static> ProgressTracker for BasicProgressTracker<S> {
    async fn member_progress(&self, id: &MemberId) -> Result<Option<MemberProgress>> {
        let Some(member) = self.storage.load_member(id).await? else {
            return Ok(None);
        };
        let progress = compute_progress(member.points, &self.ladder);
        Ok(Some(MemberProgress { member, progress }))
    }

    async fn leaderboard(&self, category: Category, period: Period, viewer: &MemberId) -> Result<Ranking> {
        let roster = build_roster(self.storage.list_members().await?);
        let Some(records) = self.storage.load_competition(period).await? else {
            debug!(period = %period, "no competition sheet for period");
            return Ok(Ranking::empty(category));
        };

        let ranking = rank_leaderboard(&records, &roster, category, viewer);
        debug!(
            period = %period,
            category = %category,
            ranked = ranking.ranked.len(),
            unresolved = ranking.unresolved.len(),
            "leaderboard ranked"
        );
        Ok(ranking)
    }
}

/// Live progress for one member. Dropping it ends the subscription.
pub struct ProgressWatch {
    subscription: MemberSubscription,
    ladder: MilestoneLadder,
}

impl ProgressWatch {
    /// Progress for the latest known document.
    pub fn current(&self) -> Option<MemberProgress> {
        self.subscription.latest().map(|member| self.with_progress(member))
    }

    /// Wait for the member's next update. `None` once the store stops
    /// publishing.
    pub async fn next(&mut self) -> Option<MemberProgress> {
        let member = self.subscription.changed().await?;
        Some(self.with_progress(member))
    }

    fn with_progress(&self, member: Member) -> MemberProgress {
        let progress = compute_progress(member.points, &self.ladder);
        MemberProgress { member, progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_core::{BirthDate, CompetitionRecord, Gender, Milestone, Profile};
    use canteen_storage::JsonStorage;
    use chrono::Utc;

    fn santri(id: &str) -> Member {
        Member {
            id: MemberId::from(id),
            full_name: format!("Santri {id}"),
            gender: Gender::LakiLaki,
            date_of_birth: BirthDate::parse("01-01-2009").unwrap(),
            email: format!("{id}@example.com"),
            profile: Profile::Santri {
                unit_education: "SMP DU 2".to_string(),
                asrama: "Asrama X Hurun Iin".to_string(),
            },
            points: 0,
            created_at: Utc::now(),
        }
    }

    async fn tracker(dir: &std::path::Path) -> (Arc<JsonStorage>, BasicProgressTracker<JsonStorage>) {
        let storage = Arc::new(JsonStorage::new(dir).await.unwrap());
        let tracker = BasicProgressTracker::new(Arc::clone(&storage));
        (storage, tracker)
    }

    #[tokio::test]
    async fn test_member_progress() {
        let dir = tempfile::tempdir().unwrap();
        let (storage, tracker) = tracker(dir.path()).await;
        storage.insert_member(&santri("a")).await.unwrap();
        storage.award_points(&MemberId::from("a"), 60).await.unwrap();

        let mp = tracker.member_progress(&MemberId::from("a")).await.unwrap().unwrap();
        assert_eq!(mp.member.points, 60);
        assert_eq!(mp.progress.next_milestone.points, 100);
        assert_eq!(mp.progress.points_remaining, 40);

        assert!(tracker.member_progress(&MemberId::from("x")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_custom_ladder() {
        let dir = tempfile::tempdir().unwrap();
        let (storage, tracker) = tracker(dir.path()).await;
        let ladder = MilestoneLadder::new(vec![Milestone::new(4, "Sticker", "⭐")]).unwrap();
        let tracker = tracker.with_ladder(ladder);
        storage.insert_member(&santri("a")).await.unwrap();
        storage.award_points(&MemberId::from("a"), 2).await.unwrap();

        let mp = tracker.member_progress(&MemberId::from("a")).await.unwrap().unwrap();
        assert_eq!(mp.progress.progress_percent, 50.0);
    }

    #[tokio::test]
    async fn test_leaderboard_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let (storage, tracker) = tracker(dir.path()).await;
        for id in ["a", "b", "c"] {
            storage.insert_member(&santri(id)).await.unwrap();
        }
        let period: Period = "2026-10".parse().unwrap();
        storage
            .save_competition(
                period,
                &[
                    CompetitionRecord::new("a", 10),
                    CompetitionRecord::new("b", 30),
                    CompetitionRecord::new("c", 30),
                    CompetitionRecord::new("Ghost_1", 99),
                ],
            )
            .await
            .unwrap();

        let ranking = tracker
            .leaderboard(Category::Santri, period, &MemberId::from("c"))
            .await
            .unwrap();
        let order: Vec<&str> = ranking.ranked.iter().map(|e| e.member_id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert_eq!(ranking.viewer_rank, 2);
        assert_eq!(ranking.unresolved.len(), 1);
    }

    #[tokio::test]
    async fn test_leaderboard_without_sheet_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (_storage, tracker) = tracker(dir.path()).await;
        let ranking = tracker
            .leaderboard(Category::Mahasiswa, "2020-01".parse().unwrap(), &MemberId::from("a"))
            .await
            .unwrap();
        assert_eq!(ranking, Ranking::empty(Category::Mahasiswa));
    }

    #[tokio::test]
    async fn test_watch_follows_points_and_releases() {
        let dir = tempfile::tempdir().unwrap();
        let (storage, tracker) = tracker(dir.path()).await;
        storage.insert_member(&santri("a")).await.unwrap();
        let id = MemberId::from("a");

        let mut watch = tracker.watch(&id).await.unwrap();
        assert_eq!(watch.current().unwrap().progress.points_remaining, 10);

        storage.award_points(&id, 12).await.unwrap();
        let update = watch.next().await.unwrap();
        assert_eq!(update.member.points, 12);
        assert_eq!(update.progress.next_milestone.points, 50);

        drop(watch);
        assert_eq!(storage.active_subscriptions(), 0);
    }
}
