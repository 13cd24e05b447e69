//! Member progress along the milestone ladder.

use canteen_core::{Milestone, MilestoneLadder};
use serde::Serialize;

/// Where a point balance sits on the ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    /// Points the progress was computed for
    pub points: u64,

    /// Highest milestone reached, `None` below the first threshold
    pub current_tier: Option<Milestone>,

    /// First milestone not yet reached, or the last one once all are reached
    pub next_milestone: Milestone,

    /// Percentage towards `next_milestone` (0-100)
    pub progress_percent: f32,

    /// Points still missing for `next_milestone`
    pub points_remaining: u64,
}

impl Progress {
    /// Whether every milestone has been reached.
    pub fn all_achieved(&self) -> bool {
        self.points >= self.next_milestone.points
    }

    /// One-line status shown under the point balance.
    pub fn headline(&self) -> String {
        if self.all_achieved() {
            "Semua milestone tercapai! 🎉".to_string()
        } else {
            format!(
                "{} points lagi untuk mendapat {}",
                self.points_remaining, self.next_milestone.label
            )
        }
    }
}

/// A milestone and whether the balance has reached it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneState<'a> {
    /// The milestone
    pub milestone: &'a Milestone,
    /// Reached
    pub achieved: bool,
}

/// Compute progress for a point balance.
pub fn compute_progress(points: u64, ladder: &MilestoneLadder) -> Progress {
    let milestones = ladder.milestones();

    let next_milestone = milestones
        .iter()
        .find(|m| m.points > points)
        .unwrap_or_else(|| ladder.last())
        .clone();
    let current_tier = milestones.iter().rev().find(|m| m.points <= points).cloned();

    // A zero threshold can only be "next" when it is also the last one.
    let progress_percent = if next_milestone.points == 0 {
        0.0
    } else {
        (points as f64 / next_milestone.points as f64 * 100.0).min(100.0) as f32
    };

    Progress {
        points,
        current_tier,
        points_remaining: next_milestone.points.saturating_sub(points),
        next_milestone,
        progress_percent,
    }
}

/// Every milestone with its achieved flag, in ladder order.
pub fn milestone_states(points: u64, ladder: &MilestoneLadder) -> Vec<MilestoneState<'_>> {
    ladder
        .milestones()
        .iter()
        .map(|milestone| MilestoneState {
            milestone,
            achieved: points >= milestone.points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> MilestoneLadder {
        MilestoneLadder::canteen_default()
    }

    #[test]
    fn test_zero_points() {
        let p = compute_progress(0, &ladder());
        assert_eq!(p.next_milestone.points, 10);
        assert_eq!(p.progress_percent, 0.0);
        assert_eq!(p.points_remaining, 10);
        assert!(p.current_tier.is_none());
        assert_eq!(p.headline(), "10 points lagi untuk mendapat Free Drink");
    }

    #[test]
    fn test_between_milestones() {
        let p = compute_progress(75, &ladder());
        assert_eq!(p.current_tier.as_ref().unwrap().points, 50);
        assert_eq!(p.next_milestone.points, 100);
        assert_eq!(p.progress_percent, 75.0);
        assert_eq!(p.points_remaining, 25);
    }

    #[test]
    fn test_exactly_on_threshold_moves_to_next() {
        let p = compute_progress(50, &ladder());
        assert_eq!(p.current_tier.as_ref().unwrap().label, "10% Voucher");
        assert_eq!(p.next_milestone.points, 100);
        assert_eq!(p.progress_percent, 50.0);
    }

    #[test]
    fn test_beyond_last_milestone() {
        let p = compute_progress(300, &ladder());
        assert_eq!(p.next_milestone.points, 250);
        assert_eq!(p.current_tier.as_ref().unwrap().points, 250);
        assert_eq!(p.progress_percent, 100.0);
        assert_eq!(p.points_remaining, 0);
        assert!(p.all_achieved());
        assert_eq!(p.headline(), "Semua milestone tercapai! 🎉");
    }

    #[test]
    fn test_far_beyond_and_single_milestone() {
        let single = MilestoneLadder::new(vec![Milestone::new(5, "Only", "*")]).unwrap();
        let p = compute_progress(u64::MAX, &single);
        assert_eq!(p.next_milestone.points, 5);
        assert_eq!(p.progress_percent, 100.0);
        assert_eq!(p.points_remaining, 0);

        let p = compute_progress(2, &single);
        assert_eq!(p.progress_percent, 40.0);
        assert_eq!(p.points_remaining, 3);
    }

    #[test]
    fn test_zero_threshold_guard() {
        let zero = MilestoneLadder::new(vec![Milestone::new(0, "Welcome", "👋")]).unwrap();
        let p = compute_progress(0, &zero);
        assert_eq!(p.progress_percent, 0.0);
        assert_eq!(p.points_remaining, 0);
        assert_eq!(p.current_tier.unwrap().label, "Welcome");

        let with_zero = MilestoneLadder::new(vec![
            Milestone::new(0, "Welcome", "👋"),
            Milestone::new(10, "Drink", "🥤"),
        ])
        .unwrap();
        let p = compute_progress(0, &with_zero);
        assert_eq!(p.next_milestone.points, 10);
        assert_eq!(p.progress_percent, 0.0);
    }

    #[test]
    fn test_percent_always_in_range() {
        let ladder = ladder();
        for points in (0..600).chain([u64::MAX / 2, u64::MAX]) {
            let p = compute_progress(points, &ladder);
            assert!((0.0..=100.0).contains(&p.progress_percent), "points {points}");
            assert!(p.points_remaining <= p.next_milestone.points);
        }
    }

    #[test]
    fn test_milestone_states() {
        let ladder = ladder();
        let achieved: Vec<bool> = milestone_states(100, &ladder).iter().map(|s| s.achieved).collect();
        assert_eq!(achieved, vec![true, true, true, false]);
    }
}
