//! Points progress and leaderboards.
//!
//! Milestone progress for a single member, per-category monthly rankings,
//! and a store-backed tracker tying both to live data.

#![warn(missing_docs)]

pub mod milestones;
pub mod leaderboard;
pub mod tracker;

pub use milestones::{compute_progress, milestone_states, MilestoneState, Progress};
pub use leaderboard::{
    build_roster, rank_leaderboard, RankedEntry, Ranking, Roster, UnresolvedEntry,
};
pub use tracker::{BasicProgressTracker, MemberProgress, ProgressTracker, ProgressWatch};
