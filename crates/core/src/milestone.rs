//! Milestones - point thresholds that unlock rewards.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A reward unlocked once a member's accrued points reach `points`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Point threshold
    pub points: u64,

    /// Reward label
    pub label: String,

    /// Display icon
    pub icon: String,
}

impl Milestone {
    /// Create a milestone.
    pub fn new(points: u64, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            points,
            label: label.into(),
            icon: icon.into(),
        }
    }
}

/// A non-empty list of milestones, strictly ascending by threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MilestoneLadder(Vec<Milestone>);

impl MilestoneLadder {
    /// Build a ladder, rejecting empty or unordered input.
    pub fn new(milestones: Vec<Milestone>) -> Result<Self> {
        if milestones.is_empty() {
            return Err(CoreError::InvalidLadder("no milestones".to_string()));
        }
        if let Some(pair) = milestones.windows(2).find(|w| w[0].points >= w[1].points) {
            return Err(CoreError::InvalidLadder(format!(
                "threshold {} is not above {}",
                pair[1].points, pair[0].points
            )));
        }
        Ok(Self(milestones))
    }

    /// The canteen's reward ladder.
    pub fn canteen_default() -> Self {
        Self(vec![
            Milestone::new(10, "Free Drink", "🥤"),
            Milestone::new(50, "10% Voucher", "🎟️"),
            Milestone::new(100, "50k Voucher", "💰"),
            Milestone::new(250, "Free Lunch + Merch", "🎁"),
        ])
    }

    /// Milestones in ascending order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.0
    }

    /// Lowest milestone.
    pub fn first(&self) -> &Milestone {
        &self.0[0]
    }

    /// Highest milestone.
    pub fn last(&self) -> &Milestone {
        &self.0[self.0.len() - 1]
    }

    /// Number of milestones (never zero).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MilestoneLadder {
    fn default() -> Self {
        Self::canteen_default()
    }
}

impl<'de> Deserialize<'de> for MilestoneLadder {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let milestones = Vec::<Milestone>::deserialize(deserializer)?;
        MilestoneLadder::new(milestones).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ladder() {
        let ladder = MilestoneLadder::default();
        let thresholds: Vec<u64> = ladder.milestones().iter().map(|m| m.points).collect();
        assert_eq!(thresholds, vec![10, 50, 100, 250]);
        assert_eq!(ladder.last().label, "Free Lunch + Merch");
    }

    #[test]
    fn test_rejects_empty_and_unordered() {
        assert!(MilestoneLadder::new(vec![]).is_err());
        assert!(MilestoneLadder::new(vec![
            Milestone::new(50, "b", ""),
            Milestone::new(10, "a", ""),
        ])
        .is_err());
        assert!(MilestoneLadder::new(vec![
            Milestone::new(10, "a", ""),
            Milestone::new(10, "dup", ""),
        ])
        .is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: MilestoneLadder =
            serde_json::from_str(r#"[{"points":5,"label":"x","icon":"*"}]"#).unwrap();
        assert_eq!(ok.len(), 1);

        let bad = serde_json::from_str::<MilestoneLadder>("[]");
        assert!(bad.is_err());
    }
}
