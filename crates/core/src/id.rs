//! Unique identifiers for canteen entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a Member document.
///
/// Fresh ids are ULIDs. Ids are kept as strings so documents written under
/// older naming schemes (`<FullName>_<suffix>`) still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Generate a new MemberId
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Wrap an existing document id.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label derived from the id alone: everything before the first `_`.
    ///
    /// Used when a record references a member that is not in the roster.
    pub fn fallback_label(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for MemberId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = MemberId::new();
        let b = MemberId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 26);
    }

    #[test]
    fn test_fallback_label() {
        assert_eq!(MemberId::from("AhmadFauzi_1717171717").fallback_label(), "AhmadFauzi");
        assert_eq!(MemberId::from("NoSeparator").fallback_label(), "NoSeparator");
        assert_eq!(MemberId::from("_leading").fallback_label(), "");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = MemberId::from("Siti_+6281234");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Siti_+6281234\"");
    }
}
