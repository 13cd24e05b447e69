//! Monthly competition records produced by the point-of-sale system.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::id::MemberId;

const MONTHS_ID: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

/// A calendar month scoping one set of competition records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Build a period, validating the month.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(CoreError::InvalidPeriod(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    /// The current month in UTC.
    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month, 1-based
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Document key, `yyyy-mm`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Human label such as `Oktober 2026`.
    pub fn label(&self) -> String {
        format!("{} {}", MONTHS_ID[(self.month - 1) as usize], self.year)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Period::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One member's statistics for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRecord {
    /// Member the record belongs to
    pub member_id: MemberId,

    /// Total spent in the period
    pub amount_spent: u64,

    /// Points earned in the period
    pub points: u64,

    /// Number of transactions in the period
    pub transaction_count: u64,
}

impl CompetitionRecord {
    /// Create a record.
    pub fn new(member_id: impl Into<MemberId>, points: u64) -> Self {
        Self {
            member_id: member_id.into(),
            amount_spent: 0,
            points,
            transaction_count: 0,
        }
    }

    /// Read one entry of a period document. Missing or non-numeric
    /// statistics count as zero.
    pub fn from_entry(member_id: &str, stats: &Value) -> Self {
        Self {
            member_id: MemberId::from_raw(member_id),
            amount_spent: lenient_u64(stats.get("amountSpent")),
            points: lenient_u64(stats.get("customerPoints")),
            transaction_count: lenient_u64(stats.get("numberOfTransaction")),
        }
    }

    /// The statistics object stored under the member id.
    pub fn to_entry(&self) -> Value {
        serde_json::json!({
            "amountSpent": self.amount_spent,
            "customerPoints": self.points,
            "numberOfTransaction": self.transaction_count,
        })
    }
}

/// Parse a whole period document, keeping the document's field order.
pub fn records_from_document(document: &Map<String, Value>) -> Vec<CompetitionRecord> {
    document
        .iter()
        .map(|(member_id, stats)| CompetitionRecord::from_entry(member_id, stats))
        .collect()
}

/// Build a period document from records. Later duplicates overwrite earlier ones.
pub fn records_to_document(records: &[CompetitionRecord]) -> Map<String, Value> {
    records
        .iter()
        .map(|r| (r.member_id.as_str().to_string(), r.to_entry()))
        .collect()
}

fn lenient_u64(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.round() as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_and_format() {
        let p: Period = "2026-03".parse().unwrap();
        assert_eq!(p.year(), 2026);
        assert_eq!(p.month(), 3);
        assert_eq!(p.key(), "2026-03");
        assert_eq!(p.label(), "Maret 2026");

        assert!("2026-13".parse::<Period>().is_err());
        assert!("2026-3".parse::<Period>().is_err());
        assert!("march".parse::<Period>().is_err());
    }

    #[test]
    fn test_current_period_has_key_shape() {
        let key = Period::current().key();
        assert_eq!(key.len(), 7);
        assert_eq!(&key[4..5], "-");
    }

    #[test]
    fn test_entry_defaults_missing_fields() {
        let stats = serde_json::json!({ "customerPoints": 12, "amountSpent": "oops" });
        let record = CompetitionRecord::from_entry("Budi_1700000000", &stats);
        assert_eq!(record.points, 12);
        assert_eq!(record.amount_spent, 0);
        assert_eq!(record.transaction_count, 0);
    }

    #[test]
    fn test_document_keeps_field_order() {
        let doc: Map<String, Value> = serde_json::from_str(
            r#"{"zeta": {"customerPoints": 1}, "alpha": {"customerPoints": 2}, "mid": {}}"#,
        )
        .unwrap();
        let ids: Vec<String> = records_from_document(&doc)
            .into_iter()
            .map(|r| r.member_id.to_string())
            .collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_document_from_records() {
        let mut record = CompetitionRecord::new("a", 30);
        record.amount_spent = 45_000;
        record.transaction_count = 3;
        let doc = records_to_document(&[record.clone()]);
        assert_eq!(doc["a"]["customerPoints"], 30);
        assert_eq!(records_from_document(&doc), vec![record]);
    }
}
