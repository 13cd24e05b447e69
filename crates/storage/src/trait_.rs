//! Storage trait abstraction.

use async_trait::async_trait;
use canteen_core::{BirthDate, CompetitionRecord, Member, MemberId, Period};

use crate::subscription::MemberSubscription;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Create-only write hit an existing document
    #[error("Already exists: {0}")]
    Conflict(String),
}

/// Document store holding the member roster and the monthly competition
/// sheets.
///
/// Implementations use interior mutability so one store can be shared
/// between the request path and live subscriptions.
#[async_trait]
pub trait MemberStore: Send + Sync {
    // === Member operations ===

    /// Members whose full name and birth date both match exactly.
    async fn find_members(&self, full_name: &str, date_of_birth: &BirthDate) -> Result<Vec<Member>>;

    /// Load a member by ID.
    async fn load_member(&self, id: &MemberId) -> Result<Option<Member>>;

    /// Every registered member.
    async fn list_members(&self) -> Result<Vec<Member>>;

    /// Insert a new member. Fails with [`StorageError::Conflict`] if the id
    /// is taken; existing documents are never overwritten.
    async fn insert_member(&self, member: &Member) -> Result<()>;

    /// Insert a new member unless one with the same full name and birth
    /// date already exists. The identity check and the insert happen as one
    /// step, so concurrent registrations of one identity cannot both land.
    /// Fails with [`StorageError::Conflict`] otherwise.
    async fn insert_unique_identity(&self, member: &Member) -> Result<()>;

    /// Add points to a member's balance and publish the updated document
    /// to subscribers. This is the point-of-sale integration's entry point.
    async fn award_points(&self, id: &MemberId, points: u64) -> Result<Member>;

    // === Competition operations ===

    /// Records for a period, in document order. `None` if the period has no
    /// sheet yet.
    async fn load_competition(&self, period: Period) -> Result<Option<Vec<CompetitionRecord>>>;

    /// Replace a period's sheet with an export from the point-of-sale system.
    async fn save_competition(&self, period: Period, records: &[CompetitionRecord]) -> Result<()>;

    // === Live updates ===

    /// Watch one member document. The subscription starts with the current
    /// document and is released when dropped.
    async fn subscribe(&self, id: &MemberId) -> Result<MemberSubscription>;
}
