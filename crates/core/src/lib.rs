//! Canteen loyalty core data models.
//!
//! Members, the milestone reward ladder and the monthly competition
//! records that the leaderboard is built from.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Members and registration
pub mod catalog;
mod member;
mod registration;

// Rewards and competition
mod milestone;
mod competition;

// Re-exports
pub use id::MemberId;
pub use error::{CoreError, Result};

pub use member::{
    format_birth_date, normalize_name, normalize_phone, validate_email, BirthDate, Category,
    Gender, Member, Profile, PHONE_PREFIX,
};
pub use registration::{RegistrationForm, ValidRegistration};

pub use milestone::{Milestone, MilestoneLadder};
pub use competition::{records_from_document, records_to_document, CompetitionRecord, Period};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
