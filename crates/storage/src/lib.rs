//! Storage abstraction and implementations for the canteen loyalty system.
//!
//! This crate provides a trait-based document store interface with a
//! JSON-file reference implementation, live member subscriptions, and the
//! session key-value store.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod subscription;
pub mod session;

pub use trait_::{MemberStore, StorageError, Result};
pub use json_storage::JsonStorage;
pub use subscription::{MemberSubscription, SubscriptionRegistry};
pub use session::{FileSessionStore, SessionStore, SESSION_KEY};
