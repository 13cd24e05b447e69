//! Account management service.

use std::sync::Arc;

use async_trait::async_trait;
use canteen_core::{normalize_name, BirthDate, Member, MemberId, RegistrationForm};
use canteen_storage::{MemberStore, StorageError};
use tracing::{info, warn};

use crate::error::{AccountError, Result};

/// Account management service.
#[async_trait]
pub trait AccountManager: Send + Sync {
    /// Register a new member from a submitted form.
    async fn register(&self, form: &RegistrationForm) -> Result<Member>;

    /// Find the member identified by full name and birth date.
    async fn login(&self, full_name: &str, date_of_birth: &str) -> Result<Member>;
}

/// Account manager backed by a [`MemberStore`].
pub struct BasicAccountManager<S: MemberStore> {
    storage: Arc<S>,
}

impl<S: MemberStore> BasicAccountManager<S> {
    /// Create a new account manager.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: MemberStore + 'static> AccountManager for BasicAccountManager<S> {
    async fn register(&self, form: &RegistrationForm) -> Result<Member> {
        let registration = form.validate()?;
        let member = registration.into_member(MemberId::new(), chrono::Utc::now());

        match self.storage.insert_unique_identity(&member).await {
            Ok(()) => {}
            Err(StorageError::Conflict(_)) => {
                warn!(name = %member.full_name, "registration rejected, identity taken");
                return Err(AccountError::AlreadyRegistered);
            }
            Err(e) => return Err(e.into()),
        }

        info!(member = %member.id, category = %member.category(), "member registered");
        Ok(member)
    }

    async fn login(&self, full_name: &str, date_of_birth: &str) -> Result<Member> {
        let date_of_birth = BirthDate::parse(date_of_birth)?;
        let full_name = normalize_name(full_name);
        let matches = self.storage.find_members(&full_name, &date_of_birth).await?;

        // First match wins, as with the hosted query.
        let member = matches.into_iter().next().ok_or(AccountError::NotFound)?;
        info!(member = %member.id, "member logged in");
        Ok(member)
    }
}
