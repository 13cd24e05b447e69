//! Application context carrying the store and the current session.

use std::sync::Arc;

use canteen_core::{Member, RegistrationForm};
use canteen_storage::{MemberStore, SessionStore};
use tracing::info;

use crate::error::{AccountError, Result};
use crate::manager::{AccountManager, BasicAccountManager};
use crate::session::{Session, SessionManager};

/// Everything a request needs: the member store, account operations, and
/// the logged-in member if any.
///
/// Created once at startup from the persisted session; `logout` ends it.
pub struct AppContext<S: MemberStore, K: SessionStore> {
    storage: Arc<S>,
    accounts: BasicAccountManager<S>,
    sessions: SessionManager<K>,
    session: Option<Session>,
}

impl<S: MemberStore + 'static, K: SessionStore> AppContext<S, K> {
    /// Build the context and restore any persisted session.
    pub async fn start(storage: Arc<S>, session_store: K) -> Result<Self> {
        let sessions = SessionManager::new(session_store);
        let session = sessions.restore().await?;

        Ok(Self {
            accounts: BasicAccountManager::new(Arc::clone(&storage)),
            storage,
            sessions,
            session,
        })
    }

    /// Shared member store.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Current session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current session, or [`AccountError::NotLoggedIn`].
    pub fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(AccountError::NotLoggedIn)
    }

    /// Register a new member. Does not log them in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Member> {
        self.accounts.register(form).await
    }

    /// Log in and persist the session.
    pub async fn login(&mut self, full_name: &str, date_of_birth: &str) -> Result<&Session> {
        let member = self.accounts.login(full_name, date_of_birth).await?;
        let session = Session::new(member);
        self.sessions.persist(&session).await?;
        Ok(&*self.session.insert(session))
    }

    /// End the session and remove it from persistence.
    pub async fn logout(&mut self) -> Result<()> {
        self.sessions.clear().await?;
        if let Some(session) = self.session.take() {
            info!(member = %session.member_id(), "member logged out");
        }
        Ok(())
    }
}
