//! The logged-in member and its persistence.

use canteen_core::{Member, MemberId};
use canteen_storage::{SessionStore, SESSION_KEY};
use tracing::{debug, warn};

use crate::error::{AccountError, Result};

/// A logged-in member.
///
/// Holds the member record as it was at login. Live point balances come
/// from the store, not from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    member: Member,
}

impl Session {
    /// Start a session for a member.
    pub fn new(member: Member) -> Self {
        Self { member }
    }

    /// Member record captured at login.
    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Logged-in member's id.
    pub fn member_id(&self) -> &MemberId {
        &self.member.id
    }
}

/// Reads and writes the session under [`SESSION_KEY`].
pub struct SessionManager<K: SessionStore> {
    store: K,
}

impl<K: SessionStore> SessionManager<K> {
    /// Wrap a key-value store.
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Load the persisted session.
    ///
    /// A value that does not decode is purged and treated as no session.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let Some(raw) = self.store.read(SESSION_KEY).await? else {
            debug!("no persisted session");
            return Ok(None);
        };

        match decode(&raw) {
            Ok(session) => {
                debug!(member = %session.member_id(), "session restored");
                Ok(Some(session))
            }
            Err(e) => {
                warn!(error = %e, "failed to parse saved member session, purging");
                self.store.remove(SESSION_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Persist a session, replacing any previous one.
    pub async fn persist(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session.member()).map_err(AccountError::MalformedSession)?;
        self.store.write(SESSION_KEY, &raw).await?;
        Ok(())
    }

    /// Remove the persisted session.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_KEY).await?;
        Ok(())
    }
}

fn decode(raw: &str) -> Result<Session> {
    let member: Member = serde_json::from_str(raw).map_err(AccountError::MalformedSession)?;
    Ok(Session::new(member))
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_core::{BirthDate, Gender, Profile};
    use canteen_storage::FileSessionStore;

    fn member() -> Member {
        Member {
            id: MemberId::new(),
            full_name: "Rina".to_string(),
            gender: Gender::Perempuan,
            date_of_birth: BirthDate::parse("09-09-2003").unwrap(),
            email: "rina@example.com".to_string(),
            profile: Profile::Mahasiswa {
                phone_number: "+62855".to_string(),
                faculty: "Ilmu Kesehatan".to_string(),
                major: "D3 Kebidanan".to_string(),
                residence: "Apartemen Mahasiswa".to_string(),
            },
            points: 3,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_persist_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionManager::new(FileSessionStore::new(dir.path()).await.unwrap());

        assert!(sessions.restore().await.unwrap().is_none());

        let session = Session::new(member());
        sessions.persist(&session).await.unwrap();
        assert_eq!(sessions.restore().await.unwrap(), Some(session));

        sessions.clear().await.unwrap();
        assert!(sessions.restore().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_session_is_purged() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).await.unwrap();
        store.write(SESSION_KEY, "{not json").await.unwrap();

        let sessions = SessionManager::new(store);
        assert!(sessions.restore().await.unwrap().is_none());

        let raw = FileSessionStore::new(dir.path()).await.unwrap();
        assert!(raw.read(SESSION_KEY).await.unwrap().is_none());
    }

    #[test]
    fn test_decode_reports_malformed() {
        assert!(matches!(decode("[]"), Err(AccountError::MalformedSession(_))));
    }
}
