//! Key-value persistence for the logged-in member's session.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{Result, StorageError};

/// Fixed key the session document is stored under.
pub const SESSION_KEY: &str = "canteen_member_session";

/// Opaque string storage consulted once at startup.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` if absent.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key inside a directory.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Open the store, creating `dir` if needed.
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(StorageError::NotFound(format!("session key {key}")));
        }
        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)?).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key)?, value.as_bytes()).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        fs::remove_file(self.key_path(key)?).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}
