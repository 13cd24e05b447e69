//! Account errors. Messages are shown to the member as-is.

use canteen_core::CoreError;
use canteen_storage::StorageError;

/// Result alias for account operations.
pub type Result<T> = std::result::Result<T, AccountError>;

/// Errors surfaced by registration, login and session handling.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// No member matches the login query.
    #[error("Member tidak ditemukan. Pastikan nama dan tanggal lahir sudah sesuai.")]
    NotFound,

    /// Form input was rejected.
    #[error("{0}")]
    Validation(#[from] CoreError),

    /// A member with the same name and birth date already exists.
    #[error("Member dengan nama dan tanggal lahir ini sudah terdaftar.")]
    AlreadyRegistered,

    /// The store could not be reached or refused the request.
    #[error("Terjadi kesalahan, silakan coba lagi. ({0})")]
    Unavailable(#[from] StorageError),

    /// The persisted session could not be decoded.
    #[error("Sesi tersimpan tidak valid: {0}")]
    MalformedSession(#[source] serde_json::Error),

    /// The operation needs a logged-in member.
    #[error("Silakan login terlebih dahulu.")]
    NotLoggedIn,
}
