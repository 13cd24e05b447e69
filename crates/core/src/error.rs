//! Errors raised while building or validating core values.

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced by the core data model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A required form field was left empty.
    #[error("Field {0} wajib diisi")]
    MissingField(&'static str),

    /// A field value is not one of the allowed options.
    #[error("Nilai tidak valid untuk {field}: {value}")]
    InvalidOption {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: String,
    },

    /// Date of birth is not a real `dd-mm-yyyy` date.
    #[error("Tanggal lahir tidak valid: {0} (format dd-mm-yyyy)")]
    InvalidBirthDate(String),

    /// Email address failed the shape check.
    #[error("Email tidak valid: {0}")]
    InvalidEmail(String),

    /// Phone number has no digits after the country prefix.
    #[error("Nomor HP tidak valid: {0}")]
    InvalidPhone(String),

    /// Period key is not `yyyy-mm`.
    #[error("Periode tidak valid: {0} (format yyyy-mm)")]
    InvalidPeriod(String),

    /// Milestone ladder is empty or not strictly ascending.
    #[error("Milestone ladder invalid: {0}")]
    InvalidLadder(String),
}
