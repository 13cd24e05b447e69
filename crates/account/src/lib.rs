//! Member accounts.
//!
//! Registration, login by identity match, and the session that carries the
//! logged-in member through the application.

#![warn(missing_docs)]

pub mod error;
pub mod manager;
pub mod session;
pub mod context;

pub use error::{AccountError, Result};
pub use manager::{AccountManager, BasicAccountManager};
pub use session::{Session, SessionManager};
pub use context::AppContext;
