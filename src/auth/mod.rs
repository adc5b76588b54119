//! Authentication module for Cumulus.
//!
//! Provides password hashing, session token management, and the
//! authentication service combining them.

mod password;
mod service;
mod session;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use service::AuthService;
pub use session::SessionManager;
