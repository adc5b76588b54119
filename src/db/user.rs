//! User model for Cumulus.

use chrono::{DateTime, Utc};

/// User entity representing a registered user.
///
/// The password field holds an Argon2id PHC hash, never plaintext.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login name (unique).
    pub login: String,
    /// Argon2id password hash.
    pub password: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub login: String,
    /// Argon2id password hash.
    pub password: String,
}

impl NewUser {
    /// Create a new NewUser with an already-hashed password.
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password_hash.into(),
        }
    }
}
