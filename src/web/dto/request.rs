//! Request DTOs.

use serde::Deserialize;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// User login.
    pub login: String,
    /// Plain-text password.
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired login.
    pub login: String,
    /// Plain-text password.
    pub password: String,
}

/// Rename request body for PUT /file.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    /// New filename.
    pub filename: String,
}

/// Query parameters selecting a file by name.
#[derive(Debug, Deserialize)]
pub struct FilenameQuery {
    /// Target filename.
    pub filename: String,
}

/// Query parameters for GET /list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Maximum number of entries to return.
    pub limit: Option<usize>,
}
