//! API handlers for Cumulus.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::file::FileStore;

pub mod auth;
pub mod file;

pub use auth::*;
pub use file::*;

/// Shared application state for the API.
#[derive(Clone)]
pub struct AppState {
    /// Authentication and session service.
    pub auth: Arc<AuthService>,
    /// File metadata and blob service.
    pub files: Arc<FileStore>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(auth: Arc<AuthService>, files: Arc<FileStore>) -> Self {
        Self { auth, files }
    }
}
