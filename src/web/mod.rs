//! Web API module for Cumulus.
//!
//! Exposes the file storage service over HTTP: credential exchange on
//! `/login` and `/logout`, and token-authenticated file operations on
//! `/file` and `/list`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use error::ApiError;
pub use handlers::AppState;
pub use middleware::{AuthUser, AUTH_TOKEN_HEADER};
pub use router::create_router;
