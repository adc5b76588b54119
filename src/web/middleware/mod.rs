//! Middleware for the Cumulus API.

pub mod auth;

pub use auth::{AuthUser, AUTH_TOKEN_HEADER};
