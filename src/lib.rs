//! Cumulus - per-user file storage service
//!
//! A small HTTP file storage service: users log in for a session token and
//! upload, list, rename, download, and delete files in their own namespace.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, AuthService, PasswordError, SessionManager,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{CumulusError, Result};
pub use file::{validate_filename, BlobStore, FileRecord, FileStore};
pub use web::{create_router, AppState};
