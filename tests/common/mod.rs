//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use cumulus::auth::AuthService;
use cumulus::file::{BlobStore, FileStore};
use cumulus::web::{create_router, AppState};
use cumulus::Database;

/// Create a test server backed by an in-memory database and a temporary
/// blob directory. The TempDir must be kept alive for the server's
/// lifetime.
pub async fn create_test_server() -> (TestServer, TempDir) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blobs = BlobStore::new(temp_dir.path()).expect("Failed to create blob store");

    let auth = Arc::new(AuthService::new(db.clone()));
    let files = Arc::new(FileStore::new(db, blobs));
    let router = create_router(AppState::new(auth, files));

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, temp_dir)
}

/// Register a user through the API.
pub async fn register_user(server: &TestServer, login: &str, password: &str) -> Value {
    server
        .post("/register")
        .json(&json!({
            "login": login,
            "password": password
        }))
        .await
        .json::<Value>()
}

/// Register and log in, returning the session token.
pub async fn login_user(server: &TestServer, login: &str, password: &str) -> String {
    register_user(server, login, password).await;

    let response = server
        .post("/login")
        .json(&json!({
            "login": login,
            "password": password
        }))
        .await;

    response.json::<Value>()["auth-token"]
        .as_str()
        .expect("login response missing auth-token")
        .to_string()
}
