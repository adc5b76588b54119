//! Router configuration for the Cumulus API.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    delete_file, download_file, list_files, login, logout, register, rename_file, upload_file,
    AppState,
};

/// Create the main API router.
///
/// `/login` and `/register` are open; every other route authenticates
/// the `auth-token` header before running.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route(
            "/file",
            post(upload_file)
                .get(download_file)
                .put(rename_file)
                .delete(delete_file),
        )
        .route("/list", get(list_files))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
