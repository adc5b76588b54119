use std::sync::Arc;

use tracing::info;

use cumulus::auth::AuthService;
use cumulus::file::{BlobStore, FileStore};
use cumulus::web::{create_router, AppState};
use cumulus::{Config, Database};

#[tokio::main]
async fn main() -> cumulus::Result<()> {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = cumulus::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        cumulus::logging::init_console_only(&config.logging.level);
    }

    info!("Cumulus file storage service");

    let db = Database::open(&config.database.path).await?;

    let blobs = BlobStore::new(&config.storage.path)?;

    let auth = Arc::new(AuthService::new(db.clone()));
    let files = Arc::new(FileStore::new(db, blobs));
    let app = create_router(AppState::new(auth, files));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
