//! Ludex - conversational game catalog service
//!
//! A Rust backend implementing a conversation state machine for
//! searching a game catalog with per-user favorites and history.

mod api;
mod catalog;
mod config;
mod db;
mod session;
mod state_machine;

use api::{create_router, AppState};
use catalog::SteamCatalog;
use config::Config;
use db::Database;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ludex=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %config.db_path, "Opening database");
    let db = Database::open(&config.db_path)?;

    // Initialize catalog client
    if config.catalog_api_key.is_empty() {
        tracing::warn!("CATALOG_API_KEY not set. Catalog searches will return no results.");
    }
    let catalog = Arc::new(SteamCatalog::new(
        &config.catalog_base_url,
        config.catalog_api_key.clone(),
        config.catalog_api_host.clone(),
    ));

    // Create application state
    let state = AppState::new(db, catalog);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Ludex server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
