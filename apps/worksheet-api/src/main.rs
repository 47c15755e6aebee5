//! Worksheet API Server - Backend for math worksheet generation
//!
//! Provides REST endpoints for:
//! - Extracting worksheet markup from photographed pages
//! - Compiling reviewed markup to printable PDFs
//! - Regenerating "variant 2" worksheets
//! - Generation history

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod models;
mod state;

use state::{AppConfig, AppState};

/// Uploads are page photos; a handful of camera images fit well under this.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("worksheet_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Initialize application state
    info!("Initializing worksheet API...");
    let config = AppConfig::from_env();
    let state = AppState::new(&config).await?;
    let state = Arc::new(state);

    // Generated PDFs are served straight from the output directory
    tokio::fs::create_dir_all(&config.output_dir).await?;

    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Extraction and regeneration
        .route("/api/process", post(handlers::process))
        .route("/api/generate_similar", post(handlers::generate_similar))
        // PDF assembly
        .route("/api/compile", post(handlers::compile))
        // Generation history
        .route("/api/history", get(handlers::history))
        // Generated PDFs and the front-end shell
        .nest_service("/generated", ServeDir::new(&config.output_dir))
        .fallback_service(ServeDir::new(&config.static_dir))
        // Add middleware
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting worksheet API on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
