//! Programming Quotes API - Main Application Entry Point
//!
//! This is a REST API server for browsing and managing programming quotes. Reading is open to everyone; creating, updating, and deleting requires a bearer token obtained with a username and password.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: MongoDB with the official async driver
//! - **Authentication**: JWT bearer tokens, Argon2 password hashes
//! - **Documentation**: OpenAPI with Swagger UI at /docs
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database handle (connections open lazily)
//! 3. Ensure the unique username index exists
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

use programming_quotes_api::{
    AppState, app, config::Config, db, services::auth_service::AuthService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database handle
    let db = db::connect(&config.mongo_uri, &config.mongo_db).await?;
    tracing::info!("Database handle created");

    // Ensure indexes
    db::ensure_indexes(&db).await?;
    tracing::info!("Database indexes ensured");

    // Prepare the token service and shared state
    let auth = AuthService::new(&config)?;
    let state = AppState::new(db, auth);

    // Build the router
    let app = app(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
