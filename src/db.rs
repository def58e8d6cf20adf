//! Database connection and startup index management.
//!
//! This module provides utilities for:
//! - Creating a pooled MongoDB client and selecting the application database
//! - Creating the indexes the application relies on at startup

use mongodb::{
    Client, Database, IndexModel,
    bson::doc,
    options::{ClientOptions, IndexOptions},
};

/// Connect to MongoDB and select the application database.
///
/// The driver maintains an internal connection pool that is reused across
/// HTTP requests, which is much more efficient than opening a new connection
/// for each operation.
///
/// # Arguments
///
/// * `uri` - MongoDB connection string
/// * `db_name` - Name of the database holding the application collections
///
/// # Configuration
///
/// - Maximum pool size: 5 connections
/// - Connections are established lazily as operations are issued
/// - Idle connections are kept alive for reuse
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed. Connectivity
/// problems surface later, on the first operation that needs the server.
pub async fn connect(uri: &str, db_name: &str) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(uri).await?;
    // Limit concurrent connections
    options.max_pool_size = Some(5);

    let client = Client::with_options(options)?;
    Ok(client.database(db_name))
}

/// Create the indexes the application depends on.
///
/// Runs at startup, before the server accepts requests. Index creation is
/// idempotent on the server side, so restarting the process is safe.
///
/// # Indexes
///
/// - `users.username`: unique, backing the registration conflict check
///
/// # Errors
///
/// Returns an error if the store is unreachable or rejects the index
/// specification.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let unique_username = IndexModel::builder()
        .keys(doc! { "username": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    db.collection::<mongodb::bson::Document>("users")
        .create_index(unique_username)
        .await?;

    Ok(())
}
