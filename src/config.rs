//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `MONGO_URI` (required): MongoDB connection string
/// - `MONGO_DB` (optional): database name, defaults to `programming_quotes`
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `JWT_SECRET` (required): symmetric key used to sign bearer tokens
/// - `JWT_ISSUER` (optional): `iss` claim value, defaults to `programming-quotes-api`
/// - `JWT_AUDIENCE` (optional): `aud` claim value, defaults to `programming-quotes-api`
/// - `JWT_VALIDATE_ISSUER` (optional): verify `iss` on incoming tokens, defaults to true
/// - `JWT_VALIDATE_AUDIENCE` (optional): verify `aud` on incoming tokens, defaults to true
/// - `JWT_TTL_SECS` (optional): token lifetime in seconds, defaults to one week
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mongo_uri: String,

    #[serde(default = "default_mongo_db")]
    pub mongo_db: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub jwt_secret: String,

    #[serde(default = "default_token_party")]
    pub jwt_issuer: String,

    #[serde(default = "default_token_party")]
    pub jwt_audience: String,

    #[serde(default = "default_true")]
    pub jwt_validate_issuer: bool,

    #[serde(default = "default_true")]
    pub jwt_validate_audience: bool,

    #[serde(default = "default_token_ttl")]
    pub jwt_ttl_secs: i64,
}

/// Default database name if MONGO_DB is not set.
fn default_mongo_db() -> String {
    "programming_quotes".to_string()
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

/// Default issuer and audience if not set explicitly.
fn default_token_party() -> String {
    "programming-quotes-api".to_string()
}

fn default_true() -> bool {
    true
}

/// Default token lifetime: one week.
fn default_token_ttl() -> i64 {
    604_800
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., MONGO_URI, JWT_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: mongo_uri -> MONGO_URI
        envy::from_env::<Config>()
    }
}
