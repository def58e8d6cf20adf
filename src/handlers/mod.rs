//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (database queries, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Author management endpoints
pub mod authors;
/// Health check endpoint
pub mod health;
/// Legacy movie deletion endpoint
pub mod movies;
/// Quote management endpoints
pub mod quotes;
/// Registration, token issuance, and user management endpoints
pub mod users;
