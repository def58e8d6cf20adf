//! Data models representing stored documents and API payloads.
//!
//! This module contains all data structures that map to store collections,
//! plus the request/response types derived from them.

/// Author documents and API types
pub mod author;
/// Quote documents and API types
pub mod quote;
/// User documents, roles, and JWT claims
pub mod user;
