//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They translate between wire-format payloads and stored documents and
//! own all collection access.

pub mod auth_service;
pub mod author_service;
pub mod movie_service;
pub mod quote_service;
pub mod user_service;

use mongodb::bson::oid::ObjectId;

use crate::error::AppError;

/// Parse a path identifier into an ObjectId.
///
/// Malformed input becomes a structured 400 instead of surfacing as an
/// unhandled fault.
pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_hex_parses() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
    }

    #[test]
    fn malformed_identifiers_become_bad_requests() {
        for raw in ["", "abc", "507f1f77bcf86cd79943901g"] {
            match parse_object_id(raw) {
                Err(AppError::InvalidId(value)) => assert_eq!(value, raw),
                other => panic!("expected InvalidId for {raw}, got {other:?}"),
            }
        }
    }
}
