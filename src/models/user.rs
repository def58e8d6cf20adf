//! User data models, roles, and JWT claims.
//!
//! This module defines:
//! - `User`: Stored document representing a registered user
//! - `Role`: Authorization role carried in tokens and user documents
//! - `Claims`: JWT claims payload
//! - Request/response types for registration, token issuance, and user CRUD

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authorization role attached to every user.
///
/// Stored lowercase in both user documents and token claims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May manage any record, including other users and their roles
    Admin,
    /// May manage quotes and authors, and their own user record
    #[default]
    Editor,
}

/// Represents a user document from the store.
///
/// # Collection
///
/// Maps to the `users` collection. `username` carries a unique index,
/// created at startup.
///
/// # Credential Storage
///
/// Passwords are stored as Argon2 hashes. The hash is never serialized
/// into API responses; `UserResponse` omits it entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Unique login name
    pub username: String,

    /// Argon2 hash of the user's password
    pub password_hash: String,

    /// Authorization role
    #[serde(default)]
    pub role: Role,

    /// Timestamp when the user registered
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// JWT claims payload.
///
/// Issuer, audience, and lifetime come from configuration; the subject is
/// the user's ObjectId in hex form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier, hex ObjectId)
    pub sub: String,

    /// Login name, for display and logging
    pub username: String,

    /// Authorization role
    pub role: Role,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix epoch seconds)
    pub iat: i64,

    /// Expiry (Unix epoch seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a freshly authenticated user.
    pub fn new(user: &User, issuer: &str, audience: &str, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username.clone(),
            role: user.role,
            iss: issuer.to_string(),
            aud: audience.to_string(),
            iat: now,
            exp: now + ttl_secs,
        }
    }
}

/// Request body for registering a new user.
///
/// # JSON Example
///
/// ```json
/// {
///   "username": "ada",
///   "password": "correct horse battery staple"
/// }
/// ```
///
/// New users always start as editors; only an admin can promote them.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Desired login name (must be unused)
    pub username: String,

    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Request body for obtaining a bearer token.
///
/// # JSON Example
///
/// ```json
/// {
///   "username": "ada",
///   "password": "correct horse battery staple"
/// }
/// ```
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    /// Login name
    pub username: String,

    /// Plaintext password
    pub password: String,
}

/// Response body carrying a freshly issued bearer token.
///
/// # JSON Example
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiJ9...",
///   "token_type": "Bearer",
///   "expires_in": 604800
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT to present in the Authorization header
    pub token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn new(token: String, expires_in: i64) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Request body for partially updating a user.
///
/// All fields are optional; only provided fields are changed. A body with
/// no fields at all is rejected as invalid. Changing `role` requires the
/// caller to be an admin.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// Replacement password (re-hashed before storage)
    pub password: Option<String>,

    /// Replacement role (admin-only)
    pub role: Option<Role>,
}

impl UpdateUserRequest {
    /// True when no field was provided at all.
    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.role.is_none()
    }
}

/// Response body for user endpoints.
///
/// Never includes the password hash.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "507f1f77bcf86cd799439011",
///   "username": "ada",
///   "role": "editor",
///   "created_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// User identifier as a 24-character hex string
    pub id: String,

    /// Login name
    pub username: String,

    /// Authorization role
    pub role: Role,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Convert a stored User to an API UserResponse.
///
/// This transformation drops the password hash.
impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"editor\"");
    }

    #[test]
    fn claims_expiry_follows_ttl() {
        let user = User {
            id: Some(ObjectId::new()),
            username: "ada".into(),
            password_hash: "hash".into(),
            role: Role::Editor,
            created_at: Utc::now(),
        };

        let claims = Claims::new(&user, "issuer", "audience", 3600);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.iss, "issuer");
    }

    #[test]
    fn user_response_omits_the_password_hash() {
        let user = User {
            id: Some(ObjectId::new()),
            username: "ada".into(),
            password_hash: "supersecret".into(),
            role: Role::Admin,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("supersecret"));
        assert!(json.contains("\"role\":\"admin\""));
    }
}
