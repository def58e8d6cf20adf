//! Author data models and API request/response types.
//!
//! This module defines:
//! - `Author`: Stored document representing an author
//! - `CreateAuthorRequest` / `UpdateAuthorRequest`: Request bodies
//! - `AuthorResponse`: Response body returned to clients

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Represents an author document from the store.
///
/// # Collection
///
/// Maps to the `authors` collection. Authors are referenced by quotes
/// through their name only; deleting an author does not cascade to quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Store-assigned identifier
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Author's display name
    pub name: String,

    /// Link to a biography page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,

    /// Short free-form biography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Timestamp when the author was created
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a new author.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Grace Hopper",
///   "wiki_url": "https://en.wikipedia.org/wiki/Grace_Hopper",
///   "bio": "Rear admiral and compiler pioneer."
/// }
/// ```
///
/// # Validation
///
/// - `name`: Required, any non-empty string
/// - `wiki_url`, `bio`: Optional
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAuthorRequest {
    /// Author's display name
    pub name: String,

    /// Link to a biography page
    pub wiki_url: Option<String>,

    /// Short free-form biography
    pub bio: Option<String>,
}

/// Request body for partially updating an author.
///
/// All fields are optional; only provided fields are changed. A body with
/// no fields at all is rejected as invalid.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAuthorRequest {
    /// Replacement display name
    pub name: Option<String>,

    /// Replacement biography link
    pub wiki_url: Option<String>,

    /// Replacement biography text
    pub bio: Option<String>,
}

impl UpdateAuthorRequest {
    /// True when no field was provided at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.wiki_url.is_none() && self.bio.is_none()
    }
}

/// Response body for author endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "507f1f77bcf86cd799439011",
///   "name": "Grace Hopper",
///   "wiki_url": "https://en.wikipedia.org/wiki/Grace_Hopper",
///   "created_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorResponse {
    /// Author identifier as a 24-character hex string
    pub id: String,

    /// Author's display name
    pub name: String,

    /// Link to a biography page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,

    /// Short free-form biography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Convert a stored Author to an API AuthorResponse.
impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: author.name,
            wiki_url: author.wiki_url,
            bio: author.bio,
            created_at: author.created_at,
        }
    }
}
