//! Quote data models and API request/response types.
//!
//! This module defines:
//! - `Quote`: Stored document representing a quote
//! - `CreateQuoteRequest` / `UpdateQuoteRequest`: Request bodies
//! - `ListQuotesQuery`: Query parameters for listing
//! - `QuoteResponse`: Response body returned to clients

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Represents a quote document from the store.
///
/// # Collection
///
/// Maps to the `quotes` collection. Each quote:
/// - References its author by name (no enforced foreign key; a quote may
///   name an author that has no document in `authors`)
/// - Carries an ordered list of tags
///
/// # Identifier
///
/// `_id` is `None` until the store assigns an ObjectId at insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Store-assigned identifier
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// The quoted text
    pub text: String,

    /// Name of the author this quote is attributed to
    pub author: String,

    /// Tags in the order they were supplied
    #[serde(default)]
    pub tags: Vec<String>,

    /// Timestamp when the quote was created
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a new quote.
///
/// # JSON Example
///
/// ```json
/// {
///   "text": "Talk is cheap. Show me the code.",
///   "author": "Linus Torvalds",
///   "tags": ["pragmatism"]
/// }
/// ```
///
/// # Validation
///
/// - `text`: Required, any non-empty string
/// - `author`: Required, any non-empty string
/// - `tags`: Optional, defaults to an empty list
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuoteRequest {
    /// The quoted text
    pub text: String,

    /// Author name this quote is attributed to
    pub author: String,

    /// Tags in display order (defaults to empty if not provided)
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for partially updating a quote.
///
/// All fields are optional; only provided fields are changed. A body with
/// no fields at all is rejected as invalid.
///
/// # JSON Example
///
/// ```json
/// {
///   "tags": ["pragmatism", "classic"]
/// }
/// ```
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuoteRequest {
    /// Replacement quote text
    pub text: Option<String>,

    /// Replacement author name
    pub author: Option<String>,

    /// Replacement tag list (replaces the whole list, order preserved)
    pub tags: Option<Vec<String>>,
}

impl UpdateQuoteRequest {
    /// True when no field was provided at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.author.is_none() && self.tags.is_none()
    }
}

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuotesQuery {
    /// Only return quotes attributed to this author name
    pub author: Option<String>,

    /// Maximum number of quotes to return
    pub limit: Option<i64>,
}

/// Response body for quote endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "507f1f77bcf86cd799439011",
///   "text": "Talk is cheap. Show me the code.",
///   "author": "Linus Torvalds",
///   "tags": ["pragmatism"],
///   "created_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    /// Quote identifier as a 24-character hex string
    pub id: String,

    /// The quoted text
    pub text: String,

    /// Author name
    pub author: String,

    /// Tags in stored order
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Convert a stored Quote to an API QuoteResponse.
///
/// This transformation renders the ObjectId as its hex form.
impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id.map(|id| id.to_hex()).unwrap_or_default(),
            text: quote.text,
            author: quote.author,
            tags: quote.tags,
            created_at: quote.created_at,
        }
    }
}
