//! Quote service - CRUD operations over the `quotes` collection.
//!
//! This service handles:
//! - Creation with store-assigned identifiers
//! - Listing with optional author filter and result limit
//! - Random selection via server-side sampling
//! - Partial updates and deletes with existence checks

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    Database,
    bson::doc,
    options::ReturnDocument,
};

use crate::{
    error::AppError,
    models::quote::{CreateQuoteRequest, Quote, UpdateQuoteRequest},
    services::parse_object_id,
};

/// Collection holding quote documents.
const COLLECTION: &str = "quotes";

/// Create a new quote.
///
/// # Process
///
/// 1. Validate that text and author are non-empty
/// 2. Insert the document; the store assigns the identifier
/// 3. Return the stored quote with its new identifier
///
/// # Arguments
///
/// * `db` - Database handle
/// * `request` - Validated request body
///
/// # Errors
///
/// - `InvalidRequest`: text or author is empty
/// - `Database` / `StoreUnavailable`: store-level failure
pub async fn create_quote(db: &Database, request: CreateQuoteRequest) -> Result<Quote, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::InvalidRequest("text must not be empty".to_string()));
    }
    if request.author.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "author must not be empty".to_string(),
        ));
    }

    let mut quote = Quote {
        id: None,
        text: request.text,
        author: request.author,
        tags: request.tags,
        created_at: Utc::now(),
    };

    let result = db
        .collection::<Quote>(COLLECTION)
        .insert_one(&quote)
        .await?;

    // The store assigned the identifier during insertion
    quote.id = result.inserted_id.as_object_id();

    Ok(quote)
}

/// List quotes, newest first.
///
/// # Arguments
///
/// * `db` - Database handle
/// * `author` - Only return quotes attributed to this author name
/// * `limit` - Maximum number of quotes to return
///
/// # Errors
///
/// - `InvalidRequest`: limit is zero or negative
pub async fn list_quotes(
    db: &Database,
    author: Option<String>,
    limit: Option<i64>,
) -> Result<Vec<Quote>, AppError> {
    if let Some(limit) = limit {
        if limit <= 0 {
            return Err(AppError::InvalidRequest(
                "limit must be positive".to_string(),
            ));
        }
    }

    let filter = match author {
        Some(name) => doc! { "author": name },
        None => doc! {},
    };

    let collection = db.collection::<Quote>(COLLECTION);
    let mut find = collection
        .find(filter)
        .sort(doc! { "created_at": -1 });
    if let Some(limit) = limit {
        find = find.limit(limit);
    }

    let quotes = find.await?.try_collect().await?;

    Ok(quotes)
}

/// Get a quote by identifier.
///
/// # Errors
///
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `QuoteNotFound`: no document with that identifier
pub async fn get_quote_by_id(db: &Database, id: &str) -> Result<Quote, AppError> {
    let oid = parse_object_id(id)?;

    db.collection::<Quote>(COLLECTION)
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or(AppError::QuoteNotFound)
}

/// Pick one quote uniformly at random.
///
/// Uses the server-side `$sample` stage so selection stays fair without
/// shipping the whole collection to the client.
///
/// # Errors
///
/// - `QuoteNotFound`: the collection is empty
pub async fn random_quote(db: &Database) -> Result<Quote, AppError> {
    let mut cursor = db
        .collection::<Quote>(COLLECTION)
        .aggregate(vec![doc! { "$sample": { "size": 1 } }])
        .await?;

    match cursor.try_next().await? {
        Some(document) => {
            let quote = mongodb::bson::from_document(document)
                .map_err(mongodb::error::Error::from)?;
            Ok(quote)
        }
        None => Err(AppError::QuoteNotFound),
    }
}

/// Apply a partial update to a quote and return the updated document.
///
/// # Errors
///
/// - `InvalidRequest`: the update carries no fields
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `QuoteNotFound`: no document with that identifier
pub async fn update_quote(
    db: &Database,
    id: &str,
    update: UpdateQuoteRequest,
) -> Result<Quote, AppError> {
    if update.is_empty() {
        return Err(AppError::InvalidRequest(
            "at least one field must be provided".to_string(),
        ));
    }

    let oid = parse_object_id(id)?;

    let mut set = doc! {};
    if let Some(text) = update.text {
        set.insert("text", text);
    }
    if let Some(author) = update.author {
        set.insert("author", author);
    }
    if let Some(tags) = update.tags {
        set.insert("tags", tags);
    }

    db.collection::<Quote>(COLLECTION)
        .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
        // Return the document as it looks after the update
        .return_document(ReturnDocument::After)
        .await?
        .ok_or(AppError::QuoteNotFound)
}

/// Delete a quote by identifier.
///
/// # Errors
///
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `QuoteNotFound`: no document with that identifier
pub async fn delete_quote(db: &Database, id: &str) -> Result<(), AppError> {
    let oid = parse_object_id(id)?;

    let result = db
        .collection::<Quote>(COLLECTION)
        .delete_one(doc! { "_id": oid })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::QuoteNotFound);
    }

    Ok(())
}
