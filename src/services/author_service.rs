//! Author service - CRUD operations over the `authors` collection.
//!
//! Deleting an author never touches quotes: quotes reference authors by
//! name only, and dangling references are allowed.

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    Database,
    bson::doc,
    options::ReturnDocument,
};

use crate::{
    error::AppError,
    models::author::{Author, CreateAuthorRequest, UpdateAuthorRequest},
    services::parse_object_id,
};

/// Collection holding author documents.
const COLLECTION: &str = "authors";

/// Create a new author.
///
/// # Errors
///
/// - `InvalidRequest`: name is empty
/// - `Database` / `StoreUnavailable`: store-level failure
pub async fn create_author(
    db: &Database,
    request: CreateAuthorRequest,
) -> Result<Author, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("name must not be empty".to_string()));
    }

    let mut author = Author {
        id: None,
        name: request.name,
        wiki_url: request.wiki_url,
        bio: request.bio,
        created_at: Utc::now(),
    };

    let result = db
        .collection::<Author>(COLLECTION)
        .insert_one(&author)
        .await?;

    author.id = result.inserted_id.as_object_id();

    Ok(author)
}

/// List all authors, sorted by name.
pub async fn list_authors(db: &Database) -> Result<Vec<Author>, AppError> {
    let authors = db
        .collection::<Author>(COLLECTION)
        .find(doc! {})
        .sort(doc! { "name": 1 })
        .await?
        .try_collect()
        .await?;

    Ok(authors)
}

/// Get an author by identifier.
///
/// # Errors
///
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `AuthorNotFound`: no document with that identifier
pub async fn get_author_by_id(db: &Database, id: &str) -> Result<Author, AppError> {
    let oid = parse_object_id(id)?;

    db.collection::<Author>(COLLECTION)
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or(AppError::AuthorNotFound)
}

/// Apply a partial update to an author and return the updated document.
///
/// # Errors
///
/// - `InvalidRequest`: the update carries no fields
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `AuthorNotFound`: no document with that identifier
pub async fn update_author(
    db: &Database,
    id: &str,
    update: UpdateAuthorRequest,
) -> Result<Author, AppError> {
    if update.is_empty() {
        return Err(AppError::InvalidRequest(
            "at least one field must be provided".to_string(),
        ));
    }

    let oid = parse_object_id(id)?;

    let mut set = doc! {};
    if let Some(name) = update.name {
        set.insert("name", name);
    }
    if let Some(wiki_url) = update.wiki_url {
        set.insert("wiki_url", wiki_url);
    }
    if let Some(bio) = update.bio {
        set.insert("bio", bio);
    }

    db.collection::<Author>(COLLECTION)
        .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?
        .ok_or(AppError::AuthorNotFound)
}

/// Delete an author by identifier.
///
/// Quotes attributed to the deleted author are left untouched.
///
/// # Errors
///
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `AuthorNotFound`: no document with that identifier
pub async fn delete_author(db: &Database, id: &str) -> Result<(), AppError> {
    let oid = parse_object_id(id)?;

    let result = db
        .collection::<Author>(COLLECTION)
        .delete_one(doc! { "_id": oid })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::AuthorNotFound);
    }

    Ok(())
}
