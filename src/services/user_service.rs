//! User service - registration, lookup, and user CRUD.
//!
//! Passwords arrive here already hashed; the auth service owns hashing so
//! plaintext never reaches the store layer.

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    Database,
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::ReturnDocument,
};

use crate::{
    error::AppError,
    models::user::{Role, User},
    services::parse_object_id,
};

/// Collection holding user documents.
const COLLECTION: &str = "users";

/// Server error code for unique index violations.
const DUPLICATE_KEY: i32 = 11000;

/// True when the driver error is a unique index violation.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY
        }
        _ => false,
    }
}

/// Register a new user.
///
/// # Process
///
/// 1. Insert the document; the unique index on `username` is the
///    authoritative duplicate check
/// 2. Map a duplicate key violation to a structured conflict
///
/// # Arguments
///
/// * `db` - Database handle
/// * `username` - Desired login name
/// * `password_hash` - Argon2 hash produced by the auth service
///
/// # Errors
///
/// - `UsernameTaken`: another user already holds this username
/// - `Database` / `StoreUnavailable`: store-level failure
pub async fn create_user(
    db: &Database,
    username: String,
    password_hash: String,
) -> Result<User, AppError> {
    let mut user = User {
        id: None,
        username,
        password_hash,
        role: Role::default(),
        created_at: Utc::now(),
    };

    let result = db
        .collection::<User>(COLLECTION)
        .insert_one(&user)
        .await
        .map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::UsernameTaken
            } else {
                AppError::from(e)
            }
        })?;

    user.id = result.inserted_id.as_object_id();
    tracing::info!(username = %user.username, "user registered");

    Ok(user)
}

/// Look up a user by username.
///
/// Returns `None` instead of an error so the caller can run the
/// timing-equalized credential check either way.
pub async fn find_by_username(db: &Database, username: &str) -> Result<Option<User>, AppError> {
    let user = db
        .collection::<User>(COLLECTION)
        .find_one(doc! { "username": username })
        .await?;

    Ok(user)
}

/// List all users, newest first.
pub async fn list_users(db: &Database) -> Result<Vec<User>, AppError> {
    let users = db
        .collection::<User>(COLLECTION)
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .await?
        .try_collect()
        .await?;

    Ok(users)
}

/// Get a user by identifier.
///
/// # Errors
///
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `UserNotFound`: no document with that identifier
pub async fn get_user_by_id(db: &Database, id: &str) -> Result<User, AppError> {
    let oid = parse_object_id(id)?;

    db.collection::<User>(COLLECTION)
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or(AppError::UserNotFound)
}

/// Apply a partial update to a user and return the updated document.
///
/// The caller has already authorized the change and hashed any new
/// password; at least one of the two fields must be set.
///
/// # Errors
///
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `UserNotFound`: no document with that identifier
pub async fn update_user(
    db: &Database,
    id: &str,
    password_hash: Option<String>,
    role: Option<Role>,
) -> Result<User, AppError> {
    let oid = parse_object_id(id)?;

    let mut set = doc! {};
    if let Some(hash) = password_hash {
        set.insert("password_hash", hash);
    }
    if let Some(role) = role {
        let role = mongodb::bson::to_bson(&role).map_err(mongodb::error::Error::from)?;
        set.insert("role", role);
    }

    db.collection::<User>(COLLECTION)
        .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?
        .ok_or(AppError::UserNotFound)
}

/// Delete a user by identifier.
///
/// # Errors
///
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `UserNotFound`: no document with that identifier
pub async fn delete_user(db: &Database, id: &str) -> Result<(), AppError> {
    let oid = parse_object_id(id)?;

    let result = db
        .collection::<User>(COLLECTION)
        .delete_one(doc! { "_id": oid })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::UserNotFound);
    }

    Ok(())
}
