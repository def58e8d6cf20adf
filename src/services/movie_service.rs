//! Movie service - legacy delete over the `filmovi` collection.
//!
//! Movie documents have no fixed schema, so this service works on raw
//! documents. The one surviving operation is delete-by-identifier, kept
//! for clients of the original deployment.

use mongodb::{
    Database,
    bson::{Document, doc},
};

use crate::{error::AppError, services::parse_object_id};

/// Collection holding movie documents, named by the original deployment.
const COLLECTION: &str = "filmovi";

/// Delete a movie by identifier.
///
/// A miss is reported as a structured 404 rather than an unconditional
/// success message.
///
/// # Errors
///
/// - `InvalidId`: identifier is not a valid ObjectId
/// - `MovieNotFound`: no document with that identifier
pub async fn delete_movie(db: &Database, id: &str) -> Result<(), AppError> {
    let oid = parse_object_id(id)?;

    let result = db
        .collection::<Document>(COLLECTION)
        .delete_one(doc! { "_id": oid })
        .await?;

    if result.deleted_count == 0 {
        return Err(AppError::MovieNotFound);
    }

    Ok(())
}
