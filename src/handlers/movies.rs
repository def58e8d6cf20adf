//! Legacy movie HTTP handler.
//!
//! A single deletion endpoint kept for clients of the original deployment:
//! - DELETE /movies/{id} - Delete a movie entry

use crate::{error::AppError, services::movie_service, state::AppState};
use axum::extract::{Path, State};

/// Delete a movie entry by ID.
///
/// Unlike the v2 endpoints this one predates the API prefix and answers
/// with a plain-text confirmation instead of an empty 204.
///
/// # Endpoint
///
/// `DELETE /movies/{id}`
///
/// # Response
///
/// - **Success (200 OK)**: Plain-text confirmation naming the deleted ID
/// - **Error (400)**: Malformed identifier
/// - **Error (404)**: Movie not found
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the movie")),
    responses(
        (status = 200, description = "Plain-text deletion confirmation", body = String),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Movie not found")
    ),
    tags = ["movies"]
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, AppError> {
    movie_service::delete_movie(&state.db, &id).await?;

    tracing::debug!(movie_id = %id, "movie deleted");

    Ok(format!("Unos sa ID {id} je obrisan."))
}
