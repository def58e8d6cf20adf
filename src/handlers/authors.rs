//! Author HTTP handlers.
//!
//! This module implements the author-related API endpoints:
//! - GET /api/v2/authors - List authors
//! - GET /api/v2/authors/{id} - Get author by ID
//! - POST /api/v2/authors - Create new author
//! - PUT /api/v2/authors/{id} - Update author
//! - DELETE /api/v2/authors/{id} - Delete author

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::author::{AuthorResponse, CreateAuthorRequest, UpdateAuthorRequest},
    services::author_service,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all authors, sorted by name.
///
/// # Endpoint
///
/// `GET /api/v2/authors`
///
/// # Response
///
/// - **Success (200 OK)**: Returns array of authors (may be empty)
#[utoipa::path(
    get,
    path = "/api/v2/authors",
    responses(
        (status = 200, description = "All authors", body = [AuthorResponse])
    ),
    tags = ["authors"]
)]
pub async fn list_authors(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorResponse>>, AppError> {
    let authors = author_service::list_authors(&state.db).await?;

    let responses: Vec<AuthorResponse> = authors.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get a specific author by ID.
///
/// # Endpoint
///
/// `GET /api/v2/authors/{id}`
///
/// # Response
///
/// - **Success (200 OK)**: Returns the author
/// - **Error (400)**: Malformed identifier
/// - **Error (404)**: Author not found
#[utoipa::path(
    get,
    path = "/api/v2/authors/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the author")),
    responses(
        (status = 200, description = "The requested author", body = AuthorResponse),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Author not found")
    ),
    tags = ["authors"]
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuthorResponse>, AppError> {
    let author = author_service::get_author_by_id(&state.db, &id).await?;

    Ok(Json(author.into()))
}

/// Create a new author.
///
/// # Endpoint
///
/// `POST /api/v2/authors`
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Grace Hopper",
///   "wiki_url": "https://en.wikipedia.org/wiki/Grace_Hopper",  // optional
///   "bio": "Rear admiral and compiler pioneer."                // optional
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created author with its identifier
/// - **Error (400)**: Empty name
/// - **Error (401)**: Missing or invalid bearer token
#[utoipa::path(
    post,
    path = "/api/v2/authors",
    request_body = CreateAuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tags = ["authors"],
    security(("bearer_auth" = []))
)]
pub async fn create_author(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<AuthorResponse>), AppError> {
    let author = author_service::create_author(&state.db, request).await?;

    tracing::info!(user = %auth.username, author = %author.name, "author created");

    Ok((StatusCode::CREATED, Json(author.into())))
}

/// Update an existing author.
///
/// # Endpoint
///
/// `PUT /api/v2/authors/{id}`
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Request Body
///
/// Any subset of the author fields; at least one must be present.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the author after the update
/// - **Error (400)**: Empty update or malformed identifier
/// - **Error (401)**: Missing or invalid bearer token
/// - **Error (404)**: Author not found
#[utoipa::path(
    put,
    path = "/api/v2/authors/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the author")),
    request_body = UpdateAuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 400, description = "Empty update or malformed identifier"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Author not found")
    ),
    tags = ["authors"],
    security(("bearer_auth" = []))
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAuthorRequest>,
) -> Result<Json<AuthorResponse>, AppError> {
    let author = author_service::update_author(&state.db, &id, request).await?;

    Ok(Json(author.into()))
}

/// Delete an author.
///
/// Quotes attributed to the deleted author keep their reference; the name
/// simply dangles.
///
/// # Endpoint
///
/// `DELETE /api/v2/authors/{id}`
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Response
///
/// - **Success (204 No Content)**: Author deleted
/// - **Error (400)**: Malformed identifier
/// - **Error (401)**: Missing or invalid bearer token
/// - **Error (404)**: Author not found
#[utoipa::path(
    delete,
    path = "/api/v2/authors/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the author")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 400, description = "Malformed identifier"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Author not found")
    ),
    tags = ["authors"],
    security(("bearer_auth" = []))
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    author_service::delete_author(&state.db, &id).await?;

    tracing::debug!(user = %auth.username, author_id = %id, "author deleted");

    Ok(StatusCode::NO_CONTENT)
}
