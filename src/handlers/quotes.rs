//! Quote HTTP handlers.
//!
//! This module implements the quote-related API endpoints:
//! - GET /api/v2/quotes - List quotes (optional author filter and limit)
//! - GET /api/v2/quotes/random - Get one random quote
//! - GET /api/v2/quotes/{id} - Get quote by ID
//! - POST /api/v2/quotes - Create new quote
//! - PUT /api/v2/quotes/{id} - Update quote
//! - DELETE /api/v2/quotes/{id} - Delete quote

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::quote::{CreateQuoteRequest, ListQuotesQuery, QuoteResponse, UpdateQuoteRequest},
    services::quote_service,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

/// List quotes, newest first.
///
/// # Endpoint
///
/// `GET /api/v2/quotes?author=Ada&limit=10`
///
/// # Authentication
///
/// None; listing is public.
///
/// # Response
///
/// - **Success (200 OK)**: Returns array of quotes (may be empty)
/// - **Error (400)**: Non-positive limit
///
/// ```json
/// [
///   {
///     "id": "507f1f77bcf86cd799439011",
///     "text": "Talk is cheap. Show me the code.",
///     "author": "Linus Torvalds",
///     "tags": ["pragmatism"],
///     "created_at": "2025-12-20T10:00:00Z"
///   }
/// ]
/// ```
#[utoipa::path(
    get,
    path = "/api/v2/quotes",
    params(ListQuotesQuery),
    responses(
        (status = 200, description = "Quotes matching the filter", body = [QuoteResponse]),
        (status = 400, description = "Invalid query parameters")
    ),
    tags = ["quotes"]
)]
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(query): Query<ListQuotesQuery>,
) -> Result<Json<Vec<QuoteResponse>>, AppError> {
    let quotes = quote_service::list_quotes(&state.db, query.author, query.limit).await?;

    // Convert each Quote to QuoteResponse
    let responses: Vec<QuoteResponse> = quotes.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get one quote picked uniformly at random.
///
/// # Endpoint
///
/// `GET /api/v2/quotes/random`
///
/// # Response
///
/// - **Success (200 OK)**: Returns one quote
/// - **Error (404)**: The collection is empty
#[utoipa::path(
    get,
    path = "/api/v2/quotes/random",
    responses(
        (status = 200, description = "A random quote", body = QuoteResponse),
        (status = 404, description = "No quotes exist yet")
    ),
    tags = ["quotes"]
)]
pub async fn random_quote(State(state): State<AppState>) -> Result<Json<QuoteResponse>, AppError> {
    let quote = quote_service::random_quote(&state.db).await?;

    Ok(Json(quote.into()))
}

/// Get a specific quote by ID.
///
/// # Endpoint
///
/// `GET /api/v2/quotes/{id}`
///
/// # URL Parameters
///
/// - `id` - Hex ObjectId of the quote to retrieve
///
/// # Response
///
/// - **Success (200 OK)**: Returns the quote
/// - **Error (400)**: Malformed identifier
/// - **Error (404)**: Quote not found
#[utoipa::path(
    get,
    path = "/api/v2/quotes/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the quote")),
    responses(
        (status = 200, description = "The requested quote", body = QuoteResponse),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Quote not found")
    ),
    tags = ["quotes"]
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = quote_service::get_quote_by_id(&state.db, &id).await?;

    Ok(Json(quote.into()))
}

/// Create a new quote.
///
/// # Endpoint
///
/// `POST /api/v2/quotes`
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Request Body
///
/// ```json
/// {
///   "text": "Talk is cheap. Show me the code.",
///   "author": "Linus Torvalds",
///   "tags": ["pragmatism"]  // optional, defaults to []
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created quote with its identifier
/// - **Error (400)**: Empty text or author
/// - **Error (401)**: Missing or invalid bearer token
#[utoipa::path(
    post,
    path = "/api/v2/quotes",
    request_body = CreateQuoteRequest,
    responses(
        (status = 201, description = "Quote created", body = QuoteResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tags = ["quotes"],
    security(("bearer_auth" = []))
)]
pub async fn create_quote(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteResponse>), AppError> {
    let quote = quote_service::create_quote(&state.db, request).await?;

    tracing::info!(user = %auth.username, quote_id = %quote.id.map(|id| id.to_hex()).unwrap_or_default(), "quote created");

    Ok((StatusCode::CREATED, Json(quote.into())))
}

/// Update an existing quote.
///
/// # Endpoint
///
/// `PUT /api/v2/quotes/{id}`
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Request Body
///
/// Any subset of the quote fields; at least one must be present.
///
/// ```json
/// {
///   "tags": ["pragmatism", "classic"]
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the quote after the update
/// - **Error (400)**: Empty update or malformed identifier
/// - **Error (401)**: Missing or invalid bearer token
/// - **Error (404)**: Quote not found
#[utoipa::path(
    put,
    path = "/api/v2/quotes/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the quote")),
    request_body = UpdateQuoteRequest,
    responses(
        (status = 200, description = "Quote updated", body = QuoteResponse),
        (status = 400, description = "Empty update or malformed identifier"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Quote not found")
    ),
    tags = ["quotes"],
    security(("bearer_auth" = []))
)]
pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = quote_service::update_quote(&state.db, &id, request).await?;

    Ok(Json(quote.into()))
}

/// Delete a quote.
///
/// # Endpoint
///
/// `DELETE /api/v2/quotes/{id}`
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Response
///
/// - **Success (204 No Content)**: Quote deleted
/// - **Error (400)**: Malformed identifier
/// - **Error (401)**: Missing or invalid bearer token
/// - **Error (404)**: Quote not found
#[utoipa::path(
    delete,
    path = "/api/v2/quotes/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the quote")),
    responses(
        (status = 204, description = "Quote deleted"),
        (status = 400, description = "Malformed identifier"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Quote not found")
    ),
    tags = ["quotes"],
    security(("bearer_auth" = []))
)]
pub async fn delete_quote(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    quote_service::delete_quote(&state.db, &id).await?;

    tracing::debug!(user = %auth.username, quote_id = %id, "quote deleted");

    Ok(StatusCode::NO_CONTENT)
}
