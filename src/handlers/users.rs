//! User HTTP handlers.
//!
//! This module implements account registration, token issuance, and the
//! user management endpoints:
//! - POST /api/v2/users/register - Register a new user
//! - POST /api/v2/users/token - Exchange credentials for a bearer token
//! - GET /api/v2/users - List users
//! - GET /api/v2/users/{id} - Get user by ID
//! - PUT /api/v2/users/{id} - Update user
//! - DELETE /api/v2/users/{id} - Delete user

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::user::{
        RegisterRequest, Role, TokenRequest, TokenResponse, UpdateUserRequest, UserResponse,
    },
    services::user_service,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Minimum accepted password length, in characters.
const MIN_PASSWORD_LEN: usize = 8;

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

/// Register a new user account.
///
/// New accounts always start with the `editor` role; only an existing admin
/// can promote them afterwards.
///
/// # Endpoint
///
/// `POST /api/v2/users/register`
///
/// # Request Body
///
/// ```json
/// {
///   "username": "ada",
///   "password": "correct horse battery staple"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created user (without the password hash)
/// - **Error (400)**: Empty username or password shorter than 8 characters
/// - **Error (409)**: Username already taken
#[utoipa::path(
    post,
    path = "/api/v2/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid username or password"),
        (status = 409, description = "Username already taken")
    ),
    tags = ["users"]
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    // Step 1: Validate the credentials before touching the store
    let username = request.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::InvalidRequest(
            "username must not be empty".to_string(),
        ));
    }
    validate_password(&request.password)?;

    // Step 2: Hash the password and persist the account
    let password_hash = state.auth.hash_password(&request.password)?;
    let user = user_service::create_user(&state.db, username, password_hash).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchange a username and password for a signed bearer token.
///
/// # Endpoint
///
/// `POST /api/v2/users/token`
///
/// # Request Body
///
/// ```json
/// {
///   "username": "ada",
///   "password": "correct horse battery staple"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the token, its type, and its lifetime in seconds
/// - **Error (401)**: Unknown username or wrong password
#[utoipa::path(
    post,
    path = "/api/v2/users/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Unknown username or wrong password")
    ),
    tags = ["users"]
)]
pub async fn token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    // Step 1: Look up the account; verification handles the missing case
    let user = user_service::find_by_username(&state.db, &request.username).await?;

    // Step 2: Verify the password and sign the claims
    let user = state.auth.authenticate(user, &request.password)?;
    let response = state.auth.issue_token(&user)?;

    tracing::info!(username = %user.username, "token issued");

    Ok(Json(response))
}

/// List all users, newest first.
///
/// Responses carry only the public fields; password hashes never leave the
/// store.
///
/// # Endpoint
///
/// `GET /api/v2/users`
///
/// # Response
///
/// - **Success (200 OK)**: Returns array of users (may be empty)
#[utoipa::path(
    get,
    path = "/api/v2/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse])
    ),
    tags = ["users"]
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user_service::list_users(&state.db).await?;

    let responses: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get a specific user by ID.
///
/// # Endpoint
///
/// `GET /api/v2/users/{id}`
///
/// # Response
///
/// - **Success (200 OK)**: Returns the user (without the password hash)
/// - **Error (400)**: Malformed identifier
/// - **Error (404)**: User not found
#[utoipa::path(
    get,
    path = "/api/v2/users/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the user")),
    responses(
        (status = 200, description = "The requested user", body = UserResponse),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "User not found")
    ),
    tags = ["users"]
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_service::get_user_by_id(&state.db, &id).await?;

    Ok(Json(user.into()))
}

/// Update a user's password or role.
///
/// Users may change their own password; only admins may touch other
/// accounts or assign roles.
///
/// # Endpoint
///
/// `PUT /api/v2/users/{id}`
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Request Body
///
/// ```json
/// {
///   "password": "a new secret phrase",  // optional
///   "role": "admin"                     // optional, admin callers only
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the user after the update
/// - **Error (400)**: Empty update, short password, or malformed identifier
/// - **Error (401)**: Missing or invalid bearer token
/// - **Error (403)**: Caller may not manage this account or assign roles
/// - **Error (404)**: User not found
#[utoipa::path(
    put,
    path = "/api/v2/users/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the user")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Empty update or malformed identifier"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller may not manage this account"),
        (status = 404, description = "User not found")
    ),
    tags = ["users"],
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    // Step 1: Reject no-op updates
    if request.is_empty() {
        return Err(AppError::InvalidRequest(
            "at least one field must be provided".to_string(),
        ));
    }

    // Step 2: Authorize the caller against the target account
    if !auth.can_manage_user(&id) {
        return Err(AppError::Forbidden);
    }
    if request.role.is_some() && auth.role != Role::Admin {
        return Err(AppError::Forbidden);
    }

    // Step 3: Hash the replacement password, if any, and apply the update
    let password_hash = match request.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(state.auth.hash_password(password)?)
        }
        None => None,
    };

    let user = user_service::update_user(&state.db, &id, password_hash, request.role).await?;

    tracing::info!(user = %auth.username, target_id = %id, "user updated");

    Ok(Json(user.into()))
}

/// Delete a user account.
///
/// Users may delete their own account; admins may delete anyone's.
///
/// # Endpoint
///
/// `DELETE /api/v2/users/{id}`
///
/// # Authentication
///
/// Requires a valid bearer token.
///
/// # Response
///
/// - **Success (204 No Content)**: User deleted
/// - **Error (400)**: Malformed identifier
/// - **Error (401)**: Missing or invalid bearer token
/// - **Error (403)**: Caller may not manage this account
/// - **Error (404)**: User not found
#[utoipa::path(
    delete,
    path = "/api/v2/users/{id}",
    params(("id" = String, Path, description = "Hex ObjectId of the user")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed identifier"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller may not manage this account"),
        (status = 404, description = "User not found")
    ),
    tags = ["users"],
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !auth.can_manage_user(&id) {
        return Err(AppError::Forbidden);
    }

    user_service::delete_user(&state.db, &id).await?;

    tracing::info!(user = %auth.username, target_id = %id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}
