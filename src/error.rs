//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Store Errors**: Failed or unreachable MongoDB operations
/// - **Authentication Errors**: Missing, malformed, or expired bearer tokens
/// - **Resource Errors**: Requested documents not found
/// - **Conflict Errors**: Unique constraint violations
/// - **Validation Errors**: Malformed identifiers or request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A MongoDB operation failed for a reason other than connectivity.
    ///
    /// Returns HTTP 500 Internal Server Error and hides the driver
    /// details from the client.
    #[error("Database error: {0}")]
    Database(mongodb::error::Error),

    /// The MongoDB deployment could not be reached (server selection,
    /// I/O, or pool failures).
    ///
    /// Returns HTTP 503 Service Unavailable so clients can distinguish
    /// a down store from a bug.
    #[error("Data store unavailable: {0}")]
    StoreUnavailable(mongodb::error::Error),

    /// Signing a new JWT failed.
    ///
    /// Returns HTTP 500 Internal Server Error. Verification failures use
    /// `InvalidToken` instead so clients get a 401.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Catch-all for unexpected internal failures (e.g. password hashing).
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Bearer token is missing, malformed, expired, or has a bad signature.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or expired bearer token")]
    InvalidToken,

    /// Username/password pair did not match a stored user.
    ///
    /// Returns HTTP 401 Unauthorized. Deliberately does not reveal
    /// whether the username exists.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Authenticated caller is not allowed to perform this operation.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Insufficient permissions")]
    Forbidden,

    /// Requested quote does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Quote not found")]
    QuoteNotFound,

    /// Requested author does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Author not found")]
    AuthorNotFound,

    /// Requested user does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("User not found")]
    UserNotFound,

    /// Requested movie record does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Movie not found")]
    MovieNotFound,

    /// Registration attempted with a username that already exists.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Username is already taken")]
    UsernameTaken,

    /// Path parameter is not a valid 24-character hex ObjectId.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains the offending value.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AppError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidToken | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::QuoteNotFound
            | AppError::AuthorNotFound
            | AppError::UserNotFound
            | AppError::MovieNotFound => StatusCode::NOT_FOUND,
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::InvalidId(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Token(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error code used in response bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidToken => "invalid_token",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::Forbidden => "forbidden",
            AppError::QuoteNotFound => "quote_not_found",
            AppError::AuthorNotFound => "author_not_found",
            AppError::UserNotFound => "user_not_found",
            AppError::MovieNotFound => "movie_not_found",
            AppError::UsernameTaken => "username_taken",
            AppError::InvalidId(_) => "invalid_id",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::Database(_) | AppError::Token(_) | AppError::Internal(_) => "internal_error",
        }
    }

    /// Log the error with severity matching its status class.
    fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(error = %self, code = self.error_code(), "request rejected");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "client error");
        }
    }
}

/// Classify driver errors: connectivity failures become `StoreUnavailable`
/// (503), everything else is a plain `Database` error (500).
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => AppError::StoreUnavailable(err),
            _ => AppError::Database(err),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Internal details (driver errors, signing failures) are logged but never
/// leaked into the response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let code = self.error_code();

        // Server-side failures get a generic message; client errors keep
        // their display text.
        let message = match &self {
            AppError::Database(_) | AppError::Token(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
            AppError::StoreUnavailable(_) => "The data store is temporarily unavailable".to_string(),
            AppError::InvalidRequest(msg) => msg.clone(),
            other => other.to_string(),
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_class() {
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::QuoteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::MovieNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::UsernameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidId("zzz".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn connectivity_failures_map_to_service_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AppError::from(mongodb::error::Error::from(io));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_code(), "store_unavailable");
    }

    #[test]
    fn other_driver_failures_stay_internal() {
        let err = AppError::from(mongodb::error::Error::custom("malformed response"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "internal_error");
    }

    #[test]
    fn not_found_messages_name_the_resource() {
        assert_eq!(AppError::AuthorNotFound.to_string(), "Author not found");
        assert_eq!(AppError::UserNotFound.to_string(), "User not found");
    }
}
