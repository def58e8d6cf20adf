//! Programming Quotes API library.
//!
//! This module exposes the core API components for use in integration tests
//! and as a library. The [`app`] function assembles the full router so the
//! binary and the test suite serve exactly the same surface.

pub mod config;
pub mod db;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use error::AppError;
pub use state::AppState;

use axum::{
    Router, middleware as axum_middleware,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use doc::ApiDoc;

/// Build the application router.
///
/// Read endpoints are public; write endpoints sit behind the bearer token
/// middleware. The CORS layer is outermost so preflight requests succeed
/// without authentication.
pub fn app(state: AppState) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v2/quotes", get(handlers::quotes::list_quotes))
        .route("/api/v2/quotes/random", get(handlers::quotes::random_quote))
        .route("/api/v2/quotes/{id}", get(handlers::quotes::get_quote))
        .route("/api/v2/authors", get(handlers::authors::list_authors))
        .route("/api/v2/authors/{id}", get(handlers::authors::get_author))
        .route("/api/v2/users/register", post(handlers::users::register))
        .route("/api/v2/users/token", post(handlers::users::token))
        .route("/api/v2/users", get(handlers::users::list_users))
        .route("/api/v2/users/{id}", get(handlers::users::get_user))
        // Legacy route kept for clients of the original deployment
        .route("/movies/{id}", delete(handlers::movies::delete_movie));

    // Write routes, all behind the bearer token middleware
    let protected_routes = Router::new()
        .route("/api/v2/quotes", post(handlers::quotes::create_quote))
        .route("/api/v2/quotes/{id}", put(handlers::quotes::update_quote))
        .route("/api/v2/quotes/{id}", delete(handlers::quotes::delete_quote))
        .route("/api/v2/authors", post(handlers::authors::create_author))
        .route("/api/v2/authors/{id}", put(handlers::authors::update_author))
        .route(
            "/api/v2/authors/{id}",
            delete(handlers::authors::delete_author),
        )
        .route("/api/v2/users/{id}", put(handlers::users::update_user))
        .route("/api/v2/users/{id}", delete(handlers::users::delete_user))
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/", get(docs_redirect))
        .merge(public_routes)
        .merge(protected_routes)
        // Interactive documentation and the raw OpenAPI document
        .merge(SwaggerUi::new("/docs").url("/swagger/v2/swagger.json", ApiDoc::openapi()))
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Outermost: answer CORS preflights from any origin
        .layer(CorsLayer::permissive())
        // Share the database handle and auth service with all handlers
        .with_state(state)
}

/// The root URL answers with a redirect to the interactive documentation.
async fn docs_redirect() -> Redirect {
    Redirect::permanent("/docs")
}
