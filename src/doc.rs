//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints (quotes, authors, users, movies, health)
//! - **Schemas**: Request and response bodies for the endpoints above
//! - **Security**: The bearer token scheme used by the write endpoints
//!
//! The generated specification is served as JSON and rendered by Swagger UI
//! at `/docs`.

use crate::handlers;
use crate::models::{
    author::{AuthorResponse, CreateAuthorRequest, UpdateAuthorRequest},
    quote::{CreateQuoteRequest, QuoteResponse, UpdateQuoteRequest},
    user::{RegisterRequest, Role, TokenRequest, TokenResponse, UpdateUserRequest, UserResponse},
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v2/users/token."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
///
/// Read endpoints are public; write endpoints declare the `bearer_auth`
/// requirement individually, so no document-wide security is set here.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Programming Quotes API",
        description = "Quotes by and about programmers, with token-protected editing.",
        version = "v2"
    ),
    servers(
        (url = "/", description = "The current deployment")
    ),
    paths(
        handlers::quotes::list_quotes,
        handlers::quotes::random_quote,
        handlers::quotes::get_quote,
        handlers::quotes::create_quote,
        handlers::quotes::update_quote,
        handlers::quotes::delete_quote,
        handlers::authors::list_authors,
        handlers::authors::get_author,
        handlers::authors::create_author,
        handlers::authors::update_author,
        handlers::authors::delete_author,
        handlers::users::register,
        handlers::users::token,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::movies::delete_movie,
        handlers::health::health_check,
    ),
    components(schemas(
        QuoteResponse,
        CreateQuoteRequest,
        UpdateQuoteRequest,
        AuthorResponse,
        CreateAuthorRequest,
        UpdateAuthorRequest,
        UserResponse,
        RegisterRequest,
        TokenRequest,
        TokenResponse,
        UpdateUserRequest,
        Role,
    )),
    tags(
        (name = "quotes", description = "Browse and manage programming quotes"),
        (name = "authors", description = "Browse and manage quote authors"),
        (name = "users", description = "Registration, tokens, and account management"),
        (name = "movies", description = "Legacy movie deletion endpoint"),
        (name = "health", description = "Service health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/v2/quotes",
            "/api/v2/quotes/random",
            "/api/v2/quotes/{id}",
            "/api/v2/authors",
            "/api/v2/authors/{id}",
            "/api/v2/users/register",
            "/api/v2/users/token",
            "/api/v2/users",
            "/api/v2/users/{id}",
            "/movies/{id}",
            "/health",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should describe {path}"
            );
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");

        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn token_response_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let token_schema = schemas.get("TokenResponse").expect("TokenResponse schema");

        assert_object_schema_has_field(token_schema, "token");
        assert_object_schema_has_field(token_schema, "token_type");
        assert_object_schema_has_field(token_schema, "expires_in");
    }

    #[test]
    fn user_response_schema_omits_the_password_hash() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;

        match schemas.get("UserResponse").expect("UserResponse schema") {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("username"));
                assert!(!obj.properties.contains_key("password_hash"));
            }
            _ => panic!("expected Object schema"),
        }
    }
}
