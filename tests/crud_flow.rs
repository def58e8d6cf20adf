//! End-to-end flow tests against a running MongoDB.
//!
//! Tests the complete API lifecycle:
//! - Registration, token issuance, and authenticated writes
//! - Quote and author CRUD round trips
//! - User management authorization rules
//! - The legacy movie deletion route
//!
//! # Requirements
//!
//! These tests require a MongoDB server. Set the `MONGO_URI` environment
//! variable or have a local server at `mongodb://localhost:27017`.
//!
//! Each test works in its own throwaway database, dropped at the end.
//! If the server is not available, tests will be skipped automatically.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use mongodb::{
    Client, Database,
    bson::{Document, doc, oid::ObjectId},
    options::ClientOptions,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use programming_quotes_api::{
    AppState, app, config::Config, db, services::auth_service::AuthService,
};

const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";

/// Connect to the test server and return a throwaway database.
/// Returns None if the server is not available, allowing tests to be skipped.
async fn try_connect() -> Option<Database> {
    let uri =
        std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mut options = ClientOptions::parse(&uri).await.ok()?;
    options.server_selection_timeout = Some(Duration::from_secs(3));

    let client = Client::with_options(options).ok()?;
    let database = client.database(&format!(
        "programming_quotes_test_{}",
        ObjectId::new().to_hex()
    ));

    // One ping proves the server is reachable
    database.run_command(doc! { "ping": 1 }).await.ok()?;

    Some(database)
}

/// Macro to skip tests if the store is not available.
macro_rules! require_store {
    ($db_var:ident) => {
        let $db_var = match try_connect().await {
            Some(db) => db,
            None => {
                eprintln!("Skipping test: MongoDB not available");
                return;
            }
        };
    };
}

/// Build the application router over the given throwaway database.
fn test_app(database: Database) -> Router {
    let config = Config {
        mongo_uri: String::new(),
        mongo_db: database.name().to_string(),
        server_port: 0,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_issuer: "programming-quotes-api".to_string(),
        jwt_audience: "programming-quotes-api".to_string(),
        jwt_validate_issuer: true,
        jwt_validate_audience: true,
        jwt_ttl_secs: 3600,
    };
    let auth = AuthService::new(&config).expect("auth service should initialize");

    app(AppState::new(database, auth))
}

/// Helper to make a JSON request.
fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper to make an authenticated JSON request.
fn authed_json_request(method: Method, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper to make an authenticated bodyless request.
fn authed_request(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Parse response body as generic JSON Value.
async fn parse_body_value(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Exchange a registered user's credentials for a bearer token.
async fn token_for(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/token",
            &json!({ "username": username, "password": "a strong password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    parse_body_value(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register a user and exchange the credentials for a bearer token.
async fn register_and_token(app: &Router, username: &str, password: &str) -> String {
    let credentials = json!({ "username": username, "password": password });

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/register",
            &credentials,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/token",
            &credentials,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body_value(response).await;
    assert_eq!(body["token_type"], "Bearer");

    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_a_connected_store() {
    require_store!(database);
    let app = test_app(database.clone());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body_value(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    database.drop().await.ok();
}

#[tokio::test]
async fn quote_lifecycle_round_trip() {
    require_store!(database);
    let app = test_app(database.clone());

    let token = register_and_token(&app, "quote-editor", "a strong password").await;

    // Create
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/v2/quotes",
            &token,
            &json!({
                "text": "Talk is cheap. Show me the code.",
                "author": "Linus Torvalds",
                "tags": ["pragmatism"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = parse_body_value(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["author"], "Linus Torvalds");

    // Read it back
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v2/quotes/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = parse_body_value(response).await;
    assert_eq!(fetched["text"], "Talk is cheap. Show me the code.");

    // With a single quote stored, random sampling has one possible answer
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v2/quotes/random")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sampled = parse_body_value(response).await;
    assert_eq!(sampled["id"], id.as_str());

    // Update
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v2/quotes/{id}"),
            &token,
            &json!({ "tags": ["pragmatism", "linux"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = parse_body_value(response).await;
    assert_eq!(updated["tags"], json!(["pragmatism", "linux"]));
    assert_eq!(updated["text"], "Talk is cheap. Show me the code.");

    // Delete, then the quote is gone
    let response = app
        .clone()
        .oneshot(authed_request(
            Method::DELETE,
            &format!("/api/v2/quotes/{id}"),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v2/quotes/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_body_value(response).await;
    assert_eq!(body["error"]["code"], "quote_not_found");

    database.drop().await.ok();
}

#[tokio::test]
async fn author_filter_and_limit_narrow_the_list() {
    require_store!(database);
    let app = test_app(database.clone());

    let token = register_and_token(&app, "list-editor", "a strong password").await;

    for (text, author) in [
        ("Simplicity is prerequisite for reliability.", "Edsger Dijkstra"),
        ("Testing shows the presence, not the absence of bugs.", "Edsger Dijkstra"),
        ("The best way to predict the future is to invent it.", "Alan Kay"),
    ] {
        let response = app
            .clone()
            .oneshot(authed_json_request(
                Method::POST,
                "/api/v2/quotes",
                &token,
                &json!({ "text": text, "author": author }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v2/quotes?author=Edsger%20Dijkstra")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let filtered = parse_body_value(response).await;
    assert_eq!(filtered.as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v2/quotes?limit=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let limited = parse_body_value(response).await;
    assert_eq!(limited.as_array().unwrap().len(), 1);

    database.drop().await.ok();
}

#[tokio::test]
async fn author_lifecycle_round_trip() {
    require_store!(database);
    let app = test_app(database.clone());

    let token = register_and_token(&app, "author-editor", "a strong password").await;

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/v2/authors",
            &token,
            &json!({
                "name": "Grace Hopper",
                "bio": "Rear admiral and compiler pioneer."
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = parse_body_value(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v2/authors/{id}"),
            &token,
            &json!({ "wiki_url": "https://en.wikipedia.org/wiki/Grace_Hopper" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = parse_body_value(response).await;
    assert_eq!(
        updated["wiki_url"],
        "https://en.wikipedia.org/wiki/Grace_Hopper"
    );
    assert_eq!(updated["name"], "Grace Hopper");

    let response = app
        .clone()
        .oneshot(authed_request(
            Method::DELETE,
            &format!("/api/v2/authors/{id}"),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v2/authors/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_body_value(response).await;
    assert_eq!(body["error"]["code"], "author_not_found");

    database.drop().await.ok();
}

#[tokio::test]
async fn duplicate_usernames_conflict() {
    require_store!(database);

    // The uniqueness guarantee lives in the index, so create it first
    db::ensure_indexes(&database).await.unwrap();

    let app = test_app(database.clone());
    let credentials = json!({ "username": "ada", "password": "a strong password" });

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/register",
            &credentials,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/register",
            &credentials,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = parse_body_value(response).await;
    assert_eq!(body["error"]["code"], "username_taken");

    database.drop().await.ok();
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    require_store!(database);
    let app = test_app(database.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/register",
            &json!({ "username": "ada", "password": "a strong password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Wrong password
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/token",
            &json!({ "username": "ada", "password": "not her password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_body_value(response).await;
    assert_eq!(body["error"]["code"], "invalid_credentials");

    // Unknown username gets the same answer
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/token",
            &json!({ "username": "nobody", "password": "a strong password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_body_value(response).await;
    assert_eq!(body["error"]["code"], "invalid_credentials");

    database.drop().await.ok();
}

#[tokio::test]
async fn user_management_respects_roles() {
    require_store!(database);
    let app = test_app(database.clone());

    // Two fresh editors
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/register",
            &json!({ "username": "root-user", "password": "a strong password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let root_id = parse_body_value(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/register",
            &json!({ "username": "plain-user", "password": "a strong password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let plain_id = parse_body_value(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Promote one of them directly in the store; tokens issued afterwards
    // carry the new role
    database
        .collection::<Document>("users")
        .update_one(
            doc! { "username": "root-user" },
            doc! { "$set": { "role": "admin" } },
        )
        .await
        .unwrap();

    let root_token = token_for(&app, "root-user").await;
    let plain_token = token_for(&app, "plain-user").await;

    // An editor may not touch someone else's account
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v2/users/{root_id}"),
            &plain_token,
            &json!({ "password": "a different password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = parse_body_value(response).await;
    assert_eq!(body["error"]["code"], "forbidden");

    // Nor assign roles, even to themselves
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v2/users/{plain_id}"),
            &plain_token,
            &json!({ "role": "admin" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An admin may promote anyone
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v2/users/{plain_id}"),
            &root_token,
            &json!({ "role": "admin" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body_value(response).await;
    assert_eq!(body["role"], "admin");

    // Changing your own password works and the new credentials sign in
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::PUT,
            &format!("/api/v2/users/{plain_id}"),
            &plain_token,
            &json!({ "password": "a replacement password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/token",
            &json!({ "username": "plain-user", "password": "a replacement password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    database.drop().await.ok();
}

#[tokio::test]
async fn listed_users_never_leak_password_hashes() {
    require_store!(database);
    let app = test_app(database.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v2/users/register",
            &json!({ "username": "ada", "password": "a strong password" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v2/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();
    assert!(body_str.contains("ada"));
    assert!(!body_str.contains("password_hash"));
    assert!(!body_str.contains("argon2"));

    database.drop().await.ok();
}

#[tokio::test]
async fn legacy_movie_deletion_answers_in_plain_text() {
    require_store!(database);
    let app = test_app(database.clone());

    // Seed a document the way the original deployment stored them
    let result = database
        .collection::<Document>("filmovi")
        .insert_one(doc! { "naslov": "Ko to tamo peva", "godina": 1980 })
        .await
        .unwrap();
    let id = result.inserted_id.as_object_id().unwrap().to_hex();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/movies/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        format!("Unos sa ID {id} je obrisan.")
    );

    // A second attempt finds nothing
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/movies/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_body_value(response).await;
    assert_eq!(body["error"]["code"], "movie_not_found");

    database.drop().await.ok();
}
