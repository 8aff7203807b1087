//! Shared helpers for the HTTP integration tests.
//!
//! Each test file pulls this in with `mod common;` and uses a subset, so
//! unused-helper warnings are silenced here.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use studio_api::auth::jwt::{generate_access_token, JwtConfig};
use studio_api::auth::password::hash_password;
use studio_api::config::ServerConfig;
use studio_api::routes;
use studio_api::state::AppState;
use studio_core::roles::Role;
use studio_core::types::DbId;
use studio_db::models::photo::CreatePhoto;
use studio_db::models::photo_session::CreatePhotoSession;
use studio_db::models::user::{CreateUser, User};
use studio_db::repositories::{PhotoRepo, PhotoSessionRepo, UserRepo};

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "password123";

/// JWT settings shared by the app under test and [`token_for`].
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 30,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router should not fail")
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        request(Method::POST, uri, None)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(
        app,
        request(Method::PUT, uri, Some(token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::PUT, uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// POST an arbitrary body with the given content type.
pub async fn post_raw_auth(
    app: Router,
    uri: &str,
    token: &str,
    content_type: &str,
    body: &str,
) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response {
    send(
        app,
        request(Method::POST, uri, None)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
    )
    .await
}

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user whose password is [`TEST_PASSWORD`]. The email is derived
/// from `name`.
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    role: Role,
    photographer_id: Option<DbId>,
) -> User {
    let mut conn = pool.acquire().await.unwrap();
    UserRepo::create(
        &mut conn,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@studio.test"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role,
            photographer_id,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// A valid bearer token for `user`.
pub fn token_for(user: &User) -> String {
    generate_access_token(&user.email, &test_jwt_config()).expect("token generation should succeed")
}

/// Create a session owned by `photographer_id` with `count` photos; returns
/// the photo ids in creation order.
pub async fn session_with_photos(pool: &PgPool, photographer_id: DbId, count: usize) -> Vec<DbId> {
    let mut conn = pool.acquire().await.unwrap();
    let session = PhotoSessionRepo::create(
        &mut conn,
        &CreatePhotoSession {
            name: "Portrait session".to_string(),
            date: chrono::Utc::now(),
            photographer_id,
        },
    )
    .await
    .unwrap();

    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let photo = PhotoRepo::create(
            &mut conn,
            &CreatePhoto {
                description: format!("shot {i}"),
                path: format!("/sessions/{}/{i}.jpg", session.id),
                session_id: session.id,
            },
        )
        .await
        .unwrap();
        ids.push(photo.id);
    }
    ids
}

/// The usual cast: a photographer with two clients, a second photographer
/// with one client, and an admin.
pub struct Studio {
    pub admin: User,
    pub photographer: User,
    pub client: User,
    pub other_client: User,
    pub other_photographer: User,
    pub foreign_client: User,
}

pub async fn studio(pool: &PgPool) -> Studio {
    let admin = create_user(pool, "admin", Role::Admin, None).await;
    let photographer = create_user(pool, "pat", Role::Photographer, None).await;
    let client = create_user(pool, "cleo", Role::Client, Some(photographer.id)).await;
    let other_client = create_user(pool, "carl", Role::Client, Some(photographer.id)).await;
    let other_photographer = create_user(pool, "paula", Role::Photographer, None).await;
    let foreign_client = create_user(pool, "fred", Role::Client, Some(other_photographer.id)).await;
    Studio {
        admin,
        photographer,
        client,
        other_client,
        other_photographer,
        foreign_client,
    }
}
