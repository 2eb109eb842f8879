//! Shared harness for the API integration tests.
//!
//! Each test gets a fresh database from `#[sqlx::test]` and its own
//! temporary upload directory. Requests go through the same router and
//! middleware stack that `main.rs` serves.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use box_api::config::{LogFormat, ServerConfig, SessionConfig, UploadConfig};
use box_api::middleware::admin::ADMIN_SECRET_HEADER;
use box_api::router::build_app_router;
use box_api::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_SECRET: &str = "test-admin-secret";
pub const PASSWORD: &str = "correct horse battery";

/// A router plus the temporary storage root its upload directories live in.
///
/// The directory is removed when the `TestApp` is dropped.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    storage: TempDir,
}

impl TestApp {
    /// A cheap clone of the router for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Served directory for completed uploads.
    pub fn upload_dir(&self) -> &Path {
        &self.config.upload.dir
    }

    /// Directory holding in-flight upload bodies.
    pub fn staging_dir(&self) -> &Path {
        &self.config.upload.staging_dir
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage: &Path) -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "test-session-secret-with-enough-length".to_string(),
            ttl_hours: 24,
            cookie_secure: false,
        },
        admin_secret: Some(ADMIN_SECRET.to_string()),
        public_base_url: "http://localhost:3000".to_string(),
        upload: UploadConfig {
            dir: storage.join("files"),
            staging_dir: storage.join("partial"),
            url_ttl_secs: 900,
            max_bytes: 1024,
        },
        static_dir: None,
        verification_ttl_hours: 48,
        log_format: LogFormat::Pretty,
    }
}

pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, |_| {})
}

/// Build the app after letting the caller adjust the config.
pub fn build_test_app_with(pool: PgPool, adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let storage = tempfile::tempdir().expect("temp storage dir");
    let mut config = test_config(storage.path());
    adjust(&mut config);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let router = build_app_router(state, &config).expect("router should build");
    TestApp {
        router,
        config,
        storage,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with an optional session cookie and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::GET, uri, cookie, None).await
}

pub async fn post_json(app: Router, uri: &str, cookie: Option<&str>, body: Value) -> Response {
    send(app, Method::POST, uri, cookie, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, cookie: Option<&str>, body: Value) -> Response {
    send(app, Method::PUT, uri, cookie, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, cookie, None).await
}

/// Send an admin API request carrying `secret` in `x-admin-secret`.
pub async fn admin(
    app: Router,
    method: Method,
    uri: &str,
    secret: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(secret) = secret {
        builder = builder.header(ADMIN_SECRET_HEADER, secret);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// The `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie(response: &Response) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A registered user and the cookie for their session.
pub struct TestUser {
    pub id: i64,
    pub box_code: String,
    pub cookie: String,
}

impl TestUser {
    pub fn cookie(&self) -> Option<&str> {
        Some(self.cookie.as_str())
    }
}

/// Register through the API and return the signed-in user.
pub async fn register(app: Router, email: &str, role: &str) -> TestUser {
    let body = serde_json::json!({
        "email": email,
        "password": PASSWORD,
        "display_name": email.split('@').next().unwrap(),
        "role": role,
    });
    let response = post_json(app, "/api/v1/auth/register", None, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    let json = body_json(response).await;
    TestUser {
        id: json["id"].as_i64().unwrap(),
        box_code: json["box_code"].as_str().unwrap().to_string(),
        cookie,
    }
}

pub async fn register_artist(app: Router, email: &str) -> TestUser {
    register(app, email, "artist").await
}

pub async fn register_studio(app: Router, email: &str) -> TestUser {
    register(app, email, "studio").await
}

/// Create a note through the API and return its id.
pub async fn create_note(app: Router, user: &TestUser, content: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/notes",
        user.cookie(),
        serde_json::json!({ "content": content }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Share a note and approve it through the admin API. Returns the
/// shared-content id.
pub async fn share_and_approve(app: &TestApp, user: &TestUser, note_id: i64) -> i64 {
    let response = post_json(
        app.app(),
        &format!("/api/v1/notes/{note_id}/share"),
        user.cookie(),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let shared_id = body_json(response).await["id"].as_i64().unwrap();

    let response = admin(
        app.app(),
        Method::POST,
        &format!("/api/v1/admin/submissions/{shared_id}/approve"),
        Some(ADMIN_SECRET),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    shared_id
}
