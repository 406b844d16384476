#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use trellis_api::auth::jwt::{generate_access_token, JwtConfig};
use trellis_api::config::ServerConfig;
use trellis_api::hooks::PrepareHooks;
use trellis_api::router::build_app_router;
use trellis_api::state::AppState;
use trellis_core::roles::ROLE_ADMINISTRATOR;
use trellis_core::sidebar::SidebarRegistry;
use trellis_db::models::global_styles::{CreateGlobalStyles, CreateGlobalStylesRevision};
use trellis_db::models::widget::CreateWidgetInstance;
use trellis_db::repositories::{GlobalStylesRepo, GlobalStylesRevisionRepo, WidgetInstanceRepo};

pub const BASE_URL: &str = "http://example.test";

/// Theme seeded as active by the migrations.
pub const ACTIVE_THEME: &str = "twentytwentyone";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        public_base_url: BASE_URL.to_string(),
        site_utc_offset_minutes: 0,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with no registered sidebars and no
/// prepare hooks.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, SidebarRegistry::new(), PrepareHooks::new())
}

/// Build the full application router through the same builder `main.rs`
/// uses, with the given registrations and hooks.
pub fn build_test_app_with(pool: PgPool, sidebars: SidebarRegistry, hooks: PrepareHooks) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), sidebars).with_hooks(hooks);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

pub fn admin_token() -> String {
    token_for(1, ROLE_ADMINISTRATOR)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn head_as(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::HEAD, uri, Some(token), None).await
}

pub async fn put_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn post_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn delete_as(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a global styles document for `theme`; returns its id.
pub async fn create_global_styles(pool: &PgPool, theme: &str) -> i64 {
    GlobalStylesRepo::create(
        pool,
        &CreateGlobalStyles {
            theme: theme.to_string(),
            content: json!({"version": 2, "isGlobalStylesUserThemeJSON": true}),
            author_id: 1,
        },
    )
    .await
    .unwrap()
    .id
}

/// Create a revision `minutes` after a fixed instant; returns its id.
pub async fn create_revision(pool: &PgPool, parent: i64, minutes: i64) -> i64 {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
    GlobalStylesRevisionRepo::create(
        pool,
        &CreateGlobalStylesRevision {
            global_styles_id: parent,
            author_id: 1,
            styles: json!({"color": {"background": "hotpink"}}),
            settings: json!({"color": {"custom": false}}),
            created_at: Some(created),
        },
    )
    .await
    .unwrap()
    .id
}

/// Create widget instance `{id_base}-{number}`.
pub async fn create_widget(pool: &PgPool, id_base: &str, number: i64) {
    WidgetInstanceRepo::create(
        pool,
        &CreateWidgetInstance {
            id_base: id_base.to_string(),
            number,
            settings: json!({"text": "Custom text test"}),
        },
    )
    .await
    .unwrap();
}
