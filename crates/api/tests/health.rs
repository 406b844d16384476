//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, header, ACTIVE_THEME};
use sqlx::PgPool;
use tower::ServiceExt;
use trellis_api::hooks::PrepareHooks;
use trellis_api::registry::register_default_sidebars;
use trellis_core::sidebar::SidebarRegistry;

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_and_theme(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["active_theme"], ACTIVE_THEME);
    assert_eq!(json["registered_sidebars"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_counts_registered_sidebars(pool: PgPool) {
    let mut registry = SidebarRegistry::new();
    register_default_sidebars(&mut registry);
    let app = common::build_test_app_with(pool, registry, PrepareHooks::new());

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["registered_sidebars"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_degraded_without_database(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    pool.close().await;

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["active_theme"].is_null());
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/posts").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = header(&response, "x-request-id").expect("missing x-request-id");
    assert_eq!(request_id.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight exposes the pagination headers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_head(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/sidebars")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "HEAD")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "access-control-allow-origin"),
        Some("http://localhost:5173")
    );
    let allow_methods = header(&response, "access-control-allow-methods").unwrap();
    assert!(allow_methods.contains("HEAD"), "got: {allow_methods}");
}
