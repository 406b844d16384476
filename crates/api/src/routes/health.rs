//! `/health`: liveness plus a summary of the appearance state.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use trellis_db::repositories::SiteOptionRepo;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `None` when the database is down or the option is unset.
    pub active_theme: Option<String>,
    /// Sidebar registrations across every theme.
    pub registered_sidebars: usize,
}

async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let active_theme = SiteOptionRepo::get_active_theme(&state.pool).await;
    let db_healthy = active_theme.is_ok();
    if let Err(e) = &active_theme {
        tracing::warn!(error = %e, "Health check could not reach the database");
    }

    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        active_theme: active_theme.ok().flatten(),
        registered_sidebars: state.sidebar_registry().iter().count(),
    })
}

/// Root-level routes, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
