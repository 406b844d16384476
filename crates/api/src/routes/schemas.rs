use axum::routing::get;
use axum::Router;

use crate::handlers::schemas;
use crate::state::AppState;

/// Schema routes mounted at `/schemas`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{resource}", get(schemas::get_schema))
}
