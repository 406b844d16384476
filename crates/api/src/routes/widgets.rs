use axum::routing::delete;
use axum::Router;

use crate::handlers::widgets;
use crate::state::AppState;

/// Widget routes mounted at `/widgets`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(widgets::delete_widget))
}
