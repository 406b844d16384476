use axum::routing::get;
use axum::Router;

use crate::handlers::themes;
use crate::state::AppState;

/// Theme routes mounted at `/themes`.
///
/// ```text
/// GET /active  -> get_active_theme
/// PUT /active  -> switch_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/active",
        get(themes::get_active_theme).put(themes::switch_theme),
    )
}
