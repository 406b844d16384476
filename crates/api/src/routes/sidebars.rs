use axum::routing::get;
use axum::Router;

use crate::handlers::sidebars;
use crate::state::AppState;

/// Sidebar routes mounted at `/sidebars`.
///
/// ```text
/// GET       /       -> list_sidebars (HEAD too)
/// GET       /{id}   -> get_sidebar (HEAD too)
/// PUT|POST  /{id}   -> update_sidebar
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(sidebars::list_sidebars)).route(
        "/{id}",
        get(sidebars::get_sidebar)
            .put(sidebars::update_sidebar)
            .post(sidebars::update_sidebar),
    )
}
