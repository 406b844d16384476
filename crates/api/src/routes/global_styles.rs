//! Route definitions for global styles, mounted at `/global-styles`.

use axum::routing::get;
use axum::Router;

use crate::handlers::global_styles;
use crate::state::AppState;

/// ```text
/// GET  /{id}                            -> get_global_styles
/// PUT  /{id}                            -> update_global_styles
/// GET  /{id}/revisions                  -> list_revisions (HEAD too)
/// GET  /{id}/revisions/{revision_id}    -> get_revision (HEAD too)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(global_styles::get_global_styles).put(global_styles::update_global_styles),
        )
        .route("/{id}/revisions", get(global_styles::list_revisions))
        .route("/{id}/revisions/{revision_id}", get(global_styles::get_revision))
}
