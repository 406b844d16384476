pub mod batch;
pub mod global_styles;
pub mod health;
pub mod schemas;
pub mod sidebars;
pub mod themes;
pub mod widgets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /global-styles/{id}                               get, update
/// /global-styles/{parent}/revisions                 list (GET, HEAD)
/// /global-styles/{parent}/revisions/{id}            get (GET, HEAD)
///
/// /sidebars                                         list (GET, HEAD)
/// /sidebars/{id}                                    get (GET, HEAD), update (PUT, POST)
///
/// /widgets/{id}                                     delete (?force=true)
///
/// /themes/active                                    get, switch (PUT)
///
/// /batch                                            run sub-requests (POST)
///
/// /schemas/{resource}                               schema introspection (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/global-styles", global_styles::router())
        .nest("/sidebars", sidebars::router())
        .nest("/widgets", widgets::router())
        .nest("/themes", themes::router())
        .nest("/batch", batch::router())
        .nest("/schemas", schemas::router())
}
