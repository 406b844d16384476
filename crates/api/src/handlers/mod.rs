pub mod batch;
pub mod global_styles;
pub mod schemas;
pub mod sidebars;
pub mod themes;
pub mod widgets;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use trellis_core::pagination::PageWindow;

pub const X_TOTAL: HeaderName = HeaderName::from_static("x-total");
pub const X_TOTAL_PAGES: HeaderName = HeaderName::from_static("x-total-pages");

/// `X-Total`, `X-Total-Pages` and `Link` headers for a paginated list.
pub(crate) fn pagination_headers(
    window: &PageWindow,
    base_url: &str,
    query: &[(String, String)],
) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL, HeaderValue::from(window.total));
    headers.insert(X_TOTAL_PAGES, HeaderValue::from(window.total_pages));
    if let Some(link) = window.link_header(base_url, query) {
        match HeaderValue::from_str(&link) {
            Ok(value) => {
                headers.insert(axum::http::header::LINK, value);
            }
            Err(e) => tracing::warn!(error = %e, link, "Dropping unrepresentable Link header"),
        }
    }
    headers
}
