//! Persisted sidebar widget assignment.

use serde::Serialize;
use sqlx::FromRow;

/// One `(sidebar, widget)` pair joined from `sidebars` and `sidebar_widgets`.
///
/// Sidebars with no widgets produce a single row with `widget_id = NULL`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SidebarWidgetRow {
    pub sidebar_id: String,
    pub widget_id: Option<String>,
}
