//! Global styles revisions: payload extraction and the response shape per
//! view context.

use chrono::FixedOffset;
use serde_json::{json, Map, Value};

use crate::context::ViewContext;
use crate::types::{DbId, Timestamp};

/// Fields exposed in the `view` and `edit` contexts.
pub const REVISION_FIELDS: &[&str] = &[
    "id",
    "parent",
    "author",
    "date",
    "date_gmt",
    "modified",
    "modified_gmt",
    "styles",
    "settings",
];

/// Fields exposed in the `embed` context.
pub const EMBED_FIELDS: &[&str] = &["author", "date", "id", "parent"];

/// Date format used for every date field (no offset suffix).
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Immutable snapshot of a global styles document.
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    pub id: DbId,
    pub parent_id: DbId,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
    pub styles: Value,
    pub settings: Value,
}

impl Revision {
    /// Serialize for a response. `site_offset` is the site's local offset
    /// from UTC, used for `date` and `modified`.
    pub fn to_json(&self, context: ViewContext, site_offset: FixedOffset) -> Value {
        let date = format_local(self.created_at, site_offset);
        if context == ViewContext::Embed {
            return json!({
                "author": self.author_id,
                "date": date,
                "id": self.id,
                "parent": self.parent_id,
            });
        }

        json!({
            "id": self.id,
            "parent": self.parent_id,
            "author": self.author_id,
            "date": date,
            "date_gmt": format_gmt(self.created_at),
            "modified": format_local(self.modified_at, site_offset),
            "modified_gmt": format_gmt(self.modified_at),
            "styles": self.styles,
            "settings": self.settings,
        })
    }
}

/// Split a global styles document into its `styles` and `settings`
/// sections. Missing or non-object sections become `{}`.
pub fn split_content(content: &Value) -> (Value, Value) {
    let section = |key: &str| match content.get(key) {
        Some(Value::Object(map)) => Value::Object(map.clone()),
        _ => Value::Object(Map::new()),
    };
    (section("styles"), section("settings"))
}

/// Merge a partial update into an existing document. Only `styles` and
/// `settings` are replaced; everything else (e.g. `version`) is kept.
pub fn merge_content(current: &Value, styles: Option<&Value>, settings: Option<&Value>) -> Value {
    let mut merged = match current {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    if let Some(styles) = styles {
        merged.insert("styles".to_string(), styles.clone());
    }
    if let Some(settings) = settings {
        merged.insert("settings".to_string(), settings.clone());
    }
    Value::Object(merged)
}

pub fn format_gmt(ts: Timestamp) -> String {
    ts.naive_utc().format(DATE_FORMAT).to_string()
}

pub fn format_local(ts: Timestamp, site_offset: FixedOffset) -> String {
    ts.with_timezone(&site_offset).format(DATE_FORMAT).to_string()
}
