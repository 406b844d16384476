//! Shared query parameter handling for API handlers.
//!
//! Read routes take their query string as ordered `(key, value)` pairs so
//! that pagination links can echo the request's own parameters back.

use serde::Deserialize;
use trellis_core::context::ViewContext;
use trellis_core::error::CoreError;
use trellis_core::pagination::{PageQuery, RawPageQuery};

/// The request's query parameters in arrival order.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(pub Vec<(String, String)>);

impl QueryParams {
    /// Last value given for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn context(&self) -> Result<ViewContext, CoreError> {
        ViewContext::parse(self.get("context"))
    }

    pub fn page_query(&self) -> Result<PageQuery, CoreError> {
        PageQuery::parse(RawPageQuery {
            page: self.get("page"),
            per_page: self.get("per_page"),
            offset: self.get("offset"),
        })
    }

    /// Field names from `_fields`, comma separated. Empty when absent.
    pub fn fields(&self) -> Vec<String> {
        self.get("_fields")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Boolean flag: `true`/`1` are true, anything else (or absence) false.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some("true" | "1"))
    }

    /// Parse a raw `a=1&b=2` query string (used by batch sub-requests).
    /// Keys and values are percent- and `+`-decoded the same way as the
    /// query of a top-level request.
    pub fn from_query_string(raw: &str) -> Result<Self, CoreError> {
        serde_urlencoded::from_str(raw)
            .map_err(|e| CoreError::invalid_param("path", format!("malformed query string: {e}")))
    }
}
