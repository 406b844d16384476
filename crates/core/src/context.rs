//! The `context` request parameter shared by every read endpoint.

use serde::Serialize;

use crate::error::CoreError;

/// How much of a record the response should expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewContext {
    #[default]
    View,
    Embed,
    Edit,
}

/// Accepted values, in the order they are advertised by the schema endpoint.
pub const VIEW_CONTEXTS: &[&str] = &["view", "embed", "edit"];

impl ViewContext {
    /// Parse an optional raw `context` value; absent means [`ViewContext::View`].
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw {
            None => Ok(ViewContext::View),
            Some("view") => Ok(ViewContext::View),
            Some("embed") => Ok(ViewContext::Embed),
            Some("edit") => Ok(ViewContext::Edit),
            Some(other) => Err(CoreError::invalid_param(
                "context",
                format!(
                    "'{other}' is not one of {}",
                    VIEW_CONTEXTS.join(", ")
                ),
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewContext::View => "view",
            ViewContext::Embed => "embed",
            ViewContext::Edit => "edit",
        }
    }
}
