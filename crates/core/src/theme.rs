//! Theme stylesheet names.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static STYLESHEET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("valid stylesheet regex"));

/// Validate a stylesheet (theme directory) name, trimming surrounding
/// whitespace.
pub fn parse_stylesheet(raw: &str) -> Result<&str, CoreError> {
    let stylesheet = raw.trim();
    if STYLESHEET_RE.is_match(stylesheet) {
        Ok(stylesheet)
    } else {
        Err(CoreError::invalid_param(
            "stylesheet",
            format!("'{stylesheet}' is not a valid theme stylesheet"),
        ))
    }
}
