//! Widget instance identifiers of the form `{id_base}-{number}`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static WIDGET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9_-]+)-([1-9][0-9]*)$").expect("valid widget id regex"));

/// A parsed widget instance id such as `text-2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetId {
    pub id_base: String,
    pub number: i64,
}

impl WidgetId {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let caps = WIDGET_ID_RE.captures(raw).ok_or_else(|| {
            CoreError::invalid_param(
                "widgets",
                format!("'{raw}' is not a widget id of the form <type>-<number>"),
            )
        })?;
        let number = caps[2].parse::<i64>().map_err(|_| {
            CoreError::invalid_param("widgets", format!("'{raw}' has an out of range number"))
        })?;
        Ok(Self {
            id_base: caps[1].to_string(),
            number,
        })
    }

    /// `true` if `raw` parses as a widget id.
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id_base, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_id() {
        let id = WidgetId::parse("text-1").unwrap();
        assert_eq!(id.id_base, "text");
        assert_eq!(id.number, 1);
        assert_eq!(id.to_string(), "text-1");
    }

    #[test]
    fn id_base_may_contain_hyphens() {
        let id = WidgetId::parse("recent-posts-12").unwrap();
        assert_eq!(id.id_base, "recent-posts");
        assert_eq!(id.number, 12);
    }

    #[test]
    fn bare_type_is_rejected() {
        assert!(!WidgetId::is_valid("rss"));
        assert!(!WidgetId::is_valid("rss-"));
        assert!(!WidgetId::is_valid("rss-0"));
        assert!(!WidgetId::is_valid("Text-1"));
        assert!(!WidgetId::is_valid(""));
    }

    #[test]
    fn overflowing_number_is_rejected() {
        assert!(WidgetId::parse("text-99999999999999999999").is_err());
    }
}
