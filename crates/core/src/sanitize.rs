//! HTML sanitization for free-text fields (sidebar descriptions).

use std::collections::HashSet;
use std::sync::LazyLock;

/// Allows inline formatting and links; drops scripts, frames and embeds
/// together with their content.
static DESCRIPTION_CLEANER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut cleaner = ammonia::Builder::default();
    cleaner
        .strip_comments(true)
        .link_rel(None)
        .url_relative(ammonia::UrlRelative::PassThrough)
        .clean_content_tags(HashSet::from(["script", "style", "iframe", "object", "embed"]));
    cleaner
});

/// Strip disallowed markup from a description, keeping benign inline HTML.
pub fn sanitize_description(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    DESCRIPTION_CLEANER.clean(raw).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_iframe() {
        let raw = "<iframe></iframe>This is a <b>description</b> with some <a href=\"#\">markup</a>.<script></script>";
        assert_eq!(
            sanitize_description(raw),
            "This is a <b>description</b> with some <a href=\"#\">markup</a>."
        );
    }

    #[test]
    fn script_content_is_dropped() {
        assert_eq!(sanitize_description("a<script>alert(1)</script>b"), "ab");
    }

    #[test]
    fn event_handlers_are_removed() {
        let cleaned = sanitize_description("<b onclick=\"x()\">bold</b>");
        assert_eq!(cleaned, "<b>bold</b>");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(sanitize_description("Footer area"), "Footer area");
        assert_eq!(sanitize_description(""), "");
    }
}
