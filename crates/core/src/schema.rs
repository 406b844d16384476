//! JSON schemas advertised by the schema introspection endpoint.

use serde_json::{json, Value};

use crate::context::VIEW_CONTEXTS;

/// Resource names accepted by [`schema_for`].
pub const GLOBAL_STYLES_REVISION: &str = "global-styles-revision";
pub const SIDEBAR: &str = "sidebar";

/// Description of the `context` argument shared by every read route.
pub fn context_arg() -> Value {
    json!({
        "description": "Scope under which the request is made; determines fields present in response.",
        "type": "string",
        "default": "view",
        "enum": VIEW_CONTEXTS,
    })
}

fn global_styles_revision_schema() -> Value {
    let all = json!(["view", "edit"]);
    let with_embed = json!(["view", "edit", "embed"]);
    json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "title": "global-styles-revision",
        "type": "object",
        "properties": {
            "id": {
                "description": "Unique identifier for the revision.",
                "type": "integer",
                "context": with_embed,
            },
            "parent": {
                "description": "The ID for the parent of the revision.",
                "type": "integer",
                "context": with_embed,
            },
            "author": {
                "description": "The ID for the author of the global styles revision.",
                "type": "integer",
                "context": with_embed,
            },
            "date": {
                "description": "The date the revision was published, in the site's timezone.",
                "type": "string",
                "format": "date-time",
                "context": with_embed,
            },
            "date_gmt": {
                "description": "The date the revision was published, as GMT.",
                "type": "string",
                "format": "date-time",
                "context": all,
            },
            "modified": {
                "description": "The date the revision was last modified, in the site's timezone.",
                "type": "string",
                "format": "date-time",
                "context": all,
            },
            "modified_gmt": {
                "description": "The date the revision was last modified, as GMT.",
                "type": "string",
                "format": "date-time",
                "context": all,
            },
            "styles": {
                "description": "Global styles.",
                "type": "object",
                "context": all,
            },
            "settings": {
                "description": "Global settings.",
                "type": "object",
                "context": all,
            },
        },
    })
}

fn sidebar_schema() -> Value {
    let every = json!(["embed", "view", "edit"]);
    let text = |description: &str| {
        json!({
            "description": description,
            "type": "string",
            "default": "",
            "context": every,
            "readonly": true,
        })
    };
    json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "title": "sidebar",
        "type": "object",
        "properties": {
            "id": {
                "description": "ID of sidebar.",
                "type": "string",
                "context": every,
                "readonly": true,
            },
            "name": {
                "description": "Unique name identifying the sidebar.",
                "type": "string",
                "context": every,
                "readonly": true,
            },
            "description": text("Description of sidebar."),
            "class": text("Extra CSS class to assign to the sidebar in the Widgets interface."),
            "before_widget": text("HTML content to prepend to each widget's HTML output when assigned to this sidebar. Default is an opening list item element."),
            "after_widget": text("HTML content to append to each widget's HTML output when assigned to this sidebar. Default is a closing list item element."),
            "before_title": text("HTML content to prepend to the sidebar title when displayed. Default is an opening h2 element."),
            "after_title": text("HTML content to append to the sidebar title when displayed. Default is a closing h2 element."),
            "status": {
                "description": "Status of sidebar.",
                "type": "string",
                "enum": ["active", "inactive"],
                "context": every,
                "readonly": true,
            },
            "widgets": {
                "description": "Nested widgets.",
                "type": "array",
                "items": { "type": ["object", "string"] },
                "default": [],
                "context": every,
            },
        },
    })
}

/// Schema document for `resource`, or `None` for an unknown name.
///
/// The document carries the item schema and the arguments accepted by the
/// resource's read routes.
pub fn schema_for(resource: &str) -> Option<Value> {
    let schema = match resource {
        GLOBAL_STYLES_REVISION => global_styles_revision_schema(),
        SIDEBAR => sidebar_schema(),
        _ => return None,
    };
    Some(json!({
        "schema": schema,
        "args": { "context": context_arg() },
    }))
}
