//! Per-item response transforms.
//!
//! Every item a handler serializes passes through each registered
//! [`PrepareHook`] in registration order. Hooks may rewrite the item's JSON
//! and add response headers. List routes discard headers added per item.

use axum::http::HeaderMap;
use serde_json::Value;

/// The resource an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    GlobalStylesRevision,
    Sidebar,
}

/// A transform run on every serialized item.
pub trait PrepareHook: Send + Sync {
    fn prepare(&self, resource: ResourceKind, item: &mut Value, headers: &mut HeaderMap);
}

impl<F> PrepareHook for F
where
    F: Fn(ResourceKind, &mut Value, &mut HeaderMap) + Send + Sync,
{
    fn prepare(&self, resource: ResourceKind, item: &mut Value, headers: &mut HeaderMap) {
        self(resource, item, headers)
    }
}

/// Ordered list of registered hooks.
#[derive(Default)]
pub struct PrepareHooks {
    hooks: Vec<Box<dyn PrepareHook>>,
}

impl PrepareHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: impl PrepareHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn apply(&self, resource: ResourceKind, item: &mut Value, headers: &mut HeaderMap) {
        for hook in &self.hooks {
            hook.prepare(resource, item, headers);
        }
    }
}

/// Keep only the named top-level fields of an object. An empty list keeps
/// everything.
pub fn filter_fields(item: &mut Value, fields: &[String]) {
    if fields.is_empty() {
        return;
    }
    if let Value::Object(map) = item {
        map.retain(|key, _| fields.iter().any(|f| f == key));
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use serde_json::json;

    use super::*;

    #[test]
    fn hooks_run_in_registration_order() {
        let mut hooks = PrepareHooks::new();
        hooks.register(|_: ResourceKind, item: &mut Value, _: &mut HeaderMap| {
            item["tag"] = json!("first");
        });
        hooks.register(|_: ResourceKind, item: &mut Value, headers: &mut HeaderMap| {
            item["tag"] = json!(format!("{}-second", item["tag"].as_str().unwrap_or("")));
            headers.insert("x-prepared", HeaderValue::from_static("1"));
        });

        let mut item = json!({"id": 1});
        let mut headers = HeaderMap::new();
        hooks.apply(ResourceKind::Sidebar, &mut item, &mut headers);

        assert_eq!(item["tag"], "first-second");
        assert_eq!(headers["x-prepared"], "1");
    }

    #[test]
    fn filter_fields_keeps_named_keys() {
        let mut item = json!({"id": 1, "name": "Footer", "widgets": []});
        filter_fields(&mut item, &["id".to_string(), "widgets".to_string()]);
        assert_eq!(item, json!({"id": 1, "widgets": []}));
    }

    #[test]
    fn empty_field_list_is_a_no_op() {
        let mut item = json!({"id": 1});
        filter_fields(&mut item, &[]);
        assert_eq!(item, json!({"id": 1}));
    }
}
