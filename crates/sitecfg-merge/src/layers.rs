//! The four configuration layers and the shallow overlay operator

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One source of configuration, lowest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Materialized schema defaults
    Default,
    /// Caller-supplied props
    Props,
    /// Tenant-persisted data
    Persisted,
    /// Live-editor working copy
    Live,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Props => "props",
            Self::Persisted => "persisted",
            Self::Live => "live",
        })
    }
}

/// Shallow top-level overwrite of `base` by `top`
///
/// Every key of `top` replaces the key of `base` wholesale; nested objects
/// are not merged.
pub fn overlay(base: &mut Map<String, Value>, top: &Map<String, Value>) {
    for (key, value) in top {
        base.insert(key.clone(), value.clone());
    }
}

/// Turn a layer value into an object, mapping anything else to `{}`
#[must_use]
pub fn normalize(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            tracing::debug!(?other, "non-object layer treated as empty");
            Map::new()
        }
    }
}

/// The four layers of one component instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataLayers {
    default: Map<String, Value>,
    props: Map<String, Value>,
    persisted: Map<String, Value>,
    live: Map<String, Value>,
}

impl DataLayers {
    /// Create layers from all four values
    #[must_use]
    pub fn new(default: Value, props: Value, persisted: Value, live: Value) -> Self {
        Self {
            default: normalize(default),
            props: normalize(props),
            persisted: normalize(persisted),
            live: normalize(live),
        }
    }

    /// Create layers holding only schema defaults
    #[must_use]
    pub fn from_default(default: Value) -> Self {
        Self {
            default: normalize(default),
            ..Self::default()
        }
    }

    /// Set the props layer
    #[inline]
    #[must_use]
    pub fn with_props(mut self, props: Value) -> Self {
        self.props = normalize(props);
        self
    }

    /// Set the persisted layer
    #[inline]
    #[must_use]
    pub fn with_persisted(mut self, persisted: Value) -> Self {
        self.persisted = normalize(persisted);
        self
    }

    /// Set the live layer
    #[inline]
    #[must_use]
    pub fn with_live(mut self, live: Value) -> Self {
        self.live = normalize(live);
        self
    }

    /// Get one layer
    #[inline]
    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> &Map<String, Value> {
        match kind {
            LayerKind::Default => &self.default,
            LayerKind::Props => &self.props,
            LayerKind::Persisted => &self.persisted,
            LayerKind::Live => &self.live,
        }
    }

    /// Schema defaults
    #[inline]
    #[must_use]
    pub fn default_data(&self) -> &Map<String, Value> {
        &self.default
    }

    /// Props
    #[inline]
    #[must_use]
    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    /// Persisted data
    #[inline]
    #[must_use]
    pub fn persisted(&self) -> &Map<String, Value> {
        &self.persisted
    }

    /// Live working copy
    #[inline]
    #[must_use]
    pub fn live(&self) -> &Map<String, Value> {
        &self.live
    }

    /// Seed for a fresh live slot: default, props, then persisted
    #[must_use]
    pub fn seed(&self) -> Value {
        let mut seed = self.default.clone();
        overlay(&mut seed, &self.props);
        overlay(&mut seed, &self.persisted);
        Value::Object(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        normalize(value)
    }

    #[test]
    fn overlay_replaces_nested_objects_wholesale() {
        let mut base = obj(json!({"content": {"title": "A", "subtitle": "B"}, "visible": true}));
        overlay(&mut base, &obj(json!({"content": {"title": "C"}})));
        assert_eq!(Value::Object(base), json!({"content": {"title": "C"}, "visible": true}));
    }

    #[test]
    fn non_object_layers_become_empty() {
        let layers = DataLayers::new(json!({"a": 1}), json!("props"), Value::Null, json!([1]));
        assert!(layers.props().is_empty());
        assert!(layers.persisted().is_empty());
        assert!(layers.live().is_empty());
        assert_eq!(layers.layer(LayerKind::Default).len(), 1);
    }

    #[test]
    fn seed_excludes_live() {
        let layers = DataLayers::from_default(json!({"a": 1, "b": 1, "c": 1}))
            .with_props(json!({"b": 2}))
            .with_persisted(json!({"c": 3}))
            .with_live(json!({"a": 4}));
        assert_eq!(layers.seed(), json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn layer_kinds_ordered_by_precedence() {
        assert!(LayerKind::Default < LayerKind::Props);
        assert!(LayerKind::Persisted < LayerKind::Live);
        assert_eq!(LayerKind::Persisted.to_string(), "persisted");
    }
}
