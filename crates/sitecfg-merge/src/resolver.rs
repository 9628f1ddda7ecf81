//! Layered merge resolver
//!
//! Precedence, lowest first: default, props, persisted, live. Persisted data
//! only takes part when non-empty. Live data is applied when persisted data
//! is empty, or when the staleness check says the live copy was edited.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use sitecfg_schema::FieldPath;

use crate::layers::{overlay, DataLayers, LayerKind};
use crate::pristine::{PristineCheck, SignatureField};

/// Merged value with its provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Merged configuration object
    pub merged: Value,
    /// Layer that supplied each top-level key
    pub origins: IndexMap<String, LayerKind>,
    /// Verdict of the staleness check
    pub pristine: bool,
    /// Whether the live layer took part
    pub live_applied: bool,
}

/// Resolves the four layers of an instance into one object
#[derive(Debug, Clone)]
pub struct Resolver<P = SignatureField> {
    pristine: P,
}

impl Resolver<SignatureField> {
    /// Resolver using the signature field heuristic on `path`
    #[inline]
    #[must_use]
    pub fn with_signature(path: FieldPath) -> Self {
        Self::new(SignatureField::new(path))
    }
}

impl<P: PristineCheck> Resolver<P> {
    /// Create resolver with a staleness check
    #[inline]
    #[must_use]
    pub fn new(pristine: P) -> Self {
        Self { pristine }
    }

    /// Staleness check in use
    #[inline]
    #[must_use]
    pub fn pristine_check(&self) -> &P {
        &self.pristine
    }

    /// Merge the layers
    #[must_use]
    pub fn resolve(&self, layers: &DataLayers) -> Value {
        self.resolve_traced(layers).merged
    }

    /// Merge the layers and record which layer supplied every key
    #[must_use]
    pub fn resolve_traced(&self, layers: &DataLayers) -> Resolution {
        let pristine = self.pristine.is_pristine(layers.live(), layers.default_data());
        let live_applied = layers.persisted().is_empty() || !pristine;

        let mut merged = Map::new();
        let mut origins = IndexMap::new();
        let mut apply = |kind: LayerKind| {
            let layer = layers.layer(kind);
            overlay(&mut merged, layer);
            for key in layer.keys() {
                origins.insert(key.clone(), kind);
            }
        };

        apply(LayerKind::Default);
        apply(LayerKind::Props);
        apply(LayerKind::Persisted);
        if live_applied {
            apply(LayerKind::Live);
        }

        tracing::trace!(pristine, live_applied, keys = merged.len(), "layers resolved");

        Resolution {
            merged: Value::Object(merged),
            origins,
            pristine,
            live_applied,
        }
    }
}

/// Merge four layers with the signature field heuristic on `signature_path`
#[must_use]
pub fn resolve(
    default: Value,
    props: Value,
    persisted: Value,
    live: Value,
    signature_path: &FieldPath,
) -> Value {
    let layers = DataLayers::new(default, props, persisted, live);
    Resolver::with_signature(signature_path.clone()).resolve(&layers)
}

/// Render-suppression convention: hidden iff `visible` is exactly `false`
#[must_use]
pub fn is_visible(merged: &Value) -> bool {
    merged.get("visible") != Some(&Value::Bool(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn title() -> FieldPath {
        "content.title".parse().unwrap()
    }

    struct Dirty(bool);

    impl PristineCheck for Dirty {
        fn is_pristine(&self, _live: &Map<String, Value>, _default: &Map<String, Value>) -> bool {
            !self.0
        }
    }

    #[test]
    fn scenario_edited_live_wins() {
        let merged = resolve(
            json!({"visible": true, "content": {"title": "Default"}}),
            json!({}),
            json!({"content": {"title": "Tenant Title"}}),
            json!({"content": {"title": "Tenant Title"}}),
            &title(),
        );
        assert_eq!(merged, json!({"visible": true, "content": {"title": "Tenant Title"}}));
    }

    #[test]
    fn scenario_pristine_live_yields_to_persisted() {
        let layers = DataLayers::new(
            json!({"visible": true, "content": {"title": "Default"}}),
            json!({}),
            json!({"content": {"title": "Tenant Title"}}),
            json!({"content": {"title": "Default"}}),
        );
        let resolution = Resolver::with_signature(title()).resolve_traced(&layers);
        assert!(resolution.pristine);
        assert!(!resolution.live_applied);
        assert_eq!(resolution.merged["content"]["title"], json!("Tenant Title"));
        assert_eq!(resolution.origins["content"], LayerKind::Persisted);
        assert_eq!(resolution.origins["visible"], LayerKind::Default);
    }

    #[test]
    fn scenario_no_persisted_live_always_wins() {
        let layers = DataLayers::new(
            json!({"content": {"title": "Default"}}),
            json!({}),
            json!({}),
            json!({"content": {"title": "Edited"}}),
        );
        let resolution = Resolver::new(Dirty(false)).resolve_traced(&layers);
        assert!(resolution.pristine);
        assert!(resolution.live_applied);
        assert_eq!(resolution.merged["content"]["title"], json!("Edited"));
    }

    #[test]
    fn props_override_defaults() {
        let layers = DataLayers::from_default(json!({"layout": "grid", "visible": true}))
            .with_props(json!({"layout": "list"}));
        let resolution = Resolver::with_signature(title()).resolve_traced(&layers);
        assert_eq!(resolution.merged, json!({"layout": "list", "visible": true}));
        assert_eq!(resolution.origins["layout"], LayerKind::Props);
    }

    #[test]
    fn replacement_check_changes_outcome() {
        let layers =
            DataLayers::new(json!({"k": "d"}), json!({}), json!({"k": "p"}), json!({"k": "l"}));
        assert_eq!(Resolver::new(Dirty(true)).resolve(&layers)["k"], json!("l"));
        assert_eq!(Resolver::new(Dirty(false)).resolve(&layers)["k"], json!("p"));
    }

    #[test]
    fn boxed_check() {
        let check: Box<dyn PristineCheck> = Box::new(Dirty(true));
        let layers = DataLayers::new(json!({}), json!({}), json!({"k": 1}), json!({"k": 2}));
        assert_eq!(Resolver::new(check).resolve(&layers), json!({"k": 2}));
    }

    #[test]
    fn visibility_convention() {
        assert!(is_visible(&json!({})));
        assert!(is_visible(&json!({"visible": true})));
        assert!(is_visible(&json!({"visible": "false"})));
        assert!(is_visible(&json!({"visible": null})));
        assert!(!is_visible(&json!({"visible": false})));
    }
}
