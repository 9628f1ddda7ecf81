//! Live variant store
//!
//! Holds the live-editor working copy of each component instance being
//! edited. A slot is seeded once and never reset by later seeding attempts,
//! so re-rendering an instance cannot clobber the user's edits.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::{Map, Value};
use sitecfg_merge::{normalize, overlay};
use std::fmt;

/// Identity of one live slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    /// Component type
    pub component_type: String,
    /// Instance id
    pub instance_id: String,
}

impl SlotKey {
    /// Create key
    #[inline]
    #[must_use]
    pub fn new(component_type: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            instance_id: instance_id.into(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.component_type, self.instance_id)
    }
}

/// Per-instance live editing state
///
/// Passed explicitly to every call site that reads or edits live data.
pub trait LiveVariantStore: Send + Sync {
    /// Create the slot from `seed` unless it already exists
    ///
    /// Returns `true` if this call created the slot. An existing slot is left
    /// untouched.
    fn ensure(&self, component_type: &str, instance_id: &str, seed: Value) -> bool;

    /// Current slot contents, or `{}` if there is no slot
    fn get(&self, component_type: &str, instance_id: &str) -> Value;

    /// Shallow-overwrite the slot with `patch`, creating it if absent
    fn set(&self, component_type: &str, instance_id: &str, patch: Value);

    /// Drop one slot; returns whether it existed
    fn discard(&self, component_type: &str, instance_id: &str) -> bool;

    /// Drop every slot
    fn clear(&self);

    /// Number of slots
    fn len(&self) -> usize;

    /// Check if there are no slots
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`LiveVariantStore`]
///
/// `ensure` is atomic per key.
#[derive(Debug, Default)]
pub struct InMemoryLiveStore {
    slots: DashMap<SlotKey, Map<String, Value>>,
}

impl InMemoryLiveStore {
    /// Create empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of every slot, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<SlotKey> {
        let mut keys: Vec<_> = self.slots.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl LiveVariantStore for InMemoryLiveStore {
    fn ensure(&self, component_type: &str, instance_id: &str, seed: Value) -> bool {
        match self.slots.entry(SlotKey::new(component_type, instance_id)) {
            Entry::Occupied(_) => {
                tracing::trace!(component_type, instance_id, "live slot already seeded");
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(normalize(seed));
                tracing::debug!(component_type, instance_id, "live slot seeded");
                true
            }
        }
    }

    fn get(&self, component_type: &str, instance_id: &str) -> Value {
        let slot = self
            .slots
            .get(&SlotKey::new(component_type, instance_id))
            .map(|slot| slot.value().clone())
            .unwrap_or_default();
        Value::Object(slot)
    }

    fn set(&self, component_type: &str, instance_id: &str, patch: Value) {
        let patch = normalize(patch);
        match self.slots.entry(SlotKey::new(component_type, instance_id)) {
            Entry::Occupied(mut occupied) => overlay(occupied.get_mut(), &patch),
            Entry::Vacant(vacant) => {
                vacant.insert(patch);
            }
        }
    }

    fn discard(&self, component_type: &str, instance_id: &str) -> bool {
        self.slots
            .remove(&SlotKey::new(component_type, instance_id))
            .is_some()
    }

    fn clear(&self) {
        self.slots.clear();
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn ensure_seeds_once() {
        let store = InMemoryLiveStore::new();
        assert!(store.ensure("hero", "h1", json!({"title": "A"})));
        assert!(!store.ensure("hero", "h1", json!({"title": "B"})));
        assert_eq!(store.get("hero", "h1"), json!({"title": "A"}));
    }

    #[test]
    fn ensure_keeps_edits() {
        let store = InMemoryLiveStore::new();
        store.ensure("hero", "h1", json!({"title": "A", "visible": true}));
        store.set("hero", "h1", json!({"title": "Edited"}));
        store.ensure("hero", "h1", json!({"title": "A", "visible": true}));
        assert_eq!(store.get("hero", "h1"), json!({"title": "Edited", "visible": true}));
    }

    #[test]
    fn get_missing_slot_is_empty_object() {
        let store = InMemoryLiveStore::new();
        assert_eq!(store.get("hero", "nope"), json!({}));
        assert!(store.is_empty());
    }

    #[test]
    fn set_creates_missing_slot() {
        let store = InMemoryLiveStore::new();
        store.set("map", "m1", json!({"zoom": 4}));
        assert_eq!(store.get("map", "m1"), json!({"zoom": 4}));
        assert!(!store.ensure("map", "m1", json!({"zoom": 1})));
    }

    #[test]
    fn set_is_shallow() {
        let store = InMemoryLiveStore::new();
        store.ensure("hero", "h1", json!({"content": {"title": "A", "subtitle": "B"}}));
        store.set("hero", "h1", json!({"content": {"title": "C"}}));
        assert_eq!(store.get("hero", "h1"), json!({"content": {"title": "C"}}));
    }

    #[test]
    fn slots_are_keyed_by_type_and_instance() {
        let store = InMemoryLiveStore::new();
        store.ensure("hero", "x", json!({"n": 1}));
        store.ensure("map", "x", json!({"n": 2}));
        assert_eq!(store.len(), 2);
        assert_eq!(store.keys(), vec![SlotKey::new("hero", "x"), SlotKey::new("map", "x")]);
        assert_eq!(store.get("map", "x"), json!({"n": 2}));
    }

    #[test]
    fn discard_and_clear() {
        let store = InMemoryLiveStore::new();
        store.ensure("hero", "a", json!({}));
        store.ensure("hero", "b", json!({}));
        assert!(store.discard("hero", "a"));
        assert!(!store.discard("hero", "a"));
        assert_eq!(store.len(), 1);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn usable_as_trait_object() {
        let store: Box<dyn LiveVariantStore> = Box::new(InMemoryLiveStore::new());
        assert!(store.ensure("hero", "h1", json!({"a": 1})));
        assert_eq!(store.get("hero", "h1"), json!({"a": 1}));
    }
}
