use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};
use sitecfg_live::{InMemoryLiveStore, LiveVariantStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-d]", any::<i32>().prop_map(Value::from), 0..4)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

proptest! {
    #[test]
    fn prop_ensure_never_overwrites(
        first in object(),
        later in prop::collection::vec(object(), 1..5),
    ) {
        let store = InMemoryLiveStore::new();
        prop_assert!(store.ensure("hero", "h1", first.clone()));
        for seed in later {
            prop_assert!(!store.ensure("hero", "h1", seed));
        }
        prop_assert_eq!(store.get("hero", "h1"), first);
    }

    #[test]
    fn prop_edits_survive_reseeding(seed in object(), patch in object(), reseed in object()) {
        let store = InMemoryLiveStore::new();
        store.ensure("map", "m", seed);
        store.set("map", "m", patch.clone());
        let before = store.get("map", "m");
        store.ensure("map", "m", reseed);
        prop_assert_eq!(store.get("map", "m"), before.clone());
        for (key, value) in patch.as_object().unwrap() {
            prop_assert_eq!(&before[key], value);
        }
    }
}

#[test]
fn concurrent_ensure_creates_exactly_once() {
    let store = Arc::new(InMemoryLiveStore::new());
    let created = Arc::new(AtomicUsize::new(0));

    std::thread::scope(|scope| {
        for i in 0..16 {
            let store = Arc::clone(&store);
            let created = Arc::clone(&created);
            scope.spawn(move || {
                if store.ensure("hero", "shared", json!({"writer": i})) {
                    created.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert_eq!(store.len(), 1);
}
