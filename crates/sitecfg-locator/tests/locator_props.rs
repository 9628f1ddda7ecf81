use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};
use sitecfg_locator::{locate, locate_traced, ShapeDiagnostic};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::from),
            prop::collection::btree_map("(type|id|data|[a-z]{1,4})", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_locate_is_total_and_never_null(
        site in arb_json(),
        ty in "[a-z]{1,4}",
        id in "[a-z]{1,4}",
    ) {
        let data = locate(&site, &ty, &id);
        prop_assert!(data.is_object());
    }

    #[test]
    fn prop_locate_is_deterministic(site in arb_json(), ty in "[a-z]{1,4}", id in "[a-z]{1,4}") {
        prop_assert_eq!(locate_traced(&site, &ty, &id), locate_traced(&site, &ty, &id));
    }
}

#[test]
fn both_shapes_in_one_site() {
    let site = json!({
        "home": {
            "hero-1": {"type": "hero", "data": {"content": {"title": "Home"}}},
            "x": {"type": "form", "id": "contact", "data": {"email": "a@b.c"}}
        },
        "listings": [
            {"type": "propertyDetails", "id": "pd", "data": {"layout": "grid"}},
            {"type": "hero", "id": "hero-2", "data": {"visible": false}}
        ]
    });

    assert_eq!(locate(&site, "hero", "hero-1"), json!({"content": {"title": "Home"}}));
    assert_eq!(locate(&site, "form", "contact"), json!({"email": "a@b.c"}));
    assert_eq!(locate(&site, "propertyDetails", "pd"), json!({"layout": "grid"}));
    assert_eq!(locate(&site, "hero", "hero-2"), json!({"visible": false}));
    assert_eq!(locate(&site, "hero", "pd"), json!({}));
}

#[test]
fn every_duplicate_is_reported() {
    let site = json!({
        "a": [
            {"type": "hero", "id": "h", "data": {"n": 1}},
            {"type": "hero", "id": "h", "data": {"n": 2}}
        ],
        "b": {"h": {"type": "hero", "data": {"n": 3}}}
    });
    let located = locate_traced(&site, "hero", "h");
    assert_eq!(located.data, json!({"n": 1}));
    let duplicates = located
        .diagnostics
        .iter()
        .filter(|d| matches!(d, ShapeDiagnostic::DuplicateMatch { .. }))
        .count();
    assert_eq!(duplicates, 2);
}
