use proptest::prelude::*;
use serde_json::Value;
use sitecfg_schema::{
    build_form_for, check_structure, resolve_defaults, validate_against_tree, ArrayField,
    ComponentStructure, FieldDefinition, ObjectField, PrimitiveField, PrimitiveType,
    VariantDefinition,
};

#[derive(Debug, Clone)]
enum Shape {
    Leaf(PrimitiveType),
    Object(Vec<Shape>),
    Array(Vec<Shape>),
}

fn primitive() -> impl Strategy<Value = PrimitiveType> {
    prop_oneof![
        Just(PrimitiveType::Text),
        Just(PrimitiveType::Textarea),
        Just(PrimitiveType::Number),
        Just(PrimitiveType::Boolean),
        Just(PrimitiveType::Color),
        Just(PrimitiveType::Image),
        Just(PrimitiveType::Select),
        Just(PrimitiveType::Url),
    ]
}

fn shapes() -> impl Strategy<Value = Vec<Shape>> {
    let leaf = primitive().prop_map(Shape::Leaf);
    let shape = leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Shape::Object),
            prop::collection::vec(inner, 1..4).prop_map(Shape::Array),
        ]
    });
    prop::collection::vec(shape, 0..6)
}

fn build(shapes: &[Shape]) -> Vec<FieldDefinition> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let key = format!("f{i}");
            match shape {
                Shape::Leaf(ty) => PrimitiveField::new(key.clone(), key, *ty).into(),
                Shape::Object(children) => {
                    ObjectField::new(key.clone(), key, build(children)).into()
                }
                Shape::Array(children) => ArrayField::new(key.clone(), key, build(children)).into(),
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_defaults_validate_cleanly(shapes in shapes()) {
        let fields = build(&shapes);
        let defaults = resolve_defaults(&fields);
        prop_assert!(validate_against_tree(&fields, &defaults).is_empty());
    }

    #[test]
    fn prop_defaults_cover_every_top_level_key(shapes in shapes()) {
        let fields = build(&shapes);
        let defaults = resolve_defaults(&fields);
        let object = defaults.as_object().unwrap();
        prop_assert_eq!(object.len(), fields.len());
        for field in &fields {
            prop_assert!(object.contains_key(field.key()));
        }
    }

    #[test]
    fn prop_arrays_default_to_empty(shapes in shapes()) {
        let fields = build(&shapes);
        let defaults = resolve_defaults(&fields);
        for field in &fields {
            if matches!(field, FieldDefinition::Array(_)) {
                prop_assert_eq!(&defaults[field.key()], &Value::Array(vec![]));
            }
        }
    }

    #[test]
    fn prop_full_tree_as_simple_fields_is_consistent(shapes in shapes()) {
        let fields = build(&shapes);
        let structure = ComponentStructure::new().with_component(
            "generated",
            vec![VariantDefinition {
                id: "v1".to_string(),
                name: "Generated".to_string(),
                simple_fields: Some(fields.clone()),
                fields,
            }],
        );
        prop_assert!(check_structure(&structure).is_empty());
    }

    #[test]
    fn prop_form_has_one_node_per_top_level_field(shapes in shapes()) {
        let fields = build(&shapes);
        let defaults = resolve_defaults(&fields);
        let nodes = build_form_for(&fields, &defaults);
        prop_assert_eq!(nodes.len(), fields.len());
        prop_assert!(nodes.iter().all(|n| n.active));
    }
}
