//! Default data materialization

use serde_json::{Map, Value};

use crate::field::{ArrayField, FieldDefinition, ObjectField, PrimitiveField};
use crate::path::FieldPath;
use crate::walk::{walk, FieldVisitor, Visited};

/// Builds the default value of every field without looking at any data
struct DefaultsVisitor;

impl FieldVisitor for DefaultsVisitor {
    type Output = Value;

    fn visit_primitive(
        &mut self,
        field: &PrimitiveField,
        _path: &FieldPath,
        _value: Option<&Value>,
    ) -> Value {
        field
            .default_value
            .clone()
            .unwrap_or_else(|| field.field_type.zero_value())
    }

    fn visit_object(
        &mut self,
        _field: &ObjectField,
        _path: &FieldPath,
        _value: Option<&Value>,
        children: Vec<Visited<Value>>,
    ) -> Value {
        Value::Object(into_map(children))
    }

    fn visit_array(
        &mut self,
        field: &ArrayField,
        _path: &FieldPath,
        _value: Option<&Value>,
        _items: Vec<Vec<Visited<Value>>>,
    ) -> Value {
        // The item template is never materialized.
        Value::Array(field.default_value.clone().unwrap_or_default())
    }
}

fn into_map(children: Vec<Visited<Value>>) -> Map<String, Value> {
    children.into_iter().map(|v| (v.key, v.output)).collect()
}

/// Materialize the default configuration object for a field tree
///
/// Primitive leaves take their declared default or the type's zero value,
/// objects recurse, arrays are empty unless a literal default list is declared.
#[must_use]
pub fn resolve_defaults(fields: &[FieldDefinition]) -> Value {
    Value::Object(into_map(walk(fields, None, &mut DefaultsVisitor)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PrimitiveType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn declared_defaults_and_zero_values() {
        let fields: Vec<FieldDefinition> = vec![
            PrimitiveField::new("visible", "Visible", PrimitiveType::Boolean)
                .with_default(true)
                .into(),
            ObjectField::new(
                "content",
                "Content",
                vec![
                    PrimitiveField::new("title", "Title", PrimitiveType::Text)
                        .with_default("Default")
                        .into(),
                    PrimitiveField::new("subtitle", "Subtitle", PrimitiveType::Textarea).into(),
                    PrimitiveField::new("columns", "Columns", PrimitiveType::Number).into(),
                    PrimitiveField::new("rounded", "Rounded", PrimitiveType::Boolean).into(),
                ],
            )
            .into(),
        ];

        assert_eq!(
            resolve_defaults(&fields),
            json!({
                "visible": true,
                "content": {"title": "Default", "subtitle": "", "columns": 0, "rounded": false}
            })
        );
    }

    #[test]
    fn arrays_default_empty_without_template_items() {
        let fields: Vec<FieldDefinition> = vec![ArrayField::new(
            "features",
            "Features",
            vec![PrimitiveField::new("label", "Label", PrimitiveType::Text)
                .with_default("Feature")
                .into()],
        )
        .with_bounds(Some(1), None)
        .into()];

        assert_eq!(resolve_defaults(&fields), json!({"features": []}));
    }

    #[test]
    fn arrays_keep_literal_default() {
        let fields: Vec<FieldDefinition> = vec![ArrayField::new("tags", "Tags", vec![])
            .with_default(vec![json!({"label": "new"})])
            .into()];

        assert_eq!(resolve_defaults(&fields), json!({"tags": [{"label": "new"}]}));
    }

    #[test]
    fn empty_tree_is_empty_object() {
        assert_eq!(resolve_defaults(&[]), json!({}));
    }

    #[test]
    fn key_order_follows_schema() {
        let fields: Vec<FieldDefinition> = vec![
            PrimitiveField::new("zeta", "Z", PrimitiveType::Text).into(),
            PrimitiveField::new("alpha", "A", PrimitiveType::Text).into(),
        ];
        let defaults = resolve_defaults(&fields);
        let keys: Vec<_> = defaults.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
