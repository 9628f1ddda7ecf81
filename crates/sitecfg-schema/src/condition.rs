//! Conditional field visibility

use serde_json::Value;

use crate::field::{Condition, FieldDefinition};

/// Strict equality between two JSON values
///
/// Numbers compare by numeric value so `1` equals `1.0`; every other value
/// compares structurally. No type coercion: `"1"` never equals `1`.
#[must_use]
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

impl Condition {
    /// Whether the dependency path in `merged` strictly equals the literal
    ///
    /// A missing dependency never matches, not even a `null` literal.
    #[must_use]
    pub fn holds(&self, merged: &Value) -> bool {
        self.field
            .lookup(merged)
            .is_some_and(|actual| strict_equals(actual, &self.value))
    }
}

/// Whether `field` is active against the fully merged data
///
/// Fields without a condition are always active.
#[must_use]
pub fn is_condition_active(field: &FieldDefinition, merged: &Value) -> bool {
    field.condition().map_or(true, |c| c.holds(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{PrimitiveField, PrimitiveType};
    use serde_json::json;

    fn zoom_field(condition_value: Value) -> FieldDefinition {
        PrimitiveField::new("zoom", "Zoom", PrimitiveType::Number)
            .with_condition(Condition::new("layout.showMap".parse().unwrap(), condition_value))
            .into()
    }

    #[test]
    fn unconditioned_field_is_active() {
        let field: FieldDefinition =
            PrimitiveField::new("title", "Title", PrimitiveType::Text).into();
        assert!(is_condition_active(&field, &json!({})));
    }

    #[test]
    fn active_when_dependency_matches() {
        let field = zoom_field(json!(true));
        assert!(is_condition_active(&field, &json!({"layout": {"showMap": true}})));
        assert!(!is_condition_active(&field, &json!({"layout": {"showMap": false}})));
    }

    #[test]
    fn no_coercion() {
        let field = zoom_field(json!(true));
        assert!(!is_condition_active(&field, &json!({"layout": {"showMap": "true"}})));
        assert!(!is_condition_active(&field, &json!({"layout": {"showMap": 1}})));
    }

    #[test]
    fn missing_dependency_is_inactive_even_for_null() {
        assert!(!is_condition_active(&zoom_field(json!(true)), &json!({})));
        assert!(!is_condition_active(&zoom_field(Value::Null), &json!({})));
        assert!(is_condition_active(
            &zoom_field(Value::Null),
            &json!({"layout": {"showMap": null}})
        ));
    }

    #[test]
    fn numbers_compare_numerically() {
        assert!(strict_equals(&json!(1), &json!(1.0)));
        assert!(!strict_equals(&json!(1), &json!("1")));
        assert!(strict_equals(&json!({"a": [1]}), &json!({"a": [1]})));
    }
}
