//! Editor form generation
//!
//! Walks a variant's field tree against the current merged data and produces
//! a UI-agnostic description of the inputs an editor should render.

use serde::Serialize;
use serde_json::Value;

use crate::field::{
    ArrayField, Condition, FieldDefinition, ObjectField, PrimitiveField, PrimitiveType,
    SelectOption,
};
use crate::path::FieldPath;
use crate::variant::VariantDefinition;
use crate::walk::{walk, FieldVisitor, Visited};

/// Which field list of a variant the editor shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Every field
    #[default]
    Full,
    /// The reduced `simpleFields` list, or every field if none is declared
    Simple,
}

/// One input or group in a generated form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormNode {
    /// Data path the input edits
    pub path: FieldPath,
    /// Field key
    pub key: String,
    /// Editor label
    pub label: String,
    /// Help text
    pub description: Option<String>,
    /// Whether the field's condition holds against the merged data
    pub active: bool,
    /// Input description
    pub control: FormControl,
}

/// Input description for a [`FormNode`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum FormControl {
    /// Primitive input
    Input {
        /// Input type
        input: PrimitiveType,
        /// Placeholder text
        placeholder: Option<String>,
        /// Select options (empty for other inputs)
        options: Vec<SelectOption>,
        /// Current value, or the field default when the data has none
        value: Value,
    },
    /// Nested object
    Group {
        /// Child inputs
        children: Vec<FormNode>,
    },
    /// Repeatable list
    List {
        /// One entry per existing item
        items: Vec<FormItem>,
        /// "Add" button label
        add_label: String,
        /// Whether another item may be added
        can_add: bool,
        /// Whether an item may be removed
        can_remove: bool,
    },
}

/// One existing item of a repeatable list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormItem {
    /// Position in the list
    pub index: usize,
    /// Display label, e.g. `Slide 2`
    pub label: String,
    /// Inputs for the item's fields
    pub children: Vec<FormNode>,
}

struct FormBuilder<'a> {
    merged: &'a Value,
}

impl FormBuilder<'_> {
    fn node(
        &self,
        (key, label, description, condition): (&str, &str, &Option<String>, &Option<Condition>),
        path: &FieldPath,
        control: FormControl,
    ) -> FormNode {
        FormNode {
            path: path.clone(),
            key: key.to_string(),
            label: label.to_string(),
            description: description.clone(),
            active: condition.as_ref().map_or(true, |c| c.holds(self.merged)),
            control,
        }
    }
}

fn outputs(children: Vec<Visited<FormNode>>) -> Vec<FormNode> {
    children.into_iter().map(|v| v.output).collect()
}

impl FieldVisitor for FormBuilder<'_> {
    type Output = FormNode;

    fn visit_primitive(
        &mut self,
        field: &PrimitiveField,
        path: &FieldPath,
        value: Option<&Value>,
    ) -> FormNode {
        let value = value
            .cloned()
            .or_else(|| field.default_value.clone())
            .unwrap_or_else(|| field.field_type.zero_value());

        let control = FormControl::Input {
            input: field.field_type,
            placeholder: field.placeholder.clone(),
            options: field.options.clone().unwrap_or_default(),
            value,
        };
        self.node((&field.key, &field.label, &field.description, &field.condition), path, control)
    }

    fn visit_object(
        &mut self,
        field: &ObjectField,
        path: &FieldPath,
        _value: Option<&Value>,
        children: Vec<Visited<FormNode>>,
    ) -> FormNode {
        let control = FormControl::Group {
            children: outputs(children),
        };
        self.node((&field.key, &field.label, &field.description, &field.condition), path, control)
    }

    fn visit_array(
        &mut self,
        field: &ArrayField,
        path: &FieldPath,
        _value: Option<&Value>,
        items: Vec<Vec<Visited<FormNode>>>,
    ) -> FormNode {
        let item_label = field.item_label.as_deref().unwrap_or("Item");
        let count = items.len();

        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, children)| FormItem {
                index,
                label: format!("{item_label} {}", index + 1),
                children: outputs(children),
            })
            .collect();

        let control = FormControl::List {
            items,
            add_label: field.add_label.clone().unwrap_or_else(|| "Add item".to_string()),
            can_add: field.max_items.map_or(true, |max| count < max),
            can_remove: field.min_items.map_or(count > 0, |min| count > min),
        };
        self.node((&field.key, &field.label, &field.description, &field.condition), path, control)
    }
}

/// Generate form nodes for `fields` against the merged data
#[must_use]
pub fn build_form_for(fields: &[FieldDefinition], merged: &Value) -> Vec<FormNode> {
    let mut builder = FormBuilder { merged };
    outputs(walk(fields, Some(merged), &mut builder))
}

/// Generate the editor form of a variant
#[must_use]
pub fn build_form(variant: &VariantDefinition, mode: FormMode, merged: &Value) -> Vec<FormNode> {
    build_form_for(variant.fields_for(mode), merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variant() -> VariantDefinition {
        VariantDefinition {
            id: "hero1".to_string(),
            name: "Hero".to_string(),
            fields: vec![
                PrimitiveField::new("showCta", "Show button", PrimitiveType::Boolean)
                    .with_default(false)
                    .into(),
                PrimitiveField::new("ctaLabel", "Button label", PrimitiveType::Text)
                    .with_condition(Condition::new("showCta".parse().unwrap(), true))
                    .into(),
                ArrayField::new(
                    "slides",
                    "Slides",
                    vec![PrimitiveField::new("image", "Image", PrimitiveType::Image).into()],
                )
                .with_bounds(Some(1), Some(2))
                .with_labels("Add slide", "Slide")
                .into(),
            ],
            simple_fields: Some(vec![PrimitiveField::new(
                "showCta",
                "Show button",
                PrimitiveType::Boolean,
            )
            .into()]),
        }
    }

    #[test]
    fn full_form_marks_inactive_fields() {
        let nodes = build_form(&variant(), FormMode::Full, &json!({"showCta": false}));
        assert_eq!(nodes.len(), 3);
        assert!(nodes[0].active);
        assert!(!nodes[1].active);
    }

    #[test]
    fn input_value_falls_back_to_default() {
        let nodes = build_form(&variant(), FormMode::Full, &json!({}));
        let FormControl::Input { value, .. } = &nodes[0].control else {
            panic!("expected input");
        };
        assert_eq!(value, &json!(false));
    }

    #[test]
    fn list_items_and_bounds() {
        let merged = json!({"slides": [{"image": "a.png"}, {"image": "b.png"}]});
        let nodes = build_form(&variant(), FormMode::Full, &merged);
        let FormControl::List { items, add_label, can_add, can_remove } = &nodes[2].control else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].label, "Slide 2");
        assert_eq!(items[1].children[0].path.to_string(), "slides.1.image");
        assert_eq!(add_label, "Add slide");
        assert!(!can_add);
        assert!(*can_remove);
    }

    #[test]
    fn simple_mode_uses_reduced_list() {
        let nodes = build_form(&variant(), FormMode::Simple, &json!({}));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].key, "showCta");
    }

    #[test]
    fn simple_mode_without_simple_fields_shows_everything() {
        let mut v = variant();
        v.simple_fields = None;
        assert_eq!(build_form(&v, FormMode::Simple, &json!({})).len(), 3);
    }
}
