//! Generic recursive walker over field definition trees
//!
//! Default materialization, validation and form generation are all folds over
//! the same tree. [`walk`] performs the recursion once; a [`FieldVisitor`]
//! decides what each node produces.

use serde_json::Value;

use crate::field::{ArrayField, FieldDefinition, ObjectField, PrimitiveField};
use crate::path::FieldPath;

/// Output of one visited field, tagged with its key
#[derive(Debug, Clone, PartialEq)]
pub struct Visited<O> {
    /// Field key
    pub key: String,
    /// Visitor output for the field
    pub output: O,
}

/// Per-node callbacks for [`walk`]
///
/// `value` is the data found at the field's key in the current data object,
/// or `None` when walking without data or when the key is absent. Children are
/// visited before their parent so the parent receives their outputs.
pub trait FieldVisitor {
    /// Result produced per field
    type Output;

    /// Decide whether to visit `field` at all
    ///
    /// Returning `false` skips the field and its subtree; it produces no output.
    fn enter(
        &mut self,
        _field: &FieldDefinition,
        _path: &FieldPath,
        _value: Option<&Value>,
    ) -> bool {
        true
    }

    /// Visit a primitive leaf
    fn visit_primitive(
        &mut self,
        field: &PrimitiveField,
        path: &FieldPath,
        value: Option<&Value>,
    ) -> Self::Output;

    /// Visit an object after its children
    fn visit_object(
        &mut self,
        field: &ObjectField,
        path: &FieldPath,
        value: Option<&Value>,
        children: Vec<Visited<Self::Output>>,
    ) -> Self::Output;

    /// Visit an array after every existing item
    ///
    /// `items` holds one child list per element of the data array.
    fn visit_array(
        &mut self,
        field: &ArrayField,
        path: &FieldPath,
        value: Option<&Value>,
        items: Vec<Vec<Visited<Self::Output>>>,
    ) -> Self::Output;
}

/// Walk `fields` against `data` starting at the root path
pub fn walk<V: FieldVisitor>(
    fields: &[FieldDefinition],
    data: Option<&Value>,
    visitor: &mut V,
) -> Vec<Visited<V::Output>> {
    walk_at(fields, data, &FieldPath::root(), visitor)
}

/// Walk `fields` against `data` with paths prefixed by `base`
pub fn walk_at<V: FieldVisitor>(
    fields: &[FieldDefinition],
    data: Option<&Value>,
    base: &FieldPath,
    visitor: &mut V,
) -> Vec<Visited<V::Output>> {
    let mut out = Vec::with_capacity(fields.len());

    for field in fields {
        let path = base.child(field.key());
        let value = data.and_then(|d| d.get(field.key()));

        if !visitor.enter(field, &path, value) {
            continue;
        }

        let output = match field {
            FieldDefinition::Primitive(p) => visitor.visit_primitive(p, &path, value),
            FieldDefinition::Object(o) => {
                let children = walk_at(&o.fields, value, &path, visitor);
                visitor.visit_object(o, &path, value, children)
            }
            FieldDefinition::Array(a) => {
                let items = value
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .enumerate()
                            .map(|(i, item)| {
                                walk_at(&a.of, Some(item), &path.child_index(i), visitor)
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                visitor.visit_array(a, &path, value, items)
            }
        };

        out.push(Visited {
            key: field.key().to_string(),
            output,
        });
    }

    out
}
