//! Data validation against a field definition tree
//!
//! Used as a test oracle and by editor tooling; rendering does not call it.

use serde_json::Value;
use std::fmt;

use crate::condition::{is_condition_active, strict_equals};
use crate::field::{ArrayField, FieldDefinition, ObjectField, PrimitiveField, PrimitiveType};
use crate::path::FieldPath;
use crate::walk::{walk, FieldVisitor, Visited};

/// A single mismatch between data and schema
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Data path of the offending value, with array indices
    pub path: FieldPath,
    /// What is wrong
    pub kind: ViolationKind,
}

/// Kind of schema violation
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Value has the wrong JSON type
    TypeMismatch {
        /// Expected JSON type
        expected: &'static str,
        /// Actual JSON type
        found: &'static str,
    },
    /// `select` value not among the declared options
    OptionNotAllowed {
        /// Offending value
        value: Value,
    },
    /// Array shorter than `minItems`
    TooFewItems {
        /// Declared minimum
        min: usize,
        /// Actual length
        actual: usize,
    },
    /// Array longer than `maxItems`
    TooManyItems {
        /// Declared maximum
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// Conditioned field absent while its condition holds
    MissingConditionalField,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::TypeMismatch { expected, found } => {
                write!(f, "{}: expected {expected}, found {found}", self.path)
            }
            ViolationKind::OptionNotAllowed { value } => {
                write!(f, "{}: {value} is not an allowed option", self.path)
            }
            ViolationKind::TooFewItems { min, actual } => {
                write!(f, "{}: {actual} item(s), at least {min} required", self.path)
            }
            ViolationKind::TooManyItems { max, actual } => {
                write!(f, "{}: {actual} item(s), at most {max} allowed", self.path)
            }
            ViolationKind::MissingConditionalField => {
                write!(f, "{}: required while its condition holds", self.path)
            }
        }
    }
}

/// JSON type name of a value
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct Validator<'a> {
    root: &'a Value,
    violations: Vec<Violation>,
}

impl Validator<'_> {
    fn push(&mut self, path: &FieldPath, kind: ViolationKind) {
        self.violations.push(Violation {
            path: path.clone(),
            kind,
        });
    }

    fn mismatch(&mut self, path: &FieldPath, expected: &'static str, found: &Value) {
        self.push(
            path,
            ViolationKind::TypeMismatch {
                expected,
                found: json_type_name(found),
            },
        );
    }
}

impl FieldVisitor for Validator<'_> {
    type Output = ();

    fn enter(&mut self, field: &FieldDefinition, path: &FieldPath, value: Option<&Value>) -> bool {
        if !is_condition_active(field, self.root) {
            return false;
        }

        let value = match value {
            None | Some(Value::Null) => {
                if field.condition().is_some() {
                    self.push(path, ViolationKind::MissingConditionalField);
                }
                return false;
            }
            Some(value) => value,
        };

        match field {
            FieldDefinition::Object(_) if !value.is_object() => {
                self.mismatch(path, "object", value);
                false
            }
            FieldDefinition::Array(_) if !value.is_array() => {
                self.mismatch(path, "array", value);
                false
            }
            _ => true,
        }
    }

    fn visit_primitive(&mut self, field: &PrimitiveField, path: &FieldPath, value: Option<&Value>) {
        let Some(value) = value else { return };

        match (&field.field_type, &field.options) {
            (PrimitiveType::Select, Some(options)) => {
                if !options.iter().any(|o| strict_equals(o.value(), value)) {
                    self.push(
                        path,
                        ViolationKind::OptionNotAllowed {
                            value: value.clone(),
                        },
                    );
                }
            }
            (ty, _) => {
                if !ty.accepts(value) {
                    self.mismatch(path, ty.json_type(), value);
                }
            }
        }
    }

    fn visit_object(
        &mut self,
        _field: &ObjectField,
        _path: &FieldPath,
        _value: Option<&Value>,
        _children: Vec<Visited<()>>,
    ) {
    }

    fn visit_array(
        &mut self,
        field: &ArrayField,
        path: &FieldPath,
        value: Option<&Value>,
        _items: Vec<Vec<Visited<()>>>,
    ) {
        let Some(items) = value.and_then(Value::as_array) else {
            return;
        };

        for (i, item) in items.iter().enumerate() {
            if !item.is_object() {
                self.mismatch(&path.child_index(i), "object", item);
            }
        }

        let actual = items.len();
        if let Some(min) = field.min_items.filter(|min| actual < *min) {
            self.push(path, ViolationKind::TooFewItems { min, actual });
        }
        if let Some(max) = field.max_items.filter(|max| actual > *max) {
            self.push(path, ViolationKind::TooManyItems { max, actual });
        }
    }
}

/// Validate `data` against a field tree
///
/// Conditions are evaluated against `data` itself, which is expected to be
/// the fully merged configuration. Inactive fields are not checked. Absent
/// unconditioned fields are not violations.
#[must_use]
pub fn validate_against_tree(fields: &[FieldDefinition], data: &Value) -> Vec<Violation> {
    let mut validator = Validator {
        root: data,
        violations: Vec::new(),
    };
    walk(fields, Some(data), &mut validator);
    validator.violations
}
