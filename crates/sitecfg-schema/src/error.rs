//! Error types for schema loading

use crate::field::FieldKind;
use crate::path::FieldPath;

/// Errors produced while turning a schema-file record into a field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldShapeError {
    /// `type` is not a known primitive, `object` or `array`
    #[error("field '{key}' has unknown type '{type_name}'")]
    UnknownType {
        /// Field key
        key: String,
        /// Type name found in the record
        type_name: String,
    },

    /// Object without `fields` or array without `of`
    #[error("field '{key}' is missing '{attribute}'")]
    MissingChildren {
        /// Field key
        key: String,
        /// Attribute that should hold the children
        attribute: &'static str,
    },

    /// Array `defaultValue` is not a list
    #[error("array field '{key}' has a non-list defaultValue")]
    ArrayDefaultNotList {
        /// Field key
        key: String,
    },
}

/// A schema-authoring defect found at registry load
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaDefect {
    /// A `simpleFields` path does not exist in `fields`
    #[error("{component_type}/{variant_id}: simple field '{path}' is not in fields")]
    SimpleFieldMissing {
        /// Component type
        component_type: String,
        /// Variant id
        variant_id: String,
        /// Path of the field
        path: FieldPath,
    },

    /// A `simpleFields` path exists in `fields` with a different kind
    #[error(
        "{component_type}/{variant_id}: simple field '{path}' is {simple} but {full} in fields"
    )]
    SimpleFieldKindMismatch {
        /// Component type
        component_type: String,
        /// Variant id
        variant_id: String,
        /// Path of the field
        path: FieldPath,
        /// Kind declared in `simpleFields`
        simple: FieldKind,
        /// Kind declared in `fields`
        full: FieldKind,
    },

    /// Two variants of one component type share an id
    #[error("{component_type}: duplicate variant id '{variant_id}'")]
    DuplicateVariant {
        /// Component type
        component_type: String,
        /// Variant id
        variant_id: String,
    },

    /// Two sibling fields share a key
    #[error("{component_type}/{variant_id}: duplicate key at '{path}'")]
    DuplicateKey {
        /// Component type
        component_type: String,
        /// Variant id
        variant_id: String,
        /// Path of the field
        path: FieldPath,
    },
}

/// Schema loading errors
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The structure violates authoring invariants; it must not reach an editor
    #[error("schema has {} defect(s): {}", .0.len(), summarize(.0))]
    Inconsistent(Vec<SchemaDefect>),

    /// Invalid JSON schema text
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid YAML schema text
    #[error("invalid schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SchemaError {
    /// Defects carried by an `Inconsistent` error
    #[must_use]
    pub fn defects(&self) -> &[SchemaDefect] {
        match self {
            Self::Inconsistent(defects) => defects,
            _ => &[],
        }
    }
}

fn summarize(defects: &[SchemaDefect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
