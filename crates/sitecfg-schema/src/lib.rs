//! sitecfg Schema
//!
//! Recursive field definition trees describing the configuration shape of
//! every component variant, and the registry that holds them.
//!
//! # Core Concepts
//!
//! - **FieldDefinition**: closed tree of primitive, object and array fields
//! - **FieldVisitor**: one generic walker shared by every fold over a tree
//! - **resolve_defaults**: default data materialized from a tree
//! - **validate_against_tree**: data checked against a tree, with paths
//! - **build_form**: UI-agnostic editor form for a variant
//! - **SchemaRegistry**: component types and variants, checked at load
//!
//! # Example
//!
//! ```rust
//! use sitecfg_schema::SchemaRegistry;
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::from_json(r#"{
//!     "hero": [{
//!         "id": "hero1",
//!         "name": "Hero",
//!         "fields": [
//!             {"key": "visible", "label": "Visible", "type": "boolean", "defaultValue": true},
//!             {"key": "content", "label": "Content", "type": "object", "fields": [
//!                 {"key": "title", "label": "Title", "type": "text"}
//!             ]}
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(
//!     registry.default_data("hero", "hero1"),
//!     Some(&json!({"visible": true, "content": {"title": ""}}))
//! );
//! ```

#![warn(missing_docs)]

pub mod condition;
pub mod defaults;
pub mod error;
pub mod field;
pub mod form;
pub mod path;
pub mod registry;
pub mod validate;
pub mod variant;
pub mod walk;

// Re-exports
pub use condition::{is_condition_active, strict_equals};
pub use defaults::resolve_defaults;
pub use error::{FieldShapeError, SchemaDefect, SchemaError};
pub use field::{
    ArrayField, Condition, FieldDefinition, FieldKind, ObjectField, PrimitiveField, PrimitiveType,
    SelectOption,
};
pub use form::{build_form, build_form_for, FormControl, FormItem, FormMode, FormNode};
pub use path::{FieldPath, PathError};
pub use registry::{check_structure, RegisteredVariant, SchemaRegistry};
pub use validate::{json_type_name, validate_against_tree, Violation, ViolationKind};
pub use variant::{ComponentStructure, VariantDefinition};
pub use walk::{walk, walk_at, FieldVisitor, Visited};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for schema operations
    pub use crate::{
        build_form, resolve_defaults, validate_against_tree, FieldDefinition, FieldPath, FormMode,
        SchemaError, SchemaRegistry, VariantDefinition,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
