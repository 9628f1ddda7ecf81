//! Schema registry
//!
//! Holds every component type's variants after the load-time consistency
//! checks have passed, together with each variant's materialized defaults.

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::defaults::resolve_defaults;
use crate::error::{SchemaDefect, SchemaError};
use crate::field::{FieldDefinition, FieldKind};
use crate::path::FieldPath;
use crate::variant::{ComponentStructure, VariantDefinition};

/// A variant accepted by the registry
#[derive(Debug, Clone)]
pub struct RegisteredVariant {
    definition: VariantDefinition,
    defaults: Value,
}

impl RegisteredVariant {
    /// Variant definition
    #[inline]
    #[must_use]
    pub fn definition(&self) -> &VariantDefinition {
        &self.definition
    }

    /// Default data materialized from the full field tree
    #[inline]
    #[must_use]
    pub fn defaults(&self) -> &Value {
        &self.defaults
    }
}

/// Registry of component types and their variants
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    components: IndexMap<String, Vec<RegisteredVariant>>,
}

impl SchemaRegistry {
    /// Load a component structure, rejecting any schema-authoring defect
    ///
    /// # Errors
    /// Returns [`SchemaError::Inconsistent`] listing every defect found
    pub fn load(structure: ComponentStructure) -> Result<Self, SchemaError> {
        let defects = check_structure(&structure);
        if !defects.is_empty() {
            tracing::error!(defects = defects.len(), "schema registry rejected");
            return Err(SchemaError::Inconsistent(defects));
        }

        let components: IndexMap<_, _> = structure
            .0
            .into_iter()
            .map(|(component_type, variants)| {
                let registered = variants
                    .into_iter()
                    .map(|definition| RegisteredVariant {
                        defaults: resolve_defaults(&definition.fields),
                        definition,
                    })
                    .collect();
                (component_type, registered)
            })
            .collect();

        tracing::info!(
            component_types = components.len(),
            variants = components.values().map(Vec::len).sum::<usize>(),
            "schema registry loaded"
        );

        Ok(Self { components })
    }

    /// Parse and load a JSON component structure
    ///
    /// # Errors
    /// Returns error on invalid JSON or an inconsistent schema
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Self::load(ComponentStructure::from_json(json)?)
    }

    /// Parse and load a YAML component structure
    ///
    /// # Errors
    /// Returns error on invalid YAML or an inconsistent schema
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Self::load(ComponentStructure::from_yaml(yaml)?)
    }

    /// Registered component types in declaration order
    pub fn component_types(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Check if a component type is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, component_type: &str) -> bool {
        self.components.contains_key(component_type)
    }

    /// Variants of a component type
    #[must_use]
    pub fn variants(&self, component_type: &str) -> Option<&[RegisteredVariant]> {
        self.components.get(component_type).map(Vec::as_slice)
    }

    /// Look up one variant
    #[must_use]
    pub fn variant(&self, component_type: &str, variant_id: &str) -> Option<&RegisteredVariant> {
        self.variants(component_type)?
            .iter()
            .find(|v| v.definition.id == variant_id)
    }

    /// Default data of one variant
    #[must_use]
    pub fn default_data(&self, component_type: &str, variant_id: &str) -> Option<&Value> {
        self.variant(component_type, variant_id).map(RegisteredVariant::defaults)
    }

    /// Number of registered component types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Run every load-time check over a structure
#[must_use]
pub fn check_structure(structure: &ComponentStructure) -> Vec<SchemaDefect> {
    let mut defects = Vec::new();

    for (component_type, variants) in structure.iter() {
        let mut seen_ids = HashSet::new();

        for variant in variants {
            if !seen_ids.insert(variant.id.as_str()) {
                defects.push(SchemaDefect::DuplicateVariant {
                    component_type: component_type.clone(),
                    variant_id: variant.id.clone(),
                });
            }
            check_variant(component_type, variant, &mut defects);
        }
    }

    defects
}

fn check_variant(
    component_type: &str,
    variant: &VariantDefinition,
    defects: &mut Vec<SchemaDefect>,
) {
    let mut full = HashMap::new();
    let mut duplicates = Vec::new();
    index_kinds(&variant.fields, &FieldPath::root(), &mut full, &mut duplicates);

    if let Some(simple_fields) = &variant.simple_fields {
        let mut simple = HashMap::new();
        index_kinds(simple_fields, &FieldPath::root(), &mut simple, &mut duplicates);

        let mut simple: Vec<_> = simple.into_iter().collect();
        simple.sort_by(|a, b| a.0.cmp(&b.0));

        for (path, simple_kind) in simple {
            match full.get(&path) {
                None => defects.push(SchemaDefect::SimpleFieldMissing {
                    component_type: component_type.to_string(),
                    variant_id: variant.id.clone(),
                    path,
                }),
                Some(full_kind) if *full_kind != simple_kind => {
                    defects.push(SchemaDefect::SimpleFieldKindMismatch {
                        component_type: component_type.to_string(),
                        variant_id: variant.id.clone(),
                        path,
                        simple: simple_kind,
                        full: *full_kind,
                    });
                }
                Some(_) => {}
            }
        }
    }

    duplicates.sort();
    duplicates.dedup();
    defects.extend(duplicates.into_iter().map(|path| SchemaDefect::DuplicateKey {
        component_type: component_type.to_string(),
        variant_id: variant.id.clone(),
        path,
    }));
}

/// Collect every key path of a tree with its kind
///
/// Array item fields are indexed under the array's path without an index
/// segment, so `slides` → `slides.image`.
fn index_kinds(
    fields: &[FieldDefinition],
    base: &FieldPath,
    index: &mut HashMap<FieldPath, FieldKind>,
    duplicates: &mut Vec<FieldPath>,
) {
    let mut siblings = HashSet::new();

    for field in fields {
        let path = base.child(field.key());
        if !siblings.insert(field.key()) {
            duplicates.push(path.clone());
        }
        index.insert(path.clone(), field.kind());
        index_kinds(field.children(), &path, index, duplicates);
    }
}
