//! Variant definitions and the component structure they are loaded from

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::field::FieldDefinition;
use crate::form::FormMode;

/// One configurable layout of a component type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDefinition {
    /// Variant id, unique within its component type
    pub id: String,
    /// Display name
    pub name: String,
    /// Full field tree
    pub fields: Vec<FieldDefinition>,
    /// Reduced tree for simple editing; must be a subset of `fields`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_fields: Option<Vec<FieldDefinition>>,
}

impl VariantDefinition {
    /// Field list shown in the given editor mode
    #[must_use]
    pub fn fields_for(&self, mode: FormMode) -> &[FieldDefinition] {
        match (mode, &self.simple_fields) {
            (FormMode::Simple, Some(simple)) => simple,
            _ => &self.fields,
        }
    }
}

/// Component type → its variants, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentStructure(pub IndexMap<String, Vec<VariantDefinition>>);

impl ComponentStructure {
    /// Create empty structure
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add variants for a component type, appending to any already present
    #[must_use]
    pub fn with_component(
        mut self,
        component_type: impl Into<String>,
        variants: Vec<VariantDefinition>,
    ) -> Self {
        self.0.entry(component_type.into()).or_default().extend(variants);
        self
    }

    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not a valid component structure
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from YAML text
    ///
    /// # Errors
    /// Returns error if the text is not a valid component structure
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Iterate component types and their variants
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<VariantDefinition>)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO_YAML: &str = r#"
hero:
  - id: hero1
    name: Classic hero
    fields:
      - key: content
        label: Content
        type: object
        fields:
          - { key: title, label: Title, type: text, defaultValue: Welcome }
    simpleFields:
      - key: content
        label: Content
        type: object
        fields:
          - { key: title, label: Title, type: text }
"#;

    #[test]
    fn parse_yaml_structure() {
        let structure = ComponentStructure::from_yaml(HERO_YAML).unwrap();
        let variants = &structure.0["hero"];
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].id, "hero1");
        assert!(variants[0].simple_fields.is_some());
    }

    #[test]
    fn parse_json_structure() {
        let json = r#"{"map": [{"id": "map1", "name": "Map", "fields": []}]}"#;
        let structure = ComponentStructure::from_json(json).unwrap();
        assert_eq!(structure.0["map"][0].name, "Map");
        assert!(structure.0["map"][0].simple_fields.is_none());
    }

    #[test]
    fn invalid_text_is_error() {
        assert!(matches!(
            ComponentStructure::from_json("{\"map\": 3}"),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn fields_for_mode() {
        let structure = ComponentStructure::from_yaml(HERO_YAML).unwrap();
        let variant = &structure.0["hero"][0];
        assert_eq!(variant.fields_for(FormMode::Full).len(), 1);
        assert_eq!(variant.fields_for(FormMode::Simple)[0].key(), "content");
    }
}
