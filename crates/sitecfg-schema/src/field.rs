//! Field definition tree
//!
//! A [`FieldDefinition`] describes one node of a component's configuration
//! shape. The tree is a closed sum of primitive leaves, nested objects and
//! repeatable arrays. The serialized form is the flat `{key, label, type, ...}`
//! record used by schema files, with `fields` on objects and `of` on arrays.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FieldShapeError;
use crate::path::FieldPath;

/// Input type of a primitive leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Single-line text
    Text,
    /// Multi-line text
    Textarea,
    /// Numeric input
    Number,
    /// Toggle
    Boolean,
    /// Color string (`#rrggbb`, `rgba(...)`)
    Color,
    /// Image reference
    Image,
    /// One of a fixed set of options
    Select,
    /// Link target
    Url,
}

impl PrimitiveType {
    /// Parse the schema-file type tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "color" => Self::Color,
            "image" => Self::Image,
            "select" => Self::Select,
            "url" => Self::Url,
            _ => return None,
        })
    }

    /// Schema-file type tag
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Color => "color",
            Self::Image => "image",
            Self::Select => "select",
            Self::Url => "url",
        }
    }

    /// Value used when the schema declares no default
    #[must_use]
    pub fn zero_value(self) -> Value {
        match self {
            Self::Number => Value::from(0),
            Self::Boolean => Value::Bool(false),
            _ => Value::String(String::new()),
        }
    }

    /// JSON type name values of this input are stored as
    #[must_use]
    pub fn json_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            _ => "string",
        }
    }

    /// Whether `value` has the JSON type this input stores
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            _ => value.is_string(),
        }
    }
}

/// One entry of a `select` field's option list
///
/// Schema files write either a bare literal or a `{value, label}` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    /// `{ "value": ..., "label": ... }`
    Labeled {
        /// Stored value
        value: Value,
        /// Display label
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// A bare literal used as both value and label
    Bare(Value),
}

impl SelectOption {
    /// Stored value
    #[must_use]
    pub fn value(&self) -> &Value {
        match self {
            Self::Labeled { value, .. } | Self::Bare(value) => value,
        }
    }

    /// Display label, falling back to the value's text
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Labeled {
                label: Some(label), ..
            } => label.clone(),
            Self::Labeled { value, .. } | Self::Bare(value) => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}

/// Visibility dependency of a field on another value in the merged data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Dot-path into the fully merged data
    pub field: FieldPath,
    /// Literal the dependency must equal
    pub value: Value,
}

impl Condition {
    /// Create condition
    #[must_use]
    pub fn new(field: FieldPath, value: impl Into<Value>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Primitive leaf field
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveField {
    /// Key in the parent object
    pub key: String,
    /// Editor label
    pub label: String,
    /// Input type
    pub field_type: PrimitiveType,
    /// Editor placeholder
    pub placeholder: Option<String>,
    /// Allowed values for `select`
    pub options: Option<Vec<SelectOption>>,
    /// Declared default
    pub default_value: Option<Value>,
    /// Editor help text
    pub description: Option<String>,
    /// Visibility condition
    pub condition: Option<Condition>,
}

impl PrimitiveField {
    /// Create a leaf with no default, options or condition
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        field_type: PrimitiveType,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type,
            placeholder: None,
            options: None,
            default_value: None,
            description: None,
            condition: None,
        }
    }

    /// With declared default
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// With select options
    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// With visibility condition
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// With placeholder
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Nested object field
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    /// Key in the parent object
    pub key: String,
    /// Editor label
    pub label: String,
    /// Child fields
    pub fields: Vec<FieldDefinition>,
    /// Editor help text
    pub description: Option<String>,
    /// Visibility condition
    pub condition: Option<Condition>,
}

impl ObjectField {
    /// Create object field
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            fields,
            description: None,
            condition: None,
        }
    }

    /// With visibility condition
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Repeatable array field; each item is an object shaped by `of`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayField {
    /// Key in the parent object
    pub key: String,
    /// Editor label
    pub label: String,
    /// Item template
    pub of: Vec<FieldDefinition>,
    /// Lower length bound
    pub min_items: Option<usize>,
    /// Upper length bound
    pub max_items: Option<usize>,
    /// Editor "add" button label
    pub add_label: Option<String>,
    /// Editor per-item label
    pub item_label: Option<String>,
    /// Literal default items
    pub default_value: Option<Vec<Value>>,
    /// Editor help text
    pub description: Option<String>,
    /// Visibility condition
    pub condition: Option<Condition>,
}

impl ArrayField {
    /// Create array field without bounds
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, of: Vec<FieldDefinition>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            of,
            min_items: None,
            max_items: None,
            add_label: None,
            item_label: None,
            default_value: None,
            description: None,
            condition: None,
        }
    }

    /// With length bounds
    #[must_use]
    pub fn with_bounds(mut self, min_items: Option<usize>, max_items: Option<usize>) -> Self {
        self.min_items = min_items;
        self.max_items = max_items;
        self
    }

    /// With literal default items
    #[must_use]
    pub fn with_default(mut self, items: Vec<Value>) -> Self {
        self.default_value = Some(items);
        self
    }

    /// With editor labels
    #[must_use]
    pub fn with_labels(
        mut self,
        add_label: impl Into<String>,
        item_label: impl Into<String>,
    ) -> Self {
        self.add_label = Some(add_label.into());
        self.item_label = Some(item_label.into());
        self
    }
}

/// Kind of a field, used for structural comparisons between trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Primitive leaf of the given type
    Primitive(PrimitiveType),
    /// Nested object
    Object,
    /// Repeatable array
    Array,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive(ty) => f.write_str(ty.tag()),
            Self::Object => f.write_str("object"),
            Self::Array => f.write_str("array"),
        }
    }
}

/// One node of a configuration shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub enum FieldDefinition {
    /// Primitive leaf
    Primitive(PrimitiveField),
    /// Nested object
    Object(ObjectField),
    /// Repeatable array
    Array(ArrayField),
}

impl FieldDefinition {
    /// Key in the parent object
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Primitive(f) => &f.key,
            Self::Object(f) => &f.key,
            Self::Array(f) => &f.key,
        }
    }

    /// Editor label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Primitive(f) => &f.label,
            Self::Object(f) => &f.label,
            Self::Array(f) => &f.label,
        }
    }

    /// Editor help text
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Primitive(f) => f.description.as_deref(),
            Self::Object(f) => f.description.as_deref(),
            Self::Array(f) => f.description.as_deref(),
        }
    }

    /// Visibility condition
    #[must_use]
    pub fn condition(&self) -> Option<&Condition> {
        match self {
            Self::Primitive(f) => f.condition.as_ref(),
            Self::Object(f) => f.condition.as_ref(),
            Self::Array(f) => f.condition.as_ref(),
        }
    }

    /// Structural kind
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Primitive(f) => FieldKind::Primitive(f.field_type),
            Self::Object(_) => FieldKind::Object,
            Self::Array(_) => FieldKind::Array,
        }
    }

    /// Child fields of objects and item fields of arrays
    #[must_use]
    pub fn children(&self) -> &[FieldDefinition] {
        match self {
            Self::Primitive(_) => &[],
            Self::Object(f) => &f.fields,
            Self::Array(f) => &f.of,
        }
    }
}

impl From<PrimitiveField> for FieldDefinition {
    fn from(field: PrimitiveField) -> Self {
        Self::Primitive(field)
    }
}

impl From<ObjectField> for FieldDefinition {
    fn from(field: ObjectField) -> Self {
        Self::Object(field)
    }
}

impl From<ArrayField> for FieldDefinition {
    fn from(field: ArrayField) -> Self {
        Self::Array(field)
    }
}

/// Flat serialized form shared by all field kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    key: String,
    #[serde(default)]
    label: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    of: Option<Vec<FieldDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    add_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_label: Option<String>,
}

impl RawField {
    fn empty(key: String, label: String, kind: &str) -> Self {
        Self {
            key,
            label,
            kind: kind.to_string(),
            placeholder: None,
            options: None,
            default_value: None,
            description: None,
            condition: None,
            fields: None,
            of: None,
            min_items: None,
            max_items: None,
            add_label: None,
            item_label: None,
        }
    }
}

impl TryFrom<RawField> for FieldDefinition {
    type Error = FieldShapeError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "object" => {
                let fields = raw.fields.ok_or_else(|| FieldShapeError::MissingChildren {
                    key: raw.key.clone(),
                    attribute: "fields",
                })?;
                Ok(Self::Object(ObjectField {
                    key: raw.key,
                    label: raw.label,
                    fields,
                    description: raw.description,
                    condition: raw.condition,
                }))
            }
            "array" => {
                let of = raw.of.ok_or_else(|| FieldShapeError::MissingChildren {
                    key: raw.key.clone(),
                    attribute: "of",
                })?;
                let default_value = match raw.default_value {
                    None => None,
                    Some(Value::Array(items)) => Some(items),
                    Some(_) => return Err(FieldShapeError::ArrayDefaultNotList { key: raw.key }),
                };
                Ok(Self::Array(ArrayField {
                    key: raw.key,
                    label: raw.label,
                    of,
                    min_items: raw.min_items,
                    max_items: raw.max_items,
                    add_label: raw.add_label,
                    item_label: raw.item_label,
                    default_value,
                    description: raw.description,
                    condition: raw.condition,
                }))
            }
            tag => {
                let field_type =
                    PrimitiveType::from_tag(tag).ok_or_else(|| FieldShapeError::UnknownType {
                        key: raw.key.clone(),
                        type_name: tag.to_string(),
                    })?;
                Ok(Self::Primitive(PrimitiveField {
                    key: raw.key,
                    label: raw.label,
                    field_type,
                    placeholder: raw.placeholder,
                    options: raw.options,
                    default_value: raw.default_value,
                    description: raw.description,
                    condition: raw.condition,
                }))
            }
        }
    }
}

impl From<FieldDefinition> for RawField {
    fn from(field: FieldDefinition) -> Self {
        match field {
            FieldDefinition::Primitive(f) => {
                let mut raw = RawField::empty(f.key, f.label, f.field_type.tag());
                raw.placeholder = f.placeholder;
                raw.options = f.options;
                raw.default_value = f.default_value;
                raw.description = f.description;
                raw.condition = f.condition;
                raw
            }
            FieldDefinition::Object(f) => {
                let mut raw = RawField::empty(f.key, f.label, "object");
                raw.fields = Some(f.fields);
                raw.description = f.description;
                raw.condition = f.condition;
                raw
            }
            FieldDefinition::Array(f) => {
                let mut raw = RawField::empty(f.key, f.label, "array");
                raw.of = Some(f.of);
                raw.min_items = f.min_items;
                raw.max_items = f.max_items;
                raw.add_label = f.add_label;
                raw.item_label = f.item_label;
                raw.default_value = f.default_value.map(Value::Array);
                raw.description = f.description;
                raw.condition = f.condition;
                raw
            }
        }
    }
}
