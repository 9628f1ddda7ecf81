//! Component collections
//!
//! A page stores its component instances either keyed by instance id or as
//! an ordered list. Both shapes are read through [`ComponentCollection`].

use serde_json::{Map, Value};
use std::fmt;

/// Where a record sits inside its collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordPosition {
    /// Map key of a keyed collection
    Key(String),
    /// Index into an ordered collection
    Index(usize),
}

impl fmt::Display for RecordPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "[{key:?}]"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Why a record was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDefect {
    /// Record is not a JSON object
    NotObject {
        /// JSON type found instead
        found: &'static str,
    },
    /// Record has no string `type`
    MissingType,
    /// Ordered record has no string `id`
    MissingId,
}

impl fmt::Display for RecordDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotObject { found } => write!(f, "record is {found}, not an object"),
            Self::MissingType => f.write_str("record has no string 'type'"),
            Self::MissingId => f.write_str("list record has no string 'id'"),
        }
    }
}

/// A well-formed instance record
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRecord<'a> {
    /// Position in the collection
    pub position: RecordPosition,
    /// Component type
    pub component_type: &'a str,
    /// Record `id`, if present
    pub id: Option<&'a str>,
    /// Record `data`, if present
    pub data: Option<&'a Value>,
}

impl InstanceRecord<'_> {
    /// Check whether this record is the requested instance
    ///
    /// Keyed records match on their map key or their `id`; ordered records
    /// only on their `id`.
    #[must_use]
    pub fn matches(&self, component_type: &str, instance_id: &str) -> bool {
        if self.component_type != component_type {
            return false;
        }
        let key_matches = matches!(&self.position, RecordPosition::Key(key) if key == instance_id);
        key_matches || self.id == Some(instance_id)
    }
}

/// A record that could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// Position in the collection
    pub position: RecordPosition,
    /// What is wrong with it
    pub defect: RecordDefect,
}

/// One page's component instances
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentCollection<'a> {
    /// `instanceId → record`
    Keyed(&'a Map<String, Value>),
    /// `[record]`
    Ordered(&'a [Value]),
}

impl<'a> ComponentCollection<'a> {
    /// Classify a page value; `None` if it is neither a map nor a list
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::Keyed(map)),
            Value::Array(list) => Some(Self::Ordered(list)),
            _ => None,
        }
    }

    /// Number of entries, well-formed or not
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::Ordered(list) => list.len(),
        }
    }

    /// Check if the collection has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read every entry in payload order
    pub fn records(
        self,
    ) -> Box<dyn Iterator<Item = Result<InstanceRecord<'a>, MalformedRecord>> + 'a> {
        match self {
            Self::Keyed(map) => Box::new(map.iter().map(|(key, value)| {
                read_record(RecordPosition::Key(key.clone()), value, false)
            })),
            Self::Ordered(list) => Box::new(
                list.iter()
                    .enumerate()
                    .map(|(index, value)| read_record(RecordPosition::Index(index), value, true)),
            ),
        }
    }
}

fn read_record(
    position: RecordPosition,
    value: &Value,
    id_required: bool,
) -> Result<InstanceRecord<'_>, MalformedRecord> {
    let malformed = |defect| MalformedRecord {
        position: position.clone(),
        defect,
    };

    let record = value.as_object().ok_or_else(|| {
        malformed(RecordDefect::NotObject {
            found: type_name(value),
        })
    })?;
    let component_type = record
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(RecordDefect::MissingType))?;
    let id = record.get("id").and_then(Value::as_str);
    if id_required && id.is_none() {
        return Err(malformed(RecordDefect::MissingId));
    }

    Ok(InstanceRecord {
        position,
        component_type,
        id,
        data: record.get("data"),
    })
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
