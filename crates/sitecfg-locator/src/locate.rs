//! Instance lookup across every page of a site configuration

use serde_json::{Map, Value};

use crate::collection::{type_name, ComponentCollection, RecordDefect, RecordPosition};

/// A malformed or ambiguous spot in a site configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeDiagnostic {
    /// The site configuration itself is not an object
    #[error("site configuration is {found}, not an object")]
    RootNotObject {
        /// JSON type found instead
        found: &'static str,
    },

    /// A page is neither a map nor a list of records
    #[error("page '{page}' is {found}, not a component collection")]
    CollectionNotContainer {
        /// Page slug
        page: String,
        /// JSON type found instead
        found: &'static str,
    },

    /// A record was skipped
    #[error("page '{page}' record {position}: {defect}")]
    MalformedRecord {
        /// Page slug
        page: String,
        /// Record position in the page
        position: RecordPosition,
        /// Why the record was skipped
        defect: RecordDefect,
    },

    /// A matching record's `data` is not an object
    #[error("page '{page}' record {position}: data is {found}, using {{}}")]
    DataNotObject {
        /// Page slug
        page: String,
        /// Record position in the page
        position: RecordPosition,
        /// JSON type of `data`
        found: &'static str,
    },

    /// A further record matched after the first one
    #[error("page '{page}' record {position} duplicates the instance already found")]
    DuplicateMatch {
        /// Page slug
        page: String,
        /// Record position in the page
        position: RecordPosition,
    },
}

/// Where the located data came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSource {
    /// Page slug
    pub page: String,
    /// Position in the page's collection
    pub position: RecordPosition,
}

/// Result of [`locate_traced`]
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    /// Persisted data of the first match, or `{}`
    pub data: Value,
    /// First match, if any
    pub source: Option<MatchSource>,
    /// Everything skipped or ambiguous along the way
    pub diagnostics: Vec<ShapeDiagnostic>,
}

impl Located {
    /// Check whether a record matched
    #[inline]
    #[must_use]
    pub fn found(&self) -> bool {
        self.source.is_some()
    }
}

/// Find the persisted data of one instance
///
/// Never fails: a miss or malformed input yields `{}`.
#[must_use]
pub fn locate(site: &Value, component_type: &str, instance_id: &str) -> Value {
    locate_traced(site, component_type, instance_id).data
}

/// Find the persisted data of one instance and report shape problems
///
/// Pages are scanned in payload order and the first match wins. Later matches
/// are reported as [`ShapeDiagnostic::DuplicateMatch`].
#[must_use]
pub fn locate_traced(site: &Value, component_type: &str, instance_id: &str) -> Located {
    let mut diagnostics = Vec::new();
    let mut first: Option<(MatchSource, Value)> = None;

    match site.as_object() {
        Some(pages) => scan_pages(pages, component_type, instance_id, &mut first, &mut diagnostics),
        None => diagnostics.push(ShapeDiagnostic::RootNotObject {
            found: type_name(site),
        }),
    }

    for diagnostic in &diagnostics {
        tracing::debug!(component_type, instance_id, %diagnostic, "site configuration shape");
    }

    let (source, data) = match first {
        Some((source, data)) => (Some(source), data),
        None => (None, Value::Object(Map::new())),
    };

    Located {
        data,
        source,
        diagnostics,
    }
}

fn scan_pages(
    pages: &Map<String, Value>,
    component_type: &str,
    instance_id: &str,
    first: &mut Option<(MatchSource, Value)>,
    diagnostics: &mut Vec<ShapeDiagnostic>,
) {
    for (page, value) in pages {
        let Some(collection) = ComponentCollection::from_value(value) else {
            diagnostics.push(ShapeDiagnostic::CollectionNotContainer {
                page: page.clone(),
                found: type_name(value),
            });
            continue;
        };

        for record in collection.records() {
            let record = match record {
                Ok(record) => record,
                Err(malformed) => {
                    diagnostics.push(ShapeDiagnostic::MalformedRecord {
                        page: page.clone(),
                        position: malformed.position,
                        defect: malformed.defect,
                    });
                    continue;
                }
            };

            if !record.matches(component_type, instance_id) {
                continue;
            }

            if first.is_some() {
                diagnostics.push(ShapeDiagnostic::DuplicateMatch {
                    page: page.clone(),
                    position: record.position,
                });
                continue;
            }

            let data = match record.data {
                None | Some(Value::Null) => Value::Object(Map::new()),
                Some(data @ Value::Object(_)) => data.clone(),
                Some(other) => {
                    diagnostics.push(ShapeDiagnostic::DataNotObject {
                        page: page.clone(),
                        position: record.position.clone(),
                        found: type_name(other),
                    });
                    Value::Object(Map::new())
                }
            };

            *first = Some((
                MatchSource {
                    page: page.clone(),
                    position: record.position,
                },
                data,
            ));
        }
    }
}
