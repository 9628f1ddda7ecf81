//! Staleness heuristic
//!
//! Decides whether a live working copy looks untouched, in which case the
//! persisted layer is trusted over it.

use serde_json::{Map, Value};
use sitecfg_schema::{strict_equals, FieldPath};

/// Decide whether live data looks like it was never edited
pub trait PristineCheck: Send + Sync {
    /// `true` if `live` appears to still equal `default`
    fn is_pristine(&self, live: &Map<String, Value>, default: &Map<String, Value>) -> bool;
}

/// Compares one designated signature field of live and default data
///
/// Cannot tell "never edited" from "edited back to the default value".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureField {
    path: FieldPath,
}

impl SignatureField {
    /// Create a check on `path`
    #[inline]
    #[must_use]
    pub fn new(path: FieldPath) -> Self {
        Self { path }
    }

    /// Signature path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }
}

impl PristineCheck for SignatureField {
    fn is_pristine(&self, live: &Map<String, Value>, default: &Map<String, Value>) -> bool {
        let Some((head, rest)) = self.path.segments().split_first() else {
            return live == default;
        };
        let rest = FieldPath::new(rest.to_vec());
        let live = live.get(head).and_then(|v| rest.lookup(v));
        let default = default.get(head).and_then(|v| rest.lookup(v));

        match (live, default) {
            (None, None) => true,
            (Some(a), Some(b)) => strict_equals(a, b),
            _ => false,
        }
    }
}

impl<T: PristineCheck + ?Sized> PristineCheck for &T {
    fn is_pristine(&self, live: &Map<String, Value>, default: &Map<String, Value>) -> bool {
        (**self).is_pristine(live, default)
    }
}

impl<T: PristineCheck + ?Sized> PristineCheck for Box<T> {
    fn is_pristine(&self, live: &Map<String, Value>, default: &Map<String, Value>) -> bool {
        (**self).is_pristine(live, default)
    }
}
