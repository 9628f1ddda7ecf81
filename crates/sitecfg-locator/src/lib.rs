//! sitecfg Locator
//!
//! Finds a component instance's persisted data inside a tenant's site
//! configuration, `{ pageSlug: ComponentCollection }`.
//!
//! # Core Concepts
//!
//! - **ComponentCollection**: a page's instances, keyed by id or as a list
//! - **locate**: total lookup, `{}` on a miss
//! - **locate_traced**: the same lookup plus [`ShapeDiagnostic`]s for
//!   skipped records and duplicate matches
//!
//! # Example
//!
//! ```rust
//! use sitecfg_locator::locate;
//! use serde_json::json;
//!
//! let site = json!({
//!     "home": {"abc": {"type": "hero", "data": {"title": "Welcome"}}},
//!     "about": [{"type": "map", "id": "m1", "data": {"zoom": 12}}]
//! });
//!
//! assert_eq!(locate(&site, "hero", "abc"), json!({"title": "Welcome"}));
//! assert_eq!(locate(&site, "map", "m1"), json!({"zoom": 12}));
//! assert_eq!(locate(&site, "map", "missing"), json!({}));
//! ```

#![warn(missing_docs)]

pub mod collection;
pub mod locate;

// Re-exports
pub use collection::{
    ComponentCollection, InstanceRecord, MalformedRecord, RecordDefect, RecordPosition,
};
pub use locate::{locate, locate_traced, Located, MatchSource, ShapeDiagnostic};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
