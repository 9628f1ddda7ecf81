//! sitecfg Merge
//!
//! Resolves one authoritative configuration object for a component instance
//! out of four independently sourced layers.
//!
//! # Core Concepts
//!
//! - **DataLayers**: default, props, persisted and live data, each an object
//! - **overlay**: shallow top-level overwrite, the only merge operator
//! - **PristineCheck**: decides whether a live copy looks untouched
//! - **Resolver**: applies the precedence rules, optionally with provenance
//!
//! # Example
//!
//! ```rust
//! use sitecfg_merge::resolve;
//! use serde_json::json;
//!
//! let merged = resolve(
//!     json!({"visible": true, "content": {"title": "Default"}}),
//!     json!({}),
//!     json!({}),
//!     json!({"content": {"title": "Edited"}}),
//!     &"content.title".parse().unwrap(),
//! );
//!
//! assert_eq!(merged, json!({"visible": true, "content": {"title": "Edited"}}));
//! ```

#![warn(missing_docs)]

pub mod layers;
pub mod pristine;
pub mod resolver;

// Re-exports
pub use layers::{normalize, overlay, DataLayers, LayerKind};
pub use pristine::{PristineCheck, SignatureField};
pub use resolver::{is_visible, resolve, Resolution, Resolver};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
