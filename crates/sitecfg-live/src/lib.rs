//! sitecfg Live
//!
//! Live-editor working copies of component instances.
//!
//! The store is an explicit context object: renderers and editors receive a
//! `&dyn LiveVariantStore` (or an `Arc`) rather than reaching for a global, so
//! tests can substitute their own implementation.
//!
//! # Example
//!
//! ```rust
//! use sitecfg_live::{InMemoryLiveStore, LiveVariantStore};
//! use serde_json::json;
//!
//! let store = InMemoryLiveStore::new();
//! assert!(store.ensure("hero", "h1", json!({"title": "Default"})));
//! store.set("hero", "h1", json!({"title": "Edited"}));
//!
//! // A second render tries to seed again; the edit survives
//! assert!(!store.ensure("hero", "h1", json!({"title": "Default"})));
//! assert_eq!(store.get("hero", "h1"), json!({"title": "Edited"}));
//! ```

#![warn(missing_docs)]

pub mod store;

// Re-exports
pub use store::{InMemoryLiveStore, LiveVariantStore, SlotKey};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
