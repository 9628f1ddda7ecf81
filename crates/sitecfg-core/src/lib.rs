//! sitecfg Core
//!
//! Engine and per-tenant sessions wiring the schema registry, instance
//! locator, layered merge resolver and live variant store together.
//!
//! # Core Concepts
//!
//! - **Engine**: registry, tenant source and tenant cache shared by all tenants
//! - **Session**: context object for one tenant's rendering and editing
//! - **TenantDataSource**: where persisted site configurations come from
//! - **TenantCache**: at most one in-flight fetch per tenant
//! - **EngineConfig**: signature paths and cache settings, from TOML
//!
//! The tenant fetch is the only suspend point. Until it completes a session
//! resolves with an empty persisted layer.
//!
//! # Example
//!
//! ```rust,no_run
//! use sitecfg_core::{ComponentRef, Engine, EngineConfig, JsonFileSource};
//! use sitecfg_schema::SchemaRegistry;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::from_yaml(&std::fs::read_to_string("schema.yaml")?)?;
//! let source = Arc::new(JsonFileSource::new("sites"));
//! let engine = Engine::new(EngineConfig::default(), registry, source);
//!
//! let session = engine.open_session("acme").await?;
//! let hero = ComponentRef::new("hero", "hero1", "home-hero");
//! let merged = session.resolve(&hero, json!({}))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod source;

// Re-exports
pub use cache::TenantCache;
pub use config::{ConfigError, EngineConfig};
pub use engine::Engine;
pub use error::{CoreError, Result};
pub use session::{ComponentRef, Session};
pub use source::{FetchError, JsonFileSource, TenantDataSource};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for engine operations
    pub use crate::{ComponentRef, CoreError, Engine, EngineConfig, Session, TenantDataSource};
    pub use sitecfg_live::{InMemoryLiveStore, LiveVariantStore};
    pub use sitecfg_schema::{FormMode, SchemaRegistry};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
