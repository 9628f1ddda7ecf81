//! Engine errors

use std::sync::Arc;

use sitecfg_schema::SchemaError;

use crate::config::ConfigError;
use crate::source::FetchError;

/// Errors surfaced by the engine and sessions
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Schema could not be loaded
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Component type is not in the registry
    #[error("unknown component type '{component_type}'")]
    UnknownComponent {
        /// Requested component type
        component_type: String,
    },

    /// Variant is not registered for the component type
    #[error("unknown variant '{variant_id}' for component type '{component_type}'")]
    UnknownVariant {
        /// Component type
        component_type: String,
        /// Requested variant id
        variant_id: String,
    },

    /// Tenant site configuration could not be fetched
    #[error("fetching tenant '{tenant}' failed")]
    Fetch {
        /// Tenant id
        tenant: String,
        /// Source failure, shared by every waiter of a coalesced fetch
        #[source]
        source: Arc<FetchError>,
    },

    /// Engine configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, CoreError>;
