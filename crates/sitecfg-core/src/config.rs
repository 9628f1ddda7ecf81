//! Engine configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! default_signature = "content.title"
//! tenant_cache_capacity = 1000
//! tenant_cache_ttl_secs = 300
//!
//! [signatures]
//! propertyDetails = "content.heading"
//! ```

use serde::{Deserialize, Serialize};
use sitecfg_schema::FieldPath;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors loading an [`EngineConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`EngineConfig`]
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Signature path for component types without their own entry
    pub default_signature: FieldPath,
    /// Signature path per component type
    pub signatures: BTreeMap<String, FieldPath>,
    /// Maximum number of tenants kept in the fetch cache
    pub tenant_cache_capacity: u64,
    /// Seconds a fetched tenant configuration stays cached; unset keeps it
    /// until evicted
    pub tenant_cache_ttl_secs: Option<u64>,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns error if the text is not a valid configuration
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// With default signature path
    #[inline]
    #[must_use]
    pub fn with_default_signature(mut self, path: FieldPath) -> Self {
        self.default_signature = path;
        self
    }

    /// With a signature path for one component type
    #[inline]
    #[must_use]
    pub fn with_signature(mut self, component_type: impl Into<String>, path: FieldPath) -> Self {
        self.signatures.insert(component_type.into(), path);
        self
    }

    /// With tenant cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.tenant_cache_capacity = capacity;
        self
    }

    /// With tenant cache time-to-live
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.tenant_cache_ttl_secs = Some(ttl.as_secs());
        self
    }

    /// Signature path used for `component_type`
    #[must_use]
    pub fn signature_for(&self, component_type: &str) -> &FieldPath {
        self.signatures
            .get(component_type)
            .unwrap_or(&self.default_signature)
    }

    /// Tenant cache time-to-live
    #[inline]
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.tenant_cache_ttl_secs.map(Duration::from_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_signature: FieldPath::new(vec!["content".to_string(), "title".to_string()]),
            signatures: BTreeMap::new(),
            tenant_cache_capacity: 1_000,
            tenant_cache_ttl_secs: None,
        }
    }
}
