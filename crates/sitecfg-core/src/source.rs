//! Tenant configuration sources
//!
//! The engine never talks to a network or disk directly; it asks a
//! [`TenantDataSource`] for a tenant's full site configuration.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Errors fetching a tenant's site configuration
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No configuration exists for the tenant
    #[error("no site configuration for tenant '{tenant}'")]
    NotFound {
        /// Tenant id
        tenant: String,
    },

    /// Tenant id cannot be used to address a configuration
    #[error("invalid tenant id '{tenant}'")]
    InvalidTenant {
        /// Rejected tenant id
        tenant: String,
    },

    /// Reading the configuration failed
    #[error("failed to read configuration of tenant '{tenant}': {source}")]
    Io {
        /// Tenant id
        tenant: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON
    #[error("invalid configuration JSON for tenant '{tenant}': {source}")]
    Parse {
        /// Tenant id
        tenant: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Fetches one tenant's persisted site configuration
#[async_trait]
pub trait TenantDataSource: Send + Sync {
    /// Fetch the full `{ pageSlug: ComponentCollection }` document
    async fn fetch(&self, tenant: &str) -> Result<Value, FetchError>;
}

/// Reads `<dir>/<tenant>.json`
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    /// Create source rooted at `dir`
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding tenant files
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, tenant: &str) -> Result<PathBuf, FetchError> {
        let valid = !tenant.is_empty()
            && tenant != "."
            && tenant != ".."
            && !tenant.contains(['/', '\\', '\0']);
        if !valid {
            return Err(FetchError::InvalidTenant {
                tenant: tenant.to_string(),
            });
        }
        Ok(self.dir.join(format!("{tenant}.json")))
    }
}

#[async_trait]
impl TenantDataSource for JsonFileSource {
    async fn fetch(&self, tenant: &str) -> Result<Value, FetchError> {
        let path = self.path_for(tenant)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound {
                    tenant: tenant.to_string(),
                });
            }
            Err(source) => {
                return Err(FetchError::Io {
                    tenant: tenant.to_string(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| FetchError::Parse {
            tenant: tenant.to_string(),
            source,
        })
    }
}
