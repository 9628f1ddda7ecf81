//! Engine
//!
//! Owns the schema registry, the tenant source and the tenant cache, and
//! hands out [`Session`]s.

use serde_json::Value;
use sitecfg_live::{InMemoryLiveStore, LiveVariantStore};
use sitecfg_schema::SchemaRegistry;
use std::sync::Arc;

use crate::cache::TenantCache;
use crate::config::EngineConfig;
use crate::error::{CoreError, Result};
use crate::session::Session;
use crate::source::TenantDataSource;

/// Shared engine state for every tenant
#[derive(Clone)]
pub struct Engine {
    config: Arc<EngineConfig>,
    registry: Arc<SchemaRegistry>,
    source: Arc<dyn TenantDataSource>,
    cache: TenantCache,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("component_types", &self.registry.len())
            .field("cached_tenants", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Create engine
    ///
    /// Logs a warning for every variant whose defaults lack the signature
    /// path configured for its component type.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        registry: SchemaRegistry,
        source: Arc<dyn TenantDataSource>,
    ) -> Self {
        warn_missing_signatures(&config, &registry);

        let cache = match config.cache_ttl() {
            Some(ttl) => TenantCache::with_ttl(config.tenant_cache_capacity, ttl),
            None => TenantCache::new(config.tenant_cache_capacity),
        };

        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            source,
            cache,
        }
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Schema registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Tenant cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &TenantCache {
        &self.cache
    }

    /// Fetch a tenant's site configuration through the cache
    ///
    /// # Errors
    /// Returns [`CoreError::Fetch`] if the source fails
    pub async fn load_tenant(&self, tenant: &str) -> Result<Arc<Value>> {
        self.cache
            .get_or_fetch(tenant, self.source.as_ref())
            .await
            .map_err(|source| {
                tracing::warn!(tenant, error = %source, "tenant fetch failed");
                CoreError::Fetch {
                    tenant: tenant.to_string(),
                    source,
                }
            })
    }

    /// Session whose persisted data is still pending
    ///
    /// Attach the configuration with [`Session::attach_site_config`] once
    /// [`Engine::load_tenant`] completes.
    #[must_use]
    pub fn session(&self, tenant: impl Into<String>) -> Session {
        self.session_with_store(tenant, Arc::new(InMemoryLiveStore::new()))
    }

    /// Pending session using a caller-provided live store
    #[must_use]
    pub fn session_with_store(
        &self,
        tenant: impl Into<String>,
        live: Arc<dyn LiveVariantStore>,
    ) -> Session {
        Session::new(
            tenant.into(),
            Arc::clone(&self.config),
            Arc::clone(&self.registry),
            live,
        )
    }

    /// Session with the tenant's site configuration already attached
    ///
    /// # Errors
    /// Returns [`CoreError::Fetch`] if the source fails
    pub async fn open_session(&self, tenant: &str) -> Result<Session> {
        let site = self.load_tenant(tenant).await?;
        let mut session = self.session(tenant);
        session.attach_site_config(site);
        Ok(session)
    }
}

fn warn_missing_signatures(config: &EngineConfig, registry: &SchemaRegistry) {
    for component_type in registry.component_types() {
        let signature = config.signature_for(component_type);
        for variant in registry.variants(component_type).unwrap_or_default() {
            if signature.lookup(variant.defaults()).is_none() {
                tracing::warn!(
                    component_type,
                    variant_id = %variant.definition().id,
                    %signature,
                    "signature path missing from variant defaults"
                );
            }
        }
    }
}
