//! Per-tenant site configuration cache using moka
//!
//! Each tenant is fetched at most once while cached. Concurrent requests for
//! the same tenant share one fetch; failed fetches are not cached.

use moka::future::Cache;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::source::{FetchError, TenantDataSource};

/// Cache of fetched tenant site configurations
#[derive(Debug, Clone)]
pub struct TenantCache {
    inner: Cache<String, Arc<Value>>,
}

impl TenantCache {
    /// Create cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Get the cached configuration or fetch it from `source`
    ///
    /// # Errors
    /// Returns the fetch error, shared between every waiting caller
    pub async fn get_or_fetch(
        &self,
        tenant: &str,
        source: &dyn TenantDataSource,
    ) -> Result<Arc<Value>, Arc<FetchError>> {
        self.inner
            .try_get_with(tenant.to_string(), async {
                tracing::info!(tenant, "fetching tenant site configuration");
                source.fetch(tenant).await.map(Arc::new)
            })
            .await
    }

    /// Cached configuration, if present
    #[inline]
    pub async fn get(&self, tenant: &str) -> Option<Arc<Value>> {
        self.inner.get(tenant).await
    }

    /// Insert a configuration directly
    #[inline]
    pub async fn insert(&self, tenant: impl Into<String>, site: Value) {
        self.inner.insert(tenant.into(), Arc::new(site)).await;
    }

    /// Drop one tenant so the next request fetches again
    #[inline]
    pub async fn invalidate(&self, tenant: &str) {
        self.inner.invalidate(tenant).await;
    }

    /// Drop every tenant
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get approximate entry count
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for TenantCache {
    /// Create cache with default capacity (1,000 tenants)
    fn default() -> Self {
        Self::new(1_000)
    }
}
