//! Rendering and editing sessions
//!
//! A [`Session`] is the explicit context object through which renderers and
//! editors of one tenant resolve component configuration. It carries the
//! tenant's site configuration (once fetched) and the live variant store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sitecfg_live::LiveVariantStore;
use sitecfg_locator::{locate_traced, Located};
use sitecfg_merge::{is_visible, DataLayers, Resolution, Resolver};
use sitecfg_schema::{build_form, FormMode, FormNode, RegisteredVariant, SchemaRegistry};
use std::fmt;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{CoreError, Result};

/// One component instance on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Component type, e.g. `hero`
    pub component_type: String,
    /// Variant rendered for this instance
    pub variant_id: String,
    /// Instance id, unique per component type within a tenant
    pub instance_id: String,
}

impl ComponentRef {
    /// Create reference
    #[inline]
    #[must_use]
    pub fn new(
        component_type: impl Into<String>,
        variant_id: impl Into<String>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            component_type: component_type.into(),
            variant_id: variant_id.into(),
            instance_id: instance_id.into(),
        }
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.component_type, self.variant_id, self.instance_id)
    }
}

/// Context object for one tenant
#[derive(Clone)]
pub struct Session {
    tenant: String,
    config: Arc<EngineConfig>,
    registry: Arc<SchemaRegistry>,
    site: Option<Arc<Value>>,
    live: Arc<dyn LiveVariantStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tenant", &self.tenant)
            .field("pending", &self.is_pending())
            .field("live_slots", &self.live.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub(crate) fn new(
        tenant: String,
        config: Arc<EngineConfig>,
        registry: Arc<SchemaRegistry>,
        live: Arc<dyn LiveVariantStore>,
    ) -> Self {
        Self {
            tenant,
            config,
            registry,
            site: None,
            live,
        }
    }

    /// Tenant id
    #[inline]
    #[must_use]
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Whether the tenant's site configuration has not arrived yet
    ///
    /// A pending session resolves with an empty persisted layer.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.site.is_none()
    }

    /// Attach the fetched site configuration
    pub fn attach_site_config(&mut self, site: Arc<Value>) {
        tracing::debug!(tenant = %self.tenant, "site configuration attached");
        self.site = Some(site);
    }

    /// Live variant store used by this session
    #[inline]
    #[must_use]
    pub fn live_store(&self) -> &Arc<dyn LiveVariantStore> {
        &self.live
    }

    /// Look up a registered variant
    ///
    /// # Errors
    /// Returns error if the component type or variant is unknown
    pub fn variant(&self, component: &ComponentRef) -> Result<&RegisteredVariant> {
        if !self.registry.contains(&component.component_type) {
            return Err(CoreError::UnknownComponent {
                component_type: component.component_type.clone(),
            });
        }
        self.registry
            .variant(&component.component_type, &component.variant_id)
            .ok_or_else(|| CoreError::UnknownVariant {
                component_type: component.component_type.clone(),
                variant_id: component.variant_id.clone(),
            })
    }

    /// Locate the instance's persisted data, with shape diagnostics
    #[must_use]
    pub fn locate(&self, component: &ComponentRef) -> Located {
        match &self.site {
            Some(site) => locate_traced(site, &component.component_type, &component.instance_id),
            None => Located {
                data: Value::Object(Map::new()),
                source: None,
                diagnostics: Vec::new(),
            },
        }
    }

    fn layers(&self, component: &ComponentRef, props: Value) -> Result<DataLayers> {
        let variant = self.variant(component)?;
        let persisted = self.locate(component).data;
        let live = self
            .live
            .get(&component.component_type, &component.instance_id);

        Ok(DataLayers::from_default(variant.defaults().clone())
            .with_props(props)
            .with_persisted(persisted)
            .with_live(live))
    }

    fn resolver(&self, component: &ComponentRef) -> Resolver {
        Resolver::with_signature(self.config.signature_for(&component.component_type).clone())
    }

    /// Resolve the merged configuration of an instance
    ///
    /// # Errors
    /// Returns error if the component type or variant is unknown
    pub fn resolve(&self, component: &ComponentRef, props: Value) -> Result<Value> {
        Ok(self.resolve_traced(component, props)?.merged)
    }

    /// Resolve with per-key provenance
    ///
    /// # Errors
    /// Returns error if the component type or variant is unknown
    pub fn resolve_traced(&self, component: &ComponentRef, props: Value) -> Result<Resolution> {
        let layers = self.layers(component, props)?;
        Ok(self.resolver(component).resolve_traced(&layers))
    }

    /// Whether the instance should render at all
    ///
    /// # Errors
    /// Returns error if the component type or variant is unknown
    pub fn is_visible(&self, component: &ComponentRef, props: Value) -> Result<bool> {
        Ok(is_visible(&self.resolve(component, props)?))
    }

    /// Seed the instance's live slot from default, props and persisted data
    ///
    /// Returns `true` if the slot was created by this call. Calling it again,
    /// e.g. on every render, keeps earlier edits.
    ///
    /// # Errors
    /// Returns error if the component type or variant is unknown
    pub fn begin_editing(&self, component: &ComponentRef, props: Value) -> Result<bool> {
        let seed = self.layers(component, props)?.seed();
        let created = self
            .live
            .ensure(&component.component_type, &component.instance_id, seed);
        tracing::debug!(%component, created, "editing started");
        Ok(created)
    }

    /// Apply an editor change to the instance's live slot
    ///
    /// # Errors
    /// Returns error if the component type or variant is unknown
    pub fn apply_edit(&self, component: &ComponentRef, patch: Value) -> Result<()> {
        self.variant(component)?;
        self.live
            .set(&component.component_type, &component.instance_id, patch);
        Ok(())
    }

    /// Editor form for the instance against its current merged data
    ///
    /// # Errors
    /// Returns error if the component type or variant is unknown
    pub fn form(
        &self,
        component: &ComponentRef,
        mode: FormMode,
        props: Value,
    ) -> Result<Vec<FormNode>> {
        let merged = self.resolve(component, props)?;
        let variant = self.variant(component)?;
        Ok(build_form(variant.definition(), mode, &merged))
    }

    /// Drop every live slot of this session
    pub fn end_editing(&self) {
        tracing::debug!(tenant = %self.tenant, slots = self.live.len(), "editing ended");
        self.live.clear();
    }
}
