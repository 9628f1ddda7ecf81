//! Testing utilities for the sitecfg workspace
//!
//! Shared fixtures and an in-memory tenant source.

#![allow(missing_docs)]

use async_trait::async_trait;
use serde_json::{json, Value};
use sitecfg_core::{Engine, EngineConfig, FetchError, TenantDataSource};
use sitecfg_schema::SchemaRegistry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const HERO_SCHEMA: &str = r#"{
  "hero": [
    {
      "id": "hero1",
      "name": "Classic hero",
      "fields": [
        {"key": "visible", "label": "Visible", "type": "boolean", "defaultValue": true},
        {"key": "content", "label": "Content", "type": "object", "fields": [
          {"key": "title", "label": "Title", "type": "text", "defaultValue": "Default"},
          {"key": "subtitle", "label": "Subtitle", "type": "textarea"}
        ]},
        {"key": "showCta", "label": "Show button", "type": "boolean", "defaultValue": false},
        {"key": "ctaLabel", "label": "Button label", "type": "text",
         "condition": {"field": "showCta", "value": true}},
        {"key": "slides", "label": "Slides", "type": "array", "maxItems": 5,
         "addLabel": "Add slide", "itemLabel": "Slide", "of": [
          {"key": "image", "label": "Image", "type": "image"},
          {"key": "caption", "label": "Caption", "type": "text"}
        ]}
      ],
      "simpleFields": [
        {"key": "content", "label": "Content", "type": "object", "fields": [
          {"key": "title", "label": "Title", "type": "text"}
        ]}
      ]
    }
  ],
  "map": [
    {
      "id": "map1",
      "name": "Map",
      "fields": [
        {"key": "title", "label": "Title", "type": "text", "defaultValue": "Find us"},
        {"key": "zoom", "label": "Zoom", "type": "number", "defaultValue": 12},
        {"key": "style", "label": "Style", "type": "select", "defaultValue": "road",
         "options": ["road", {"value": "satellite", "label": "Satellite"}]}
      ]
    }
  ]
}"#;

pub fn hero_registry() -> SchemaRegistry {
    SchemaRegistry::from_json(HERO_SCHEMA).unwrap()
}

/// Config with `title` as the map signature
pub fn test_config() -> EngineConfig {
    EngineConfig::new().with_signature("map", "title".parse().unwrap())
}

/// Site with a keyed home page and an ordered about page
pub fn acme_site() -> Value {
    json!({
        "home": {
            "home-hero": {
                "type": "hero",
                "data": {"content": {"title": "Tenant Title"}}
            }
        },
        "about": [
            {"type": "map", "id": "office-map", "data": {"zoom": 15}},
            {"type": "hero", "id": "about-hero", "data": {"visible": false}}
        ]
    })
}

/// Site whose records sit under unrelated keys and rely on `id`
pub fn keyed_by_id_site() -> Value {
    json!({
        "home": {
            "slot-1": {"type": "hero", "id": "home-hero", "data": {"content": {"title": "By id"}}}
        }
    })
}

/// In-memory tenant source counting its fetches
#[derive(Debug, Default)]
pub struct StaticSource {
    sites: HashMap<String, Value>,
    fetches: AtomicUsize,
    delay: Option<Duration>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(mut self, tenant: impl Into<String>, site: Value) -> Self {
        self.sites.insert(tenant.into(), site);
        self
    }

    /// Sleep this long inside every fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenantDataSource for StaticSource {
    async fn fetch(&self, tenant: &str) -> Result<Value, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.sites.get(tenant).cloned().ok_or_else(|| FetchError::NotFound {
            tenant: tenant.to_string(),
        })
    }
}

/// Engine over [`hero_registry`] serving `acme` from [`acme_site`]
pub fn acme_engine() -> (Engine, Arc<StaticSource>) {
    let source = Arc::new(StaticSource::new().with_site("acme", acme_site()));
    let engine = Engine::new(
        test_config(),
        hero_registry(),
        Arc::clone(&source) as Arc<dyn TenantDataSource>,
    );
    (engine, source)
}
