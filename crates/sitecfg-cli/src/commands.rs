//! Subcommand implementations

use anyhow::{bail, Context, Result};
use serde_json::Value;
use sitecfg_core::{ComponentRef, Engine, EngineConfig, JsonFileSource};
use sitecfg_locator::locate_traced;
use sitecfg_schema::SchemaRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load a schema file, YAML by extension and JSON otherwise
pub(crate) fn load_registry(path: &Path) -> Result<SchemaRegistry> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let registry = if is_yaml {
        SchemaRegistry::from_yaml(&text)
    } else {
        SchemaRegistry::from_json(&text)
    };
    registry.with_context(|| format!("loading schema {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parse an inline JSON argument
pub(crate) fn parse_inline(name: &str, text: Option<&str>) -> Result<Value> {
    match text {
        None => Ok(Value::Object(serde_json::Map::new())),
        Some(text) => {
            serde_json::from_str(text).with_context(|| format!("--{name} is not valid JSON"))
        }
    }
}

pub(crate) fn check(schema: &Path) -> Result<String> {
    let registry = load_registry(schema)?;
    let variants: usize = registry
        .component_types()
        .filter_map(|t| registry.variants(t))
        .map(<[_]>::len)
        .sum();
    Ok(format!(
        "{}: {} component type(s), {} variant(s)",
        schema.display(),
        registry.len(),
        variants
    ))
}

pub(crate) fn defaults(schema: &Path, component_type: &str, variant_id: &str) -> Result<Value> {
    let registry = load_registry(schema)?;
    match registry.default_data(component_type, variant_id) {
        Some(defaults) => Ok(defaults.clone()),
        None => bail!("no variant '{variant_id}' for component type '{component_type}'"),
    }
}

pub(crate) fn locate(
    site: &Path,
    component_type: &str,
    instance_id: &str,
    trace: bool,
) -> Result<Value> {
    let site = read_json(site)?;
    let located = locate_traced(&site, component_type, instance_id);
    if trace {
        for diagnostic in &located.diagnostics {
            eprintln!("warning: {diagnostic}");
        }
    }
    Ok(located.data)
}

/// Arguments of the `resolve` subcommand
#[derive(Debug, Clone)]
pub(crate) struct ResolveArgs {
    pub(crate) schema: PathBuf,
    pub(crate) site_dir: PathBuf,
    pub(crate) tenant: String,
    pub(crate) component: ComponentRef,
    pub(crate) props: Value,
    pub(crate) live: Option<Value>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) trace: bool,
}

pub(crate) async fn resolve(args: ResolveArgs) -> Result<Value> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let registry = load_registry(&args.schema)?;
    let engine = Engine::new(config, registry, Arc::new(JsonFileSource::new(&args.site_dir)));

    let session = engine.open_session(&args.tenant).await?;
    if let Some(live) = args.live {
        session.begin_editing(&args.component, args.props.clone())?;
        session.apply_edit(&args.component, live)?;
    }

    if args.trace {
        let resolution = session.resolve_traced(&args.component, args.props)?;
        Ok(serde_json::to_value(resolution)?)
    } else {
        Ok(session.resolve(&args.component, args.props)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SCHEMA: &str = r#"
hero:
  - id: hero1
    name: Hero
    fields:
      - key: visible
        label: Visible
        type: boolean
        defaultValue: true
      - key: content
        label: Content
        type: object
        fields:
          - key: title
            label: Title
            type: text
            defaultValue: Default
"#;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("schema.yaml"), SCHEMA).unwrap();
        std::fs::write(
            dir.path().join("acme.json"),
            json!({"home": {"h": {"type": "hero", "data": {"content": {"title": "Tenant"}}}}})
                .to_string(),
        )
        .unwrap();
        dir
    }

    fn resolve_args(dir: &Path) -> ResolveArgs {
        ResolveArgs {
            schema: dir.join("schema.yaml"),
            site_dir: dir.to_path_buf(),
            tenant: "acme".to_string(),
            component: ComponentRef::new("hero", "hero1", "h"),
            props: json!({}),
            live: None,
            config: None,
            trace: false,
        }
    }

    #[test]
    fn check_reports_counts() {
        let dir = fixture();
        let out = check(&dir.path().join("schema.yaml")).unwrap();
        assert!(out.ends_with("1 component type(s), 1 variant(s)"));
    }

    #[test]
    fn check_rejects_bad_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"hero": [{"id": "a", "name": "A", "fields": [{"key": "x", "type": "slider"}]}]}"#,
        )
        .unwrap();
        assert!(check(&path).is_err());
    }

    #[test]
    fn defaults_for_variant() {
        let dir = fixture();
        let schema = dir.path().join("schema.yaml");
        assert_eq!(
            defaults(&schema, "hero", "hero1").unwrap(),
            json!({"visible": true, "content": {"title": "Default"}})
        );
        assert!(defaults(&schema, "hero", "nope").is_err());
    }

    #[test]
    fn locate_from_file() {
        let dir = fixture();
        let data = locate(&dir.path().join("acme.json"), "hero", "h", false).unwrap();
        assert_eq!(data, json!({"content": {"title": "Tenant"}}));
    }

    #[tokio::test]
    async fn resolve_from_files() {
        let dir = fixture();
        let merged = resolve(resolve_args(dir.path())).await.unwrap();
        assert_eq!(merged, json!({"visible": true, "content": {"title": "Tenant"}}));
    }

    #[tokio::test]
    async fn resolve_with_live_edit_and_trace() {
        let dir = fixture();
        let args = ResolveArgs {
            live: Some(json!({"content": {"title": "Live"}})),
            trace: true,
            ..resolve_args(dir.path())
        };
        let resolution = resolve(args).await.unwrap();
        assert_eq!(resolution["merged"]["content"]["title"], json!("Live"));
        assert_eq!(resolution["origins"]["content"], json!("live"));
        assert_eq!(resolution["pristine"], json!(false));
    }

    #[test]
    fn inline_json() {
        assert_eq!(parse_inline("props", None).unwrap(), json!({}));
        assert_eq!(parse_inline("props", Some(r#"{"a":1}"#)).unwrap(), json!({"a": 1}));
        assert!(parse_inline("props", Some("{")).is_err());
    }
}
