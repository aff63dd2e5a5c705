//! ds-config
//!
//! Layered YAML configuration for the `ds` tool.
//!
//! Documents are merged in order (later layers override earlier ones, maps
//! merge key by key), deserialised into [`AppConfig`], and finally patched
//! from the environment (`DS_API_BASE`, `DS_DATA_DIR`). Keys nothing reads are
//! reported by [`report_unused_keys`].

mod unused;

pub use unused::{report_unused_keys, UnusedKeyPolicy, UnusedKeyReport, CONSUMED_POINTERS};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const ENV_API_BASE: &str = "DS_API_BASE";
pub const ENV_DATA_DIR: &str = "DS_DATA_DIR";

/// Used when neither a layer nor the environment names a data directory.
pub const DEFAULT_DATA_DIR: &str = ".dailysunnah";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub paging: PagingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: ds_schemas::DEFAULT_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: ds_schemas::DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Apply `DS_API_BASE` / `DS_DATA_DIR` as reported by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            info!(var = ENV_API_BASE, "api base url overridden from env");
            self.api.base_url = v.trim().to_string();
        }
        if let Some(v) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            info!(var = ENV_DATA_DIR, "data dir overridden from env");
            self.storage.data_dir = PathBuf::from(v);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.paging.page_size == 0 {
            bail!("CONFIG_INVALID: paging.page_size must be at least 1");
        }
        if self.api.base_url.trim().is_empty() {
            bail!("CONFIG_INVALID: api.base_url must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged layers, before defaults and env overrides.
    pub config_json: Value,
    pub config: AppConfig,
}

/// Read each file in `paths` and merge them as layers, first to last.
pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for path in paths {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config layer {path}"))?;
        let layer = parse_layer(&raw).with_context(|| format!("config layer {path}"))?;
        merge_layer(&mut merged, layer);
    }
    finish(merged)
}

/// [`load_layered_yaml`] over in-memory documents.
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let layer = parse_layer(raw).with_context(|| format!("config layer #{i}"))?;
        merge_layer(&mut merged, layer);
    }
    finish(merged)
}

/// Layers from `paths`, then the process environment.
pub fn load_effective(paths: &[&str]) -> Result<LoadedConfig> {
    let mut loaded = load_layered_yaml(paths)?;
    loaded
        .config
        .apply_env_overrides(|k| std::env::var(k).ok());
    loaded.config.validate()?;
    Ok(loaded)
}

fn parse_layer(raw: &str) -> Result<Value> {
    let doc: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
    serde_json::to_value(doc).context("yaml value has no json form")
}

/// Overlay `layer` onto `base`: maps merge per key, anything else replaces.
/// An empty document (null) leaves `base` alone.
fn merge_layer(base: &mut Value, layer: Value) {
    match (base, layer) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, value) in layer_map {
                match base_map.get_mut(&key) {
                    Some(slot) if value.is_object() => merge_layer(slot, value),
                    _ => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, other) => *slot = other,
    }
}

fn finish(merged: Value) -> Result<LoadedConfig> {
    let config: AppConfig =
        serde_json::from_value(merged.clone()).context("config does not match AppConfig")?;
    config.validate()?;
    Ok(LoadedConfig {
        config_json: merged,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_layers_gives_defaults() {
        let loaded = load_layered_yaml_from_strings(&[]).unwrap();
        assert_eq!(loaded.config, AppConfig::default());
        assert_eq!(loaded.config.paging.page_size, 20);
    }

    #[test]
    fn merge_overrides_leaves_and_keeps_siblings() {
        let mut base = json!({"api": {"base_url": "a"}, "paging": {"page_size": 5}});
        merge_layer(&mut base, json!({"api": {"base_url": "b"}}));
        assert_eq!(
            base,
            json!({"api": {"base_url": "b"}, "paging": {"page_size": 5}})
        );
    }

    #[test]
    fn null_layer_is_ignored_and_scalar_replaces_map() {
        let mut base = json!({"paging": {"page_size": 5}});
        merge_layer(&mut base, Value::Null);
        assert_eq!(base, json!({"paging": {"page_size": 5}}));
        merge_layer(&mut base, json!({"paging": 3}));
        assert_eq!(base, json!({"paging": 3}));
    }

    #[test]
    fn env_overrides_ignore_blank_values() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| match k {
            ENV_API_BASE => Some("  ".to_string()),
            ENV_DATA_DIR => Some("/tmp/ds".to_string()),
            _ => None,
        });
        assert_eq!(cfg.api.base_url, ds_schemas::DEFAULT_API_BASE);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("/tmp/ds"));
    }

    #[test]
    fn zero_page_size_rejected() {
        let err = load_layered_yaml_from_strings(&["paging:\n  page_size: 0\n"]).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }
}
