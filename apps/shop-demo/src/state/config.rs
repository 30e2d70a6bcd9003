//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOP_*`)
//! 2. Config file (`shop.toml`, or the file named by `SHOP_CONFIG`)
//! 3. Defaults (this file)
//!
//! ## Default File Location
//! - **Linux**: `~/.config/demo/shop.toml`
//! - **macOS**: `~/Library/Application Support/com.shop.demo/shop.toml`
//! - **Windows**: `%APPDATA%\shop\demo\config\shop.toml`
//!
//! Configuration is read-only after startup, so no mutex.

use serde::{Deserialize, Serialize};
use shop_catalog::{CatalogConfig, CatalogError, CatalogResult};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Store presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Store name (printed above the view)
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency symbol (for display)
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Demo Shop".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Application configuration.
///
/// ## Example Config File
/// ```toml
/// [store]
/// name = "Demo Shop"
/// currency_symbol = "$"
///
/// [catalog]
/// source = "seeded"
/// latency_ms = 2500
/// timeout_ms = 10000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigState {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load shop config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> CatalogResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| lookup("SHOP_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading shop config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides_from(&lookup);
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CatalogResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CatalogError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Shop config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(CatalogError::InvalidConfig("store.name must not be empty".into()));
        }

        self.catalog.validate()
    }

    fn apply_overrides_from(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("SHOP_STORE_NAME") {
            debug!(name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        self.catalog.apply_overrides_from(lookup);
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shop", "demo")
            .map(|dirs| dirs.config_dir().join("shop.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_catalog::SourceKind;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ConfigState::default();
        assert_eq!(config.store.name, "Demo Shop");
        assert_eq!(config.store.currency_symbol, "$");
        assert_eq!(config.catalog.source, SourceKind::Seeded);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::load_with(Some(dir.path().join("nope.toml")), env(&[])).unwrap();
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(
            &path,
            r#"
            [store]
            name = "Corner Store"

            [catalog]
            latency_ms = 100
            "#,
        )
        .unwrap();

        let config = ConfigState::load_with(
            Some(path),
            env(&[("SHOP_CATALOG_TIMEOUT_MS", "0")]),
        )
        .unwrap();

        assert_eq!(config.store.name, "Corner Store");
        assert_eq!(config.catalog.latency_ms, 100);
        assert_eq!(config.catalog.timeout(), None);
    }

    #[test]
    fn test_shop_config_env_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[store]\nname = \"From Env Path\"\n").unwrap();

        let config = ConfigState::load_with(
            None,
            env(&[("SHOP_CONFIG", path.to_str().unwrap())]),
        )
        .unwrap();

        assert_eq!(config.store.name, "From Env Path");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(&path, "[catalog]\nsource = \"file\"\n").unwrap();

        let err = ConfigState::load_with(Some(path), env(&[])).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_env_store_name_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::load_with(
            Some(dir.path().join("none.toml")),
            env(&[("SHOP_STORE_NAME", "Night Market")]),
        )
        .unwrap();
        assert_eq!(config.store.name, "Night Market");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("shop.toml");

        let mut config = ConfigState::default();
        config.store.name = "Saved Shop".into();
        config.save(Some(path.clone())).unwrap();

        let loaded = ConfigState::load_with(Some(path), env(&[])).unwrap();
        assert_eq!(loaded, config);
    }
}
