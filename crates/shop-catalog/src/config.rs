//! # Catalog Configuration
//!
//! Which source the catalog comes from and how long to wait for it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOP_CATALOG_SOURCE=file                                           │
//! │     SHOP_CATALOG_PATH=./catalog.json                                   │
//! │     SHOP_CATALOG_LATENCY_MS=2500                                       │
//! │     SHOP_CATALOG_TIMEOUT_MS=10000                                      │
//! │                                                                         │
//! │  2. [catalog] table of the shop config file                            │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     seeded source, 2.5 s latency, 10 s timeout                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! source = "seeded"        # seeded | file
//! path = "catalog.json"    # required when source = "file"
//! latency_ms = 2500
//! timeout_ms = 10000       # 0 = wait forever
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::loader::CatalogLoader;
use crate::source::{CatalogSource, JsonFileSource, SeededSource, DEFAULT_LATENCY};

// =============================================================================
// Source Kind
// =============================================================================

/// Which [`CatalogSource`] to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Built-in items after a simulated delay.
    #[default]
    Seeded,

    /// JSON file on disk.
    File,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Seeded => write!(f, "seeded"),
            SourceKind::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "seeded" | "seed" | "demo" => Ok(SourceKind::Seeded),
            "file" | "json" => Ok(SourceKind::File),
            other => Err(CatalogError::InvalidConfig(format!(
                "Unknown catalog source: '{}'. Valid options: seeded, file",
                other
            ))),
        }
    }
}

// =============================================================================
// Catalog Config
// =============================================================================

/// The `[catalog]` section of the shop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Where the items come from.
    #[serde(default)]
    pub source: SourceKind,

    /// JSON file to read when `source = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Simulated latency of the seeded source (milliseconds).
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Load timeout (milliseconds). 0 waits forever.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_latency_ms() -> u64 {
    DEFAULT_LATENCY.as_millis() as u64
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            source: SourceKind::default(),
            path: None,
            latency_ms: default_latency_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CatalogConfig {
    /// Parses a standalone `[catalog]` table body.
    pub fn from_toml(contents: &str) -> CatalogResult<Self> {
        let config: CatalogConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.source == SourceKind::File && self.path.is_none() {
            return Err(CatalogError::InvalidConfig(
                "catalog.path is required when catalog.source = \"file\"".into(),
            ));
        }

        Ok(())
    }

    /// Applies `SHOP_CATALOG_*` overrides. `lookup` is usually
    /// `|key| std::env::var(key).ok()`.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(source) = lookup("SHOP_CATALOG_SOURCE") {
            match source.parse() {
                Ok(kind) => {
                    debug!(source = %source, "Overriding catalog source from environment");
                    self.source = kind;
                }
                Err(e) => warn!(error = %e, "Ignoring SHOP_CATALOG_SOURCE"),
            }
        }

        if let Some(path) = lookup("SHOP_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.path = Some(PathBuf::from(path));
        }

        if let Some(latency) = lookup("SHOP_CATALOG_LATENCY_MS") {
            match latency.parse::<u64>() {
                Ok(ms) => self.latency_ms = ms,
                Err(_) => warn!(value = %latency, "Ignoring SHOP_CATALOG_LATENCY_MS"),
            }
        }

        if let Some(timeout) = lookup("SHOP_CATALOG_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(ms) => self.timeout_ms = ms,
                Err(_) => warn!(value = %timeout, "Ignoring SHOP_CATALOG_TIMEOUT_MS"),
            }
        }
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Load timeout, `None` when configured to wait forever.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Builds the configured source.
    pub fn build_source(&self) -> CatalogResult<Arc<dyn CatalogSource>> {
        self.validate()?;
        let source: Arc<dyn CatalogSource> = match (self.source, &self.path) {
            (SourceKind::Seeded, _) => Arc::new(SeededSource::new(self.latency())),
            (SourceKind::File, Some(path)) => Arc::new(JsonFileSource::new(path.clone())),
            (SourceKind::File, None) => {
                return Err(CatalogError::InvalidConfig("catalog.path is not set".into()))
            }
        };
        Ok(source)
    }

    /// Builds a loader over the configured source with the configured timeout.
    pub fn build_loader(&self) -> CatalogResult<CatalogLoader> {
        Ok(CatalogLoader::new(self.build_source()?).with_timeout(self.timeout()))
    }
}
