//! # Catalog Sources
//!
//! Where catalog items come from.
//!
//! ## Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Sources                                 │
//! │                                                                         │
//! │  SeededSource                      JsonFileSource                       │
//! │  ────────────                      ──────────────                       │
//! │  • Five built-in items             • JSON array on disk                 │
//! │  • Resolves after a fixed          • [{"name": .., "price_cents": ..}]  │
//! │    simulated network latency       • Read asynchronously                │
//! │    (2.5 s by default)                                                   │
//! │                                                                         │
//! │  Both resolve exactly once per fetch() to the full ordered list.       │
//! │  No streaming, no partial results.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use shop_core::{CoreError, Item};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Default simulated network latency of the seeded source.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2500);

/// Items offered by [`SeededSource`], in catalog order (name, price in cents).
pub const SEED_ITEMS: &[(&str, i64)] = &[
    ("Toothbrush", 1000),
    ("Smart TV", 80000),
    ("Laptop", 60000),
    ("Chocolate", 1200),
    ("Apple juice", 500),
];

/// Returns the seeded items as [`Item`]s.
pub fn seed_items() -> Vec<Item> {
    SEED_ITEMS
        .iter()
        .map(|(name, price_cents)| Item {
            name: name.to_string(),
            price_cents: *price_cents,
        })
        .collect()
}

// =============================================================================
// Source Trait
// =============================================================================

/// A backing store the loader can fetch the catalog from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name for logs and the loaded catalog's `source` field.
    fn name(&self) -> &str;

    /// Fetches the full, ordered item list.
    async fn fetch(&self) -> CatalogResult<Vec<Item>>;
}

// =============================================================================
// Seeded Source
// =============================================================================

/// Placeholder source: fixed items after a fixed delay.
#[derive(Debug, Clone)]
pub struct SeededSource {
    items: Vec<Item>,
    latency: Duration,
}

impl SeededSource {
    /// The five seeded items after `latency`.
    pub fn new(latency: Duration) -> Self {
        Self::with_items(seed_items(), latency)
    }

    /// Custom items after `latency`.
    pub fn with_items(items: Vec<Item>, latency: Duration) -> Self {
        SeededSource { items, latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SeededSource {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl CatalogSource for SeededSource {
    fn name(&self) -> &str {
        "seeded"
    }

    async fn fetch(&self) -> CatalogResult<Vec<Item>> {
        debug!(latency_ms = self.latency.as_millis() as u64, "Simulating catalog fetch");
        tokio::time::sleep(self.latency).await;
        Ok(self.items.clone())
    }
}

// =============================================================================
// JSON File Source
// =============================================================================

/// Reads the catalog from a JSON file.
///
/// ## File Format
/// ```json
/// [
///   { "name": "Toothbrush", "price_cents": 1000 },
///   { "name": "Laptop", "price_cents": 60000 }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonFileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> CatalogResult<Vec<Item>> {
        debug!(path = ?self.path, "Reading catalog file");
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            CatalogError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let raw: Vec<Item> = serde_json::from_slice(&bytes)?;

        // Same normalization as items built in code (trimmed names)
        raw.into_iter()
            .map(|item| {
                Item::new(item.name, item.price_cents)
                    .map_err(|e| CatalogError::InvalidCatalog(CoreError::from(e)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::time::Instant;

    #[test]
    fn test_seed_items_order() {
        let names: Vec<String> = seed_items().into_iter().map(|i| i.name).collect();
        assert_eq!(
            names,
            vec!["Toothbrush", "Smart TV", "Laptop", "Chocolate", "Apple juice"]
        );
        assert!(seed_items()
            .iter()
            .all(|i| shop_core::validation::validate_item(i).is_ok()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_source_waits_for_latency() {
        let source = SeededSource::default();
        let start = Instant::now();

        let items = source.fetch().await.unwrap();

        assert!(start.elapsed() >= DEFAULT_LATENCY);
        assert_eq!(items, seed_items());
    }

    #[tokio::test]
    async fn test_json_file_source_reads_items() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Gum", "price_cents": 99}}, {{"name": "Mint", "price_cents": 150}}]"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let items = source.fetch().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Gum");
        assert_eq!(items[1].price_cents, 150);
    }

    #[tokio::test]
    async fn test_json_file_source_trims_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": " Laptop ", "price_cents": 60000}}, {{"name": "  ", "price_cents": 1}}]"#
        )
        .unwrap();

        let err = JsonFileSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCatalog(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": " Laptop ", "price_cents": 60000}}]"#).unwrap();

        let items = JsonFileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(items[0].name, "Laptop");
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_json_file_source_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "not a list"}}"#).unwrap();

        let err = JsonFileSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }
}
