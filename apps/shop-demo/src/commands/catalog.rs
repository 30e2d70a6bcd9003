//! # Catalog Commands
//!
//! Product listing and load status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shop_catalog::LoadState;
use tracing::debug;

use crate::state::CatalogState;

/// Load status as seen by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatus {
    /// `idle`, `loading`, `ready` or `failed`
    pub state: String,
    pub source: String,
    pub item_count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    /// Times the source has been asked for items this session
    pub fetch_count: usize,
}

/// Starts the catalog load again after a failure or cancellation.
pub fn reload_products(catalog: &CatalogState) -> CatalogStatus {
    debug!("reload_products command");
    catalog.start();
    catalog_status(catalog)
}

/// Reports where the catalog load stands.
pub fn catalog_status(catalog: &CatalogState) -> CatalogStatus {
    let loader = catalog.loader();
    let base = CatalogStatus {
        state: String::new(),
        source: loader.source_name().to_string(),
        item_count: 0,
        loaded_at: None,
        error: None,
        fetch_count: loader.fetch_count(),
    };

    match catalog.load_state() {
        LoadState::Idle => CatalogStatus {
            state: "idle".into(),
            ..base
        },
        LoadState::Loading => CatalogStatus {
            state: "loading".into(),
            ..base
        },
        LoadState::Ready(loaded) => CatalogStatus {
            state: "ready".into(),
            item_count: loaded.len(),
            loaded_at: Some(loaded.loaded_at()),
            ..base
        },
        LoadState::Failed(reason) => CatalogStatus {
            state: "failed".into(),
            error: Some(reason),
            ..base
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shop_catalog::{CatalogLoader, SeededSource};
    use std::sync::Arc;
    use std::time::Duration;

    fn state_with_latency(latency: Duration) -> CatalogState {
        CatalogState::new(CatalogLoader::new(Arc::new(SeededSource::new(latency))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_follows_load() {
        let catalog = state_with_latency(Duration::from_millis(2500));
        assert_eq!(catalog_status(&catalog).state, "idle");

        catalog.load().await.unwrap();

        let status = catalog_status(&catalog);
        assert_eq!(status.state, "ready");
        assert_eq!(status.item_count, 5);
        assert_eq!(status.source, "seeded");
        assert_eq!(status.fetch_count, 1);
        assert!(status.loaded_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_status_then_reload() {
        let loader = CatalogLoader::new(Arc::new(SeededSource::new(Duration::from_secs(5))))
            .with_timeout(Some(Duration::from_secs(1)));
        let catalog = CatalogState::new(loader);

        let err = catalog.load().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);

        let status = catalog_status(&catalog);
        assert_eq!(status.state, "failed");
        assert!(status.error.unwrap().contains("timed out"));

        let status = reload_products(&catalog);
        assert_eq!(status.fetch_count, 1);
        tokio::task::yield_now().await;
        assert_eq!(catalog_status(&catalog).state, "loading");
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let catalog = state_with_latency(Duration::ZERO);
        let json = serde_json::to_value(catalog_status(&catalog)).unwrap();
        assert_eq!(json["itemCount"], 0);
        assert_eq!(json["fetchCount"], 0);
        assert!(json["loadedAt"].is_null());
    }
}
