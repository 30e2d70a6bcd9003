//! # Catalog State
//!
//! Wraps the catalog loader and the background task running it.

use std::sync::{Arc, Mutex, PoisonError};

use shop_catalog::{CatalogLoader, LoadHandle, LoadState};
use shop_core::Catalog;
use tokio::sync::watch;
use tracing::debug;

use crate::error::ApiError;

/// Catalog loader plus the handle of the in-flight background load.
#[derive(Debug, Clone)]
pub struct CatalogState {
    loader: Arc<CatalogLoader>,
    task: Arc<Mutex<Option<LoadHandle>>>,
}

impl CatalogState {
    pub fn new(loader: CatalogLoader) -> Self {
        CatalogState {
            loader: Arc::new(loader),
            task: Arc::new(Mutex::new(None)),
        }
    }

    /// Starts loading in the background.
    ///
    /// Does nothing if the catalog is already loaded or a load is running.
    /// After a failure this is the retry.
    pub fn start(&self) {
        if self.loader.cached().is_some() {
            return;
        }

        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("Catalog load already running");
            return;
        }
        *task = Some(self.loader.spawn_load());
    }

    /// Aborts the background load, if any.
    pub fn cancel(&self) {
        let task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.as_ref() {
            handle.cancel();
        }
    }

    /// Waits for the catalog, loading it if needed.
    pub async fn load(&self) -> Result<Arc<Catalog>, ApiError> {
        Ok(self.loader.load().await?)
    }

    /// Returns the catalog if it is ready, without waiting.
    pub fn require(&self) -> Result<Arc<Catalog>, ApiError> {
        match self.loader.state() {
            LoadState::Ready(catalog) => Ok(catalog),
            LoadState::Loading => Err(ApiError::catalog_unavailable("Products are still loading")),
            LoadState::Failed(reason) => Err(ApiError::catalog_unavailable(format!(
                "Failed to load products: {}",
                reason
            ))),
            LoadState::Idle => Err(ApiError::catalog_unavailable(
                "Products have not been requested yet",
            )),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.loader.subscribe()
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shop_catalog::SeededSource;
    use std::time::Duration;

    fn seeded_state() -> CatalogState {
        CatalogState::new(CatalogLoader::new(Arc::new(SeededSource::default())))
    }

    #[tokio::test(start_paused = true)]
    async fn test_require_follows_load_state() {
        let state = seeded_state();
        assert_eq!(
            state.require().unwrap_err().code,
            ErrorCode::CatalogUnavailable
        );

        let mut rx = state.subscribe();
        state.start();
        rx.wait_for(|s| s.is_loading()).await.unwrap();
        assert_eq!(
            state.require().unwrap_err().message,
            "Products are still loading"
        );

        rx.wait_for(|s| s.is_ready()).await.unwrap();
        assert_eq!(state.require().unwrap().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_fetches_once() {
        let state = seeded_state();
        state.start();
        state.start();

        state.load().await.unwrap();
        state.start();

        assert_eq!(state.loader().fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_returns_to_idle() {
        let state = seeded_state();
        let mut rx = state.subscribe();

        state.start();
        rx.wait_for(|s| s.is_loading()).await.unwrap();
        state.cancel();
        rx.wait_for(|s| *s == LoadState::Idle).await.unwrap();

        // restart after teardown
        state.start();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(state.load_state().is_ready());
    }
}
