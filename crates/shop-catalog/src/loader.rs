//! # Catalog Loader
//!
//! Fetches the catalog once per session and hands the same result to every
//! caller after that.
//!
//! ## Load State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LoadState Transitions                            │
//! │                                                                         │
//! │            load()                 source answers                        │
//! │   ┌──────┐ ───────► ┌─────────┐ ──────────────► ┌──────────────────┐   │
//! │   │ Idle │          │ Loading │                 │ Ready(catalog)   │   │
//! │   └──────┘ ◄─────── └─────────┘ ──────┐         └──────────────────┘   │
//! │      ▲    every caller    │           │ error / timeout                 │
//! │      │    gave up         │           ▼                                 │
//! │      │                    │     ┌──────────────────┐                    │
//! │      │                    └─────│ Failed(message)  │                    │
//! │      │              load() again└──────────────────┘                    │
//! │                                                                         │
//! │  Ready is terminal: later load() calls return the cached catalog       │
//! │  without touching the source.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! ```text
//! load() ──┐
//! load() ──┼──► waiters: 3 ──► Flight { fetch task, outcome: watch } ──► source
//! load() ──┘
//! ```
//! The fetch runs on its own task owned by the loader, not inside any one
//! caller. Callers that arrive while it is in flight wait on its outcome.
//! Dropping a caller only aborts the fetch when it was the last one waiting.
//! A failed fetch is reported to everyone waiting on it; the next `load()`
//! starts a new one.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use shop_core::Catalog;
use tokio::sync::{watch, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::source::CatalogSource;

type Outcome = Option<CatalogResult<Arc<Catalog>>>;

// =============================================================================
// Load State
// =============================================================================

/// What the presentational layer renders while the catalog is on its way.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Nobody has asked for the catalog yet (or every caller gave up).
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The catalog is available.
    Ready(Arc<Catalog>),
    /// The last fetch failed; `load()` again to retry.
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The catalog, if loaded.
    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        match self {
            LoadState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }
}

// =============================================================================
// Catalog Loader
// =============================================================================

/// Memoizing, single-flight catalog loader.
pub struct CatalogLoader {
    shared: Arc<Shared>,
    timeout: Option<Duration>,
    flight: Mutex<InFlight>,
}

/// The parts a fetch task needs after the caller that started it is gone.
struct Shared {
    source: Arc<dyn CatalogSource>,
    catalog: OnceCell<Arc<Catalog>>,
    state: watch::Sender<LoadState>,
    fetches: AtomicUsize,
}

/// One fetch from the source and where its result is published.
struct Flight {
    task: JoinHandle<()>,
    outcome: watch::Receiver<Outcome>,
}

impl Flight {
    /// A caller can wait on this flight unless it already failed or was
    /// aborted.
    fn is_joinable(&self) -> bool {
        match &*self.outcome.borrow() {
            None => !self.task.is_finished(),
            Some(result) => result.is_ok(),
        }
    }
}

#[derive(Default)]
struct InFlight {
    current: Option<Flight>,
    waiters: usize,
}

impl CatalogLoader {
    /// Creates a loader over `source` with no timeout.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        CatalogLoader {
            shared: Arc::new(Shared {
                source,
                catalog: OnceCell::new(),
                state,
                fetches: AtomicUsize::new(0),
            }),
            timeout: None,
            flight: Mutex::new(InFlight::default()),
        }
    }

    /// Fails a fetch with [`CatalogError::Timeout`] after `timeout`.
    /// `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the catalog, fetching it on first use.
    ///
    /// ## Behavior
    /// - Already loaded: returns the cached catalog immediately
    /// - Fetch in flight: waits for it (no second fetch)
    /// - Otherwise: starts a fetch, validates, caches
    pub async fn load(&self) -> CatalogResult<Arc<Catalog>> {
        if let Some(catalog) = self.cached() {
            return Ok(catalog);
        }

        let (mut outcome, _waiter) = self.join_or_start();
        let result = match outcome.wait_for(Option::is_some).await {
            Ok(done) => done.clone().unwrap_or(Err(CatalogError::Cancelled)),
            // Fetch task aborted before it answered
            Err(_) => Err(CatalogError::Cancelled),
        };
        result
    }

    /// Runs [`load`](Self::load) on a background task.
    ///
    /// ## Usage
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use shop_catalog::{CatalogLoader, SeededSource};
    /// # async fn demo() {
    /// let loader = Arc::new(CatalogLoader::new(Arc::new(SeededSource::default())));
    /// let handle = loader.spawn_load();
    ///
    /// // view torn down before the catalog arrived
    /// handle.cancel();
    /// # }
    /// ```
    pub fn spawn_load(self: &Arc<Self>) -> LoadHandle {
        let loader = Arc::clone(self);
        LoadHandle {
            task: tokio::spawn(async move { loader.load().await }),
        }
    }

    /// Current state.
    pub fn state(&self) -> LoadState {
        self.shared.state.borrow().clone()
    }

    /// Watches state transitions.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.shared.state.subscribe()
    }

    /// The catalog if it has already been loaded. Never triggers a fetch.
    pub fn cached(&self) -> Option<Arc<Catalog>> {
        self.shared.catalog.get().cloned()
    }

    /// Number of fetches started against the source.
    pub fn fetch_count(&self) -> usize {
        self.shared.fetches.load(Ordering::SeqCst)
    }

    pub fn source_name(&self) -> &str {
        self.shared.source.name()
    }

    fn lock_flight(&self) -> MutexGuard<'_, InFlight> {
        self.flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers the caller as a waiter on the current flight, starting one
    /// if there is nothing to wait on.
    fn join_or_start(&self) -> (watch::Receiver<Outcome>, Waiter<'_>) {
        let mut flight = self.lock_flight();
        flight.waiters += 1;

        let joined = flight
            .current
            .as_ref()
            .filter(|current| current.is_joinable())
            .map(|current| current.outcome.clone());

        let outcome = match joined {
            Some(outcome) => outcome,
            None => {
                let started = self.start_fetch();
                let outcome = started.outcome.clone();
                flight.current = Some(started);
                outcome
            }
        };

        (outcome, Waiter { loader: self })
    }

    fn start_fetch(&self) -> Flight {
        let (tx, outcome) = watch::channel(None);
        let attempt = self.shared.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.state.send_replace(LoadState::Loading);

        let shared = Arc::clone(&self.shared);
        let timeout = self.timeout;
        let task = tokio::spawn(async move {
            let result = shared.fetch(attempt, timeout).await;
            tx.send_replace(Some(result));
        });

        Flight { task, outcome }
    }
}

impl Shared {
    async fn fetch(&self, attempt: usize, timeout: Option<Duration>) -> CatalogResult<Arc<Catalog>> {
        info!(source = self.source.name(), attempt, "Loading catalog");

        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, self.source.fetch()).await {
                Ok(result) => result,
                Err(_) => Err(CatalogError::Timeout(limit.as_millis() as u64)),
            },
            None => self.source.fetch().await,
        };

        let result = result.and_then(|items| {
            Catalog::new(self.source.name(), items, Utc::now()).map_err(CatalogError::from)
        });

        match result {
            Ok(catalog) => {
                info!(items = catalog.len(), "Catalog loaded");
                let catalog = Arc::new(catalog);
                let _ = self.catalog.set(Arc::clone(&catalog));
                self.state.send_replace(LoadState::Ready(Arc::clone(&catalog)));
                Ok(catalog)
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Catalog load failed");
                self.state.send_replace(LoadState::Failed(e.to_string()));
                Err(e)
            }
        }
    }
}

impl fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("source", &self.source_name())
            .field("timeout", &self.timeout)
            .field("state", &*self.shared.state.borrow())
            .field("fetches", &self.fetch_count())
            .finish()
    }
}

/// A caller waiting in `load()`. When the last one goes away before the
/// fetch answered, the fetch is aborted and the state goes back to `Idle`.
struct Waiter<'a> {
    loader: &'a CatalogLoader,
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        let mut flight = self.loader.lock_flight();
        flight.waiters -= 1;
        if flight.waiters > 0 {
            return;
        }

        let abandoned = flight
            .current
            .as_ref()
            .is_some_and(|current| current.outcome.borrow().is_none());
        if !abandoned {
            return;
        }

        if let Some(current) = flight.current.take() {
            current.task.abort();
        }
        self.loader.shared.state.send_if_modified(|state| {
            if state.is_loading() {
                debug!("Catalog load abandoned");
                *state = LoadState::Idle;
                true
            } else {
                false
            }
        });
    }
}

// =============================================================================
// Load Handle
// =============================================================================

/// Handle to a background load started with [`CatalogLoader::spawn_load`].
#[derive(Debug)]
pub struct LoadHandle {
    task: JoinHandle<CatalogResult<Arc<Catalog>>>,
}

impl LoadHandle {
    /// Stops waiting for the catalog. The fetch itself is aborted and the
    /// loader returns to `Idle` unless another caller is still waiting on it.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the load to finish.
    pub async fn wait(self) -> CatalogResult<Arc<Catalog>> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(CatalogError::Cancelled),
            Err(e) => Err(CatalogError::SourceUnavailable(format!(
                "catalog load task failed: {}",
                e
            ))),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
