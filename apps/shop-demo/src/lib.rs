//! # Shop Demo Library
//!
//! Terminal front end for the shop cart: the presentational layer that
//! drives `shop-core` and `shop-catalog`.
//!
//! ## Module Organization
//! ```text
//! shop_demo_lib/
//! ├── lib.rs          ◄─── You are here (startup & session loop)
//! ├── session.rs      ◄─── Line parsing and dispatch
//! ├── view.rs         ◄─── Text rendering
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── ledger.rs   ◄─── Cart + discount (Arc<Mutex<Ledger>>)
//! │   ├── catalog.rs  ◄─── Catalog loader and background load task
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Products, status, reload
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   └── discount.rs ◄─── Discount selector
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod session;
pub mod state;
pub mod view;

use std::sync::Arc;

use shop_catalog::LoadState;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use session::{Reply, Session};
use state::{CatalogState, ConfigState, LedgerState, LogObserver};

/// Runs the terminal session until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,shop=debug; override with RUST_LOG                  │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → shop.toml (or $SHOP_CONFIG) → SHOP_* env vars          │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CatalogState: loader built from [catalog]                         │
/// │     • LedgerState: empty cart, no discount, log observer                │
/// │                                                                         │
/// │  4. Start Catalog Load ───────────────────────────────────────────────► │
/// │     • background task; view shows "Loading products..."                 │
/// │     • view re-rendered when the load settles                            │
/// │                                                                         │
/// │  5. Read Commands From stdin ─────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting shop demo");

    let config = ConfigState::load_or_default(None);
    let catalog = CatalogState::new(config.catalog.build_loader()?);
    let ledger = LedgerState::new();
    ledger.subscribe(Arc::new(LogObserver));

    info!(
        store = %config.store.name,
        source = catalog.loader().source_name(),
        "State initialized"
    );

    let session = Arc::new(Session::new(config, catalog, ledger));
    println!("{}", session.config().store.name);

    // Subscribe first so a load that settles immediately is still seen
    let catalog_rx = session.catalog().subscribe();
    session.catalog().start();
    println!("{}", session.render());

    let watcher = tokio::spawn(rerender_on_catalog_change(Arc::clone(&session), catalog_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match session.handle_line(&line) {
            Reply::Output(text) => println!("{}", text),
            Reply::Quit => break,
        }
    }

    // View torn down: abandon a load still in flight
    session.catalog().cancel();
    watcher.abort();

    info!("Session ended");
    Ok(())
}

/// Prints the view again whenever the catalog load finishes or fails.
async fn rerender_on_catalog_change(session: Arc<Session>, mut rx: watch::Receiver<LoadState>) {
    while next_settled(&mut rx).await.is_some() {
        debug!("Catalog state settled, re-rendering");
        println!("{}", session.render());
    }
}

/// Waits for the next change that leaves `Loading`. `None` once the loader
/// is gone.
async fn next_settled(rx: &mut watch::Receiver<LoadState>) -> Option<LoadState> {
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if !state.is_loading() {
            return Some(state);
        }
    }
    None
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shop=trace` - Show trace for shop crates only
/// - Default: `info,shop=debug`
///
/// Logs go to stderr so stdout carries only the rendered view.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shop=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_catalog::{CatalogLoader, SeededSource};
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_instant_load_is_seen_when_subscribed_before_start() {
        let source = SeededSource::new(Duration::ZERO);
        let catalog = CatalogState::new(CatalogLoader::new(Arc::new(source)));

        let mut rx = catalog.subscribe();
        catalog.start();
        // Let the load settle before anyone waits on the receiver
        catalog.load().await.unwrap();

        let settled = tokio::time::timeout(Duration::from_secs(5), next_settled(&mut rx))
            .await
            .unwrap();
        assert!(matches!(settled, Some(LoadState::Ready(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_settled_skips_loading() {
        let catalog = CatalogState::new(CatalogLoader::new(Arc::new(SeededSource::default())));

        let mut rx = catalog.subscribe();
        catalog.start();

        let settled = next_settled(&mut rx).await;
        assert!(matches!(settled, Some(LoadState::Ready(ref c)) if c.len() == 5));
    }
}
