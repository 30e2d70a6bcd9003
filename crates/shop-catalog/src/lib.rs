//! # shop-catalog: Catalog Loader for the Shop
//!
//! Produces the list of purchasable items once per session.
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog Load Flow                              │
//! │                                                                         │
//! │   presentational layer                                                  │
//! │        │ spawn_load() / load()                                          │
//! │        ▼                                                                │
//! │   ┌──────────────────┐  first call   ┌──────────────────┐              │
//! │   │  CatalogLoader   │──────────────►│  CatalogSource   │              │
//! │   │                  │◄──────────────│  seeded | file   │              │
//! │   │  OnceCell cache  │   Vec<Item>   └──────────────────┘              │
//! │   │  LoadState watch │                                                 │
//! │   └────────┬─────────┘                                                 │
//! │            │ Arc<Catalog> (validated, shared by every caller)          │
//! │            ▼                                                            │
//! │   add_item(catalog.require(name)) on the Ledger                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`source`] - The `CatalogSource` trait and its implementations
//! - [`loader`] - Memoized loader with state machine, timeout and cancellation
//! - [`config`] - `[catalog]` configuration
//! - [`error`] - Catalog error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use shop_catalog::{CatalogLoader, SeededSource};
//!
//! # async fn demo() -> shop_catalog::CatalogResult<()> {
//! let loader = CatalogLoader::new(Arc::new(SeededSource::default()));
//! let catalog = loader.load().await?;
//! assert_eq!(catalog.len(), 5);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod source;

pub use config::{CatalogConfig, SourceKind};
pub use error::{CatalogError, CatalogResult};
pub use loader::{CatalogLoader, LoadHandle, LoadState};
pub use source::{seed_items, CatalogSource, JsonFileSource, SeededSource, DEFAULT_LATENCY};
