//! # State Module
//!
//! Application state for the terminal session.
//!
//! One focused state type per concern; each command takes only the state it
//! needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │ LedgerState  │  │   CatalogState   │  │   ConfigState    │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Arc<Mutex<  │  │  Arc<Catalog     │  │  [store]         │          │
//! │  │    Ledger    │  │    Loader>       │  │  [catalog]       │          │
//! │  │  >>          │  │  + load task     │  │                  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • LedgerState: Arc<Mutex<T>> for exclusive access                     │
//! │  • CatalogState: loader is internally synchronized                     │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod ledger;

pub use catalog::CatalogState;
pub use config::{ConfigState, StoreSettings};
pub use ledger::{LedgerState, LogObserver};
