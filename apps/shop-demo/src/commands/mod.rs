//! # Commands Module
//!
//! Every action the front end can take, as plain functions.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product listing, load status, reload
//! ├── cart.rs      ◄─── Cart manipulation
//! └── discount.rs  ◄─── Discount selector
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Terminal session                                                       │
//! │  ────────────────                                                       │
//! │  > add Laptop                                                           │
//! │         │                                                               │
//! │         │ (Session parses the line)                                     │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      catalog: &CatalogState,  ◄── only the state it needs              │
//! │      ledger: &LedgerState,                                              │
//! │      name: &str,                                                        │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  View re-rendered, or "Error: <message>"                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Responses serialize to camelCase JSON so a browser front end can call the
//! same functions through a thin IPC layer.

pub mod cart;
pub mod catalog;
pub mod discount;

pub use cart::{add_to_cart, clear_cart, get_cart, remove_from_cart, CartResponse};
pub use catalog::{catalog_status, reload_products, CatalogStatus};
pub use discount::{list_discounts, set_discount, DiscountOption};
