//! # shop-core: Pure Business Logic for the Shop
//!
//! This crate holds the cart ledger and everything it computes. It has no
//! I/O dependencies; the only thing that suspends in the system (the catalog
//! fetch) lives in `shop-catalog`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shop Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentational layer (shop-demo)                │   │
//! │  │    Products ──► Cart ──► Discount selector ──► Totals           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove / clear / set_discount    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  ledger   │  │   │
//! │  │   │   Item    │  │   Money   │  │   Cart    │  │  Ledger   │  │   │
//! │  │   │  Catalog  │  │  percent  │  │ Snapshot  │  │ observers │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              shop-catalog (async catalog loader)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Catalog, DiscountFactor)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart membership and the derived [`CartSnapshot`]
//! - [`ledger`] - Cart + discount with change observers
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shop_core::{DiscountFactor, Item, Ledger};
//!
//! let mut ledger = Ledger::new();
//! ledger.add_item(Item::new("Toothbrush", 1000).unwrap());
//! ledger.add_item(Item::new("Laptop", 60000).unwrap());
//! ledger.set_discount(DiscountFactor::TenPercent);
//!
//! let snapshot = ledger.snapshot();
//! assert_eq!(snapshot.total.cents(), 61000);
//! assert_eq!(snapshot.discount_amount.cents(), 6100);
//! assert_eq!(snapshot.final_total.cents(), 54900);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{compute_snapshot, Cart, CartSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{Ledger, LedgerObserver, SubscriptionId};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item name.
pub const MAX_ITEM_NAME_LEN: usize = 100;

/// Maximum price of a single item, in cents ($1,000,000,000.00).
///
/// Keeps cart totals far from `i64` overflow.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;
