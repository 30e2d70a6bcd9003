//! # Ledger
//!
//! Owns the cart and the discount, and tells observers when either changes.
//!
//! ## Notification Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Notifications                                 │
//! │                                                                         │
//! │  add_item / remove_item / clear                                        │
//! │        │                                                                │
//! │        ├──► observer.cart_changed(&cart)                                │
//! │        └──► observer.snapshot_changed(&snapshot)                        │
//! │                                                                         │
//! │  set_discount                                                           │
//! │        │                                                                │
//! │        ├──► observer.discount_changed(discount)                         │
//! │        └──► observer.snapshot_changed(&snapshot)                        │
//! │                                                                         │
//! │  No-op calls (duplicate add, missing remove, clearing an empty cart,   │
//! │  re-selecting the current discount) notify nobody.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The snapshot handed to observers is computed fresh for every notification
//! and never kept by the ledger.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::cart::{compute_snapshot, Cart, CartSnapshot};
use crate::types::{DiscountFactor, Item};

// =============================================================================
// Observer Trait
// =============================================================================

/// Receives ledger change notifications (implemented by the presentational
/// layer). Every hook defaults to a no-op.
pub trait LedgerObserver: Send + Sync {
    /// Cart membership changed.
    fn cart_changed(&self, _cart: &Cart) {}

    /// The selected discount changed.
    fn discount_changed(&self, _discount: DiscountFactor) {}

    /// Either input of the snapshot changed; `snapshot` is the recomputed value.
    fn snapshot_changed(&self, _snapshot: &CartSnapshot) {}
}

/// Handle returned by [`Ledger::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// =============================================================================
// Ledger
// =============================================================================

/// Cart + discount with change observers.
///
/// ## Usage
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use shop_core::{CartSnapshot, Item, Ledger, LedgerObserver};
///
/// #[derive(Default)]
/// struct LastTotal(Mutex<i64>);
///
/// impl LedgerObserver for LastTotal {
///     fn snapshot_changed(&self, snapshot: &CartSnapshot) {
///         *self.0.lock().unwrap() = snapshot.final_total.cents();
///     }
/// }
///
/// let observer = Arc::new(LastTotal::default());
/// let mut ledger = Ledger::new();
/// ledger.subscribe(observer.clone());
///
/// ledger.add_item(Item::new("Chocolate", 1200).unwrap());
/// assert_eq!(*observer.0.lock().unwrap(), 1200);
/// ```
#[derive(Default)]
pub struct Ledger {
    cart: Cart,
    discount: DiscountFactor,
    observers: Vec<(SubscriptionId, Arc<dyn LedgerObserver>)>,
    next_id: u64,
}

impl Ledger {
    /// Creates an empty ledger with no discount.
    pub fn new() -> Self {
        Ledger::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn discount(&self) -> DiscountFactor {
        self.discount
    }

    /// Computes the current totals. Recomputed on every call.
    pub fn snapshot(&self) -> CartSnapshot {
        compute_snapshot(&self.cart, self.discount)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds an item unless one with the same name is already in the cart.
    ///
    /// Returns `true` if the cart changed.
    pub fn add_item(&mut self, item: Item) -> bool {
        let name = item.name.clone();
        let changed = self.cart.add_item(item);
        debug!(item = %name, changed, "ledger add_item");
        if changed {
            self.notify_cart();
        }
        changed
    }

    /// Removes the item with this name, if present.
    ///
    /// Returns `true` if the cart changed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let changed = self.cart.remove_item(name);
        debug!(item = %name, changed, "ledger remove_item");
        if changed {
            self.notify_cart();
        }
        changed
    }

    /// Empties the cart.
    ///
    /// Returns `true` if anything was removed.
    pub fn clear(&mut self) -> bool {
        let changed = self.cart.clear();
        debug!(changed, "ledger clear");
        if changed {
            self.notify_cart();
        }
        changed
    }

    /// Replaces the discount.
    ///
    /// Returns `true` if the discount changed.
    pub fn set_discount(&mut self, discount: DiscountFactor) -> bool {
        if self.discount == discount {
            return false;
        }
        debug!(from = %self.discount, to = %discount, "ledger set_discount");
        self.discount = discount;

        let snapshot = self.snapshot();
        for (_, observer) in &self.observers {
            observer.discount_changed(discount);
            observer.snapshot_changed(&snapshot);
        }
        true
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers an observer. It is not called for the current state, only for
    /// later changes.
    pub fn subscribe(&mut self, observer: Arc<dyn LedgerObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes an observer. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let initial_len = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != initial_len
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify_cart(&self) {
        let snapshot = self.snapshot();
        for (_, observer) in &self.observers {
            observer.cart_changed(&self.cart);
            observer.snapshot_changed(&snapshot);
        }
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("cart", &self.cart)
            .field("discount", &self.discount)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
