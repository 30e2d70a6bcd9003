//! # Ledger State
//!
//! The session's cart and discount.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>`: the session loop and the
//! catalog-ready re-render task both read it, and only one command may
//! change it at a time. A poisoned lock is recovered; ledger mutations do
//! not panic halfway.
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger State Operations                              │
//! │                                                                         │
//! │  Session Input          Command                 Ledger Change           │
//! │  ─────────────          ───────                 ─────────────           │
//! │                                                                         │
//! │  add Laptop ──────────► add_to_cart() ────────► add_item(item)         │
//! │                                                                         │
//! │  remove Laptop ───────► remove_from_cart() ───► remove_item(name)      │
//! │                                                                         │
//! │  clear ───────────────► clear_cart() ─────────► clear()                │
//! │                                                                         │
//! │  discount 10% ────────► set_discount() ───────► set_discount(factor)   │
//! │                                                                         │
//! │  cart ────────────────► get_cart() ───────────► (read only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use shop_core::{Cart, CartSnapshot, DiscountFactor, Ledger, LedgerObserver, SubscriptionId};
use tracing::{debug, info};

/// Thread-safe ledger state.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    ledger: Arc<Mutex<Ledger>>,
}

impl LedgerState {
    /// Creates a new empty ledger state.
    pub fn new() -> Self {
        LedgerState::default()
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = ledger_state.with_ledger(|ledger| ledger.snapshot());
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    ///
    /// Observers run while the lock is held, so they must not call back into
    /// this state.
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ledger) -> R,
    {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }

    /// Registers a ledger observer.
    pub fn subscribe(&self, observer: Arc<dyn LedgerObserver>) -> SubscriptionId {
        self.with_ledger_mut(|ledger| ledger.subscribe(observer))
    }

    /// Removes a ledger observer.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.with_ledger_mut(|ledger| ledger.unsubscribe(id))
    }
}

// =============================================================================
// Log Observer
// =============================================================================

/// Writes every ledger change to the log.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LedgerObserver for LogObserver {
    fn cart_changed(&self, cart: &Cart) {
        debug!(items = cart.len(), "Cart changed");
    }

    fn discount_changed(&self, discount: DiscountFactor) {
        debug!(discount = %discount, "Discount changed");
    }

    fn snapshot_changed(&self, snapshot: &CartSnapshot) {
        info!(
            total = %snapshot.total,
            discount = %snapshot.discount_amount,
            final_total = %snapshot.final_total,
            "Totals updated"
        );
    }
}
