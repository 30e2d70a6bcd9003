//! # Cart
//!
//! Cart membership and the totals derived from it.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation              Effect                       Returns           │
//! │  ─────────              ──────                       ───────           │
//! │  add_item(item)         push if name not present     changed?          │
//! │  remove_item(name)      drop entry with that name    changed?          │
//! │  clear()                drop everything              changed?          │
//! │                                                                         │
//! │  compute_snapshot(cart, discount) ──► CartSnapshot (never stored)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DiscountFactor, Item};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `name` (adding the same name again is a no-op)
/// - Insertion order is kept for display
/// - No capacity limit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<Item>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds an item unless one with the same name is already present.
    ///
    /// Returns `true` if the cart changed.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.contains(&item.name) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes the item with this name, if present.
    ///
    /// Returns `true` if the cart changed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.name != name);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    ///
    /// Returns `true` if anything was removed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.name == name)
    }

    /// Items in the order they were added.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the prices of every item.
    pub fn total(&self) -> Money {
        self.items.iter().map(Item::price).sum()
    }
}

/// Totals derived from a cart and a discount.
///
/// Read-only. To change the totals, change the cart or the discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    /// Sum of item prices.
    pub total: Money,

    /// `total × discount`, rounded to the cent.
    pub discount_amount: Money,

    /// `total - discount_amount`.
    pub final_total: Money,

    /// The discount the amounts were computed with.
    pub discount: DiscountFactor,

    /// Number of items in the cart.
    pub item_count: usize,
}

/// Computes the totals for `cart` under `discount`.
///
/// ## Example
/// ```rust
/// use shop_core::{compute_snapshot, Cart, DiscountFactor, Item};
///
/// let mut cart = Cart::new();
/// cart.add_item(Item::new("Toothbrush", 1000).unwrap());
/// cart.add_item(Item::new("Laptop", 60000).unwrap());
///
/// let snapshot = compute_snapshot(&cart, DiscountFactor::TenPercent);
/// assert_eq!(snapshot.total.cents(), 61000);
/// assert_eq!(snapshot.discount_amount.cents(), 6100);
/// assert_eq!(snapshot.final_total.cents(), 54900);
/// ```
pub fn compute_snapshot(cart: &Cart, discount: DiscountFactor) -> CartSnapshot {
    let total = cart.total();
    let discount_amount = total.percentage(discount.bps());

    CartSnapshot {
        total,
        discount_amount,
        final_total: total - discount_amount,
        discount,
        item_count: cart.len(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn toothbrush() -> Item {
        Item::new("Toothbrush", 1000).unwrap()
    }

    fn laptop() -> Item {
        Item::new("Laptop", 60000).unwrap()
    }

    fn seeded() -> Vec<Item> {
        vec![
            toothbrush(),
            Item::new("Smart TV", 80000).unwrap(),
            laptop(),
            Item::new("Chocolate", 1200).unwrap(),
            Item::new("Apple juice", 500).unwrap(),
        ]
    }

    #[test]
    fn test_empty_cart_snapshot_is_zero() {
        let snapshot = compute_snapshot(&Cart::new(), DiscountFactor::None);
        assert!(snapshot.total.is_zero());
        assert!(snapshot.discount_amount.is_zero());
        assert!(snapshot.final_total.is_zero());
        assert_eq!(snapshot.item_count, 0);
    }

    #[test]
    fn test_ten_percent_on_toothbrush_and_laptop() {
        let mut cart = Cart::new();
        cart.add_item(toothbrush());
        cart.add_item(laptop());

        let snapshot = compute_snapshot(&cart, DiscountFactor::TenPercent);
        assert_eq!(snapshot.total, Money::from_cents(61000));
        assert_eq!(snapshot.discount_amount, Money::from_cents(6100));
        assert_eq!(snapshot.final_total, Money::from_cents(54900));
        assert_eq!(snapshot.item_count, 2);
    }

    #[test]
    fn test_priciest_items_total_without_overflow() {
        assert!(Item::new("Yacht", i64::MAX / 2 + 1).is_err());

        let mut cart = Cart::new();
        cart.add_item(Item::new("Yacht", crate::MAX_PRICE_CENTS).unwrap());
        cart.add_item(Item::new("Jet", crate::MAX_PRICE_CENTS).unwrap());

        let snapshot = compute_snapshot(&cart, DiscountFactor::FifteenPercent);
        assert_eq!(snapshot.total, Money::from_cents(2 * crate::MAX_PRICE_CENTS));
        assert_eq!(snapshot.discount_amount, Money::from_cents(30_000_000_000));
        assert_eq!(snapshot.final_total, Money::from_cents(170_000_000_000));
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.add_item(toothbrush()));
        assert!(!cart.add_item(toothbrush()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_at_most_one_entry_per_name() {
        let mut cart = Cart::new();
        let items = seeded();
        for round in 0..3 {
            for item in items.iter().rev().skip(round) {
                cart.add_item(item.clone());
            }
        }

        assert_eq!(cart.len(), items.len());
        for item in &items {
            assert_eq!(cart.items().iter().filter(|i| i.name == item.name).count(), 1);
        }
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(toothbrush());
        cart.add_item(laptop());

        assert!(cart.remove_item("Toothbrush"));
        assert_eq!(cart.items(), &[laptop()]);
        assert_eq!(cart.total(), Money::from_cents(60000));

        // Second removal is a no-op
        assert!(!cart.remove_item("Toothbrush"));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(toothbrush());

        assert!(cart.clear());
        assert!(cart.is_empty());
        assert!(!cart.clear());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_is_order_independent() {
        let mut ab = Cart::new();
        ab.add_item(toothbrush());
        ab.add_item(laptop());

        let mut ba = Cart::new();
        ba.add_item(laptop());
        ba.add_item(toothbrush());

        for discount in DiscountFactor::ALL {
            assert_eq!(compute_snapshot(&ab, discount), compute_snapshot(&ba, discount));
        }
    }

    #[test]
    fn test_final_total_is_total_minus_discount_for_every_factor() {
        let items = seeded();
        // every prefix of the seeded catalog, including odd-cent prices
        let mut carts: Vec<Cart> = Vec::new();
        for n in 0..=items.len() {
            let mut cart = Cart::new();
            for item in &items[..n] {
                cart.add_item(item.clone());
            }
            carts.push(cart);
        }
        let mut odd = Cart::new();
        odd.add_item(Item::new("Gum", 99).unwrap());
        odd.add_item(Item::new("Mint", 3).unwrap());
        carts.push(odd);

        for cart in &carts {
            for discount in DiscountFactor::ALL {
                let s = compute_snapshot(cart, discount);
                assert_eq!(s.final_total, s.total - s.discount_amount);
                assert_eq!(s.discount, discount);
            }
        }
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = compute_snapshot(&Cart::new(), DiscountFactor::FivePercent);
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["finalTotal"], 0);
        assert_eq!(json["discountAmount"], 0);
        assert_eq!(json["discount"], "five_percent");
        assert_eq!(json["itemCount"], 0);
    }
}
