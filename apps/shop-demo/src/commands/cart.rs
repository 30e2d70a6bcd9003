//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                              │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ add_to_cart              │
//! │  │  Cart    │                │          │───┘ remove_from_cart         │
//! │  └──────────┘◄───────────────└──────────┘                              │
//! │        ▲       clear_cart /        │                                    │
//! │        │       last remove         │ set_discount (discount.rs)        │
//! │        └───────────────────────────┘ changes totals only               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use shop_core::validation::validate_item_name;
use shop_core::{CartSnapshot, Item, Ledger};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, LedgerState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<Item>,
    pub totals: CartSnapshot,
}

impl From<&Ledger> for CartResponse {
    fn from(ledger: &Ledger) -> Self {
        CartResponse {
            items: ledger.cart().items().to_vec(),
            totals: ledger.snapshot(),
        }
    }
}

/// Gets the current cart contents.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  CART:                                                         │
/// │  Toothbrush ($10.00)                                           │
/// │  Laptop ($600.00)                                              │
/// │  DISCOUNT: 10% ($61.00)                                        │
/// │  TOTAL: $610.00                                                │
/// │  TOTAL AFTER DISCOUNT: $549.00                                 │
/// └────────────────────────────────────────────────────────────────┘
/// get_cart() → { items: [...], totals: { total, discountAmount, ... } }
/// ```
pub fn get_cart(ledger: &LedgerState) -> CartResponse {
    debug!("get_cart command");
    ledger.with_ledger(|l| CartResponse::from(l))
}

/// Adds a catalog item to the cart by name.
///
/// ## Behavior
/// - Name is matched exactly first, then ignoring ASCII case
/// - Already in the cart: no change (not an error)
/// - Catalog not loaded yet: `CATALOG_UNAVAILABLE`
/// - No such item: `NOT_FOUND`
pub fn add_to_cart(
    catalog: &CatalogState,
    ledger: &LedgerState,
    name: &str,
) -> Result<CartResponse, ApiError> {
    debug!(name = %name, "add_to_cart command");
    validate_item_name(name)?;
    let name = name.trim();

    let catalog = catalog.require()?;
    let item = catalog
        .get(name)
        .or_else(|| {
            catalog
                .items()
                .iter()
                .find(|item| item.name.eq_ignore_ascii_case(name))
        })
        .cloned()
        .ok_or_else(|| ApiError::not_found("Item", name))?;

    Ok(ledger.with_ledger_mut(|l| {
        l.add_item(item);
        CartResponse::from(&*l)
    }))
}

/// Removes an item from the cart by name.
///
/// Removing something that is not in the cart leaves it unchanged.
pub fn remove_from_cart(ledger: &LedgerState, name: &str) -> Result<CartResponse, ApiError> {
    debug!(name = %name, "remove_from_cart command");
    validate_item_name(name)?;
    let name = name.trim();

    Ok(ledger.with_ledger_mut(|l| {
        let items = l.cart().items();
        let stored = items
            .iter()
            .find(|item| item.name == name)
            .or_else(|| items.iter().find(|item| item.name.eq_ignore_ascii_case(name)))
            .map(|item| item.name.clone());

        if let Some(stored) = stored {
            l.remove_item(&stored);
        }
        CartResponse::from(&*l)
    }))
}

/// Clears all items from the cart. The discount is kept.
pub fn clear_cart(ledger: &LedgerState) -> CartResponse {
    debug!("clear_cart command");

    ledger.with_ledger_mut(|l| {
        l.clear();
        CartResponse::from(&*l)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shop_catalog::{CatalogLoader, SeededSource};
    use std::sync::Arc;
    use std::time::Duration;

    async fn loaded_catalog() -> CatalogState {
        let loader = CatalogLoader::new(Arc::new(SeededSource::new(Duration::ZERO)));
        let state = CatalogState::new(loader);
        state.load().await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let catalog = loaded_catalog().await;
        let ledger = LedgerState::new();

        add_to_cart(&catalog, &ledger, "Toothbrush").unwrap();
        let response = add_to_cart(&catalog, &ledger, "Laptop").unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.totals.total.cents(), 61000);

        let response = remove_from_cart(&ledger, "Toothbrush").unwrap();
        let names: Vec<&str> = response.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Laptop"]);
        assert_eq!(response.totals.total.cents(), 60000);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_a_noop() {
        let catalog = loaded_catalog().await;
        let ledger = LedgerState::new();

        add_to_cart(&catalog, &ledger, "Toothbrush").unwrap();
        let response = add_to_cart(&catalog, &ledger, "toothbrush").unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.item_count, 1);
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found() {
        let catalog = loaded_catalog().await;
        let ledger = LedgerState::new();

        let err = add_to_cart(&catalog, &ledger, "Banana").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: Banana");
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let ledger = LedgerState::new();
        let err = remove_from_cart(&ledger, "   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_add_before_catalog_is_unavailable() {
        let catalog = CatalogState::new(CatalogLoader::new(Arc::new(SeededSource::default())));
        let ledger = LedgerState::new();

        let err = add_to_cart(&catalog, &ledger, "Laptop").unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
        assert!(get_cart(&ledger).items.is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_and_clear_twice() {
        let catalog = loaded_catalog().await;
        let ledger = LedgerState::new();
        add_to_cart(&catalog, &ledger, "Chocolate").unwrap();

        let response = remove_from_cart(&ledger, "Smart TV").unwrap();
        assert_eq!(response.items.len(), 1);

        assert!(clear_cart(&ledger).items.is_empty());
        let response = clear_cart(&ledger);
        assert!(response.items.is_empty());
        assert!(response.totals.total.is_zero());
    }

    #[tokio::test]
    async fn test_remove_prefers_exact_name() {
        let items = vec![Item::new("tv", 100).unwrap(), Item::new("TV", 200).unwrap()];
        let loader = CatalogLoader::new(Arc::new(SeededSource::with_items(items, Duration::ZERO)));
        let catalog = CatalogState::new(loader);
        catalog.load().await.unwrap();
        let ledger = LedgerState::new();

        add_to_cart(&catalog, &ledger, "tv").unwrap();
        add_to_cart(&catalog, &ledger, "TV").unwrap();

        let response = remove_from_cart(&ledger, "TV").unwrap();
        let names: Vec<&str> = response.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["tv"]);

        // Falls back to a case-insensitive match
        let response = remove_from_cart(&ledger, "Tv").unwrap();
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_response_is_camel_case() {
        let catalog = loaded_catalog().await;
        let ledger = LedgerState::new();
        add_to_cart(&catalog, &ledger, "Apple juice").unwrap();

        let json = serde_json::to_value(get_cart(&ledger)).unwrap();
        assert_eq!(json["items"][0]["name"], "Apple juice");
        assert_eq!(json["totals"]["finalTotal"], 500);
        assert_eq!(json["totals"]["itemCount"], 1);
    }
}
