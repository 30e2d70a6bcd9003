//! # View
//!
//! Renders the whole shop screen as plain text.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Discount: 10%                       ◄── selector                      │
//! │  PRODUCTS:                           ◄── catalog (or loading/failed)   │
//! │  Toothbrush ($10.00)                                                    │
//! │  Smart TV ($800.00)                                                     │
//! │  ...                                                                    │
//! │  CART:                               ◄── cart entries, or "Empty"      │
//! │  Laptop ($600.00)                                                       │
//! │  DISCOUNT: 10% ($60.00)              ◄── snapshot                      │
//! │  TOTAL: $600.00                                                         │
//! │  TOTAL AFTER DISCOUNT: $540.00                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use shop_catalog::LoadState;
use shop_core::{Item, Ledger, Money};

use crate::commands::DiscountOption;
use crate::state::StoreSettings;

/// Renders the full screen.
pub fn render(store: &StoreSettings, load_state: &LoadState, ledger: &Ledger) -> String {
    let mut out = String::new();
    let snapshot = ledger.snapshot();
    let amount = |money: Money| format_money(store, money);

    // writeln! into a String cannot fail
    let _ = writeln!(out, "Discount: {}", ledger.discount().label());

    out.push_str(&render_products(store, load_state));

    let _ = writeln!(out, "CART:");
    if ledger.cart().is_empty() {
        let _ = writeln!(out, "Empty");
    }
    for item in ledger.cart().items() {
        let _ = writeln!(out, "{}", format_item(store, item));
    }

    let _ = writeln!(
        out,
        "DISCOUNT: {} ({})",
        snapshot.discount,
        amount(snapshot.discount_amount)
    );
    let _ = writeln!(out, "TOTAL: {}", amount(snapshot.total));
    let _ = writeln!(out, "TOTAL AFTER DISCOUNT: {}", amount(snapshot.final_total));

    out
}

/// Renders just the products section.
pub fn render_products(store: &StoreSettings, load_state: &LoadState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PRODUCTS:");

    match load_state {
        LoadState::Idle | LoadState::Loading => {
            let _ = writeln!(out, "Loading products...");
        }
        LoadState::Failed(reason) => {
            let _ = writeln!(out, "Failed to load products: {}", reason);
        }
        LoadState::Ready(catalog) => {
            for item in catalog.items() {
                let _ = writeln!(out, "{}", format_item(store, item));
            }
        }
    }

    out
}

/// `Laptop ($600.00)`
pub fn format_item(store: &StoreSettings, item: &Item) -> String {
    format!("{} ({})", item.name, format_money(store, item.price()))
}

/// Formats an amount with the configured currency symbol.
pub fn format_money(store: &StoreSettings, money: Money) -> String {
    let sign = if money.is_negative() { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        store.currency_symbol,
        money.dollars().abs(),
        money.cents_part().abs()
    )
}

/// The discount selector, current choice starred.
pub fn render_discounts(options: &[DiscountOption]) -> String {
    let mut out = String::new();
    for option in options {
        let marker = if option.selected { '*' } else { ' ' };
        let _ = writeln!(out, "{} {}", marker, option.label);
    }
    out
}

/// Help text listing the session commands.
pub fn help() -> &'static str {
    "\
Commands:
  products             show the product list
  add <name>           add a product to the cart
  remove <name>        remove a product from the cart
  clear                empty the cart
  discount             list the discounts
  discount <value>     none, 5%, 10% or 15%
  cart                 print the cart as JSON
  status               print the catalog load status as JSON
  reload               retry a failed catalog load
  help                 show this help
  quit                 exit"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shop_catalog::seed_items;
    use shop_core::{Catalog, DiscountFactor};
    use std::sync::Arc;

    fn ready() -> LoadState {
        let catalog = Catalog::new("seeded", seed_items(), Utc::now()).unwrap();
        LoadState::Ready(Arc::new(catalog))
    }

    fn item(name: &str, price_cents: i64) -> Item {
        Item::new(name, price_cents).unwrap()
    }

    #[test]
    fn test_render_empty_cart() {
        let view = render(&StoreSettings::default(), &ready(), &Ledger::new());

        assert_eq!(
            view,
            "\
Discount: None
PRODUCTS:
Toothbrush ($10.00)
Smart TV ($800.00)
Laptop ($600.00)
Chocolate ($12.00)
Apple juice ($5.00)
CART:
Empty
DISCOUNT: 0% ($0.00)
TOTAL: $0.00
TOTAL AFTER DISCOUNT: $0.00
"
        );
    }

    #[test]
    fn test_render_cart_with_discount() {
        let mut ledger = Ledger::new();
        ledger.add_item(item("Laptop", 60000));
        ledger.set_discount(DiscountFactor::TenPercent);

        let view = render(&StoreSettings::default(), &LoadState::Loading, &ledger);

        assert_eq!(
            view,
            "\
Discount: 10%
PRODUCTS:
Loading products...
CART:
Laptop ($600.00)
DISCOUNT: 10% ($60.00)
TOTAL: $600.00
TOTAL AFTER DISCOUNT: $540.00
"
        );
    }

    #[test]
    fn test_render_failed_load() {
        let state = LoadState::Failed("Catalog load timed out after 10000 ms".into());
        let products = render_products(&StoreSettings::default(), &state);
        assert_eq!(
            products,
            "PRODUCTS:\nFailed to load products: Catalog load timed out after 10000 ms\n"
        );
    }

    #[test]
    fn test_currency_symbol() {
        let store = StoreSettings {
            currency_symbol: "€".into(),
            ..Default::default()
        };
        assert_eq!(format_money(&store, Money::from_cents(1099)), "€10.99");
        assert_eq!(format_money(&store, Money::from_cents(-550)), "-€5.50");
        assert_eq!(format_item(&store, &item("Chocolate", 1200)), "Chocolate (€12.00)");
    }
}
