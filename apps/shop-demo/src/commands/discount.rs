//! # Discount Commands
//!
//! The discount selector: one of None, 5%, 10%, 15%.

use serde::{Deserialize, Serialize};
use shop_core::DiscountFactor;
use tracing::debug;

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::LedgerState;

/// One entry of the discount selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountOption {
    pub factor: DiscountFactor,
    pub label: String,
    pub selected: bool,
}

/// Lists every selectable discount, marking the current one.
pub fn list_discounts(ledger: &LedgerState) -> Vec<DiscountOption> {
    let current = ledger.with_ledger(|l| l.discount());

    DiscountFactor::ALL
        .iter()
        .map(|factor| DiscountOption {
            factor: *factor,
            label: factor.label(),
            selected: *factor == current,
        })
        .collect()
}

/// Selects a discount.
///
/// ## Accepted Input
/// `none`, `0`, `5%`, `0.05`, `10`, `0.1`, `15%`... Anything outside the
/// four allowed factors is rejected with `VALIDATION_ERROR` and the current
/// discount is kept.
pub fn set_discount(ledger: &LedgerState, input: &str) -> Result<CartResponse, ApiError> {
    debug!(input = %input, "set_discount command");
    let factor: DiscountFactor = input.parse()?;

    Ok(ledger.with_ledger_mut(|l| {
        l.set_discount(factor);
        CartResponse::from(&*l)
    }))
}
