//! # Validation Module
//!
//! Input validation for items entering the system.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (shop-catalog)                                  │
//! │  └── Every fetched item goes through validate_item()                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog construction (types.rs)                              │
//! │  └── Unique item names                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Command boundary (shop-demo)                                 │
//! │  ├── Items are looked up in the loaded catalog by name                 │
//! │  └── Discount input parsed against the closed set                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::validation::{validate_item_name, validate_price_cents};
//!
//! assert!(validate_item_name("Toothbrush").is_ok());
//! assert!(validate_price_cents(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Item;
use crate::{MAX_ITEM_NAME_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_ITEM_NAME_LEN`] characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - At most [`MAX_PRICE_CENTS`]
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a complete item.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_price_cents(item.price_cents)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Apple juice").is_ok());
        assert!(validate_item_name("Smart TV").is_ok());

        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(MAX_ITEM_NAME_LEN + 1)).is_err());
        assert!(validate_item_name(&"A".repeat(MAX_ITEM_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert_eq!(
            validate_price_cents(-100),
            Err(ValidationError::MustBeNonNegative {
                field: "price".to_string()
            })
        );

        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert_eq!(
            validate_price_cents(i64::MAX / 2 + 1),
            Err(ValidationError::TooLarge {
                field: "price".to_string(),
                max: MAX_PRICE_CENTS
            })
        );
    }

    #[test]
    fn test_validate_item() {
        let ok = Item {
            name: "Chocolate".to_string(),
            price_cents: 1200,
        };
        assert!(validate_item(&ok).is_ok());

        let bad = Item {
            name: "Chocolate".to_string(),
            price_cents: -1,
        };
        assert!(validate_item(&bad).is_err());
    }
}
