//! # Domain Types
//!
//! Core domain types used throughout the shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │     Catalog     │   │ DiscountFactor  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (unique)  │   │  items (order)  │   │  None      0%   │       │
//! │  │  price_cents    │   │  source         │   │  Five      5%   │       │
//! │  │                 │   │  loaded_at      │   │  Ten      10%   │       │
//! │  └─────────────────┘   └─────────────────┘   │  Fifteen  15%   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Items are identified by `name`. A catalog never holds two items with the
//! same name, and the cart uses the name as its set key.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_item, ValidationResult};

// =============================================================================
// Item
// =============================================================================

/// A purchasable item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Display name, unique within a catalog.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl Item {
    /// Creates a validated item. The name is trimmed.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::Item;
    ///
    /// let item = Item::new(" Laptop ", 60000).unwrap();
    /// assert_eq!(item.name, "Laptop");
    /// assert!(Item::new("Laptop", -1).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price_cents: i64) -> ValidationResult<Self> {
        let item = Item {
            name: name.into().trim().to_string(),
            price_cents,
        };
        validate_item(&item)?;
        Ok(item)
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The ordered, read-only list of items offered for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Catalog {
    items: Vec<Item>,

    /// Name of the source the items came from.
    source: String,

    #[ts(as = "String")]
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Builds a catalog, validating every item and rejecting duplicate names.
    ///
    /// Item order is preserved exactly as given.
    pub fn new(
        source: impl Into<String>,
        items: Vec<Item>,
        loaded_at: DateTime<Utc>,
    ) -> CoreResult<Self> {
        for (i, item) in items.iter().enumerate() {
            validate_item(item)?;
            if items[..i].iter().any(|prev| prev.name == item.name) {
                return Err(CoreError::DuplicateItem(item.name.clone()));
            }
        }

        Ok(Catalog {
            items,
            source: source.into(),
            loaded_at,
        })
    }

    /// Items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by name.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Looks up an item by name, failing with [`CoreError::ItemNotFound`].
    pub fn require(&self, name: &str) -> CoreResult<&Item> {
        self.get(name)
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))
    }
}

// =============================================================================
// Discount Factor
// =============================================================================

/// The fractional reduction applied to the cart total.
///
/// ## Closed Set
/// Only four values exist. Anything else coming from the outside is
/// rejected at the parse boundary (`FromStr`, `TryFrom<f64>`, `from_bps`),
/// so an out-of-range discount cannot reach the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountFactor {
    /// No discount (0).
    #[default]
    None,
    /// 5% (0.05).
    FivePercent,
    /// 10% (0.10).
    TenPercent,
    /// 15% (0.15).
    FifteenPercent,
}

impl DiscountFactor {
    /// Every selectable discount, in selector order.
    pub const ALL: [DiscountFactor; 4] = [
        DiscountFactor::None,
        DiscountFactor::FivePercent,
        DiscountFactor::TenPercent,
        DiscountFactor::FifteenPercent,
    ];

    /// Returns the factor in basis points (1000 = 10%).
    #[inline]
    pub const fn bps(&self) -> u32 {
        match self {
            DiscountFactor::None => 0,
            DiscountFactor::FivePercent => 500,
            DiscountFactor::TenPercent => 1000,
            DiscountFactor::FifteenPercent => 1500,
        }
    }

    /// Whole percent (10 for 10%).
    #[inline]
    pub const fn percent(&self) -> u32 {
        self.bps() / 100
    }

    /// Returns the factor as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.bps() as f64 / 10_000.0
    }

    /// Selector label: "None", "5%", "10%", "15%".
    pub fn label(&self) -> String {
        match self {
            DiscountFactor::None => "None".to_string(),
            other => other.to_string(),
        }
    }

    /// Looks up a factor by basis points.
    pub fn from_bps(bps: u32) -> ValidationResult<Self> {
        Self::ALL
            .into_iter()
            .find(|factor| factor.bps() == bps)
            .ok_or_else(Self::not_allowed)
    }

    fn not_allowed() -> ValidationError {
        ValidationError::NotAllowed {
            field: "discount".to_string(),
            allowed: Self::ALL.iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for DiscountFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Accepts a fraction (`0.05`).
impl TryFrom<f64> for DiscountFactor {
    type Error = ValidationError;

    fn try_from(fraction: f64) -> Result<Self, Self::Error> {
        let scaled = fraction * 10_000.0;
        let bps = scaled.round();

        if !fraction.is_finite() || (scaled - bps).abs() > 1e-6 || bps < 0.0 {
            return Err(Self::not_allowed());
        }

        Self::from_bps(bps as u32)
    }
}

/// Parses selector input.
///
/// Accepted spellings: `none`, fractions (`0`, `0.05`, `0.1`, `0.15`) and
/// percentages (`5%`, `10 %`, or a bare `15`).
impl FromStr for DiscountFactor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_lowercase();
        if raw == "none" {
            return Ok(DiscountFactor::None);
        }

        let (number, is_percent) = match raw.strip_suffix('%') {
            Some(n) => (n.trim(), true),
            None => (raw.as_str(), false),
        };

        let value: f64 = number.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "discount".to_string(),
            reason: format!("'{}' is not a number", s.trim()),
        })?;

        // A bare value of 1 or more is read as a percentage
        let fraction = if is_percent || value >= 1.0 {
            value / 100.0
        } else {
            value
        };

        DiscountFactor::try_from(fraction)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
