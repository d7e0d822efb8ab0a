//! # Stock Rules
//!
//! Stock classification and adjustment direction for the stock ledger.
//!
//! Classification is a pure function of `(stock, min_stock)`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Stock State Classification                       │
//! │                                                                     │
//! │   stock == 0                 ──► OutOfStock   (reorder now)         │
//! │   0 < stock <= min_stock     ──► Low          (reorder soon)        │
//! │   stock > min_stock          ──► Normal                             │
//! │                                                                     │
//! │   The same rule drives the low-stock report, the per-row            │
//! │   annotation on every product read, and the statistics counters.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Stock State
// =============================================================================

/// Derived classification of a product's on-hand quantity relative to
/// its minimum threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum StockState {
    /// No units on hand.
    OutOfStock,
    /// On hand, but at or below the minimum threshold.
    Low,
    /// Comfortably above the minimum threshold.
    Normal,
}

impl StockState {
    /// Classifies a stock level against its minimum threshold.
    ///
    /// ## Example
    /// ```rust
    /// use tackle_core::stock::StockState;
    ///
    /// assert_eq!(StockState::classify(0, 5), StockState::OutOfStock);
    /// assert_eq!(StockState::classify(3, 5), StockState::Low);
    /// assert_eq!(StockState::classify(10, 5), StockState::Normal);
    /// ```
    pub const fn classify(stock: i64, min_stock: i64) -> StockState {
        if stock == 0 {
            StockState::OutOfStock
        } else if stock <= min_stock {
            StockState::Low
        } else {
            StockState::Normal
        }
    }
}

// =============================================================================
// Stock Direction
// =============================================================================

/// Direction of a stock adjustment.
///
/// Sales decrease stock; restocking increases it. The quantity itself is
/// always passed as a positive magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockDirection {
    Increase,
    Decrease,
}

impl StockDirection {
    /// Converts a positive magnitude into a signed delta.
    #[inline]
    pub const fn signed(&self, quantity: i64) -> i64 {
        match self {
            StockDirection::Increase => quantity,
            StockDirection::Decrease => -quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_out_of_stock() {
        assert_eq!(StockState::classify(0, 5), StockState::OutOfStock);
        // Zero stock is out-of-stock even with a zero threshold
        assert_eq!(StockState::classify(0, 0), StockState::OutOfStock);
    }

    #[test]
    fn test_classify_low() {
        assert_eq!(StockState::classify(3, 5), StockState::Low);
        // Boundary: stock exactly at the threshold is still low
        assert_eq!(StockState::classify(5, 5), StockState::Low);
        assert_eq!(StockState::classify(1, 1), StockState::Low);
    }

    #[test]
    fn test_classify_normal() {
        assert_eq!(StockState::classify(10, 5), StockState::Normal);
        assert_eq!(StockState::classify(6, 5), StockState::Normal);
    }

    #[test]
    fn test_signed_delta() {
        assert_eq!(StockDirection::Increase.signed(4), 4);
        assert_eq!(StockDirection::Decrease.signed(4), -4);
    }
}
