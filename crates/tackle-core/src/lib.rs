//! # tackle-core: Pure Business Logic for Tackle POS
//!
//! This crate is the **heart** of Tackle POS, an inventory and
//! point-of-sale system for a fishing-tackle retailer. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Tackle POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  UI shell (external consumer)                 │ │
//! │  │    Catalog UI ──► Sale UI ──► Low-stock alerts ──► Stats      │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │ request/response                  │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                 tackle-db (Catalog facade)                    │ │
//! │  │    create_product, search_products, adjust_stock, ...         │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │               ★ tackle-core (THIS CRATE) ★                    │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐      │ │
//! │  │   │  types  │  │  money  │  │   sku   │  │ validation │      │ │
//! │  │   │ Product │  │  Money  │  │ prefix  │  │   rules    │      │ │
//! │  │   │Category │  │  cents  │  │sequence │  │   checks   │      │ │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘      │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, StockState, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`sku`] - SKU prefix and sequence-number computation
//! - [`stock`] - Stock classification rules
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tackle_core::money::Money;
//! use tackle_core::sku::SkuPrefix;
//! use tackle_core::stock::StockState;
//!
//! // Money is integer cents (never floats)
//! let price = Money::from_cents(1000); // $10.00
//!
//! // Default cost is 60% of price
//! assert_eq!(price.percent(60).cents(), 600);
//!
//! // SKU prefixes combine category code and brand
//! let prefix = SkuPrefix::new("ANZ", "Owner");
//! assert_eq!(prefix.format(1), "ANZ-OWN0001");
//!
//! // Stock classification
//! assert_eq!(StockState::classify(3, 5), StockState::Low);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod sku;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tackle_core::Money` instead of
// `use tackle_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use sku::SkuPrefix;
pub use stock::{StockDirection, StockState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category assigned to a product draft that does not name one.
///
/// The retailer's seed catalog always contains this category, so the
/// fallback keeps auto-generated SKUs on a registered prefix.
pub const DEFAULT_CATEGORY: &str = "Anzuelos";

/// Category code used in SKUs when the named category is not registered.
pub const FALLBACK_CATEGORY_CODE: &str = "GEN";

/// Default low-stock threshold for new products.
pub const DEFAULT_MIN_STOCK: i64 = 5;

/// Default cost as a percentage of price when a draft omits the cost.
pub const DEFAULT_COST_PERCENT: i64 = 60;

/// Minimum width of the numeric SKU suffix (zero-padded).
///
/// Sequences past 9999 widen naturally rather than failing; see
/// [`sku::SkuPrefix::format`].
pub const SKU_SEQUENCE_WIDTH: usize = 4;

/// Maximum length accepted for a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length accepted for a supplied SKU.
pub const MAX_SKU_LEN: usize = 50;

/// Maximum length accepted for a search query.
pub const MAX_QUERY_LEN: usize = 100;
