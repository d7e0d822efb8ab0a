//! # Domain Types
//!
//! Core domain types used throughout Tackle POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    Product      │   │    Category     │   │ InventoryStats  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)      │   │  id (rowid)     │   │  total_products │   │
//! │  │  sku (business) │   │  name (unique)  │   │  out_of_stock   │   │
//! │  │  price_cents    │   │  code (3-ltr)   │   │  inventory_value│   │
//! │  │  stock_state    │   └─────────────────┘   └─────────────────┘   │
//! │  └─────────────────┘                                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐                         │
//! │  │  ProductDraft   │   │  ProductUpdate  │                         │
//! │  │  creation input │   │  full mutable   │                         │
//! │  │  with defaults  │   │  field set      │                         │
//! │  └─────────────────┘   └─────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `sku`: human-readable business code - immutable once assigned

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::stock::StockState;
use crate::{DEFAULT_CATEGORY, DEFAULT_COST_PERCENT, DEFAULT_MIN_STOCK};

// =============================================================================
// Attributes
// =============================================================================

/// Open key-value metadata attached to a product (hook size, line
/// strength, rod length, ...).
///
/// Persisted as a serialized JSON object in a single text column and
/// decoded lazily. Malformed stored text degrades to an empty map,
/// never a hard failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, serde_json::Value>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Attributes(BTreeMap::new())
    }

    /// Decodes a stored JSON string, defensively.
    ///
    /// ## Example
    /// ```rust
    /// use tackle_core::types::Attributes;
    ///
    /// let attrs = Attributes::parse(r##"{"hook_size": "#4"}"##);
    /// assert_eq!(attrs.get("hook_size").and_then(|v| v.as_str()), Some("#4"));
    ///
    /// // Malformed content degrades to empty, never errors
    /// assert!(Attributes::parse("not json").is_empty());
    /// assert!(Attributes::parse("").is_empty());
    /// ```
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Encodes for storage as a JSON object string.
    pub fn to_json(&self) -> String {
        // A BTreeMap of Values cannot fail to serialize
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    /// Sets an attribute value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up an attribute value.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Every row read back from the store carries `stock_state`, the derived
/// classification of `stock` against `min_stock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4). Immutable, never reused.
    pub id: String,

    /// Stock Keeping Unit - business identifier. Immutable once assigned.
    pub sku: String,

    /// Display name shown in the catalog and on receipts.
    pub name: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Category display name (e.g., "Anzuelos").
    pub category: String,

    /// Brand name; empty string when the product has no brand.
    pub brand: String,

    /// Optional supplier name.
    pub supplier: Option<String>,

    /// Sale price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Acquisition cost in cents (for margin calculations).
    pub cost_cents: i64,

    /// On-hand quantity. Never negative.
    pub stock: i64,

    /// Low-stock threshold.
    pub min_stock: i64,

    /// Filename of the product image in the uploads directory
    /// (filename only; the file itself is managed by the media store).
    pub image: Option<String>,

    /// Open key-value metadata, stored as a serialized JSON object.
    /// Decode with [`Product::attribute_map`].
    pub attributes: String,

    /// When the product was created. Set once.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated. Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,

    /// Derived stock classification for this row.
    pub stock_state: StockState,
}

impl Product {
    /// Builds a product from a creation draft, filling defaults.
    ///
    /// ## Defaults
    /// - `category`: "Anzuelos" when absent
    /// - `brand`: empty string
    /// - `price`: 0
    /// - `cost`: 60% of price when absent
    /// - `stock`: 0
    /// - `min_stock`: 5
    /// - `attributes`: `{}`
    ///
    /// The SKU is resolved by the caller (supplied or generated) before
    /// this runs; validation also happens at the caller boundary.
    pub fn from_draft(draft: ProductDraft, sku: String, now: DateTime<Utc>) -> Product {
        let price_cents = draft.price_cents.unwrap_or(0);
        let cost_cents = draft
            .cost_cents
            .unwrap_or_else(|| Money::from_cents(price_cents).percent(DEFAULT_COST_PERCENT).cents());
        let stock = draft.stock.unwrap_or(0);
        let min_stock = draft.min_stock.unwrap_or(DEFAULT_MIN_STOCK);

        Product {
            id: Uuid::new_v4().to_string(),
            sku,
            name: draft.name.trim().to_string(),
            description: draft.description,
            category: draft
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            brand: draft.brand.unwrap_or_default(),
            supplier: draft.supplier,
            price_cents,
            cost_cents,
            stock,
            min_stock,
            image: draft.image,
            attributes: draft.attributes.unwrap_or_default().to_json(),
            created_at: now,
            updated_at: now,
            stock_state: StockState::classify(stock, min_stock),
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the cost as a Money type.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Decodes the stored attributes, defensively.
    pub fn attribute_map(&self) -> Attributes {
        Attributes::parse(&self.attributes)
    }

    /// Value of the on-hand stock at sale price.
    ///
    /// Zero-stock products contribute nothing by definition.
    pub fn inventory_value(&self) -> Money {
        if self.stock > 0 {
            self.price().times(self.stock)
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Creation input for a product.
///
/// Everything except `name` is optional; absent fields take the defaults
/// documented on [`Product::from_draft`]. An absent `sku` triggers SKU
/// generation from `category` + `brand`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub supplier: Option<String>,
    pub price_cents: Option<i64>,
    pub cost_cents: Option<i64>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub image: Option<String>,
    pub attributes: Option<Attributes>,
}

// =============================================================================
// Product Update
// =============================================================================

/// The full set of mutable product fields.
///
/// An update replaces all of these at once; `id` and `sku` are immutable
/// and deliberately absent from this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub brand: String,
    pub supplier: Option<String>,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub stock: i64,
    pub min_stock: i64,
    pub image: Option<String>,
    pub attributes: Attributes,
}

// =============================================================================
// Category
// =============================================================================

/// A product category with its SKU prefix code.
///
/// A fixed seed set is created at first startup; the store does not
/// prevent adding more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    /// Unique display name (e.g., "Anzuelos").
    pub name: String,
    /// Unique short prefix used in SKU generation (e.g., "ANZ").
    pub code: String,
}

// =============================================================================
// Inventory Statistics
// =============================================================================

/// Aggregate inventory statistics.
///
/// All fields default to zero; a failed computation degrades to
/// `InventoryStats::default()` rather than propagating the error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Total number of products in the catalog.
    pub total_products: i64,
    /// Total stock units across all products.
    pub total_stock: i64,
    /// Products with stock == 0.
    pub out_of_stock: i64,
    /// Products with 0 < stock <= min_stock.
    pub low_stock: i64,
    /// Distinct category count.
    pub categories: i64,
    /// Distinct brand count.
    pub brands: i64,
    /// Σ(price × stock) over products with stock > 0, in cents.
    pub inventory_value_cents: i64,
}

impl InventoryStats {
    /// Returns the inventory value as a Money type.
    #[inline]
    pub fn inventory_value(&self) -> Money {
        Money::from_cents(self.inventory_value_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_from_draft_fills_defaults() {
        let now = Utc::now();
        let product = Product::from_draft(draft("Anzuelo #4"), "ANZ-0001".to_string(), now);

        assert_eq!(product.category, "Anzuelos");
        assert_eq!(product.brand, "");
        assert_eq!(product.price_cents, 0);
        assert_eq!(product.cost_cents, 0);
        assert_eq!(product.stock, 0);
        assert_eq!(product.min_stock, 5);
        assert_eq!(product.attributes, "{}");
        assert_eq!(product.stock_state, StockState::OutOfStock);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_from_draft_default_cost_is_sixty_percent() {
        let now = Utc::now();
        let mut d = draft("Anzuelo #4");
        d.price_cents = Some(1000);
        let product = Product::from_draft(d, "ANZ-0001".to_string(), now);

        assert_eq!(product.cost_cents, 600);
    }

    #[test]
    fn test_from_draft_explicit_cost_wins() {
        let now = Utc::now();
        let mut d = draft("Anzuelo #4");
        d.price_cents = Some(1000);
        d.cost_cents = Some(750);
        let product = Product::from_draft(d, "ANZ-0001".to_string(), now);

        assert_eq!(product.cost_cents, 750);
    }

    #[test]
    fn test_from_draft_unique_ids() {
        let now = Utc::now();
        let a = Product::from_draft(draft("A"), "ANZ-0001".to_string(), now);
        let b = Product::from_draft(draft("B"), "ANZ-0002".to_string(), now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_inventory_value() {
        let now = Utc::now();
        let mut d = draft("Señuelo");
        d.price_cents = Some(1000);
        d.stock = Some(5);
        let product = Product::from_draft(d, "SEN-0001".to_string(), now);
        assert_eq!(product.inventory_value().cents(), 5000);

        let empty = Product::from_draft(draft("Carrete"), "CAR-0001".to_string(), now);
        assert_eq!(empty.inventory_value().cents(), 0);
    }

    #[test]
    fn test_attributes_roundtrip() {
        let mut attrs = Attributes::new();
        attrs.insert("hook_size", "#4");
        attrs.insert("pack_count", 10);

        let encoded = attrs.to_json();
        let decoded = Attributes::parse(&encoded);
        assert_eq!(decoded, attrs);
    }

    #[test]
    fn test_attributes_malformed_degrades_to_empty() {
        assert!(Attributes::parse("").is_empty());
        assert!(Attributes::parse("not json").is_empty());
        assert!(Attributes::parse("[1,2,3]").is_empty());
        assert_eq!(Attributes::parse("{}").len(), 0);
    }
}
