//! # Catalog Facade
//!
//! The service surface of the store. Repositories own the SQL; this
//! module owns orchestration: validation, defaults, SKU policy, the
//! per-operation time budget, and error translation for the UI shell.
//!
//! ## Error Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Reads degrade, writes propagate                   │
//! │                                                                     │
//! │  READS  (get_all_products, search, stats, low stock, categories)    │
//! │    storage error → warn! log → empty vec / zeroed stats / None      │
//! │    The UI shows an empty catalog instead of crashing mid-sale.      │
//! │                                                                     │
//! │  WRITES (create, update, delete, adjust_stock)                      │
//! │    storage error → CatalogError, surfaced to the caller             │
//! │    Silently dropping a write would corrupt the inventory.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time Budget
//! Every operation runs under `tokio::time::timeout` with the budget
//! configured on the pool (default 5s). A wedged database surfaces as
//! `DbError::Timeout` instead of hanging the UI thread.

use std::future::Future;

use chrono::Utc;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use tackle_core::error::{CoreError, ValidationError};
use tackle_core::sku::{next_sequence, SkuPrefix};
use tackle_core::validation;
use tackle_core::{
    Category, InventoryStats, Product, ProductDraft, ProductUpdate, StockDirection,
    DEFAULT_CATEGORY, FALLBACK_CATEGORY_CODE,
};

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced by the Catalog facade.
///
/// This is the only error type the UI shell sees; repository-level
/// `DbError`s are translated on the way out.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Input rejected before reaching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No product with the given id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A supplied SKU collides with an existing product.
    #[error("SKU '{0}' already exists")]
    DuplicateSku(String),

    /// A decrement would drive stock below zero.
    #[error("Insufficient stock for {sku}: {available} available, {requested} requested")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// The operation exceeded its time budget.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Any other storage failure.
    #[error("Storage error: {0}")]
    Storage(DbError),
}

impl From<DbError> for CatalogError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { id, .. } => CatalogError::NotFound(id),
            DbError::UniqueViolation { value, .. } => CatalogError::DuplicateSku(value),
            DbError::Timeout { operation, seconds } => {
                CatalogError::Timeout(format!("{operation} after {seconds}s"))
            }
            other => CatalogError::Storage(other),
        }
    }
}

/// Domain rule violations originate in `tackle-core` vocabulary; the
/// facade translates them to its flat surface.
impl From<CoreError> for CatalogError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => CatalogError::NotFound(id),
            CoreError::CategoryNotFound(name) => CatalogError::NotFound(name),
            CoreError::InsufficientStock {
                sku,
                available,
                requested,
            } => CatalogError::InsufficientStock {
                sku,
                available,
                requested,
            },
            CoreError::Validation(err) => CatalogError::Validation(err),
        }
    }
}

/// Result type for Catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Catalog
// =============================================================================

/// The catalog service: products, categories, stock, and statistics.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./tackle.db")).await?;
/// let catalog = Catalog::new(db);
///
/// let draft = ProductDraft {
///     name: "Anzuelo Owner #4".into(),
///     category: Some("Anzuelos".into()),
///     brand: Some("Owner".into()),
///     ..ProductDraft::default()
/// };
/// let product = catalog.create_product(draft).await?; // sku ANZ-OWN0001
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    db: Database,
}

impl Catalog {
    /// Creates a catalog backed by the given database.
    pub fn new(db: Database) -> Self {
        Catalog { db }
    }

    /// Access to the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs a repository future under the configured time budget.
    async fn timed<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = DbResult<T>>,
    ) -> DbResult<T> {
        match timeout(self.db.op_timeout(), fut).await {
            Ok(result) => result,
            Err(_) => Err(DbError::timeout(operation, self.db.op_timeout().as_secs())),
        }
    }

    // -------------------------------------------------------------------------
    // Products: reads
    // -------------------------------------------------------------------------

    /// Lists the full catalog, newest-created first.
    ///
    /// Degrades to an empty list on storage failure.
    pub async fn get_all_products(&self) -> Vec<Product> {
        let repo = self.db.products();
        match self.timed("get_all_products", repo.list_all()).await {
            Ok(products) => products,
            Err(err) => {
                warn!(error = %err, "Listing products failed, returning empty catalog");
                Vec::new()
            }
        }
    }

    /// Fetches a single product by id.
    ///
    /// Returns `None` both for a missing id and for a storage failure
    /// (the failure is logged).
    pub async fn get_product(&self, id: &str) -> Option<Product> {
        let repo = self.db.products();
        match self.timed("get_product", repo.get_by_id(id)).await {
            Ok(product) => product,
            Err(err) => {
                warn!(error = %err, id = %id, "Product lookup failed");
                None
            }
        }
    }

    /// Fetches a single product by SKU. Same degrade policy as
    /// [`Catalog::get_product`].
    pub async fn get_product_by_sku(&self, sku: &str) -> Option<Product> {
        let repo = self.db.products();
        match self.timed("get_product_by_sku", repo.get_by_sku(sku)).await {
            Ok(product) => product,
            Err(err) => {
                warn!(error = %err, sku = %sku, "Product lookup failed");
                None
            }
        }
    }

    /// Searches by case-insensitive substring across name, SKU,
    /// category, and brand. An empty or whitespace query returns the
    /// full catalog.
    ///
    /// Over-long queries are a caller error; storage failures degrade
    /// to an empty result.
    pub async fn search_products(&self, query: &str) -> CatalogResult<Vec<Product>> {
        let query = validation::validate_search_query(query)?;

        if query.is_empty() {
            return Ok(self.get_all_products().await);
        }

        let repo = self.db.products();
        match self.timed("search_products", repo.search(&query)).await {
            Ok(products) => Ok(products),
            Err(err) => {
                warn!(error = %err, query = %query, "Search failed, returning empty result");
                Ok(Vec::new())
            }
        }
    }

    /// Lists products at or below their minimum threshold, ordered by
    /// stock ascending then name. Degrades to empty.
    pub async fn get_low_stock_products(&self) -> Vec<Product> {
        let repo = self.db.products();
        match self.timed("get_low_stock_products", repo.low_stock()).await {
            Ok(products) => products,
            Err(err) => {
                warn!(error = %err, "Low-stock query failed, returning empty result");
                Vec::new()
            }
        }
    }

    /// Computes aggregate inventory statistics. Degrades to all-zero
    /// stats on failure.
    pub async fn get_statistics(&self) -> InventoryStats {
        let repo = self.db.products();
        match self.timed("get_statistics", repo.statistics()).await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "Statistics query failed, returning zeroed stats");
                InventoryStats::default()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Products: writes
    // -------------------------------------------------------------------------

    /// Creates a product from a draft.
    ///
    /// Validates the inputs, fills defaults, and resolves the SKU:
    /// a supplied SKU is used as-is (uniqueness enforced by the store),
    /// an absent one is allocated from the category code and brand
    /// inside the insert transaction.
    pub async fn create_product(&self, draft: ProductDraft) -> CatalogResult<Product> {
        validation::validate_product_name(&draft.name)?;
        if let Some(price) = draft.price_cents {
            validation::validate_price_cents(price)?;
        }
        if let Some(cost) = draft.cost_cents {
            validation::validate_price_cents(cost)?;
        }
        if let Some(stock) = draft.stock {
            validation::validate_stock(stock)?;
        }
        if let Some(min_stock) = draft.min_stock {
            validation::validate_min_stock(min_stock)?;
        }

        let now = Utc::now();
        let repo = self.db.products();

        if let Some(supplied) = draft.sku.as_deref() {
            let sku = supplied.trim().to_string();
            validation::validate_sku(&sku)?;

            let product = Product::from_draft(draft, sku.clone(), now);
            match self.timed("create_product", repo.insert(&product)).await {
                Ok(stored) => {
                    debug!(sku = %stored.sku, "Product created with supplied SKU");
                    Ok(stored)
                }
                Err(DbError::UniqueViolation { .. }) => Err(CatalogError::DuplicateSku(sku)),
                Err(err) => Err(err.into()),
            }
        } else {
            let category = draft
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
            let brand = draft.brand.clone().unwrap_or_default();
            let code = self.category_code(&category).await?;
            let prefix = SkuPrefix::new(&code, &brand);

            // Placeholder SKU; the real one is allocated inside the
            // insert transaction.
            let product = Product::from_draft(draft, String::new(), now);
            let stored = self
                .timed("create_product", repo.insert_with_prefix(product, &prefix))
                .await?;
            debug!(sku = %stored.sku, "Product created with generated SKU");
            Ok(stored)
        }
    }

    /// Replaces all mutable fields of a product and refreshes
    /// `updated_at`. The id and SKU never change.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated row
    /// * `Err(CatalogError::NotFound)` - No product with that id
    pub async fn update_product(
        &self,
        id: &str,
        mut fields: ProductUpdate,
    ) -> CatalogResult<Product> {
        validation::validate_product_name(&fields.name)?;
        validation::validate_price_cents(fields.price_cents)?;
        validation::validate_price_cents(fields.cost_cents)?;
        validation::validate_stock(fields.stock)?;
        validation::validate_min_stock(fields.min_stock)?;
        fields.name = fields.name.trim().to_string();

        let now = Utc::now();
        let repo = self.db.products();

        self.timed("update_product", repo.update(id, &fields, now))
            .await?;

        let updated = self.timed("update_product", repo.get_by_id(id)).await?;
        updated.ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
    }

    /// Deletes a product.
    ///
    /// Idempotent: deleting an id that does not exist returns
    /// `Ok(false)`, never an error.
    pub async fn delete_product(&self, id: &str) -> CatalogResult<bool> {
        let repo = self.db.products();
        let removed = self.timed("delete_product", repo.delete(id)).await?;
        Ok(removed)
    }

    /// Adjusts on-hand stock by a quantity in the given direction.
    ///
    /// The absolute value of `quantity` is taken defensively; zero is
    /// rejected. A decrement past zero fails with `InsufficientStock`
    /// and leaves the row untouched.
    pub async fn adjust_stock(
        &self,
        id: &str,
        quantity: i64,
        direction: StockDirection,
    ) -> CatalogResult<Product> {
        let quantity = quantity.abs();
        validation::validate_quantity(quantity)?;

        let repo = self.db.products();

        let delta = direction.signed(quantity);
        let now = Utc::now();
        let changed = self
            .timed("adjust_stock", repo.update_stock(id, delta, now))
            .await?;

        if !changed {
            // The guarded update refused: either the row is missing or
            // the decrease would go negative. Re-read to tell them apart.
            let domain_err = match self.timed("adjust_stock", repo.get_by_id(id)).await? {
                Some(current) => CoreError::InsufficientStock {
                    sku: current.sku,
                    available: current.stock,
                    requested: quantity,
                },
                None => CoreError::ProductNotFound(id.to_string()),
            };
            return Err(domain_err.into());
        }

        let updated = self.timed("adjust_stock", repo.get_by_id(id)).await?;
        updated.ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
    }

    // -------------------------------------------------------------------------
    // SKU preview
    // -------------------------------------------------------------------------

    /// Previews the SKU the next creation under this category and brand
    /// would receive. Does not reserve anything.
    ///
    /// Never fails: a storage error degrades to sequence 1 under the
    /// computed prefix (logged).
    pub async fn next_sku(&self, category: &str, brand: &str) -> String {
        let categories = self.db.categories();
        let code = match self
            .timed("next_sku", categories.code_for_name(category))
            .await
        {
            Ok(Some(code)) => code,
            Ok(None) => FALLBACK_CATEGORY_CODE.to_string(),
            Err(err) => {
                warn!(error = %err, category = %category, "Category lookup failed, using fallback code");
                FALLBACK_CATEGORY_CODE.to_string()
            }
        };

        let prefix = SkuPrefix::new(&code, brand);
        let repo = self.db.products();
        let last = match self
            .timed("next_sku", repo.last_sku_with_prefix(&prefix))
            .await
        {
            Ok(last) => last,
            Err(err) => {
                warn!(error = %err, prefix = %prefix.as_str(), "SKU preview query failed, assuming first");
                None
            }
        };

        prefix.format(next_sequence(last.as_deref()))
    }

    /// Resolves a category name to its SKU code, falling back to the
    /// generic code for unregistered categories.
    async fn category_code(&self, category: &str) -> DbResult<String> {
        let categories = self.db.categories();
        let code = self
            .timed("category_code", categories.code_for_name(category))
            .await?;
        Ok(code.unwrap_or_else(|| FALLBACK_CATEGORY_CODE.to_string()))
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Lists all categories alphabetically. Degrades to empty.
    pub async fn get_categories(&self) -> Vec<Category> {
        let repo = self.db.categories();
        match self.timed("get_categories", repo.list()).await {
            Ok(categories) => categories,
            Err(err) => {
                warn!(error = %err, "Category listing failed, returning empty result");
                Vec::new()
            }
        }
    }

    /// Adds a category with its SKU code. The seed set is fixed, but
    /// adding more is allowed.
    pub async fn add_category(&self, name: &str, code: &str) -> CatalogResult<Category> {
        let name = name.trim();
        let code = code.trim().to_uppercase();
        if name.is_empty() || code.is_empty() {
            return Err(ValidationError::Required {
                field: "category".to_string(),
            }
            .into());
        }

        let repo = self.db.categories();
        let category = self
            .timed("add_category", repo.insert(name, &code))
            .await?;
        Ok(category)
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use tackle_core::StockState;

    async fn test_catalog() -> Catalog {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Catalog::new(db)
    }

    fn draft(name: &str, category: &str, brand: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: Some(category.to_string()),
            brand: Some(brand.to_string()),
            ..ProductDraft::default()
        }
    }

    fn update_from(product: &Product) -> ProductUpdate {
        ProductUpdate {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            supplier: product.supplier.clone(),
            price_cents: product.price_cents,
            cost_cents: product.cost_cents,
            stock: product.stock,
            min_stock: product.min_stock,
            image: product.image.clone(),
            attributes: product.attribute_map(),
        }
    }

    // -------------------------------------------------------------------------
    // SKU generation
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_generated_skus_are_sequential_per_prefix() {
        let catalog = test_catalog().await;

        let mut first = draft("Anzuelo Owner #4", "Anzuelos", "Owner");
        first.price_cents = Some(1000);
        let first = catalog.create_product(first).await.unwrap();
        assert_eq!(first.sku, "ANZ-OWN0001");
        assert_eq!(first.cost_cents, 600);
        assert_eq!(first.stock, 0);
        assert_eq!(first.stock_state, StockState::OutOfStock);

        let second = catalog
            .create_product(draft("Anzuelo Owner #6", "Anzuelos", "Owner"))
            .await
            .unwrap();
        assert_eq!(second.sku, "ANZ-OWN0002");

        // A different brand starts its own run
        let other = catalog
            .create_product(draft("Anzuelo Gamakatsu", "Anzuelos", "Gamakatsu"))
            .await
            .unwrap();
        assert_eq!(other.sku, "ANZ-GAM0001");
    }

    #[tokio::test]
    async fn test_generated_sku_without_brand() {
        let catalog = test_catalog().await;

        let product = catalog
            .create_product(draft("Anzuelo genérico", "Anzuelos", ""))
            .await
            .unwrap();
        assert_eq!(product.sku, "ANZ-0001");
    }

    #[tokio::test]
    async fn test_unknown_category_uses_fallback_code() {
        let catalog = test_catalog().await;

        let product = catalog
            .create_product(draft("Kayak inflable", "Kayaks", "Intex"))
            .await
            .unwrap();
        assert_eq!(product.sku, "GEN-INT0001");
    }

    #[tokio::test]
    async fn test_next_sku_preview_does_not_reserve() {
        let catalog = test_catalog().await;

        assert_eq!(catalog.next_sku("Anzuelos", "Owner").await, "ANZ-OWN0001");
        assert_eq!(catalog.next_sku("Anzuelos", "Owner").await, "ANZ-OWN0001");

        catalog
            .create_product(draft("Anzuelo", "Anzuelos", "Owner"))
            .await
            .unwrap();
        assert_eq!(catalog.next_sku("Anzuelos", "Owner").await, "ANZ-OWN0002");
    }

    #[tokio::test]
    async fn test_supplied_sku_respected_and_unique() {
        let catalog = test_catalog().await;

        let mut d = draft("Caña especial", "Cañas", "Shimano");
        d.sku = Some("CUSTOM-001".to_string());
        let product = catalog.create_product(d).await.unwrap();
        assert_eq!(product.sku, "CUSTOM-001");

        let mut dup = draft("Otra caña", "Cañas", "Daiwa");
        dup.sku = Some("CUSTOM-001".to_string());
        let result = catalog.create_product(dup).await;
        assert!(matches!(result, Err(CatalogError::DuplicateSku(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let catalog = test_catalog().await;

        let result = catalog.create_product(draft("   ", "Anzuelos", "")).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    // -------------------------------------------------------------------------
    // CRUD round trips
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let catalog = test_catalog().await;

        let mut d = draft("Señuelo Rapala CD-9", "Señuelos", "Rapala");
        d.price_cents = Some(2550);
        d.stock = Some(12);
        d.description = Some("Countdown 9cm".to_string());
        let created = catalog.create_product(d).await.unwrap();

        let fetched = catalog.get_product(&created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.sku, created.sku);
        assert_eq!(fetched.name, "Señuelo Rapala CD-9");
        assert_eq!(fetched.price_cents, 2550);
        assert_eq!(fetched.stock, 12);
        assert_eq!(fetched.stock_state, StockState::Normal);
        assert_eq!(fetched.description.as_deref(), Some("Countdown 9cm"));

        let by_sku = catalog.get_product_by_sku(&created.sku).await.unwrap();
        assert_eq!(by_sku.id, created.id);
    }

    #[tokio::test]
    async fn test_get_missing_product_is_none() {
        let catalog = test_catalog().await;
        assert!(catalog.get_product("no-such-id").await.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_identity() {
        let catalog = test_catalog().await;

        let mut d = draft("Carrete Shimano", "Carretes", "Shimano");
        d.price_cents = Some(10000);
        let created = catalog.create_product(d).await.unwrap();

        let mut fields = update_from(&created);
        fields.name = "Carrete Shimano Sedona".to_string();
        fields.price_cents = 12000;
        fields.stock = 3;

        let updated = catalog.update_product(&created.id, fields).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.sku, created.sku);
        assert_eq!(updated.name, "Carrete Shimano Sedona");
        assert_eq!(updated.price_cents, 12000);
        assert_eq!(updated.stock_state, StockState::Low);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let catalog = test_catalog().await;

        let created = catalog
            .create_product(draft("Línea PE", "Líneas", ""))
            .await
            .unwrap();
        let fields = update_from(&created);

        let result = catalog.update_product("no-such-id", fields).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let catalog = test_catalog().await;

        let created = catalog
            .create_product(draft("Anzuelo", "Anzuelos", ""))
            .await
            .unwrap();

        assert!(catalog.delete_product(&created.id).await.unwrap());
        assert!(catalog.get_product(&created.id).await.is_none());
        // Second delete reports nothing removed, not an error
        assert!(!catalog.delete_product(&created.id).await.unwrap());
    }

    // -------------------------------------------------------------------------
    // Stock ledger
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_adjust_stock_increase_and_decrease() {
        let catalog = test_catalog().await;

        let created = catalog
            .create_product(draft("Carnada", "Carnadas", ""))
            .await
            .unwrap();

        let up = catalog
            .adjust_stock(&created.id, 10, StockDirection::Increase)
            .await
            .unwrap();
        assert_eq!(up.stock, 10);
        assert_eq!(up.stock_state, StockState::Normal);

        // Negative input is treated as its absolute value
        let down = catalog
            .adjust_stock(&created.id, -4, StockDirection::Decrease)
            .await
            .unwrap();
        assert_eq!(down.stock, 6);
    }

    #[tokio::test]
    async fn test_adjust_stock_rejects_overdraw() {
        let catalog = test_catalog().await;

        let mut d = draft("Señuelo", "Señuelos", "Rapala");
        d.stock = Some(3);
        let created = catalog.create_product(d).await.unwrap();

        let result = catalog
            .adjust_stock(&created.id, 5, StockDirection::Decrease)
            .await;
        match result {
            Err(CatalogError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // Row untouched
        let unchanged = catalog.get_product(&created.id).await.unwrap();
        assert_eq!(unchanged.stock, 3);
    }

    #[tokio::test]
    async fn test_adjust_stock_rejects_zero_and_missing() {
        let catalog = test_catalog().await;

        let created = catalog
            .create_product(draft("Anzuelo", "Anzuelos", ""))
            .await
            .unwrap();

        let zero = catalog
            .adjust_stock(&created.id, 0, StockDirection::Increase)
            .await;
        assert!(matches!(zero, Err(CatalogError::Validation(_))));

        let missing = catalog
            .adjust_stock("no-such-id", 1, StockDirection::Increase)
            .await;
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_search_matches_substring_across_fields() {
        let catalog = test_catalog().await;

        catalog
            .create_product(draft("Carrete Sedona", "Carretes", "Shimano"))
            .await
            .unwrap();
        catalog
            .create_product(draft("Anzuelo #4", "Anzuelos", "Owner"))
            .await
            .unwrap();

        // Brand, case-insensitive
        let by_brand = catalog.search_products("shimano").await.unwrap();
        assert_eq!(by_brand.len(), 1);
        assert_eq!(by_brand[0].brand, "Shimano");

        // Name substring
        let by_name = catalog.search_products("Sedona").await.unwrap();
        assert_eq!(by_name.len(), 1);

        // SKU substring
        let by_sku = catalog.search_products("ANZ-OWN").await.unwrap();
        assert_eq!(by_sku.len(), 1);

        // Category
        let by_category = catalog.search_products("Carretes").await.unwrap();
        assert_eq!(by_category.len(), 1);

        let none = catalog.search_products("kayak").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_returns_full_catalog() {
        let catalog = test_catalog().await;

        catalog
            .create_product(draft("A", "Anzuelos", ""))
            .await
            .unwrap();
        catalog
            .create_product(draft("B", "Señuelos", ""))
            .await
            .unwrap();

        let all = catalog.search_products("   ").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    // -------------------------------------------------------------------------
    // Statistics and low stock
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_statistics_exclude_zero_stock_from_value() {
        let catalog = test_catalog().await;

        let mut in_stock = draft("Señuelo", "Señuelos", "Rapala");
        in_stock.price_cents = Some(1000);
        in_stock.stock = Some(5);
        catalog.create_product(in_stock).await.unwrap();

        let mut empty = draft("Caña", "Cañas", "Shimano");
        empty.price_cents = Some(2000);
        empty.stock = Some(0);
        catalog.create_product(empty).await.unwrap();

        let stats = catalog.get_statistics().await;
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.total_stock, 5);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.low_stock, 1); // 5 <= min_stock default 5
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.brands, 2);
        assert_eq!(stats.inventory_value_cents, 5000);
        assert_eq!(stats.inventory_value().to_string(), "50.00");
    }

    #[tokio::test]
    async fn test_low_stock_ordering() {
        let catalog = test_catalog().await;

        for (name, stock) in [("Bajo", 2), ("Agotado", 0), ("Normal", 50)] {
            let mut d = draft(name, "Accesorios", "");
            d.stock = Some(stock);
            catalog.create_product(d).await.unwrap();
        }

        let low = catalog.get_low_stock_products().await;
        assert_eq!(low.len(), 2);
        assert_eq!(low[0].name, "Agotado");
        assert_eq!(low[0].stock_state, StockState::OutOfStock);
        assert_eq!(low[1].name, "Bajo");
        assert_eq!(low[1].stock_state, StockState::Low);
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_category_and_generate_under_it() {
        let catalog = test_catalog().await;

        let category = catalog.add_category("Kayaks", "kay").await.unwrap();
        assert_eq!(category.code, "KAY");

        let product = catalog
            .create_product(draft("Kayak", "Kayaks", ""))
            .await
            .unwrap();
        assert_eq!(product.sku, "KAY-0001");
    }
}
