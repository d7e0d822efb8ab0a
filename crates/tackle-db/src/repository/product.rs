//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD with immutable `id`/`sku`
//! - Substring search across name, SKU, category, brand
//! - Transactional SKU allocation (read last, insert next)
//! - Guarded stock adjustment (never below zero)
//! - Inventory statistics
//!
//! ## Stock State Annotation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │           Every product SELECT carries stock_state                  │
//! │                                                                     │
//! │  CASE                                                               │
//! │    WHEN stock = 0          THEN 'out_of_stock'                      │
//! │    WHEN stock <= min_stock THEN 'low'                               │
//! │    ELSE                         'normal'                            │
//! │  END AS stock_state                                                 │
//! │                                                                     │
//! │  The classification is computed in SQL on every read, so rows       │
//! │  always reflect the current stock level - there is nothing to       │
//! │  invalidate when stock changes.                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tackle_core::sku::{next_sequence, SkuPrefix};
use tackle_core::{Product, ProductUpdate};

/// Product SELECT column list, shared by every read query so each row
/// decodes into [`Product`] with its derived `stock_state`.
const PRODUCT_COLUMNS: &str = "\
    id, sku, name, description, category, brand, supplier, \
    price_cents, cost_cents, stock, min_stock, image, attributes, \
    created_at, updated_at, \
    CASE \
        WHEN stock = 0 THEN 'out_of_stock' \
        WHEN stock <= min_stock THEN 'low' \
        ELSE 'normal' \
    END AS stock_state";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Search products
/// let results = repo.search("shimano").await?;
///
/// // Get by ID
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the full catalog, newest-created first.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product with an already-resolved SKU.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(sku = %product.sku, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, description, category, brand, supplier,
                price_cents, cost_cents, stock, min_stock,
                image, attributes, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.brand)
        .bind(&product.supplier)
        .bind(product.price_cents)
        .bind(product.cost_cents)
        .bind(product.stock)
        .bind(product.min_stock)
        .bind(&product.image)
        .bind(&product.attributes)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Inserts a product, allocating its SKU from the given prefix.
    ///
    /// ## Atomicity
    /// ```text
    /// ┌──────────────────────────────────────────────────────────────────┐
    /// │              SKU Allocation Inside One Transaction               │
    /// │                                                                  │
    /// │  BEGIN                                                           │
    /// │    SELECT sku WHERE sku LIKE 'ANZ-OWN%' ORDER BY sku DESC LIMIT 1│
    /// │    next = trailing digits + 1 (or 1 if none)                     │
    /// │    INSERT ... sku = 'ANZ-OWN0002'                                │
    /// │  COMMIT                                                          │
    /// │                                                                  │
    /// │  Two concurrent creations for the same prefix cannot both read   │
    /// │  the same "last" row and insert the same number: the second      │
    /// │  transaction serializes behind the first.                        │
    /// └──────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// The zero-padded suffix keeps lexicographic and numeric order in
    /// agreement, so `ORDER BY sku DESC` finds the numeric maximum.
    pub async fn insert_with_prefix(
        &self,
        mut product: Product,
        prefix: &SkuPrefix,
    ) -> DbResult<Product> {
        debug!(prefix = %prefix.as_str(), "Allocating SKU and inserting product");

        let mut tx = self.pool.begin().await?;

        let last_sku: Option<String> = sqlx::query_scalar(
            "SELECT sku FROM products WHERE sku LIKE ?1 ORDER BY sku DESC LIMIT 1",
        )
        .bind(prefix.like_pattern())
        .fetch_optional(&mut *tx)
        .await?;

        let sequence = next_sequence(last_sku.as_deref());
        product.sku = prefix.format(sequence);

        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, description, category, brand, supplier,
                price_cents, cost_cents, stock, min_stock,
                image, attributes, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.brand)
        .bind(&product.supplier)
        .bind(product.price_cents)
        .bind(product.cost_cents)
        .bind(product.stock)
        .bind(product.min_stock)
        .bind(&product.image)
        .bind(&product.attributes)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(sku = %product.sku, "Product inserted with generated SKU");
        Ok(product)
    }

    /// Returns the latest SKU under a prefix, for next-SKU previews.
    pub async fn last_sku_with_prefix(&self, prefix: &SkuPrefix) -> DbResult<Option<String>> {
        let last_sku: Option<String> = sqlx::query_scalar(
            "SELECT sku FROM products WHERE sku LIKE ?1 ORDER BY sku DESC LIMIT 1",
        )
        .bind(prefix.like_pattern())
        .fetch_optional(&self.pool)
        .await?;

        Ok(last_sku)
    }

    /// Replaces all mutable fields of an existing product.
    ///
    /// `id` and `sku` are immutable and not touched.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(
        &self,
        id: &str,
        fields: &ProductUpdate,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                category = ?4,
                brand = ?5,
                supplier = ?6,
                price_cents = ?7,
                cost_cents = ?8,
                stock = ?9,
                min_stock = ?10,
                image = ?11,
                attributes = ?12,
                updated_at = ?13
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.category)
        .bind(&fields.brand)
        .bind(&fields.supplier)
        .bind(fields.price_cents)
        .bind(fields.cost_cents)
        .bind(fields.stock)
        .bind(fields.min_stock)
        .bind(&fields.image)
        .bind(fields.attributes.to_json())
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Applies a signed stock delta, refusing to drive stock negative.
    ///
    /// ## Guarded Delta Pattern
    /// ```text
    /// UPDATE products
    /// SET stock = stock + ?delta
    /// WHERE id = ? AND stock + ?delta >= 0
    /// ```
    /// The guard and the delta apply in one statement, so a concurrent
    /// sale cannot slip between a read and a write. `rows_affected == 0`
    /// means either the id is missing or the guard refused; the caller
    /// distinguishes by re-reading.
    ///
    /// ## Returns
    /// * `Ok(true)` - Stock adjusted
    /// * `Ok(false)` - No row changed (missing id or insufficient stock)
    pub async fn update_stock(
        &self,
        id: &str,
        delta: i64,
        now: DateTime<Utc>,
    ) -> DbResult<bool> {
        debug!(id = %id, delta = %delta, "Updating stock");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET
                stock = stock + ?2,
                updated_at = ?3
            WHERE id = ?1 AND stock + ?2 >= 0
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a product.
    ///
    /// Idempotent: deleting a missing id is not an error.
    ///
    /// ## Returns
    /// * `Ok(true)` - Row removed
    /// * `Ok(false)` - Nothing to remove
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Searches products by case-insensitive substring across name, SKU,
    /// category, and brand (OR-combined), ordered by name.
    ///
    /// Empty-query handling (return the full catalog) lives in the
    /// Catalog facade; this method always applies the filter.
    pub async fn search(&self, query: &str) -> DbResult<Vec<Product>> {
        debug!(query = %query, "Searching products");

        let pattern = format!("%{}%", escape_like(query));

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE name LIKE ?1 ESCAPE '\'
               OR sku LIKE ?1 ESCAPE '\'
               OR category LIKE ?1 ESCAPE '\'
               OR brand LIKE ?1 ESCAPE '\'
            ORDER BY name
            "#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists products at or below their minimum threshold, including
    /// out-of-stock, ordered by stock ascending then name.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE stock <= min_stock
            ORDER BY stock ASC, name ASC
            "#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Computes aggregate inventory statistics.
    ///
    /// Two queries, matching the two aggregate shapes: one full-table
    /// rollup and one stock-weighted value over in-stock rows.
    pub async fn statistics(&self) -> DbResult<tackle_core::InventoryStats> {
        let (total_products, total_stock, out_of_stock, low_stock, categories, brands): (
            i64,
            i64,
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(stock), 0),
                COALESCE(SUM(CASE WHEN stock = 0 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN stock <= min_stock AND stock > 0 THEN 1 ELSE 0 END), 0),
                COUNT(DISTINCT category),
                COUNT(DISTINCT brand)
            FROM products
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let inventory_value_cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(price_cents * stock), 0) FROM products WHERE stock > 0",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(tackle_core::InventoryStats {
            total_products,
            total_stock,
            out_of_stock,
            low_stock,
            categories,
            brands,
            inventory_value_cents,
        })
    }

    /// Counts total products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Escapes LIKE wildcards in user input so a search for "100%" matches
/// the literal text.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("shi"), "shi");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
