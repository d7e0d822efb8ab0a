//! # Category Repository
//!
//! Database operations for the category reference table.
//!
//! Categories map a display name ("Anzuelos") to a SKU code ("ANZ").
//! The table is seeded by migration and rarely changes, so the surface
//! here is small: list, look up a code, add a new row.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tackle_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, code FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Returns the SKU code for a category name, if the category exists.
    ///
    /// Unknown names are not an error here: the SKU policy falls back to
    /// a generic code, and that decision belongs to the caller.
    pub async fn code_for_name(&self, name: &str) -> DbResult<Option<String>> {
        let code: Option<String> =
            sqlx::query_scalar("SELECT code FROM categories WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(code)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - Inserted row with its assigned id
    /// * `Err(DbError::UniqueViolation)` - Name or code already exists
    pub async fn insert(&self, name: &str, code: &str) -> DbResult<Category> {
        debug!(name = %name, code = %code, "Inserting category");

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO categories (name, code) VALUES (?1, ?2) RETURNING id",
        )
        .bind(name)
        .bind(code)
        .fetch_one(&self.pool)
        .await?;

        Ok(Category {
            id,
            name: name.to_string(),
            code: code.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_code_for_seeded_name() {
        let db = test_db().await;
        let repo = db.categories();

        let code = repo.code_for_name("Anzuelos").await.unwrap();
        assert_eq!(code.as_deref(), Some("ANZ"));

        let missing = repo.code_for_name("Kayaks").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_category() {
        let db = test_db().await;
        let repo = db.categories();

        let category = repo.insert("Kayaks", "KAY").await.unwrap();
        assert!(category.id > 0);
        assert_eq!(category.code, "KAY");

        let code = repo.code_for_name("Kayaks").await.unwrap();
        assert_eq!(code.as_deref(), Some("KAY"));
    }

    #[tokio::test]
    async fn test_insert_duplicate_name_fails() {
        let db = test_db().await;
        let repo = db.categories();

        let result = repo.insert("Anzuelos", "AN2").await;
        assert!(matches!(
            result,
            Err(crate::error::DbError::UniqueViolation { .. })
        ));
    }
}
