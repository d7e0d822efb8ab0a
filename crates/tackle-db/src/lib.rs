//! # tackle-db: Data Access Layer for Tackle POS
//!
//! SQLite persistence and the Catalog service facade for Tackle POS.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Tackle POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  UI shell (external consumer)                 │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │               ★ tackle-db (THIS CRATE) ★                      │ │
//! │  │                                                               │ │
//! │  │   ┌──────────┐   ┌─────────────┐   ┌───────────────────┐     │ │
//! │  │   │ Catalog  │──►│ Repositories│──►│ SqlitePool (WAL)  │     │ │
//! │  │   │  facade  │   │  (the SQL)  │   │  + migrations     │     │ │
//! │  │   └──────────┘   └─────────────┘   └───────────────────┘     │ │
//! │  │        │                                                      │ │
//! │  │        └──► MediaStore (uploads/ directory)                   │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │ pure logic                        │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                         tackle-core                           │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded SQL migrations
//! - [`repository`] - Data access (SQL lives here)
//! - [`catalog`] - The service facade: validation, SKU policy, timeouts
//! - [`media`] - Product image storage
//! - [`error`] - Database error types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tackle_db::{Catalog, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./tackle.db")).await?;
//! let catalog = Catalog::new(db);
//!
//! let products = catalog.get_all_products().await;
//! let stats = catalog.get_statistics().await;
//! ```

pub mod catalog;
pub mod error;
pub mod media;
pub mod migrations;
pub mod pool;
pub mod repository;

// Re-exports for convenience
pub use catalog::{Catalog, CatalogError, CatalogResult};
pub use error::{DbError, DbResult};
pub use media::MediaStore;
pub use pool::{Database, DbConfig};
pub use repository::{CategoryRepository, ProductRepository};
