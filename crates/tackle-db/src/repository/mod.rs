//! # Repository Layer
//!
//! Data access layer following the Repository pattern.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Repository Pattern                            │
//! │                                                                     │
//! │  Catalog facade                                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Repository (this layer) ← SQL lives here, nowhere else             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SqlitePool → SQLite                                                │
//! │                                                                     │
//! │  Repositories return DbResult and never apply business rules:       │
//! │  validation, SKU policy, and error translation belong to the        │
//! │  Catalog facade above.                                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod category;
pub mod product;

pub use category::CategoryRepository;
pub use product::ProductRepository;
