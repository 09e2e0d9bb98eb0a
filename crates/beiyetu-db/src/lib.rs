//! # beiyetu-db: Database Layer for Bei Yetu
//!
//! This crate provides database access for the Bei Yetu catalog.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bei Yetu Data Flow                               │
//! │                                                                         │
//! │  CatalogState::search_products("soda")                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    beiyetu-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ CategoryRepo   │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │   │ 001_initial  │  │   │
//! │  │   │               │    │ ListingRepo .. │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   seed.rs ── first-run default catalog                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/beiyetu/beiyetu.db                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per table
//! - [`seed`] - Default catalog and the one-time seeder
//!
//! ## Usage
//!
//! ```rust,ignore
//! use beiyetu_db::{seed, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/beiyetu.db")).await?;
//! seed::seed_defaults(&db).await?;
//!
//! let products = db.products().get_all_with_category().await?;
//! let cheapest_first = db.listings().get_sorted_for_product(products[0].id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::listing::ListingRepository;
pub use repository::product::ProductRepository;
pub use repository::store::StoreRepository;
pub use repository::subcategory::SubcategoryRepository;
pub use seed::{seed_defaults, SeedOutcome, SeedReport};
