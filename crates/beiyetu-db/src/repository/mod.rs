//! # Repository Module
//!
//! One repository per catalog table.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  CatalogState / seeder                                                 │
//! │       │                                                                 │
//! │       │  db.listings().get_sorted_for_product(3)                       │
//! │       ▼                                                                 │
//! │  ┌──────────────┬──────────────┬──────────┬───────────┬────────────┐  │
//! │  │ Category     │ Subcategory  │ Store    │ Product   │ Listing    │  │
//! │  │ insert       │ insert       │ insert   │ insert    │ insert     │  │
//! │  │ get_all      │ get_all      │ get_all  │ get_all   │ get_all    │  │
//! │  │ get_by_id    │ get_by_id    │ get_by_id│ get_by_id │ get_by_id  │  │
//! │  │ get_by_name  │ get_by_      │ count    │ ..._with_ │ get_sorted_│  │
//! │  │ count        │  category    │          │  category │  for_prod. │  │
//! │  └──────────────┴──────────────┴──────────┴───────────┴────────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (foreign keys on)                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inserts are `INSERT OR REPLACE`: a draft carrying an id replaces the row
//! with that primary key, a draft without one gets a generated id. There
//! are no update or delete paths.

pub mod category;
pub mod listing;
pub mod product;
pub mod store;
pub mod subcategory;

/// Small fixture shared by the repository tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::pool::{Database, DbConfig};
    use beiyetu_core::{NewCategory, NewListing, NewProduct, NewStore, NewSubcategory};

    /// Ids produced by [`seeded`].
    pub struct Ids {
        pub drinks: i64,
        pub soda: i64,
        pub milk: i64,
        pub naivas: i64,
        pub carrefour: i64,
        pub canned_soda: i64,
        pub brookside: i64,
    }

    /// In-memory database with one category, two subcategories, two
    /// stores, two products and three listings.
    pub async fn seeded() -> (Database, Ids) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let drinks = db.categories().insert(&NewCategory::new("Drinks")).await.unwrap();
        let soda = db
            .subcategories()
            .insert(&NewSubcategory::new("Soda", drinks))
            .await
            .unwrap();
        let milk = db
            .subcategories()
            .insert(&NewSubcategory::new("Milk", drinks))
            .await
            .unwrap();

        let naivas = db
            .stores()
            .insert(&NewStore::new("Naivas", "https://naivas.online/"))
            .await
            .unwrap();
        let carrefour = db
            .stores()
            .insert(&NewStore::new("Carrefour", "https://www.carrefour.ke/"))
            .await
            .unwrap();

        let canned_soda = db
            .products()
            .insert(&NewProduct::new("Canned Soda", soda, 9_999, "test_soda"))
            .await
            .unwrap();
        let brookside = db
            .products()
            .insert(&NewProduct::new("Brookside Milk", milk, 19_000, "test_milk"))
            .await
            .unwrap();

        let listings = db.listings();
        listings.insert(&NewListing::new(canned_soda, naivas, 16_000)).await.unwrap();
        listings.insert(&NewListing::new(canned_soda, carrefour, 17_000)).await.unwrap();
        listings.insert(&NewListing::new(brookside, carrefour, 15_000)).await.unwrap();

        let ids = Ids {
            drinks,
            soda,
            milk,
            naivas,
            carrefour,
            canned_soda,
            brookside,
        };
        (db, ids)
    }
}
