//! # Listing Repository
//!
//! A listing is one store's price for one product.
//!
//! ## Price Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              get_sorted_for_product(product_id)                         │
//! │                                                                         │
//! │  listings l INNER JOIN stores s ON l.store_id = s.id                   │
//! │  WHERE l.product_id = ?                                                │
//! │  ORDER BY l.price_cents, l.store_id, l.id                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────┬────────────┬─────────┐                                   │
//! │  │ store_id │ store      │ price   │                                   │
//! │  ├──────────┼────────────┼─────────┤                                   │
//! │  │ 3        │ Carrefour  │ 26999   │ ← best price (first row)          │
//! │  │ 1        │ Naivas     │ 27999   │                                   │
//! │  │ 2        │ Quick Mart │ 28500   │                                   │
//! │  └──────────┴────────────┴─────────┘                                   │
//! │                                                                         │
//! │  Equal prices fall back to the lower store id, then listing id,       │
//! │  so the first row is deterministic.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use beiyetu_core::{Listing, NewListing, StorePriceListing};

/// Repository for listing database operations.
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: SqlitePool,
}

impl ListingRepository {
    /// Creates a new ListingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ListingRepository { pool }
    }

    /// Inserts or replaces a listing and returns its row id.
    ///
    /// Fails with `ForeignKeyViolation` when the product or store is missing.
    pub async fn insert(&self, listing: &NewListing) -> DbResult<i64> {
        Self::insert_with(&self.pool, listing).await
    }

    /// [`insert`](Self::insert) on any executor, such as an open transaction.
    pub async fn insert_with<'e, E>(executor: E, listing: &NewListing) -> DbResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(
            product_id = listing.product_id,
            store_id = listing.store_id,
            price_cents = listing.price_cents,
            "Inserting listing"
        );

        let result = sqlx::query(
            r#"
            INSERT OR REPLACE INTO listings (id, product_id, store_id, price_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(listing.id)
        .bind(listing.product_id)
        .bind(listing.store_id)
        .bind(listing.price_cents)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_all(&self) -> DbResult<Vec<Listing>> {
        let listings = sqlx::query_as::<_, Listing>(
            "SELECT id, product_id, store_id, price_cents FROM listings ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Listing>> {
        debug!(id = id, "Getting listing by ID");

        let listing = sqlx::query_as::<_, Listing>(
            "SELECT id, product_id, store_id, price_cents FROM listings WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(listing)
    }

    /// Raw listing rows for a product, ordered by id.
    pub async fn get_by_product(&self, product_id: i64) -> DbResult<Vec<Listing>> {
        let listings = sqlx::query_as::<_, Listing>(
            "SELECT id, product_id, store_id, price_cents FROM listings WHERE product_id = ?1 ORDER BY id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    /// Listings for a product joined with their store, cheapest first.
    ///
    /// Empty when the product has no listings or does not exist.
    pub async fn get_sorted_for_product(&self, product_id: i64) -> DbResult<Vec<StorePriceListing>> {
        debug!(product_id = product_id, "Loading store prices");

        let listings = sqlx::query_as::<_, StorePriceListing>(
            r#"
            SELECT
                l.id AS listing_id,
                l.product_id,
                l.store_id,
                s.name AS store_name,
                s.website_url,
                l.price_cents
            FROM listings l
            INNER JOIN stores s ON l.store_id = s.id
            WHERE l.product_id = ?1
            ORDER BY l.price_cents ASC, l.store_id ASC, l.id ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(product_id = product_id, count = listings.len(), "Loaded store prices");
        Ok(listings)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
