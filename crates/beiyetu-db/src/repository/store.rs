//! # Store Repository
//!
//! Retail stores whose prices are compared (Naivas, Quick Mart, Carrefour).

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use beiyetu_core::{NewStore, Store};

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Inserts or replaces a store and returns its row id.
    pub async fn insert(&self, store: &NewStore) -> DbResult<i64> {
        Self::insert_with(&self.pool, store).await
    }

    /// [`insert`](Self::insert) on any executor, such as an open transaction.
    pub async fn insert_with<'e, E>(executor: E, store: &NewStore) -> DbResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(name = %store.name, url = %store.website_url, "Inserting store");

        let result = sqlx::query(
            "INSERT OR REPLACE INTO stores (id, name, website_url) VALUES (?1, ?2, ?3)",
        )
        .bind(store.id)
        .bind(&store.name)
        .bind(&store.website_url)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_all(&self) -> DbResult<Vec<Store>> {
        let stores =
            sqlx::query_as::<_, Store>("SELECT id, name, website_url FROM stores ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(stores)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Store>> {
        debug!(id = id, "Getting store by ID");

        let store =
            sqlx::query_as::<_, Store>("SELECT id, name, website_url FROM stores WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(store)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
