//! # Category Repository
//!
//! Database operations for top-level categories (Electronics, Drinks, ...).
//! Category names are unique.

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use beiyetu_core::{Category, NewCategory};

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

    /// Inserts or replaces a category and returns its row id.
    ///
    /// A name that collides with another row's name replaces that row too
    /// (`OR REPLACE` applies to every unique constraint).
    pub async fn insert(&self, category: &NewCategory) -> DbResult<i64> {
        Self::insert_with(&self.pool, category).await
    }

    /// [`insert`](Self::insert) on any executor, such as an open transaction.
    pub async fn insert_with<'e, E>(executor: E, category: &NewCategory) -> DbResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(name = %category.name, id = ?category.id, "Inserting category");

        let result = sqlx::query("INSERT OR REPLACE INTO categories (id, name) VALUES (?1, ?2)")
            .bind(category.id)
            .bind(&category.name)
            .execute(executor)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Returns every category ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Category>> {
        debug!("Listing categories");

        let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    /// Gets a category by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        debug!(id = id, "Getting category by ID");

        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    /// Gets a category by its exact name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        debug!(name = %name, "Getting category by name");

        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    /// Counts categories. The seeder keys off this.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
