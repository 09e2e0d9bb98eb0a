//! # Subcategory Repository
//!
//! Subcategories sit between categories and products
//! (Drinks → Soda → Canned Soda).

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use beiyetu_core::{NewSubcategory, Subcategory};

/// Repository for subcategory database operations.
#[derive(Debug, Clone)]
pub struct SubcategoryRepository {
    pool: SqlitePool,
}

impl SubcategoryRepository {
    /// Creates a new SubcategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SubcategoryRepository { pool }
    }

    /// Inserts or replaces a subcategory and returns its row id.
    ///
    /// Fails with `ForeignKeyViolation` when `category_id` does not exist.
    pub async fn insert(&self, subcategory: &NewSubcategory) -> DbResult<i64> {
        Self::insert_with(&self.pool, subcategory).await
    }

    /// [`insert`](Self::insert) on any executor, such as an open transaction.
    pub async fn insert_with<'e, E>(executor: E, subcategory: &NewSubcategory) -> DbResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(
            name = %subcategory.name,
            category_id = subcategory.category_id,
            "Inserting subcategory"
        );

        let result = sqlx::query(
            "INSERT OR REPLACE INTO subcategories (id, name, category_id) VALUES (?1, ?2, ?3)",
        )
        .bind(subcategory.id)
        .bind(&subcategory.name)
        .bind(subcategory.category_id)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_all(&self) -> DbResult<Vec<Subcategory>> {
        let subcategories = sqlx::query_as::<_, Subcategory>(
            "SELECT id, name, category_id FROM subcategories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subcategories)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Subcategory>> {
        debug!(id = id, "Getting subcategory by ID");

        let subcategory = sqlx::query_as::<_, Subcategory>(
            "SELECT id, name, category_id FROM subcategories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subcategory)
    }

    /// Subcategories of one category, ordered by id.
    pub async fn get_by_category(&self, category_id: i64) -> DbResult<Vec<Subcategory>> {
        debug!(category_id = category_id, "Listing subcategories for category");

        let subcategories = sqlx::query_as::<_, Subcategory>(
            "SELECT id, name, category_id FROM subcategories WHERE category_id = ?1 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subcategories)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subcategories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_get_by_category() {
        let (db, ids) = fixtures::seeded().await;

        let subs = db.subcategories().get_by_category(ids.drinks).await.unwrap();
        let found: Vec<i64> = subs.iter().map(|s| s.id).collect();
        assert_eq!(found, vec![ids.soda, ids.milk]);
        assert!(subs.iter().all(|s| s.category_id == ids.drinks));

        assert!(db.subcategories().get_by_category(999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_and_count() {
        let (db, ids) = fixtures::seeded().await;
        let repo = db.subcategories();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
        assert_eq!(repo.get_by_id(ids.milk).await.unwrap().unwrap().name, "Milk");
    }

    #[tokio::test]
    async fn test_missing_category_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .subcategories()
            .insert(&NewSubcategory::new("Orphan", 42))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.subcategories().count().await.unwrap(), 0);
    }
}
