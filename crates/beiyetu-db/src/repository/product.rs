//! # Product Repository
//!
//! Database operations for products, including the joined
//! product → subcategory → category projection the catalog screens use.
//!
//! ## Joined Projection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 get_all_with_category()                                 │
//! │                                                                         │
//! │  products p                                                            │
//! │    INNER JOIN subcategories s ON p.subcategory_id = s.id               │
//! │    INNER JOIN categories    c ON s.category_id    = c.id               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌────┬────────────────┬─────────┬───────────┬──────────┬──────────┐  │
//! │  │ id │ name           │ price   │ image_ref │ category │ subcat.  │  │
//! │  ├────┼────────────────┼─────────┼───────────┼──────────┼──────────┤  │
//! │  │ 11 │ Canned Soda    │ 9999    │ test_soda │ Drinks   │ Soda     │  │
//! │  │ 12 │ Water          │ 4000    │ test_water│ Drinks   │ Water    │  │
//! │  └────┴────────────────┴─────────┴───────────┴──────────┴──────────┘  │
//! │                                                                         │
//! │  One row per product, ordered by product id. Foreign keys guarantee   │
//! │  the inner joins never drop a product.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use beiyetu_core::{NewProduct, Product, ProductWithCategory};

/// Column list shared by the joined queries.
const WITH_CATEGORY_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price_cents,
        p.image_ref,
        p.description,
        c.name AS category_name,
        s.name AS subcategory_name
    FROM products p
    INNER JOIN subcategories s ON p.subcategory_id = s.id
    INNER JOIN categories c ON s.category_id = c.id
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let everything = repo.get_all_with_category().await?;
/// let drinks = repo.get_by_category_name("Drinks").await?;
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

    /// Inserts or replaces a product and returns its row id.
    ///
    /// ## Errors
    /// - `ForeignKeyViolation`: `subcategory_id` does not exist
    /// - `QueryFailed`: negative price (CHECK constraint)
    pub async fn insert(&self, product: &NewProduct) -> DbResult<i64> {
        Self::insert_with(&self.pool, product).await
    }

    /// [`insert`](Self::insert) on any executor, such as an open transaction.
    pub async fn insert_with<'e, E>(executor: E, product: &NewProduct) -> DbResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(
            name = %product.name,
            subcategory_id = product.subcategory_id,
            price_cents = product.price_cents,
            "Inserting product"
        );

        let result = sqlx::query(
            r#"
            INSERT OR REPLACE INTO products (
                id, name, subcategory_id, price_cents, image_ref, description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.subcategory_id)
        .bind(product.price_cents)
        .bind(&product.image_ref)
        .bind(&product.description)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Returns every product row ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, subcategory_id, price_cents, image_ref, description
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product row by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        debug!(id = id, "Getting product by ID");

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, subcategory_id, price_cents, image_ref, description
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Returns every product with its category and subcategory names,
    /// ordered by product id.
    pub async fn get_all_with_category(&self) -> DbResult<Vec<ProductWithCategory>> {
        debug!("Loading products with category names");

        let sql = format!("{WITH_CATEGORY_SELECT} ORDER BY p.id");
        let products = sqlx::query_as::<_, ProductWithCategory>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    /// Joined projection for a single product.
    pub async fn get_with_category_by_id(&self, id: i64) -> DbResult<Option<ProductWithCategory>> {
        debug!(id = id, "Getting product with category by ID");

        let sql = format!("{WITH_CATEGORY_SELECT} WHERE p.id = ?1");
        let product = sqlx::query_as::<_, ProductWithCategory>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Products whose category has exactly this name, ordered by id.
    pub async fn get_by_category_name(&self, category_name: &str) -> DbResult<Vec<ProductWithCategory>> {
        debug!(category = %category_name, "Loading products for category");

        let sql = format!("{WITH_CATEGORY_SELECT} WHERE c.name = ?1 ORDER BY p.id");
        let products = sqlx::query_as::<_, ProductWithCategory>(&sql)
            .bind(category_name)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::fixtures;
    use beiyetu_core::{NewCategory, NewSubcategory};

    #[tokio::test]
    async fn test_get_all_with_category_joins_names() {
        let (db, ids) = fixtures::seeded().await;

        let products = db.products().get_all_with_category().await.unwrap();
        assert_eq!(products.len(), 2);

        let soda = &products[0];
        assert_eq!(soda.id, ids.canned_soda);
        assert_eq!(soda.name, "Canned Soda");
        assert_eq!(soda.category_name, "Drinks");
        assert_eq!(soda.subcategory_name, "Soda");
        assert_eq!(soda.price_cents, 9_999);

        assert_eq!(products[1].id, ids.brookside);
        assert_eq!(products[1].subcategory_name, "Milk");
    }

    #[tokio::test]
    async fn test_get_with_category_by_id() {
        let (db, ids) = fixtures::seeded().await;
        let repo = db.products();

        let milk = repo.get_with_category_by_id(ids.brookside).await.unwrap().unwrap();
        assert_eq!(milk.name, "Brookside Milk");
        assert_eq!(milk.category_name, "Drinks");

        assert!(repo.get_with_category_by_id(9_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_category_name() {
        let (db, ids) = fixtures::seeded().await;

        let pastries = db.categories().insert(&NewCategory::new("Pastries")).await.unwrap();
        let bread = db
            .subcategories()
            .insert(&NewSubcategory::new("Bread", pastries))
            .await
            .unwrap();
        db.products()
            .insert(&NewProduct::new("Festive Bread", bread, 6_000, "test_bread"))
            .await
            .unwrap();

        let drinks = db.products().get_by_category_name("Drinks").await.unwrap();
        let drink_ids: Vec<i64> = drinks.iter().map(|p| p.id).collect();
        assert_eq!(drink_ids, vec![ids.canned_soda, ids.brookside]);

        let baked = db.products().get_by_category_name("Pastries").await.unwrap();
        assert_eq!(baked.len(), 1);
        assert_eq!(baked[0].name, "Festive Bread");

        assert!(db.products().get_by_category_name("Toys").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_description_round_trips() {
        let (db, ids) = fixtures::seeded().await;
        let repo = db.products();

        let id = repo
            .insert(
                &NewProduct::new("Water", ids.soda, 4_000, "test_water")
                    .with_description("500ml still water"),
            )
            .await
            .unwrap();

        let row = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.description.as_deref(), Some("500ml still water"));
        assert_eq!(row.subcategory_id, ids.soda);
        assert_eq!(repo.count().await.unwrap(), 3);
        assert_eq!(repo.get_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_subcategory_rejected() {
        let (db, _) = fixtures::seeded().await;

        let err = db
            .products()
            .insert(&NewProduct::new("Ghost", 404, 100, "test_ghost"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let (db, ids) = fixtures::seeded().await;

        let err = db
            .products()
            .insert(&NewProduct::new("Refund", ids.soda, -1, "test_refund"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::QueryFailed(_)));
    }
}
