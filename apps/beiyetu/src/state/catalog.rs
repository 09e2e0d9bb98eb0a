//! # Catalog State
//!
//! The view-model behind the product list, search, category and detail
//! screens. Every query goes to the database; results are published to
//! `watch` channels that any number of readers can observe.
//!
//! ## Publishing and Stale Results
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sequenced Publishing                                 │
//! │                                                                         │
//! │  search_products("mi")  ── seq 4 ──► query ......... slow ...┐        │
//! │  search_products("milk") ─ seq 5 ──► query ──┐                │        │
//! │                                              ▼                ▼        │
//! │                                  publish(seq 5) ✓     publish(seq 4)   │
//! │                                  snapshot.seq = 5     4 <= 5: dropped  │
//! │                                                                         │
//! │  products_tx: watch::Sender<ProductsSnapshot>                          │
//! │  details_tx:  watch::Sender<DetailsSnapshot>                           │
//! │        │                                                                │
//! │        └──► subscribe_products() / subscribe_details()                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sequence numbers come from one counter shared by both channels and are
//! taken before the query starts. A result is written only when its number
//! is greater than the one already published, so an older request that
//! finishes late can never replace a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use beiyetu_core::catalog::{self, filter_by_name, group_by_category};
use beiyetu_core::{CategoryGroup, ProductDetails, ProductWithCategory, StorePriceListing};
use beiyetu_db::{Database, DbResult};

/// The published product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductsSnapshot {
    /// Sequence number of the request that produced this list (0 = nothing yet).
    pub seq: u64,
    pub products: Vec<ProductWithCategory>,
}

/// The published product detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsSnapshot {
    pub seq: u64,
    /// `None` until a lookup runs, and after a lookup for a missing product.
    pub details: Option<ProductDetails>,
}

/// Catalog view-model over an injected [`Database`].
#[derive(Debug)]
pub struct CatalogState {
    db: Database,
    next_seq: AtomicU64,
    products_tx: watch::Sender<ProductsSnapshot>,
    details_tx: watch::Sender<DetailsSnapshot>,
}

impl CatalogState {
    /// Creates the state with empty snapshots.
    pub fn new(db: Database) -> Self {
        let (products_tx, _) = watch::channel(ProductsSnapshot::default());
        let (details_tx, _) = watch::channel(DetailsSnapshot::default());

        CatalogState {
            db,
            next_seq: AtomicU64::new(0),
            products_tx,
            details_tx,
        }
    }

    /// The database this state reads from.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Receiver for the product list snapshot.
    pub fn subscribe_products(&self) -> watch::Receiver<ProductsSnapshot> {
        self.products_tx.subscribe()
    }

    /// Receiver for the detail snapshot.
    pub fn subscribe_details(&self) -> watch::Receiver<DetailsSnapshot> {
        self.details_tx.subscribe()
    }

    /// Copy of the current product list snapshot.
    pub fn products_snapshot(&self) -> ProductsSnapshot {
        self.products_tx.borrow().clone()
    }

    /// Copy of the current detail snapshot.
    pub fn details_snapshot(&self) -> DetailsSnapshot {
        self.details_tx.borrow().clone()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Loads every product with its category names and publishes the list.
    pub async fn load_all_products(&self) -> DbResult<Vec<ProductWithCategory>> {
        let seq = self.begin_request();
        debug!(seq, "load_all_products");

        let products = self.db.products().get_all_with_category().await?;
        self.publish_products(seq, products.clone());

        Ok(products)
    }

    /// Loads every product, keeps those whose name contains `query`
    /// (case-insensitive) and publishes the result.
    ///
    /// A blank query keeps everything.
    pub async fn search_products(&self, query: &str) -> DbResult<Vec<ProductWithCategory>> {
        let seq = self.begin_request();
        debug!(seq, query = %query, "search_products");

        let products = self.db.products().get_all_with_category().await?;
        let matches = filter_by_name(products, query);
        debug!(seq, count = matches.len(), "search_products matched");

        self.publish_products(seq, matches.clone());
        Ok(matches)
    }

    /// The cheapest store listing for a product, or `None` when it has no
    /// listings. Does not publish.
    pub async fn get_best_price(&self, product_id: i64) -> DbResult<Option<StorePriceListing>> {
        let listings = self.db.listings().get_sorted_for_product(product_id).await?;
        let best = catalog::best_listing(&listings).cloned();

        debug!(
            product_id,
            best_store = ?best.as_ref().map(|l| l.store_name.as_str()),
            "get_best_price"
        );
        Ok(best)
    }

    /// Loads a product and its store prices (cheapest first) and publishes
    /// them. A missing product publishes and returns `None`.
    pub async fn load_product_details(&self, product_id: i64) -> DbResult<Option<ProductDetails>> {
        let seq = self.begin_request();
        debug!(seq, product_id, "load_product_details");

        let details = match self.db.products().get_with_category_by_id(product_id).await? {
            Some(product) => {
                let listings = self.db.listings().get_sorted_for_product(product_id).await?;
                Some(ProductDetails { product, listings })
            }
            None => None,
        };

        self.publish_details(seq, details.clone());
        Ok(details)
    }

    /// Groups the currently published product list by category name.
    pub fn category_groups(&self) -> Vec<CategoryGroup> {
        let products = self.products_tx.borrow().products.clone();
        group_by_category(products)
    }

    // =========================================================================
    // Publishing
    // =========================================================================

    fn begin_request(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns whether the snapshot was replaced.
    fn publish_products(&self, seq: u64, products: Vec<ProductWithCategory>) -> bool {
        let published = self.products_tx.send_if_modified(|current| {
            if seq <= current.seq {
                return false;
            }
            current.seq = seq;
            current.products = products;
            true
        });

        if !published {
            debug!(seq, "Dropped stale product list");
        }
        published
    }

    fn publish_details(&self, seq: u64, details: Option<ProductDetails>) -> bool {
        let published = self.details_tx.send_if_modified(|current| {
            if seq <= current.seq {
                return false;
            }
            current.seq = seq;
            current.details = details;
            true
        });

        if !published {
            debug!(seq, "Dropped stale product details");
        }
        published
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use beiyetu_db::{seed_defaults, DbConfig};

    async fn seeded_state() -> CatalogState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_defaults(&db).await.unwrap();
        CatalogState::new(db)
    }

    fn find<'a>(products: &'a [ProductWithCategory], name: &str) -> &'a ProductWithCategory {
        products.iter().find(|p| p.name == name).unwrap()
    }

    #[tokio::test]
    async fn test_load_all_publishes() {
        let state = seeded_state().await;
        let mut rx = state.subscribe_products();

        let products = state.load_all_products().await.unwrap();
        assert_eq!(products.len(), 19);

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.seq, 1);
        assert_eq!(snapshot.products, products);
    }

    #[tokio::test]
    async fn test_search_finds_every_product_by_substring() {
        let state = seeded_state().await;
        let all = state.load_all_products().await.unwrap();

        for product in &all {
            let needle: String = product.name.chars().skip(1).take(4).collect();
            let upper = needle.to_uppercase();

            let hits = state.search_products(&upper).await.unwrap();
            assert!(
                hits.iter().any(|p| p.id == product.id),
                "{:?} should find {}",
                upper,
                product.name
            );
        }
    }

    #[tokio::test]
    async fn test_empty_search_equals_load_all() {
        let state = seeded_state().await;

        let all = state.load_all_products().await.unwrap();
        assert_eq!(state.search_products("").await.unwrap(), all);
        assert_eq!(state.search_products("   ").await.unwrap(), all);
    }

    #[tokio::test]
    async fn test_search_no_match_publishes_empty() {
        let state = seeded_state().await;
        state.load_all_products().await.unwrap();

        let hits = state.search_products("zzz").await.unwrap();
        assert!(hits.is_empty());
        assert!(state.products_snapshot().products.is_empty());
    }

    #[tokio::test]
    async fn test_best_price_is_minimum() {
        let state = seeded_state().await;
        let all = state.load_all_products().await.unwrap();

        for product in &all {
            let best = state.get_best_price(product.id).await.unwrap().unwrap();
            let listings = state
                .database()
                .listings()
                .get_sorted_for_product(product.id)
                .await
                .unwrap();
            assert!(listings.iter().all(|l| best.price_cents <= l.price_cents));
        }

        let tv = find(&all, "Samsung 55\" TV");
        let best = state.get_best_price(tv.id).await.unwrap().unwrap();
        assert_eq!(best.store_name, "Naivas");
        assert_eq!(best.price_cents, 5_799_900);
    }

    #[tokio::test]
    async fn test_best_price_without_listings() {
        let state = seeded_state().await;

        assert!(state.get_best_price(9_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_product_details() {
        let state = seeded_state().await;
        let mut rx = state.subscribe_details();
        let all = state.load_all_products().await.unwrap();
        let milk = find(&all, "Brookside Milk");

        let details = state.load_product_details(milk.id).await.unwrap().unwrap();
        assert_eq!(details.product.name, "Brookside Milk");
        let stores: Vec<&str> = details.listings.iter().map(|l| l.store_name.as_str()).collect();
        assert_eq!(stores, vec!["Carrefour", "Naivas", "Quick Mart"]);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().details.as_ref(), Some(&details));
    }

    #[tokio::test]
    async fn test_missing_product_details_publish_none() {
        let state = seeded_state().await;
        let all = state.load_all_products().await.unwrap();
        state.load_product_details(all[0].id).await.unwrap();

        assert!(state.load_product_details(424_242).await.unwrap().is_none());

        let snapshot = state.details_snapshot();
        assert!(snapshot.details.is_none());
        assert!(snapshot.seq > 0);
    }

    #[tokio::test]
    async fn test_category_groups_cover_snapshot() {
        let state = seeded_state().await;
        let all = state.load_all_products().await.unwrap();

        let groups = state.category_groups();
        let names: Vec<&str> = groups.iter().map(|g| g.category_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Electronics", "Pastries", "Detergents", "Drinks", "Beauty", "Organic", "Cereals"]
        );

        let regrouped: Vec<ProductWithCategory> =
            groups.into_iter().flat_map(|g| g.products).collect();
        assert_eq!(regrouped, all);
    }

    #[tokio::test]
    async fn test_stale_publish_is_discarded() {
        let state = seeded_state().await;

        let older = state.begin_request();
        let newer = state.begin_request();
        assert!(newer > older);

        let fresh = state.database().products().get_by_category_name("Drinks").await.unwrap();
        assert!(state.publish_products(newer, fresh.clone()));

        // The older request lands late with the full list
        let late = state.database().products().get_all_with_category().await.unwrap();
        assert!(!state.publish_products(older, late));

        let snapshot = state.products_snapshot();
        assert_eq!(snapshot.seq, newer);
        assert_eq!(snapshot.products, fresh);
    }

    #[tokio::test]
    async fn test_stale_details_are_discarded() {
        let state = seeded_state().await;

        let older = state.begin_request();
        let newer = state.begin_request();

        assert!(state.publish_details(newer, None));
        let mut rx = state.subscribe_details();
        assert!(!state.publish_details(
            older,
            Some(ProductDetails {
                product: state.load_all_products().await.unwrap().remove(0),
                listings: Vec::new(),
            })
        ));

        assert!(!rx.has_changed().unwrap());
        assert_eq!(state.details_snapshot().seq, newer);
        assert!(state.details_snapshot().details.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_searches_keep_latest() {
        let state = seeded_state().await;

        let (a, b) = tokio::join!(state.search_products("soda"), state.search_products("milk"));
        a.unwrap();
        let milk = b.unwrap();

        // Request 2 ("milk") holds the highest sequence number
        let snapshot = state.products_snapshot();
        assert_eq!(snapshot.seq, 2);
        assert_eq!(snapshot.products, milk);
    }
}
