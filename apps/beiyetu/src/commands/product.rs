//! # Product Commands
//!
//! Catalog commands: product list, search, best price, details and the
//! category view.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  User types "  MILK "                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  trim ── any length; no match is an empty list                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogState::search_products("MILK")                                  │
//! │       │  loads every product (joined with category names)               │
//! │       │  keeps names containing "milk", any case                        │
//! │       │  publishes the list (unless a newer request already did)        │
//! │       ▼                                                                 │
//! │  Vec<ProductDto>  (prices labelled with ConfigState::currency_symbol)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState};
use beiyetu_core::{CategoryGroup, CoreError, ProductDetails, ProductWithCategory, StorePriceListing};

/// Product DTO (Data Transfer Object).
///
/// Carries both the raw cents and a label formatted with the configured
/// currency symbol, so callers never do money arithmetic themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub price_display: String,
    pub image_ref: String,
    pub description: Option<String>,
    pub category_name: String,
    pub subcategory_name: String,
}

impl ProductDto {
    pub fn new(p: ProductWithCategory, config: &ConfigState) -> Self {
        ProductDto {
            price_display: config.format_currency(p.price()),
            id: p.id,
            name: p.name,
            price_cents: p.price_cents,
            image_ref: p.image_ref,
            description: p.description,
            category_name: p.category_name,
            subcategory_name: p.subcategory_name,
        }
    }
}

/// One store's price for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDto {
    pub listing_id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub store_name: String,
    pub website_url: String,
    pub price_cents: i64,
    pub price_display: String,
}

impl ListingDto {
    pub fn new(l: StorePriceListing, config: &ConfigState) -> Self {
        ListingDto {
            price_display: config.format_currency(l.price()),
            listing_id: l.listing_id,
            product_id: l.product_id,
            store_id: l.store_id,
            store_name: l.store_name,
            website_url: l.website_url,
            price_cents: l.price_cents,
        }
    }
}

/// Product details screen: the product, every store price (cheapest
/// first) and the best offer picked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailsDto {
    pub product: ProductDto,
    pub listings: Vec<ListingDto>,
    pub best: Option<ListingDto>,
}

impl ProductDetailsDto {
    pub fn new(d: ProductDetails, config: &ConfigState) -> Self {
        let best = d.best_listing().cloned().map(|l| ListingDto::new(l, config));
        ProductDetailsDto {
            product: ProductDto::new(d.product, config),
            listings: d.listings.into_iter().map(|l| ListingDto::new(l, config)).collect(),
            best,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroupDto {
    pub category_name: String,
    pub products: Vec<ProductDto>,
}

impl CategoryGroupDto {
    pub fn new(g: CategoryGroup, config: &ConfigState) -> Self {
        CategoryGroupDto {
            category_name: g.category_name,
            products: to_dtos(g.products, config),
        }
    }
}

fn to_dtos(products: Vec<ProductWithCategory>, config: &ConfigState) -> Vec<ProductDto> {
    products.into_iter().map(|p| ProductDto::new(p, config)).collect()
}

/// Loads the whole catalog (home screen).
pub async fn load_all_products(
    catalog: &CatalogState,
    config: &ConfigState,
) -> Result<Vec<ProductDto>, ApiError> {
    let start = Instant::now();
    debug!("load_all_products command");

    let dtos = to_dtos(catalog.load_all_products().await?, config);

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = dtos.len(),
        "load_all_products complete"
    );
    Ok(dtos)
}

/// Searches products by name.
///
/// ## Arguments
/// * `query` - Case-insensitive substring; blank returns everything
pub async fn search_products(
    catalog: &CatalogState,
    config: &ConfigState,
    query: String,
) -> Result<Vec<ProductDto>, ApiError> {
    let start = Instant::now();
    let query = query.trim();

    debug!(query = %query, "search_products command");

    let dtos = to_dtos(catalog.search_products(query).await?, config);

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = dtos.len(),
        query = %query,
        "search_products complete"
    );
    Ok(dtos)
}

/// Cheapest store price for a product; `None` if no store carries it.
pub async fn get_best_price(
    catalog: &CatalogState,
    config: &ConfigState,
    product_id: i64,
) -> Result<Option<ListingDto>, ApiError> {
    debug!(product_id, "get_best_price command");

    Ok(catalog
        .get_best_price(product_id)
        .await?
        .map(|l| ListingDto::new(l, config)))
}

/// Product details with every store price.
///
/// ## Errors
/// `NOT_FOUND` when the product does not exist.
pub async fn load_product_details(
    catalog: &CatalogState,
    config: &ConfigState,
    product_id: i64,
) -> Result<ProductDetailsDto, ApiError> {
    debug!(product_id, "load_product_details command");

    let details = catalog
        .load_product_details(product_id)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    Ok(ProductDetailsDto::new(details, config))
}

/// Loads the catalog and returns it grouped by category (categories screen).
pub async fn list_categories(
    catalog: &CatalogState,
    config: &ConfigState,
) -> Result<Vec<CategoryGroupDto>, ApiError> {
    debug!("list_categories command");

    catalog.load_all_products().await?;
    Ok(catalog
        .category_groups()
        .into_iter()
        .map(|g| CategoryGroupDto::new(g, config))
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use beiyetu_db::{seed_defaults, Database, DbConfig};

    async fn catalog() -> CatalogState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_defaults(&db).await.unwrap();
        CatalogState::new(db)
    }

    #[tokio::test]
    async fn test_load_all_products_dtos() {
        let catalog = catalog().await;
        let config = ConfigState::default();

        let products = load_all_products(&catalog, &config).await.unwrap();
        assert_eq!(products.len(), 19);
        assert_eq!(products[0].price_display, "KSh 59,999.99");
        assert_eq!(products[0].category_name, "Electronics");
    }

    #[tokio::test]
    async fn test_prices_use_configured_symbol() {
        let catalog = catalog().await;
        let config = ConfigState::from_lookup(|key| {
            (key == "BEIYETU_CURRENCY_SYMBOL").then(|| "USD".to_string())
        });

        let products = load_all_products(&catalog, &config).await.unwrap();
        assert_eq!(products[0].price_display, "USD 59,999.99");

        let details = load_product_details(&catalog, &config, products[0].id).await.unwrap();
        assert!(details.listings.iter().all(|l| l.price_display.starts_with("USD ")));

        let groups = list_categories(&catalog, &config).await.unwrap();
        assert_eq!(groups[0].products[0].price_display, "USD 59,999.99");
    }

    #[tokio::test]
    async fn test_search_trims_and_ignores_case() {
        let catalog = catalog().await;
        let config = ConfigState::default();

        let hits = search_products(&catalog, &config, "  BREAD ".into()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Festive Bread");
    }

    #[tokio::test]
    async fn test_empty_search_returns_everything() {
        let catalog = catalog().await;
        let config = ConfigState::default();

        let all = load_all_products(&catalog, &config).await.unwrap();
        assert_eq!(search_products(&catalog, &config, String::new()).await.unwrap(), all);
    }

    #[tokio::test]
    async fn test_long_search_returns_empty_list() {
        let catalog = catalog().await;
        let config = ConfigState::default();

        let hits = search_products(&catalog, &config, "x".repeat(101)).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_best_price_dto() {
        let catalog = catalog().await;
        let config = ConfigState::default();
        let products = search_products(&catalog, &config, "lipstick".into()).await.unwrap();

        let best = get_best_price(&catalog, &config, products[0].id).await.unwrap().unwrap();
        assert_eq!(best.store_name, "Carrefour");
        assert_eq!(best.price_display, "KSh 950.00");

        assert!(get_best_price(&catalog, &config, 10_000).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_details_include_best() {
        let catalog = catalog().await;
        let config = ConfigState::default();
        let soda = search_products(&catalog, &config, "soda".into()).await.unwrap().remove(0);

        let details = load_product_details(&catalog, &config, soda.id).await.unwrap();
        assert_eq!(details.product, soda);
        assert_eq!(details.listings.len(), 3);
        assert_eq!(details.best.as_ref(), details.listings.first());
        assert_eq!(details.best.unwrap().store_name, "Quick Mart");
    }

    #[tokio::test]
    async fn test_details_not_found() {
        let catalog = catalog().await;

        let err = load_product_details(&catalog, &ConfigState::default(), 31_337)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 31337");
    }

    #[tokio::test]
    async fn test_list_categories() {
        let catalog = catalog().await;
        let config = ConfigState::default();
        search_products(&catalog, &config, "milk".into()).await.unwrap();

        let groups = list_categories(&catalog, &config).await.unwrap();
        assert_eq!(groups.len(), 7);

        let total: usize = groups.iter().map(|g| g.products.len()).sum();
        assert_eq!(total, 19);

        let cereals = groups.iter().find(|g| g.category_name == "Cereals").unwrap();
        let names: Vec<&str> = cereals.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Dawaat Basmati Rice", "Pembe 2kg Maize Flour", "EXE 2kgs All-purpose Flour"]
        );
    }
}
