//! # Domain Types
//!
//! Core catalog types used throughout Bei Yetu.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Schema                                  │
//! │                                                                         │
//! │  ┌─────────────┐      ┌──────────────┐      ┌─────────────────┐        │
//! │  │  Category   │ 1──* │ Subcategory  │ 1──* │    Product      │        │
//! │  │  id, name   │      │ category_id  │      │ subcategory_id  │        │
//! │  └─────────────┘      └──────────────┘      │ price_cents     │        │
//! │                                             └────────┬────────┘        │
//! │                                                      │ 1               │
//! │  ┌─────────────┐                                     │                 │
//! │  │   Store     │ 1──────────────────────────* ┌──────┴────────┐        │
//! │  │ name, url   │                              │   Listing     │        │
//! │  └─────────────┘                              │ price_cents   │        │
//! │                                               └───────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rows vs Drafts
//! Every table has two shapes:
//! - The row (`Category`, `Product`, ...) as read back, with a definite `id`
//! - The draft (`NewCategory`, `NewProduct`, ...) handed to `insert`, whose
//!   `id` is `None` to let SQLite generate one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A top-level product category ("Electronics", "Drinks", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    /// Unique display label.
    pub name: String,
}

/// A category waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub id: Option<i64>,
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        NewCategory {
            id: None,
            name: name.into(),
        }
    }

    /// Pins the primary key, turning the insert into a replace.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

// =============================================================================
// Subcategory
// =============================================================================

/// A subcategory owned by exactly one category ("Televisions" under "Electronics").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Subcategory {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubcategory {
    pub id: Option<i64>,
    pub name: String,
    pub category_id: i64,
}

impl NewSubcategory {
    pub fn new(name: impl Into<String>, category_id: i64) -> Self {
        NewSubcategory {
            id: None,
            name: name.into(),
            category_id,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// A retailer whose prices are compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub website_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub id: Option<i64>,
    pub name: String,
    pub website_url: String,
}

impl NewStore {
    pub fn new(name: impl Into<String>, website_url: impl Into<String>) -> Self {
        NewStore {
            id: None,
            name: name.into(),
            website_url: website_url.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub subcategory_id: i64,
    /// Reference (list) price in cents.
    pub price_cents: i64,
    /// Name of the image asset shown on the product card.
    pub image_ref: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub id: Option<i64>,
    pub name: String,
    pub subcategory_id: i64,
    pub price_cents: i64,
    pub image_ref: String,
    pub description: Option<String>,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        subcategory_id: i64,
        price_cents: i64,
        image_ref: impl Into<String>,
    ) -> Self {
        NewProduct {
            id: None,
            name: name.into(),
            subcategory_id,
            price_cents,
            image_ref: image_ref.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

// =============================================================================
// Listing
// =============================================================================

/// The price of one product at one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Listing {
    pub id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub id: Option<i64>,
    pub product_id: i64,
    pub store_id: i64,
    pub price_cents: i64,
}

impl NewListing {
    pub fn new(product_id: i64, store_id: i64, price_cents: i64) -> Self {
        NewListing {
            id: None,
            product_id,
            store_id,
            price_cents,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

// =============================================================================
// Projections
// =============================================================================

/// A product joined with the display names of its subcategory and category.
///
/// This is the row every list screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductWithCategory {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub image_ref: String,
    pub description: Option<String>,
    pub category_name: String,
    pub subcategory_name: String,
}

impl ProductWithCategory {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A listing joined with its store, as shown on the product details screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StorePriceListing {
    pub listing_id: i64,
    pub product_id: i64,
    pub store_id: i64,
    pub store_name: String,
    pub website_url: String,
    pub price_cents: i64,
}

impl StorePriceListing {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A product together with every store price for it, cheapest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub product: ProductWithCategory,
    pub listings: Vec<StorePriceListing>,
}

impl ProductDetails {
    /// The cheapest listing, if the product is carried anywhere.
    pub fn best_listing(&self) -> Option<&StorePriceListing> {
        crate::catalog::best_listing(&self.listings)
    }
}

/// Products sharing one category name, in the order they were encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category_name: String,
    pub products: Vec<ProductWithCategory>,
}

// =============================================================================
// Comment
// =============================================================================

/// A user comment on a product listing. Held in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Product the comment belongs to, as the caller spelled it.
    pub product_id: String,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment stamped with a fresh id and the current time.
    pub fn new(
        product_id: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Comment {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: product_id.into(),
            author: author.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(listing_id: i64, store_id: i64, price_cents: i64) -> StorePriceListing {
        StorePriceListing {
            listing_id,
            product_id: 1,
            store_id,
            store_name: format!("Store {store_id}"),
            website_url: "https://example.com".to_string(),
            price_cents,
        }
    }

    #[test]
    fn test_new_product_builder() {
        let product = NewProduct::new("Water", 3, 4_000, "test_water")
            .with_description("Bottled water")
            .with_id(12);

        assert_eq!(product.id, Some(12));
        assert_eq!(product.price_cents, 4_000);
        assert_eq!(product.description.as_deref(), Some("Bottled water"));
    }

    #[test]
    fn test_drafts_default_to_generated_ids() {
        assert_eq!(NewCategory::new("Drinks").id, None);
        assert_eq!(NewSubcategory::new("Soda", 1).id, None);
        assert_eq!(NewStore::new("Naivas", "https://naivas.online/").id, None);
        assert_eq!(NewListing::new(1, 1, 100).id, None);
    }

    #[test]
    fn test_product_details_best_listing() {
        let details = ProductDetails {
            product: ProductWithCategory {
                id: 1,
                name: "Samsung 55\" TV".to_string(),
                price_cents: 5_999_999,
                image_ref: "test_tv".to_string(),
                description: None,
                category_name: "Electronics".to_string(),
                subcategory_name: "Televisions".to_string(),
            },
            listings: vec![listing(2, 2, 5_850_000), listing(1, 1, 5_799_900)],
        };

        let best = details.best_listing().map(|l| l.store_id);
        assert_eq!(best, Some(1));
    }

    #[test]
    fn test_comment_new_assigns_unique_ids() {
        let a = Comment::new("3", "Anonymous", "Great deal");
        let b = Comment::new("3", "Anonymous", "Great deal");

        assert_ne!(a.id, b.id);
        assert_eq!(a.product_id, "3");
        assert_eq!(a.text, "Great deal");
    }
}
