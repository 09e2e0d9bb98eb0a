//! # Default Catalog Seeder
//!
//! Fills an empty database with the default catalog the app ships with.
//!
//! ## Seeding Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    seed_defaults(&db)                                   │
//! │                                                                         │
//! │  categories().count() > 0 ? ──yes──► Skipped { existing_categories }   │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  1. categories      (7)   ── ids captured                              │
//! │       ▼                                                                 │
//! │  2. subcategories   (19)  ── keyed to category ids                     │
//! │       ▼                                                                 │
//! │  3. products        (19)  ── keyed to subcategory ids                  │
//! │       ▼                                                                 │
//! │  4. stores          (3)   ── ids captured                              │
//! │       ▼                                                                 │
//! │  5. listings        (57)  ── one per product per store                 │
//! │       ▼                                                                 │
//! │  Seeded(SeedReport)                                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order follows the foreign-key chain. All five phases run in one
//! transaction, so a failed run leaves the database empty and the next
//! launch seeds again.

use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::category::CategoryRepository;
use crate::repository::listing::ListingRepository;
use crate::repository::product::ProductRepository;
use crate::repository::store::StoreRepository;
use crate::repository::subcategory::SubcategoryRepository;
use beiyetu_core::validation::{validate_name, validate_price_cents, validate_website_url};
use beiyetu_core::{NewCategory, NewListing, NewProduct, NewStore, NewSubcategory, ValidationError};

// =============================================================================
// Default Data
// =============================================================================

/// A store from the default catalog.
#[derive(Debug, Clone, Copy)]
pub struct DefaultStore {
    pub name: &'static str,
    pub website_url: &'static str,
}

/// A product from the default catalog.
///
/// `store_prices` is aligned with [`DEFAULT_STORES`].
#[derive(Debug, Clone, Copy)]
pub struct DefaultProduct {
    pub name: &'static str,
    pub price_cents: i64,
    pub image_ref: &'static str,
    pub description: &'static str,
    pub store_prices: [i64; 3],
}

#[derive(Debug, Clone, Copy)]
pub struct DefaultSubcategory {
    pub name: &'static str,
    pub products: &'static [DefaultProduct],
}

#[derive(Debug, Clone, Copy)]
pub struct DefaultCategory {
    pub name: &'static str,
    pub subcategories: &'static [DefaultSubcategory],
}

pub const DEFAULT_STORES: [DefaultStore; 3] = [
    DefaultStore {
        name: "Naivas",
        website_url: "https://naivas.online/",
    },
    DefaultStore {
        name: "Quick Mart",
        website_url: "https://www.quickmart.co.ke/",
    },
    DefaultStore {
        name: "Carrefour",
        website_url: "https://www.carrefour.ke/",
    },
];

const fn product(
    name: &'static str,
    price_cents: i64,
    image_ref: &'static str,
    description: &'static str,
    store_prices: [i64; 3],
) -> DefaultProduct {
    DefaultProduct {
        name,
        price_cents,
        image_ref,
        description,
        store_prices,
    }
}

/// The default catalog. Prices are KES cents; store prices are
/// `[Naivas, Quick Mart, Carrefour]`.
pub const DEFAULT_CATALOG: &[DefaultCategory] = &[
    DefaultCategory {
        name: "Electronics",
        subcategories: &[
            DefaultSubcategory {
                name: "Televisions",
                products: &[product(
                    "Samsung 55\" TV",
                    5_999_999,
                    "test_tv",
                    "55 inch 4K smart television.",
                    [5_799_900, 5_850_000, 6_099_900],
                )],
            },
            DefaultSubcategory {
                name: "Fridges",
                products: &[product(
                    "Samsung Fridge",
                    9_099_900,
                    "test_fridge",
                    "Double door frost-free refrigerator.",
                    [9_899_900, 9_750_000, 10_099_900],
                )],
            },
            DefaultSubcategory {
                name: "Blenders",
                products: &[product(
                    "Ramtons Blender",
                    3_000_000,
                    "test_blender",
                    "1.5 litre countertop blender with grinder mill.",
                    [2_799_900, 2_850_000, 2_699_900],
                )],
            },
            DefaultSubcategory {
                name: "Washing Machines",
                products: &[product(
                    "Hisense 10.5 kgs",
                    8_500_000,
                    "test_washm",
                    "Front load washing machine, 10.5 kg drum.",
                    [8_599_900, 8_850_000, 8_699_900],
                )],
            },
        ],
    },
    DefaultCategory {
        name: "Pastries",
        subcategories: &[
            DefaultSubcategory {
                name: "Bread",
                products: &[product(
                    "Festive Bread",
                    6_000,
                    "test_bread",
                    "400g white sliced loaf.",
                    [6_700, 7_000, 6_500],
                )],
            },
            DefaultSubcategory {
                name: "Cake",
                products: &[product(
                    "Chocolate Cake",
                    20_000,
                    "test_cake",
                    "Chocolate sponge slice.",
                    [21_500, 20_000, 21_000],
                )],
            },
        ],
    },
    DefaultCategory {
        name: "Detergents",
        subcategories: &[
            DefaultSubcategory {
                name: "Laundry",
                products: &[product(
                    "Ultra Concentrated Laundry Soap",
                    70_000,
                    "test_laundry",
                    "Liquid laundry detergent for hand and machine wash.",
                    [75_000, 71_000, 70_000],
                )],
            },
            DefaultSubcategory {
                name: "Dish Soap",
                products: &[product(
                    "Cadia dish soap",
                    20_000,
                    "test_dish",
                    "Lemon dishwashing liquid.",
                    [24_000, 23_000, 25_000],
                )],
            },
            DefaultSubcategory {
                name: "Bleaching Agents",
                products: &[product(
                    "Concentrated Bleach",
                    90_000,
                    "test_bleach",
                    "Household bleach for whites and surfaces.",
                    [81_500, 90_000, 85_000],
                )],
            },
        ],
    },
    DefaultCategory {
        name: "Drinks",
        subcategories: &[
            DefaultSubcategory {
                name: "Milk",
                products: &[product(
                    "Brookside Milk",
                    19_000,
                    "test_milk",
                    "Long life whole milk, 1 litre.",
                    [16_000, 17_000, 15_000],
                )],
            },
            DefaultSubcategory {
                name: "Soda",
                products: &[product(
                    "Canned Soda",
                    9_999,
                    "test_soda",
                    "330ml carbonated soft drink.",
                    [16_000, 15_000, 17_000],
                )],
            },
            DefaultSubcategory {
                name: "Water",
                products: &[product(
                    "Water",
                    4_000,
                    "test_water",
                    "500ml still drinking water.",
                    [4_000, 5_000, 6_000],
                )],
            },
        ],
    },
    DefaultCategory {
        name: "Beauty",
        subcategories: &[
            DefaultSubcategory {
                name: "Skin Care",
                products: &[product(
                    "Eucerin Sunscreen",
                    100_000,
                    "test_skin",
                    "SPF 50 face sunscreen.",
                    [100_000, 120_000, 125_000],
                )],
            },
            DefaultSubcategory {
                name: "Make Up",
                products: &[product(
                    "Fenti Lipstick",
                    100_000,
                    "test_makeup",
                    "Long wear matte lipstick.",
                    [105_000, 99_999, 95_000],
                )],
            },
        ],
    },
    DefaultCategory {
        name: "Organic",
        subcategories: &[
            DefaultSubcategory {
                name: "Fruits",
                products: &[product(
                    "Apples",
                    19_999,
                    "test_fruit",
                    "Red apples, 1 kg.",
                    [29_000, 28_000, 30_000],
                )],
            },
            DefaultSubcategory {
                name: "Vegetables",
                products: &[product(
                    "Clustered Veggies",
                    29_999,
                    "test_veggies",
                    "Mixed fresh vegetable bundle.",
                    [18_000, 19_000, 17_000],
                )],
            },
        ],
    },
    DefaultCategory {
        name: "Cereals",
        subcategories: &[
            DefaultSubcategory {
                name: "Rice",
                products: &[product(
                    "Dawaat Basmati Rice",
                    30_000,
                    "test_rice",
                    "Long grain basmati rice, 1 kg.",
                    [40_000, 37_000, 35_000],
                )],
            },
            DefaultSubcategory {
                name: "Maize",
                products: &[product(
                    "Pembe 2kg Maize Flour",
                    10_000,
                    "test_maize",
                    "Sifted maize meal, 2 kg.",
                    [11_000, 12_500, 13_000],
                )],
            },
            DefaultSubcategory {
                name: "Wheat",
                products: &[product(
                    "EXE 2kgs All-purpose Flour",
                    20_000,
                    "test_wheat",
                    "All-purpose wheat flour, 2 kg.",
                    [20_000, 19_500, 21_000],
                )],
            },
        ],
    },
];

/// Checks names, prices and URLs of the default data.
pub fn validate_catalog() -> Result<(), ValidationError> {
    for store in &DEFAULT_STORES {
        validate_name("store name", store.name)?;
        validate_website_url(store.website_url)?;
    }

    for category in DEFAULT_CATALOG {
        validate_name("category name", category.name)?;
        for sub in category.subcategories {
            validate_name("subcategory name", sub.name)?;
            for product in sub.products {
                validate_name("product name", product.name)?;
                validate_price_cents(product.price_cents)?;
                for price in product.store_prices {
                    validate_price_cents(price)?;
                }
            }
        }
    }

    Ok(())
}

// =============================================================================
// Seeder
// =============================================================================

/// Row counts inserted by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub subcategories: usize,
    pub stores: usize,
    pub products: usize,
    pub listings: usize,
}

/// What [`seed_defaults`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The database already had categories; nothing was written.
    Skipped { existing_categories: i64 },
    /// The default catalog was inserted.
    Seeded(SeedReport),
}

/// Seeds the default catalog if the database has no categories.
///
/// ## Errors
/// Any storage failure aborts the run and is returned as is; nothing from
/// the failed run is kept.
pub async fn seed_defaults(db: &Database) -> DbResult<SeedOutcome> {
    let existing_categories = db.categories().count().await?;
    if existing_categories > 0 {
        info!(existing_categories, "Catalog already present, skipping seed");
        return Ok(SeedOutcome::Skipped { existing_categories });
    }

    validate_catalog().map_err(|e| DbError::Internal(format!("invalid default catalog: {e}")))?;

    info!("Seeding default catalog");
    let report = insert_catalog(db, &DEFAULT_STORES, DEFAULT_CATALOG).await?;

    info!(
        categories = report.categories,
        subcategories = report.subcategories,
        products = report.products,
        stores = report.stores,
        listings = report.listings,
        "Default catalog seeded"
    );

    Ok(SeedOutcome::Seeded(report))
}

/// Inserts a catalog in one transaction. Rolled back on any error.
async fn insert_catalog(
    db: &Database,
    stores: &[DefaultStore],
    catalog: &[DefaultCategory],
) -> DbResult<SeedReport> {
    let mut report = SeedReport::default();
    let mut tx = db.pool().begin().await?;

    // 1. categories
    let mut category_ids = Vec::with_capacity(catalog.len());
    for category in catalog {
        let id = CategoryRepository::insert_with(&mut *tx, &NewCategory::new(category.name)).await?;
        category_ids.push(id);
        report.categories += 1;
    }

    // 2. subcategories
    let mut subcategory_rows = Vec::new();
    for (category, category_id) in catalog.iter().zip(&category_ids) {
        for sub in category.subcategories {
            let draft = NewSubcategory::new(sub.name, *category_id);
            let id = SubcategoryRepository::insert_with(&mut *tx, &draft).await?;
            subcategory_rows.push((sub, id));
            report.subcategories += 1;
        }
    }

    // 3. products
    let mut product_rows = Vec::new();
    for (sub, subcategory_id) in subcategory_rows {
        for item in sub.products {
            let draft = NewProduct::new(item.name, subcategory_id, item.price_cents, item.image_ref)
                .with_description(item.description);
            let id = ProductRepository::insert_with(&mut *tx, &draft).await?;
            product_rows.push((item, id));
            report.products += 1;
        }
    }

    // 4. stores
    let mut store_ids = Vec::with_capacity(stores.len());
    for store in stores {
        let draft = NewStore::new(store.name, store.website_url);
        let id = StoreRepository::insert_with(&mut *tx, &draft).await?;
        store_ids.push(id);
        report.stores += 1;
    }

    // 5. listings
    for (item, product_id) in &product_rows {
        for (price_cents, store_id) in item.store_prices.iter().zip(&store_ids) {
            let draft = NewListing::new(*product_id, *store_id, *price_cents);
            ListingRepository::insert_with(&mut *tx, &draft).await?;
            report.listings += 1;
        }
        debug!(product = item.name, "Seeded store prices");
    }

    tx.commit().await?;
    Ok(report)
}

// =============================================================================
// Unit Tests
// =============================================================================
