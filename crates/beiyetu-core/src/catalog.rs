//! # Catalog Aggregation
//!
//! The list shaping the screens need, as pure functions over snapshots
//! that were already fetched from the database.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Each Function Is Used                          │
//! │                                                                         │
//! │  Search box ─────────► filter_by_name(all, "soda")                     │
//! │                                                                         │
//! │  Categories screen ──► group_by_category(all)                          │
//! │                          Electronics: [TV, Fridge, Blender, ...]       │
//! │                          Pastries:    [Festive Bread, Cake]            │
//! │                                                                         │
//! │  Product card ───────► best_listing(listings)                          │
//! │                          "From KSh 57,999.00 at Naivas"                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is linear over small lists.

use crate::types::{CategoryGroup, ProductWithCategory, StorePriceListing};

/// Keeps the products whose name contains `query`, ignoring case.
///
/// A blank query means "show all" and returns the input unchanged.
///
/// ## Example
/// ```rust
/// use beiyetu_core::catalog::filter_by_name;
/// # use beiyetu_core::ProductWithCategory;
/// # let product = |id: i64, name: &str| ProductWithCategory {
/// #     id, name: name.to_string(), price_cents: 0, image_ref: String::new(),
/// #     description: None, category_name: "Drinks".to_string(),
/// #     subcategory_name: "Soda".to_string(),
/// # };
/// let products = vec![product(1, "Canned Soda"), product(2, "Water")];
///
/// let hits = filter_by_name(products.clone(), "SODA");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(filter_by_name(products, "  ").len(), 2);
/// ```
pub fn filter_by_name(products: Vec<ProductWithCategory>, query: &str) -> Vec<ProductWithCategory> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Partitions products by category name.
///
/// Categories appear in the order their first product appears, and each
/// group keeps its products in input order. Every product lands in exactly
/// one group.
pub fn group_by_category(products: Vec<ProductWithCategory>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for product in products {
        match groups
            .iter_mut()
            .find(|g| g.category_name == product.category_name)
        {
            Some(group) => group.products.push(product),
            None => groups.push(CategoryGroup {
                category_name: product.category_name.clone(),
                products: vec![product],
            }),
        }
    }

    groups
}

/// Picks the cheapest listing.
///
/// Equal prices are broken by the lowest store id, then the lowest listing
/// id, so the answer never depends on row order.
pub fn best_listing(listings: &[StorePriceListing]) -> Option<&StorePriceListing> {
    listings
        .iter()
        .min_by_key(|l| (l.price_cents, l.store_id, l.listing_id))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: &str) -> ProductWithCategory {
        ProductWithCategory {
            id,
            name: name.to_string(),
            price_cents: 10_000,
            image_ref: format!("img_{id}"),
            description: None,
            category_name: category.to_string(),
            subcategory_name: "Sub".to_string(),
        }
    }

    fn listing(listing_id: i64, store_id: i64, price_cents: i64) -> StorePriceListing {
        StorePriceListing {
            listing_id,
            product_id: 1,
            store_id,
            store_name: format!("Store {store_id}"),
            website_url: format!("https://store{store_id}.example"),
            price_cents,
        }
    }

    fn sample() -> Vec<ProductWithCategory> {
        vec![
            product(1, "Samsung 55\" TV", "Electronics"),
            product(2, "Festive Bread", "Pastries"),
            product(3, "Samsung Fridge", "Electronics"),
            product(4, "Canned Soda", "Drinks"),
            product(5, "Chocolate Cake", "Pastries"),
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let hits = filter_by_name(sample(), "samSUNG");
        let ids: Vec<i64> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let hits = filter_by_name(sample(), "read");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_filter_blank_query_returns_everything() {
        assert_eq!(filter_by_name(sample(), ""), sample());
        assert_eq!(filter_by_name(sample(), "   "), sample());
    }

    #[test]
    fn test_filter_every_name_finds_itself() {
        for p in sample() {
            let middle: String = p.name.chars().skip(1).take(4).collect();
            let hits = filter_by_name(sample(), &middle);
            assert!(hits.iter().any(|h| h.id == p.id), "{} not found", p.name);
        }
    }

    #[test]
    fn test_filter_no_match() {
        assert!(filter_by_name(sample(), "lawnmower").is_empty());
    }

    #[test]
    fn test_group_preserves_encounter_order() {
        let groups = group_by_category(sample());

        let names: Vec<&str> = groups.iter().map(|g| g.category_name.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Pastries", "Drinks"]);

        let electronics: Vec<i64> = groups[0].products.iter().map(|p| p.id).collect();
        assert_eq!(electronics, vec![1, 3]);
        let pastries: Vec<i64> = groups[1].products.iter().map(|p| p.id).collect();
        assert_eq!(pastries, vec![2, 5]);
    }

    #[test]
    fn test_group_is_a_partition() {
        let input = sample();
        let groups = group_by_category(input.clone());

        let mut seen: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.products.iter().map(|p| p.id))
            .collect();
        seen.sort_unstable();

        let mut expected: Vec<i64> = input.iter().map(|p| p.id).collect();
        expected.sort_unstable();

        assert_eq!(seen, expected);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_category(Vec::new()).is_empty());
    }

    #[test]
    fn test_best_listing_is_minimum() {
        let listings = vec![
            listing(1, 1, 5_799_900),
            listing(2, 2, 5_850_000),
            listing(3, 3, 6_099_900),
        ];
        let best = best_listing(&listings).map(|l| l.listing_id);
        assert_eq!(best, Some(1));

        let listings = vec![listing(7, 1, 2_799_900), listing(8, 3, 2_699_900)];
        let best = best_listing(&listings).map(|l| l.listing_id);
        assert_eq!(best, Some(8));
    }

    #[test]
    fn test_best_listing_tie_goes_to_lowest_store() {
        let listings = vec![listing(1, 3, 100_000), listing(2, 1, 100_000), listing(3, 2, 150_000)];
        let best = best_listing(&listings).map(|l| l.store_id);
        assert_eq!(best, Some(1));
    }

    #[test]
    fn test_best_listing_empty() {
        assert!(best_listing(&[]).is_none());
    }
}
