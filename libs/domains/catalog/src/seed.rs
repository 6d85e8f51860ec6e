//! Initial catalog contents for a fresh store.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::CatalogResult;
use crate::models::{Category, Product};
use crate::repository::CatalogRepository;

const SEED_CATEGORIES: [(&str, &str); 4] = [
    ("Electronics", "Electronic devices and gadgets"),
    ("Books", "Books and publications"),
    ("Clothing", "Apparel and accessories"),
    ("Home & Garden", "Home improvement and garden items"),
];

// (name, description, price in cents, index into SEED_CATEGORIES)
const SEED_PRODUCTS: [(&str, &str, i64, usize); 5] = [
    (
        "Laptop",
        "High-performance laptop with latest specs",
        99_999,
        0,
    ),
    (
        "Smartphone",
        "Latest smartphone model with advanced features",
        69_999,
        0,
    ),
    (
        "Programming Book",
        "Learn C# programming from scratch",
        4_999,
        1,
    ),
    ("T-Shirt", "Comfortable cotton t-shirt", 1_999, 2),
    (
        "Garden Tool Set",
        "Complete set of essential garden tools",
        8_999,
        3,
    ),
];

/// Populate an empty store with the seed categories and products.
///
/// Returns `true` when rows were inserted and `false` when the store already
/// held categories, in which case nothing is touched.
pub async fn seed_catalog<R: CatalogRepository + ?Sized>(repository: &R) -> CatalogResult<bool> {
    if !repository.list_categories(false).await?.is_empty() {
        tracing::debug!("Catalog already populated, skipping seed");
        return Ok(false);
    }

    let mut category_ids = Vec::with_capacity(SEED_CATEGORIES.len());
    for (name, description) in SEED_CATEGORIES {
        let category = repository
            .insert_category(Category {
                id: 0,
                name: name.to_string(),
                description: Some(description.to_string()),
                products: Vec::new(),
            })
            .await?;
        category_ids.push(category.id);
    }

    let created_at = Utc::now();
    for (name, description, cents, category) in SEED_PRODUCTS {
        repository
            .insert_product(Product {
                id: 0,
                name: name.to_string(),
                description: Some(description.to_string()),
                price: Decimal::new(cents, 2),
                category_id: category_ids[category],
                category: None,
                created_at,
            })
            .await?;
    }

    tracing::info!(
        categories = SEED_CATEGORIES.len(),
        products = SEED_PRODUCTS.len(),
        "Seeded catalog"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCatalogRepository;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_seed_populates_fresh_store() {
        let repo = InMemoryCatalogRepository::new();

        assert!(seed_catalog(&repo).await.unwrap());

        let categories = repo.list_categories(true).await.unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Books", "Clothing", "Home & Garden"]);

        let products = repo.list_products().await.unwrap();
        assert_eq!(products.len(), 5);
        let book = products.iter().find(|p| p.name == "Programming Book").unwrap();
        assert_eq!(
            book.description.as_deref(),
            Some("Learn C# programming from scratch")
        );

        let electronics = &categories[0];
        let product_names: Vec<_> = electronics
            .products
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(product_names, vec!["Laptop", "Smartphone"]);
        assert_eq!(electronics.products[0].price, dec!(999.99));
    }

    #[tokio::test]
    async fn test_seed_is_skipped_when_store_has_categories() {
        let repo = InMemoryCatalogRepository::new();
        repo.insert_category(Category {
            name: "Existing".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        assert!(!seed_catalog(&repo).await.unwrap());
        assert_eq!(repo.list_categories(false).await.unwrap().len(), 1);
        assert!(repo.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let repo = InMemoryCatalogRepository::new();

        assert!(seed_catalog(&repo).await.unwrap());
        assert!(!seed_catalog(&repo).await.unwrap());
        assert_eq!(repo.list_categories(false).await.unwrap().len(), 4);
    }
}
