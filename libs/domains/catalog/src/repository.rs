use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Product};

/// Repository trait for catalog persistence.
///
/// Stores assign ids on insert. Reads that return products always load
/// their category; category reads load products only when asked.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All categories ordered by id
    async fn list_categories(&self, include_products: bool) -> CatalogResult<Vec<Category>>;

    async fn find_category(
        &self,
        id: i32,
        include_products: bool,
    ) -> CatalogResult<Option<Category>>;

    async fn category_exists(&self, id: i32) -> CatalogResult<bool>;

    /// Persist a new category, returning it with its assigned id
    async fn insert_category(&self, category: Category) -> CatalogResult<Category>;

    /// Returns false when no category had this id
    async fn delete_category(&self, id: i32) -> CatalogResult<bool>;

    /// All products ordered by id, each with its category
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    async fn find_product(&self, id: i32) -> CatalogResult<Option<Product>>;

    /// Persist a new product, returning it with its assigned id
    async fn insert_product(&self, product: Product) -> CatalogResult<Product>;

    /// Overwrite every column of an existing product
    async fn update_product(&self, product: Product) -> CatalogResult<Product>;

    /// Returns false when no product had this id
    async fn delete_product(&self, id: i32) -> CatalogResult<bool>;
}

#[derive(Debug, Default)]
struct CatalogState {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    last_category_id: i32,
    last_product_id: i32,
}

impl CatalogState {
    fn load_products(&self, mut category: Category) -> Category {
        category.products = self
            .products
            .values()
            .filter(|p| p.category_id == category.id)
            .cloned()
            .collect();
        category
    }

    fn load_category(&self, mut product: Product) -> Product {
        product.category = self.categories.get(&product.category_id).cloned();
        product
    }
}

/// In-memory implementation of CatalogRepository (for development/testing).
///
/// Does not enforce the product to category foreign key.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogRepository {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_categories(&self, include_products: bool) -> CatalogResult<Vec<Category>> {
        let state = self.state.read().await;

        Ok(state
            .categories
            .values()
            .cloned()
            .map(|c| {
                if include_products {
                    state.load_products(c)
                } else {
                    c
                }
            })
            .collect())
    }

    async fn find_category(
        &self,
        id: i32,
        include_products: bool,
    ) -> CatalogResult<Option<Category>> {
        let state = self.state.read().await;
        let category = state.categories.get(&id).cloned();

        Ok(match category {
            Some(c) if include_products => Some(state.load_products(c)),
            other => other,
        })
    }

    async fn category_exists(&self, id: i32) -> CatalogResult<bool> {
        Ok(self.state.read().await.categories.contains_key(&id))
    }

    async fn insert_category(&self, mut category: Category) -> CatalogResult<Category> {
        let mut state = self.state.write().await;

        state.last_category_id += 1;
        category.id = state.last_category_id;
        category.products.clear();
        state.categories.insert(category.id, category.clone());

        tracing::info!(category_id = category.id, "Created category");
        Ok(category)
    }

    async fn delete_category(&self, id: i32) -> CatalogResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.categories.remove(&id).is_some();

        if removed {
            tracing::info!(category_id = id, "Deleted category");
        }
        Ok(removed)
    }

    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let state = self.state.read().await;

        Ok(state
            .products
            .values()
            .cloned()
            .map(|p| state.load_category(p))
            .collect())
    }

    async fn find_product(&self, id: i32) -> CatalogResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .get(&id)
            .cloned()
            .map(|p| state.load_category(p)))
    }

    async fn insert_product(&self, mut product: Product) -> CatalogResult<Product> {
        let mut state = self.state.write().await;

        state.last_product_id += 1;
        product.id = state.last_product_id;
        product.category = None;
        state.products.insert(product.id, product.clone());

        tracing::info!(
            product_id = product.id,
            category_id = product.category_id,
            "Created product"
        );
        Ok(product)
    }

    async fn update_product(&self, mut product: Product) -> CatalogResult<Product> {
        let mut state = self.state.write().await;

        let stored = state
            .products
            .get_mut(&product.id)
            .ok_or(CatalogError::ProductNotFound(product.id))?;
        product.category = None;
        *stored = product.clone();

        tracing::info!(product_id = product.id, "Updated product");
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> CatalogResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.products.remove(&id).is_some();

        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}
