use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, CreateCategory, CreateProduct, Product, UpdateProduct};
use crate::repository::CatalogRepository;

/// Service layer for catalog business rules.
///
/// Owns the cross-entity invariants: a category can only be deleted while
/// empty, and every product write must reference an existing category.
#[derive(Clone)]
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(&self, include_products: bool) -> CatalogResult<Vec<Category>> {
        self.repository.list_categories(include_products).await
    }

    /// Get a category with its products
    pub async fn get_category(&self, id: i32) -> CatalogResult<Category> {
        self.repository
            .find_category(id, true)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input.validate()?;

        let category = Category::new(input);
        category.validate()?;

        self.repository.insert_category(category).await
    }

    /// Delete a category, refusing while it still owns products
    pub async fn delete_category(&self, id: i32) -> CatalogResult<()> {
        let category = self.get_category(id).await?;

        if !category.products.is_empty() {
            tracing::info!(
                category_id = id,
                product_count = category.products.len(),
                "Refusing to delete non-empty category"
            );
            return Err(CatalogError::CategoryHasProducts {
                name: category.name,
                product_count: category.products.len(),
            });
        }

        if !self.repository.delete_category(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        self.repository.list_products().await
    }

    /// Get a product with its category
    pub async fn get_product(&self, id: i32) -> CatalogResult<Product> {
        self.repository
            .find_product(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Create a product under an existing category
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input.validate()?;
        self.ensure_category(input.category_id).await?;

        let product = Product::new(input, Utc::now());
        let stored = self.repository.insert_product(product).await?;

        self.get_product(stored.id).await
    }

    /// Merge the present fields of `input` into an existing product.
    ///
    /// The category reference is checked before anything is changed, and
    /// the merged product is validated again before it is written.
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> CatalogResult<Product> {
        input.validate()?;

        let mut product = self.get_product(id).await?;

        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }

        product.apply_update(input);
        product.validate()?;

        self.repository.update_product(product).await?;
        self.get_product(id).await
    }

    pub async fn delete_product(&self, id: i32) -> CatalogResult<()> {
        if !self.repository.delete_product(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }

        Ok(())
    }

    async fn ensure_category(&self, category_id: i32) -> CatalogResult<()> {
        if !self.repository.category_exists(category_id).await? {
            return Err(CatalogError::UnknownCategory(category_id));
        }
        Ok(())
    }
}
