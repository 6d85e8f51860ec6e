//! HTTP handlers for categories and products

pub mod categories;
pub mod products;

use axum::Router;
use std::sync::Arc;

use crate::repository::CatalogRepository;
use crate::service::CatalogService;

pub const CATEGORIES_PATH: &str = "/categories";
pub const PRODUCTS_PATH: &str = "/products";

/// Create the catalog router with `/categories` and `/products` mounted
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .nest(CATEGORIES_PATH, categories::router(shared_service.clone()))
        .nest(PRODUCTS_PATH, products::router(shared_service))
}
