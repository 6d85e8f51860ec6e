//! Catalog Domain
//!
//! Categories and the products filed under them, stored in PostgreSQL
//! through SeaORM (or in memory for tests).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/categories, /products)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, category/product invariants
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and Postgres stores)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_catalog::{CatalogService, PgCatalogRepository, handlers, seed_catalog};
//!
//! let repository = PgCatalogRepository::new(db);
//! seed_catalog(&repository).await?;
//!
//! let service = CatalogService::new(repository);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::categories::CategoriesApiDoc;
pub use handlers::products::ProductsApiDoc;
pub use models::{
    Category, CategoryDto, CategoryWithProductsDto, CreateCategory, CreateProduct,
    DeletedResponse, Product, ProductDto, UpdateProduct,
};
pub use postgres::PgCatalogRepository;
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use seed::seed_catalog;
pub use service::CatalogService;
