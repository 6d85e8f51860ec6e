use axum::Router;
use domain_catalog::{CatalogService, PgCatalogRepository, handlers};

/// `/categories` and `/products`, sharing one service over the Postgres store
pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgCatalogRepository::new(state.db.clone());
    let service = CatalogService::new(repository);
    handlers::router(service)
}
