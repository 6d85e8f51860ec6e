use domain_catalog::handlers::{CATEGORIES_PATH, PRODUCTS_PATH};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "CRUD API for product categories and the products filed under them"
    ),
    nest(
        (path = CATEGORIES_PATH, api = domain_catalog::CategoriesApiDoc),
        (path = PRODUCTS_PATH, api = domain_catalog::ProductsApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_catalog_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/categories",
            "/categories/simple",
            "/categories/{id}",
            "/products",
            "/products/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
    }

    #[test]
    fn test_openapi_title() {
        assert_eq!(ApiDoc::openapi().info.title, "Catalog API");
    }
}
