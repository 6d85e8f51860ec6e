//! Handler tests for the Catalog domain
//!
//! These drive the catalog router over the in-memory store and check:
//! - Request deserialization (camelCase JSON → Rust structs)
//! - Response shapes and status codes
//! - Error responses for the category/product invariants
//!
//! Only the domain router is exercised, not the full application with docs
//! and middleware.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::ErrorResponse;
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seeded_app() -> Router {
    let repo = InMemoryCatalogRepository::new();
    seed_catalog(&repo).await.unwrap();
    handlers::router(CatalogService::new(repo))
}

fn empty_app() -> Router {
    handlers::router(CatalogService::new(InMemoryCatalogRepository::new()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_list_categories_includes_products() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/categories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let categories: Vec<CategoryWithProductsDto> = json_body(response.into_body()).await;
    assert_eq!(categories.len(), 4);

    let electronics = categories
        .iter()
        .find(|c| c.name == "Electronics")
        .unwrap();
    let names: Vec<_> = electronics.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop", "Smartphone"]);
    assert!(
        electronics
            .products
            .iter()
            .all(|p| p.category.name == "Electronics")
    );
}

#[tokio::test]
async fn test_list_categories_simple_has_no_products_field() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/categories/simple")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let categories: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(categories.len(), 4);
    assert!(categories.iter().all(|c| c.get("products").is_none()));
    assert_eq!(categories[1]["name"], "Books");
}

#[tokio::test]
async fn test_get_category_returns_products() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/categories/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let category: CategoryWithProductsDto = json_body(response.into_body()).await;
    assert_eq!(category.name, "Electronics");
    assert_eq!(category.products.len(), 2);
}

#[tokio::test]
async fn test_get_missing_category_returns_404() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/categories/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "NOT_FOUND");
    assert_eq!(error.message, "Category with ID 999 not found");
}

#[tokio::test]
async fn test_get_category_with_non_numeric_id_returns_400() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/categories/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "INVALID_ID");
}

#[tokio::test]
async fn test_create_category_returns_201_with_location() {
    let app = empty_app();
    let builder = TestDataBuilder::from_test_name("create_category_201");
    let name = builder.name("category", "new");

    let response = app
        .oneshot(send_json(
            "POST",
            "/categories",
            json!({ "name": name, "description": "Created in a test" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/categories/1");

    let category: CategoryDto = json_body(response.into_body()).await;
    assert_eq!(category.id, 1);
    assert_eq!(category.name, name);
    assert_eq!(category.description.as_deref(), Some("Created in a test"));
}

#[tokio::test]
async fn test_create_category_ignores_client_id() {
    let app = empty_app();

    let response = app
        .oneshot(send_json(
            "POST",
            "/categories",
            json!({ "id": 77, "name": "Toys" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let category: CategoryDto = json_body(response.into_body()).await;
    assert_eq!(category.id, 1);
    assert_eq!(category.description, None);
}

#[tokio::test]
async fn test_create_category_rejects_long_name() {
    let app = empty_app();

    let response = app
        .oneshot(send_json(
            "POST",
            "/categories",
            json!({ "name": "c".repeat(51) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert!(error.details.unwrap().get("name").is_some());
}

#[tokio::test]
async fn test_create_category_with_empty_body_is_validation_error() {
    let app = empty_app();

    let response = app
        .oneshot(send_json("POST", "/categories", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert!(error.details.unwrap().get("name").is_some());
}

#[tokio::test]
async fn test_create_category_with_malformed_json_is_rejected() {
    let app = empty_app();

    let request = Request::builder()
        .method("POST")
        .uri("/categories")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_delete_empty_category_then_get_is_404() {
    let repo = InMemoryCatalogRepository::new();
    let service = CatalogService::new(repo.clone());
    let app = handlers::router(service);

    let created = repo
        .insert_category(Category {
            name: "Empty".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let uri = format!("/categories/{}", created.id);
    let response = app.clone().oneshot(delete(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: DeletedResponse = json_body(response.into_body()).await;
    assert_eq!(
        body.message,
        format!("Category with ID {} deleted successfully", created.id)
    );

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_category_with_products_is_refused() {
    let app = seeded_app().await;

    let response = app.clone().oneshot(delete("/categories/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(
        error.message,
        "Cannot delete category 'Electronics' because it has 2 products. Delete the products first."
    );

    // Still retrievable
    let response = app.oneshot(get("/categories/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_missing_category_returns_404() {
    let app = empty_app();

    let response = app.oneshot(delete("/categories/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_list_products_includes_category() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<ProductDto> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 5);

    let laptop = products.iter().find(|p| p.name == "Laptop").unwrap();
    assert_eq!(laptop.category.name, "Electronics");
    assert_eq!(laptop.category_id, laptop.category.id);
}

#[tokio::test]
async fn test_get_product_json_shape() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/products/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: Value = json_body(response.into_body()).await;
    assert_eq!(product["name"], "Laptop");
    assert_eq!(product["price"], 999.99);
    assert_eq!(product["categoryId"], 1);
    assert_eq!(product["category"]["name"], "Electronics");
    assert!(product["createdAt"].is_string());
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let app = seeded_app().await;

    let response = app.oneshot(get("/products/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Product with ID 42 not found");
}

#[tokio::test]
async fn test_create_product_returns_201_with_category() {
    let app = seeded_app().await;

    let response = app
        .oneshot(send_json(
            "POST",
            "/products",
            json!({
                "name": "Gaming Mouse",
                "description": "High-performance gaming mouse",
                "price": 79.99,
                "categoryId": 1
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/products/6");

    let product: ProductDto = json_body(response.into_body()).await;
    assert_eq!(product.id, 6);
    assert_eq!(product.price.to_string(), "79.99");
    assert_eq!(product.category.name, "Electronics");
}

#[tokio::test]
async fn test_create_product_with_unknown_category_is_not_persisted() {
    let app = seeded_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/products",
            json!({ "name": "Orphan", "price": 5.0, "categoryId": 999 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Category with ID 999 not found");

    let response = app.oneshot(get("/products")).await.unwrap();
    let products: Vec<ProductDto> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 5);
    assert!(products.iter().all(|p| p.name != "Orphan"));
}

#[tokio::test]
async fn test_create_product_validation_errors_are_per_field() {
    let app = seeded_app().await;

    let response = app
        .oneshot(send_json(
            "POST",
            "/products",
            json!({ "name": "", "price": -1, "categoryId": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.code, 1001);
    let details = error.details.unwrap();
    assert!(details.get("name").is_some());
    assert_eq!(
        details["price"][0]["message"],
        "Price must be greater than or equal to 0"
    );
    assert_eq!(
        details["categoryId"][0]["message"],
        "CategoryId must be greater than 0"
    );
    assert!(details.get("category_id").is_none());
}

#[tokio::test]
async fn test_create_product_without_name_is_validation_error() {
    let app = seeded_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/products",
            json!({ "price": 1, "categoryId": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    let details = error.details.unwrap();
    assert!(details.get("name").is_some());
    assert!(details.get("categoryId").is_none());

    let response = app.oneshot(get("/products")).await.unwrap();
    let products: Vec<ProductDto> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 5);
}

#[tokio::test]
async fn test_create_product_without_category_id_is_validation_error() {
    let app = seeded_app().await;

    let response = app
        .oneshot(send_json("POST", "/products", json!({ "name": "Loose", "price": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.code, 1001);
    assert!(error.details.unwrap().get("categoryId").is_some());
}

#[tokio::test]
async fn test_update_price_only_changes_price() {
    let app = seeded_app().await;

    let before: ProductDto = json_body(
        app.clone()
            .oneshot(get("/products/1"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    let response = app
        .oneshot(send_json("PUT", "/products/1", json!({ "price": 1299.99 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after: ProductDto = json_body(response.into_body()).await;
    assert_eq!(after.price.to_string(), "1299.99");
    assert_eq!(after.name, before.name);
    assert_eq!(after.description, before.description);
    assert_eq!(after.category_id, before.category_id);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_update_moves_product_to_other_category() {
    let app = seeded_app().await;

    let response = app
        .oneshot(send_json("PUT", "/products/3", json!({ "categoryId": 4 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: ProductDto = json_body(response.into_body()).await;
    assert_eq!(product.category_id, 4);
    assert_eq!(product.category.name, "Home & Garden");
}

#[tokio::test]
async fn test_update_with_unknown_category_leaves_product_unchanged() {
    let app = seeded_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "PUT",
            "/products/1",
            json!({ "name": "Renamed", "categoryId": 999 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let product: ProductDto =
        json_body(app.oneshot(get("/products/1")).await.unwrap().into_body()).await;
    assert_eq!(product.name, "Laptop");
    assert_eq!(product.category_id, 1);
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let app = seeded_app().await;

    let response = app
        .oneshot(send_json("PUT", "/products/404", json!({ "price": 1.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_then_category_becomes_deletable() {
    let app = seeded_app().await;

    // Programming Book is the only product under Books
    let response = app.clone().oneshot(delete("/products/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: DeletedResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Product with ID 3 deleted successfully");

    let response = app.clone().oneshot(get("/products/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(delete("/categories/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_missing_product_returns_404() {
    let app = seeded_app().await;

    let response = app.oneshot(delete("/products/99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
