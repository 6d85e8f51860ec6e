use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::PRODUCTS_PATH;
use crate::error::CatalogResult;
use crate::models::{CategoryDto, CreateProduct, DeletedResponse, ProductDto, UpdateProduct};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductDto, CategoryDto, CreateProduct, UpdateProduct, DeletedResponse),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product management endpoints")
    )
)]
pub struct ProductsApiDoc;

/// Product routes, to be nested under `/products`
pub fn router<R: CatalogRepository + 'static>(service: Arc<CatalogService<R>>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(service)
}

/// List all products with their category
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of products", body = Vec<ProductDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<ProductDto>>> {
    let products = service.list_products().await?;
    Ok(Json(products.iter().map(|p| p.to_dto()).collect()))
}

/// Get a product with its category
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<ProductDto>> {
    let product = service.get_product(id).await?;
    Ok(Json(product.to_dto()))
}

/// Create a new product in an existing category
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductDto,
            headers(("location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    let location = format!("{}/{}", PRODUCTS_PATH, product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product.to_dto()),
    ))
}

/// Partially update a product
///
/// Only fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<ProductDto>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product.to_dto()))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeletedResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<DeletedResponse>> {
    service.delete_product(id).await?;
    Ok(Json(DeletedResponse::new("Product", id)))
}
