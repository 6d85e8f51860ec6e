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

use super::CATEGORIES_PATH;
use crate::error::CatalogResult;
use crate::models::{CategoryDto, CategoryWithProductsDto, CreateCategory, DeletedResponse};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

const TAG: &str = "categories";

/// OpenAPI documentation for Categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        list_categories_simple,
        get_category,
        create_category,
        delete_category,
    ),
    components(
        schemas(CategoryDto, CategoryWithProductsDto, CreateCategory, DeletedResponse),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Category management endpoints")
    )
)]
pub struct CategoriesApiDoc;

/// Category routes, to be nested under `/categories`
pub fn router<R: CatalogRepository + 'static>(service: Arc<CatalogService<R>>) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/simple", get(list_categories_simple))
        .route("/{id}", get(get_category).delete(delete_category))
        .with_state(service)
}

/// List all categories with their products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Categories with nested products", body = Vec<CategoryWithProductsDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<CategoryWithProductsDto>>> {
    let categories = service.list_categories(true).await?;
    Ok(Json(
        categories
            .iter()
            .map(|c| c.to_dto_with_products())
            .collect(),
    ))
}

/// List all categories without products
#[utoipa::path(
    get,
    path = "/simple",
    tag = TAG,
    responses(
        (status = 200, description = "Categories", body = Vec<CategoryDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories_simple<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<CategoryDto>>> {
    let categories = service.list_categories(false).await?;
    Ok(Json(categories.iter().map(|c| c.to_dto()).collect()))
}

/// Get a category with its products
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryWithProductsDto),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<CategoryWithProductsDto>> {
    let category = service.get_category(id).await?;
    Ok(Json(category.to_dto_with_products()))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = CategoryDto,
            headers(("location" = String, description = "URL of the new category"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    let location = format!("{}/{}", CATEGORIES_PATH, category.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(category.to_dto()),
    ))
}

/// Delete an empty category
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = DeletedResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<DeletedResponse>> {
    service.delete_category(id).await?;
    Ok(Json(DeletedResponse::new("Category", id)))
}
