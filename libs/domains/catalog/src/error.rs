use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category with ID {0} not found")]
    CategoryNotFound(i32),

    #[error("Product with ID {0} not found")]
    ProductNotFound(i32),

    /// A product write referenced a category that does not exist
    #[error("Category with ID {0} not found")]
    UnknownCategory(i32),

    #[error(
        "Cannot delete category '{name}' because it has {product_count} products. Delete the products first."
    )]
    CategoryHasProducts { name: String, product_count: usize },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(_) | CatalogError::ProductNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            CatalogError::UnknownCategory(_) | CatalogError::CategoryHasProducts { .. } => {
                AppError::BadRequest(err.to_string())
            }
            CatalogError::Validation(errors) => AppError::ValidationError(errors),
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_category_has_products_message() {
        let err = CatalogError::CategoryHasProducts {
            name: "Electronics".to_string(),
            product_count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete category 'Electronics' because it has 2 products. Delete the products first."
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (CatalogError::CategoryNotFound(1), StatusCode::NOT_FOUND),
            (CatalogError::ProductNotFound(1), StatusCode::NOT_FOUND),
            (CatalogError::UnknownCategory(99), StatusCode::BAD_REQUEST),
            (
                CatalogError::CategoryHasProducts {
                    name: "Books".to_string(),
                    product_count: 1,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::Validation(ValidationErrors::new()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::Database(DbErr::Custom("constraint".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_unknown_category_message_matches_not_found_wording() {
        assert_eq!(
            CatalogError::UnknownCategory(42).to_string(),
            "Category with ID 42 not found"
        );
    }
}
