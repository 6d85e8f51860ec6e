use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Prices are stored with two fractional digits (`numeric(18,2)`).
pub const PRICE_SCALE: u32 = 2;

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price_range")
            .with_message("Price must be greater than or equal to 0".into()));
    }
    Ok(())
}

// ============================================================================
// Entities
// ============================================================================

/// A product category.
///
/// `products` is only populated when the category was loaded with its
/// products; otherwise it is empty.
#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct Category {
    pub id: i32,
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub products: Vec<Product>,
}

/// A product belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Product {
    pub id: i32,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "CategoryId must be greater than 0"))]
    pub category_id: i32,
    /// Related category, when loaded
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Write models
// ============================================================================

/// Payload for creating a category
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateCategory {
    /// Category name (required, max 50 characters)
    #[validate(length(min = 1, max = 50))]
    #[serde(default)]
    #[schema(example = "Electronics", required = true)]
    pub name: String,
    /// Optional description (max 500 characters)
    #[validate(length(max = 500))]
    #[serde(default)]
    #[schema(example = "Electronic devices and gadgets")]
    pub description: Option<String>,
}

/// Payload for creating a product
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    /// Product name (required, max 100 characters)
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    #[schema(example = "Gaming Mouse", required = true)]
    pub name: String,
    /// Optional description (max 500 characters)
    #[validate(length(max = 500))]
    #[serde(default)]
    #[schema(example = "High-performance gaming mouse with adjustable DPI")]
    pub description: Option<String>,
    /// Price, must be greater than or equal to 0
    #[validate(custom(function = "validate_price"))]
    #[serde(default, with = "rust_decimal::serde::float")]
    #[schema(example = 79.99)]
    pub price: Decimal,
    /// Owning category, must exist
    #[validate(range(min = 1, message = "CategoryId must be greater than 0"))]
    #[serde(default)]
    #[schema(example = 1, required = true)]
    pub category_id: i32,
}

/// Partial update for a product.
///
/// Absent fields keep their current value; `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(example = 1299.99)]
    pub price: Option<Decimal>,
    #[validate(range(min = 1, message = "CategoryId must be greater than 0"))]
    #[serde(default)]
    pub category_id: Option<i32>,
}

// ============================================================================
// Transfer models
// ============================================================================

/// Flat category representation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Product with its category flattened in.
///
/// When the category was not loaded, `category` is the empty default
/// (`id` 0, empty `name`, `null` description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub category: CategoryDto,
}

/// Category with every loaded product, in store order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithProductsDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub products: Vec<ProductDto>,
}

/// Confirmation body for successful deletes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Product with ID 3 deleted successfully")]
    pub message: String,
}

impl DeletedResponse {
    pub fn new(entity: &str, id: i32) -> Self {
        Self {
            message: format!("{} with ID {} deleted successfully", entity, id),
        }
    }
}

// ============================================================================
// Construction and mapping
// ============================================================================

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        Self {
            id: 0,
            name: input.name,
            description: input.description,
            products: Vec::new(),
        }
    }

    pub fn to_dto(&self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    /// Maps the category and each of its products.
    ///
    /// Products loaded through their category carry no back-reference of
    /// their own, so they are mapped with this category.
    pub fn to_dto_with_products(&self) -> CategoryWithProductsDto {
        let own = self.to_dto();
        let products = self
            .products
            .iter()
            .map(|p| match &p.category {
                Some(category) => p.dto_with_category(category.to_dto()),
                None => p.dto_with_category(own.clone()),
            })
            .collect();

        CategoryWithProductsDto {
            id: own.id,
            name: own.name,
            description: own.description,
            products,
        }
    }
}

impl Product {
    /// Builds an unsaved product stamped with `created_at`
    pub fn new(input: CreateProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: input.name,
            description: input.description,
            price: input.price.round_dp(PRICE_SCALE),
            category_id: input.category_id,
            category: None,
            created_at,
        }
    }

    /// Overwrites only the fields present in `update`.
    ///
    /// A category change drops the loaded relation; `created_at` is never
    /// touched.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price.round_dp(PRICE_SCALE);
        }
        if let Some(category_id) = update.category_id {
            if category_id != self.category_id {
                self.category = None;
            }
            self.category_id = category_id;
        }
    }

    pub fn to_dto(&self) -> ProductDto {
        let category = self
            .category
            .as_ref()
            .map(Category::to_dto)
            .unwrap_or_default();
        self.dto_with_category(category)
    }

    fn dto_with_category(&self, category: CategoryDto) -> ProductDto {
        ProductDto {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category_id: self.category_id,
            created_at: self.created_at,
            category,
        }
    }
}
