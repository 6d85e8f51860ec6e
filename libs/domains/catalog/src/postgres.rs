use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryOrder,
};

use crate::{
    entity::{category, product},
    error::{CatalogError, CatalogResult},
    models::{Category, Product},
    repository::CatalogRepository,
};

/// Postgres implementation of CatalogRepository backed by SeaORM
#[derive(Clone)]
pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn with_products(model: category::Model, products: Vec<product::Model>) -> Category {
    let mut category: Category = model.into();
    category.products = products.into_iter().map(Into::into).collect();
    category
}

fn with_category(model: product::Model, category: Option<category::Model>) -> Product {
    let mut product: Product = model.into();
    product.category = category.map(Into::into);
    product
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_categories(&self, include_products: bool) -> CatalogResult<Vec<Category>> {
        if !include_products {
            let models = category::Entity::find()
                .order_by_asc(category::Column::Id)
                .all(&self.db)
                .await?;
            return Ok(models.into_iter().map(Into::into).collect());
        }

        let rows = category::Entity::find()
            .find_with_related(product::Entity)
            .order_by_asc(category::Column::Id)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(c, products)| with_products(c, products))
            .collect())
    }

    async fn find_category(
        &self,
        id: i32,
        include_products: bool,
    ) -> CatalogResult<Option<Category>> {
        let Some(model) = category::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        if !include_products {
            return Ok(Some(model.into()));
        }

        let products = model
            .find_related(product::Entity)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Some(with_products(model, products)))
    }

    async fn category_exists(&self, id: i32) -> CatalogResult<bool> {
        Ok(category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .is_some())
    }

    async fn insert_category(&self, category: Category) -> CatalogResult<Category> {
        let model = category::ActiveModel::from(&category)
            .insert(&self.db)
            .await?;

        tracing::info!(category_id = model.id, "Created category");
        Ok(model.into())
    }

    async fn delete_category(&self, id: i32) -> CatalogResult<bool> {
        let result = category::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = id, "Deleted category");
        }
        Ok(result.rows_affected > 0)
    }

    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let rows = product::Entity::find()
            .find_also_related(category::Entity)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(p, c)| with_category(p, c))
            .collect())
    }

    async fn find_product(&self, id: i32) -> CatalogResult<Option<Product>> {
        let row = product::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(p, c)| with_category(p, c)))
    }

    async fn insert_product(&self, product: Product) -> CatalogResult<Product> {
        let model = product::ActiveModel::from(&product)
            .insert(&self.db)
            .await?;

        tracing::info!(
            product_id = model.id,
            category_id = model.category_id,
            "Created product"
        );
        Ok(model.into())
    }

    async fn update_product(&self, product: Product) -> CatalogResult<Product> {
        let model = product::ActiveModel::from(&product)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CatalogError::ProductNotFound(product.id),
                other => CatalogError::Database(other),
            })?;

        tracing::info!(product_id = model.id, "Updated product");
        Ok(model.into())
    }

    async fn delete_product(&self, id: i32) -> CatalogResult<bool> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn category_model(id: i32, name: &str) -> category::Model {
        category::Model {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    fn product_model(id: i32, name: &str, category_id: i32) -> product::Model {
        product::Model {
            id,
            name: name.to_string(),
            description: None,
            price: dec!(19.99),
            category_id,
            created_at: Utc::now().into(),
        }
    }

    fn mock() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
    }

    #[tokio::test]
    async fn test_list_categories_groups_products_in_id_order() {
        let db = mock()
            .append_query_results([vec![
                (category_model(1, "Electronics"), product_model(1, "Laptop", 1)),
                (category_model(1, "Electronics"), product_model(2, "Smartphone", 1)),
                (category_model(3, "Clothing"), product_model(4, "T-Shirt", 3)),
            ]])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        let categories = repo.list_categories(true).await.unwrap();
        assert_eq!(categories.len(), 2);
        let names: Vec<_> = categories[0].products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Smartphone"]);
        assert_eq!(categories[1].name, "Clothing");
        assert_eq!(categories[1].products.len(), 1);

        let log = repo.db().clone().into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        let order_by = sql.split("ORDER BY").nth(1).unwrap().trim();
        assert!(order_by.starts_with(r#""categories"."id" ASC"#));
        assert!(order_by.ends_with(r#""products"."id" ASC"#));
    }

    #[tokio::test]
    async fn test_find_product_loads_category() {
        let db = mock()
            .append_query_results([vec![(
                product_model(3, "Programming Book", 2),
                category_model(2, "Books"),
            )]])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        let product = repo.find_product(3).await.unwrap().unwrap();
        assert_eq!(product.price, dec!(19.99));
        assert_eq!(product.category.unwrap().name, "Books");
    }

    #[tokio::test]
    async fn test_find_category_without_products_runs_single_query() {
        let db = mock()
            .append_query_results([vec![category_model(4, "Home & Garden")]])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        let category = repo.find_category(4, false).await.unwrap().unwrap();
        assert_eq!(category.name, "Home & Garden");
        assert!(category.products.is_empty());
        assert_eq!(repo.db().clone().into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let db = mock()
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        let ghost = Product::from(product_model(404, "Ghost", 1));
        let err = repo.update_product(ghost).await.unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound(404)));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_a_row_was_removed() {
        let db = mock()
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgCatalogRepository::new(db);

        assert!(repo.delete_product(1).await.unwrap());
        assert!(!repo.delete_category(1).await.unwrap());
    }
}
