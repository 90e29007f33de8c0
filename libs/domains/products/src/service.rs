use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductParams, ProductSortField};
use crate::repository::ProductRepository;

/// Validation and orchestration in front of a [`ProductRepository`].
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.get_all().await
    }

    /// `sort_by` must name a [`ProductSortField`]; anything else is rejected
    /// before the repository is touched.
    #[instrument(skip(self))]
    pub async fn list_products_ordered(&self, sort_by: &str) -> ProductResult<Vec<Product>> {
        let field = ProductSortField::from_str(sort_by)
            .map_err(|_| ProductError::InvalidSortField(sort_by.to_string()))?;

        self.repository.get_all_ordered_by(field).await
    }

    /// An empty match is an empty list, not an error.
    #[instrument(skip(self))]
    pub async fn search_products(&self, name: &str) -> ProductResult<Vec<Product>> {
        self.repository.search_by_name(name).await
    }

    #[instrument(skip(self))]
    pub async fn filter_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        filter.validate()?;
        self.repository.search(filter).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Validate, assign a fresh id and insert.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductParams) -> ProductResult<Product> {
        params.validate()?;

        let product = Product::new(Uuid::now_v7(), params);
        self.repository.add(product).await
    }

    /// Validation runs first, so an invalid body for an unknown id is a 400.
    #[instrument(skip(self))]
    pub async fn update_product(&self, id: Uuid, params: ProductParams) -> ProductResult<Product> {
        params.validate()?;

        self.get_product(id).await?;
        self.repository.update(Product::new(id, params)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.get_product(id).await?;
        self.repository.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use sea_orm::DbErr;

    fn params(name: &str, stock: i32, cents: i64) -> ProductParams {
        ProductParams {
            name: name.to_string(),
            stock,
            price: Decimal::new(cents, 2),
        }
    }

    fn product(id: Uuid, name: &str) -> Product {
        Product::new(id, params(name, 10, 2050))
    }

    #[tokio::test]
    async fn test_list_ordered_parses_sort_field() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_all_ordered_by()
            .with(eq(ProductSortField::Price))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let products = service.list_products_ordered("PRICE").await.unwrap();

        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_list_ordered_rejects_unknown_field_without_querying() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_all_ordered_by().never();

        let service = ProductService::new(mock_repo);
        let result = service.list_products_ordered("colour").await;

        assert!(matches!(result, Err(ProductError::InvalidSortField(f)) if f == "colour"));
    }

    #[tokio::test]
    async fn test_search_returns_empty_list_when_nothing_matches() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_search_by_name()
            .withf(|fragment: &str| fragment == "zzz")
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let products = service.search_products("zzz").await.unwrap();

        assert!(products.is_empty(), "Empty search is a success, not a 404");
    }

    #[tokio::test]
    async fn test_filter_rejects_inverted_range_without_querying() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_search().never();

        let service = ProductService::new(mock_repo);
        let filter = ProductFilter {
            min_stock: Some(10),
            max_stock: Some(1),
            ..Default::default()
        };

        let result = service.filter_products(filter).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_create_assigns_new_id_and_keeps_fields() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_add()
            .withf(|p| !p.id.is_nil() && p.name == "Produto 1" && p.stock == 10)
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let created = service
            .create_product(params("Produto 1", 10, 2050))
            .await
            .unwrap();

        assert_eq!(created.price, Decimal::new(2050, 2));
    }

    #[tokio::test]
    async fn test_create_negative_price_never_reaches_repository() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_add().never();

        let service = ProductService::new(mock_repo);
        let result = service.create_product(params("Produto 1", 10, -100)).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_propagates_write_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_add()
            .returning(|_| Err(DbErr::Custom("write rejected".into()).into()));

        let service = ProductService::new(mock_repo);
        let result = service.create_product(params("Produto 1", 10, 100)).await;

        assert!(matches!(result, Err(ProductError::Database(_))));
    }

    #[tokio::test]
    async fn test_update_validates_before_existence_check() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().never();
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update_product(Uuid::now_v7(), params("X", 5, -100))
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update_product(Uuid::now_v7(), params("X", 5, 100))
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_path_id() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |id| Ok(Some(product(id, "Produto 1"))));
        mock_repo
            .expect_update()
            .withf(move |p| p.id == id && p.name == "X" && p.stock == 5)
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let updated = service.update_product(id, params("X", 5, 100)).await.unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.price, Decimal::ONE);
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(Uuid::now_v7()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_existing_product() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .returning(move |id| Ok(Some(product(id, "Produto 1"))));
        mock_repo
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(1));

        let service = ProductService::new(mock_repo);
        assert!(service.delete_product(id).await.is_ok());
    }
}
