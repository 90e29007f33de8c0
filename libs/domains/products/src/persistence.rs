use async_trait::async_trait;
use database::{BaseRepository, CrudRepository};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection};
use uuid::Uuid;

use crate::{
    entity,
    error::ProductResult,
    models::{Product, ProductFilter, ProductSortField},
    repository::ProductRepository,
};

/// [`ProductRepository`] over any SQL database SeaORM can reach.
#[derive(Clone)]
pub struct SqlProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl SqlProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn filter_condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(name) = &filter.name {
        condition = condition.add(entity::Column::Name.contains(name.as_str()));
    }
    if let Some(min) = filter.min_price {
        condition = condition.add(entity::Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        condition = condition.add(entity::Column::Price.lte(max));
    }
    if let Some(min) = filter.min_stock {
        condition = condition.add(entity::Column::Stock.gte(min));
    }
    if let Some(max) = filter.max_stock {
        condition = condition.add(entity::Column::Stock.lte(max));
    }

    condition
}

fn into_products(models: Vec<entity::Model>) -> Vec<Product> {
    models.into_iter().map(Product::from).collect()
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        Ok(into_products(self.base.get_all().await?))
    }

    async fn get_all_ordered_by(&self, field: ProductSortField) -> ProductResult<Vec<Product>> {
        let models = self.base.get_all_ordered_by(field.into()).await?;
        Ok(into_products(models))
    }

    async fn search(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let models = self.base.search(filter_condition(&filter)).await?;
        Ok(into_products(models))
    }

    async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        Ok(into_products(self.base.search_by_name(fragment).await?))
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = self.base.get_by_id(id).await?;
        Ok(model.map(Product::from))
    }

    async fn add(&self, product: Product) -> ProductResult<Product> {
        let model = self.base.add(product.into()).await?;
        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let model = self.base.update(product.into()).await?;
        tracing::info!(product_id = %model.id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<u64> {
        let rows = self.base.delete(id).await?;
        if rows > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql(filter: &ProductFilter) -> String {
        entity::Entity::find()
            .filter(filter_condition(filter))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_filter_adds_no_conditions() {
        let sql = sql(&ProductFilter::default());
        assert!(!sql.contains(" AND "));
        assert!(!sql.contains("LIKE"));
        assert!(!sql.contains(">="));
        assert!(!sql.contains("<="));
    }

    #[test]
    fn test_filter_bounds_are_combined_with_and() {
        let filter = ProductFilter {
            name: Some("Produto".to_string()),
            min_price: Some(Decimal::from(10)),
            max_stock: Some(20),
            ..Default::default()
        };

        let sql = sql(&filter);
        assert!(sql.contains(r#""products"."name" LIKE"#));
        assert!(sql.contains("%Produto%"));
        assert!(sql.contains(r#""products"."price" >="#));
        assert!(sql.contains(r#""products"."stock" <= 20"#));
        assert_eq!(sql.matches(" AND ").count(), 2);
    }
}
