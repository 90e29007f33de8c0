use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter, ProductSortField};

/// Product persistence as seen by the service.
///
/// Writes commit immediately; there is no transaction spanning calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, in whatever order the store returns them
    async fn get_all(&self) -> ProductResult<Vec<Product>>;

    /// All products sorted ascending by `field`
    async fn get_all_ordered_by(&self, field: ProductSortField) -> ProductResult<Vec<Product>>;

    /// Products matching every bound set in `filter`
    async fn search(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Products whose name contains `fragment` (case-sensitive)
    async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Insert `product` under the id it already carries
    async fn add(&self, product: Product) -> ProductResult<Product>;

    /// Overwrite the stored row with the same id. Fails if there is none.
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Number of rows removed; 0 when `id` is unknown
    async fn delete(&self, id: Uuid) -> ProductResult<u64>;
}
