use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Product, ProductSortField};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl database::NamedEntity for Entity {
    fn name_column() -> Column {
        Column::Name
    }
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            stock: model.stock,
            price: model.price,
        }
    }
}

// Every column is Set, so an update overwrites the whole row.
impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            stock: Set(product.stock),
            price: Set(product.price),
        }
    }
}

impl From<ProductSortField> for Column {
    fn from(field: ProductSortField) -> Self {
        match field {
            ProductSortField::Name => Column::Name,
            ProductSortField::Stock => Column::Stock,
            ProductSortField::Price => Column::Price,
        }
    }
}
