use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::prelude::Decimal;
use uuid::Uuid;

use crate::m20250301_000001_create_products::Products;

/// (id, name, stock, price in cents)
const SEED: [(u128, &str, i32, i64); 5] = [
    (0x0195_4a00_0000_7000_8000_0000_0000_0001, "Produto 1", 10, 2050),
    (0x0195_4a00_0000_7000_8000_0000_0000_0002, "Produto 2", 15, 3075),
    (0x0195_4a00_0000_7000_8000_0000_0000_0003, "Produto 3", 20, 4025),
    (0x0195_4a00_0000_7000_8000_0000_0000_0004, "Produto 4", 25, 5000),
    (0x0195_4a00_0000_7000_8000_0000_0000_0005, "Produto 5", 30, 6050),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Products::Table)
            .columns([Products::Id, Products::Name, Products::Stock, Products::Price])
            .on_conflict(OnConflict::column(Products::Id).do_nothing().to_owned());

        for (id, name, stock, cents) in SEED {
            insert.values_panic([
                Uuid::from_u128(id).into(),
                name.into(),
                stock.into(),
                Decimal::new(cents, 2).into(),
            ]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids: Vec<Uuid> = SEED.iter().map(|(id, ..)| Uuid::from_u128(*id)).collect();

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Products::Table)
                    .and_where(Expr::col(Products::Id).is_in(ids))
                    .to_owned(),
            )
            .await
    }
}

/// Ids of the rows inserted by this migration, in seed order.
pub fn seeded_ids() -> Vec<Uuid> {
    SEED.iter().map(|(id, ..)| Uuid::from_u128(*id)).collect()
}
