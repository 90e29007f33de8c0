pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_products;
mod m20250301_000002_seed_products;

pub use m20250301_000002_seed_products::seeded_ids;

/// Schema plus the five demo products.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_products::Migration),
            Box::new(m20250301_000002_seed_products::Migration),
        ]
    }
}

/// Schema only; tests start from an empty `products` table.
pub struct SchemaMigrator;

#[async_trait::async_trait]
impl MigratorTrait for SchemaMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_create_products::Migration)]
    }
}
