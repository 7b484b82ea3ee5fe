pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_catalog;
mod m20250601_000002_create_accounts;
mod m20250601_000003_create_lending;
mod m20250601_000004_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_catalog::Migration),
            Box::new(m20250601_000002_create_accounts::Migration),
            Box::new(m20250601_000003_create_lending::Migration),
            Box::new(m20250601_000004_add_lookup_indexes::Migration),
        ]
    }
}
