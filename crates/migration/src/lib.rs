//! Migrator for the company/invoice schema.
//! `company` must exist before `invoice` references it; indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_company;
mod m20240101_000002_create_invoice;
mod m20240101_000003_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_company::Migration),
            Box::new(m20240101_000002_create_invoice::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000003_add_indexes::Migration),
        ]
    }
}
