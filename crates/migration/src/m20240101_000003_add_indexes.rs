use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Invoice: company detail view filters on comp_code
        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_comp_code")
                    .table(Invoice::Table)
                    .col(Invoice::CompCode)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_invoice_comp_code").table(Invoice::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Invoice { Table, CompCode }
