use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(pk_auto(Invoice::Id))
                    .col(string_len(Invoice::CompCode, 64).not_null())
                    .col(double(Invoice::Amt).not_null().check(Expr::col(Invoice::Amt).gte(0)))
                    .col(boolean(Invoice::Paid).not_null().default(false))
                    .col(date(Invoice::AddDate).not_null().default(Expr::current_date()))
                    .col(date_null(Invoice::PaidDate))
                    // Deleting a company that still has invoices must fail.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_company")
                            .from(Invoice::Table, Invoice::CompCode)
                            .to(Company::Table, Company::Code)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Invoice::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Invoice {
    Table,
    Id,
    CompCode,
    Amt,
    Paid,
    AddDate,
    PaidDate,
}

#[derive(DeriveIden)]
enum Company { Table, Code }
