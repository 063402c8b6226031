//! Create `customer` table.
//!
//! Name and email are nullable on purpose: presence is enforced at the
//! transport boundary, not by the schema. The loyalty tier is derived at
//! read time and has no column here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(uuid(Customer::Id).primary_key())
                    .col(string_len_null(Customer::Name, 128))
                    .col(string_len_null(Customer::Email, 255))
                    .col(decimal_len_null(Customer::AnnualSpend, 19, 2))
                    .col(date_null(Customer::LastPurchaseDate))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customer { Table, Id, Name, Email, AnnualSpend, LastPurchaseDate }
