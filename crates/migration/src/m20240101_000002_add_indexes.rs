use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Customer: index on name for the by-name lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_name")
                    .table(Customer::Table)
                    .col(Customer::Name)
                    .to_owned(),
            )
            .await?;

        // Customer: index on email for the by-email lookup.
        // Not unique; uniqueness is assumed, not enforced.
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_email")
                    .table(Customer::Table)
                    .col(Customer::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_customer_name").table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customer_email").table(Customer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customer { Table, Name, Email }
