//! Create `registration` table.
//! One row per registered person; `cpf` is the primary key so duplicate
//! identifiers are rejected by the store. The other columns are unbounded
//! text since the service does not limit their length.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn registration_table() -> TableCreateStatement {
    Table::create()
        .table(Registration::Table)
        .if_not_exists()
        .col(string(Registration::Cpf).primary_key())
        .col(text(Registration::Name))
        .col(text(Registration::Age))
        .col(text(Registration::PostalCode))
        .col(text(Registration::Address))
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(registration_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Registration::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Registration {
    Table,
    Cpf,
    Name,
    Age,
    PostalCode,
    Address,
}
