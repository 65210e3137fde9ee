//! Initial schema.
//!
//! - `expenses`: one row per recorded expense, amounts in cents
//! - `expense_participants`: who shares each expense, in the order given

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    AmountMinor,
    Description,
    Payer,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ExpenseParticipants {
    Table,
    ExpenseId,
    Person,
    Position,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Payer).string().not_null())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-created_at")
                    .table(Expenses::Table)
                    .col(Expenses::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExpenseParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpenseParticipants::ExpenseId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseParticipants::Person)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExpenseParticipants::Position)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ExpenseParticipants::ExpenseId)
                            .col(ExpenseParticipants::Person),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense_participants-expense_id")
                            .from(ExpenseParticipants::Table, ExpenseParticipants::ExpenseId)
                            .to(Expenses::Table, Expenses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expense_participants-person")
                    .table(ExpenseParticipants::Table)
                    .col(ExpenseParticipants::Person)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExpenseParticipants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        Ok(())
    }
}
