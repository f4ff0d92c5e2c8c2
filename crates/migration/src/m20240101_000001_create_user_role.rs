//! Create `user_role` table.
//!
//! Carries the audit columns every resource shares; `updated_at` and
//! `deleted_at` stay null until the first update / soft delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRole::Table)
                    .if_not_exists()
                    .col(uuid(UserRole::Id).primary_key())
                    .col(string_len(UserRole::Name, 128).not_null())
                    .col(ColumnDef::new(UserRole::Description).text().null())
                    .col(timestamp_with_time_zone(UserRole::CreatedAt).not_null())
                    .col(
                        ColumnDef::new(UserRole::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserRole::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserRole::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserRole { Table, Id, Name, Description, CreatedAt, UpdatedAt, DeletedAt }
