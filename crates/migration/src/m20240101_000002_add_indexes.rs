use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // UserRole: lookups by name from criteria queries
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_name")
                    .table(UserRole::Table)
                    .col(UserRole::Name)
                    .to_owned(),
            )
            .await?;

        // UserRole: `deleted` filter
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role_deleted_at")
                    .table(UserRole::Table)
                    .col(UserRole::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_role_name").table(UserRole::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_role_deleted_at").table(UserRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserRole { Table, Name, DeletedAt }
