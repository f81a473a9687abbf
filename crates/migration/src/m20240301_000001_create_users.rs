//! Create `users` table: identity record with a set-valued roles column,
//! revocation counter and active flag.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(uuid(Users::Id).primary_key())
                    .col(string_len(Users::Email, 255).unique_key().not_null())
                    .col(string_len(Users::PasswordHash, 255).not_null())
                    .col(string_len(Users::PasswordAlgorithm, 64).not_null())
                    .col(string_len(Users::FullName, 128).not_null())
                    .col(ColumnDef::new(Users::Phone).string_len(32).null())
                    .col(json_binary(Users::Roles).not_null())
                    .col(integer(Users::TokenVersion).not_null().default(0))
                    .col(boolean(Users::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Users::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    PasswordAlgorithm,
    FullName,
    Phone,
    Roles,
    TokenVersion,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
