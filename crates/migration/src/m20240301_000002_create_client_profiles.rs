//! Create `client_profiles`, one-to-one with `users`, dropped with the user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientProfiles::Table)
                    .if_not_exists()
                    .col(uuid(ClientProfiles::Id).primary_key())
                    .col(uuid(ClientProfiles::UserId).unique_key().not_null())
                    .col(ColumnDef::new(ClientProfiles::Phone).string_len(32).null())
                    .col(ColumnDef::new(ClientProfiles::Address).json_binary().null())
                    .col(timestamp_with_time_zone(ClientProfiles::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ClientProfiles::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_profiles_user")
                            .from(ClientProfiles::Table, ClientProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClientProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClientProfiles {
    Table,
    Id,
    UserId,
    Phone,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
