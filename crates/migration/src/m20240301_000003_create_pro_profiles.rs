//! Create `pro_profiles`, one-to-one with `users`, dropped with the user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProProfiles::Table)
                    .if_not_exists()
                    .col(uuid(ProProfiles::Id).primary_key())
                    .col(uuid(ProProfiles::UserId).unique_key().not_null())
                    .col(string_len(ProProfiles::BusinessName, 255).not_null())
                    .col(ColumnDef::new(ProProfiles::Website).string_len(255).null())
                    .col(ColumnDef::new(ProProfiles::Address).json_binary().null())
                    .col(timestamp_with_time_zone(ProProfiles::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ProProfiles::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pro_profiles_user")
                            .from(ProProfiles::Table, ProProfiles::UserId)
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
            .drop_table(Table::drop().table(ProProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProProfiles {
    Table,
    Id,
    UserId,
    BusinessName,
    Website,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
