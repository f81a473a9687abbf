//! Create `service_groups`: per-pro shelves for arranging offerings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceGroups::Table)
                    .if_not_exists()
                    .col(uuid(ServiceGroups::Id).primary_key())
                    .col(uuid(ServiceGroups::ProId).not_null())
                    .col(string_len(ServiceGroups::Name, 128).not_null())
                    .col(integer(ServiceGroups::Position).not_null().default(0))
                    .col(timestamp_with_time_zone(ServiceGroups::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ServiceGroups::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_groups_pro")
                            .from(ServiceGroups::Table, ServiceGroups::ProId)
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
            .drop_table(Table::drop().table(ServiceGroups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceGroups {
    Table,
    Id,
    ProId,
    Name,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
