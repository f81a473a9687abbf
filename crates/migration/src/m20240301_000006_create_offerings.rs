//! Create `offerings`: the bookable services pros publish.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offerings::Table)
                    .if_not_exists()
                    .col(uuid(Offerings::Id).primary_key())
                    .col(uuid(Offerings::ProId).not_null())
                    .col(string_len(Offerings::Title, 255).not_null())
                    .col(ColumnDef::new(Offerings::Description).text().null())
                    .col(ColumnDef::new(Offerings::BasePrice).double().null())
                    .col(string_len(Offerings::PricingType, 32).not_null())
                    .col(ColumnDef::new(Offerings::DurationMinutes).integer().null())
                    .col(uuid(Offerings::CategoryId).not_null())
                    .col(ColumnDef::new(Offerings::ServiceGroupId).uuid().null())
                    .col(ColumnDef::new(Offerings::OptionsSchema).json_binary().null())
                    .col(boolean(Offerings::IsPublic).not_null().default(true))
                    .col(boolean(Offerings::IsActive).not_null().default(true))
                    .col(timestamp_with_time_zone(Offerings::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Offerings::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offerings_pro")
                            .from(Offerings::Table, Offerings::ProId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offerings_category")
                            .from(Offerings::Table, Offerings::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offerings_service_group")
                            .from(Offerings::Table, Offerings::ServiceGroupId)
                            .to(ServiceGroups::Table, ServiceGroups::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Offerings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Offerings {
    Table,
    Id,
    ProId,
    Title,
    Description,
    BasePrice,
    PricingType,
    DurationMinutes,
    CategoryId,
    ServiceGroupId,
    OptionsSchema,
    IsPublic,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ServiceGroups {
    Table,
    Id,
}
