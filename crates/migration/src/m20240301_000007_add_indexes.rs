//! Supporting indexes for the hot lookup paths. Applied last.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_offerings_pro_id")
                    .table(Offerings::Table)
                    .col(Offerings::ProId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_offerings_category_id")
                    .table(Offerings::Table)
                    .col(Offerings::CategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_groups_pro_id")
                    .table(ServiceGroups::Table)
                    .col(ServiceGroups::ProId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_offerings_pro_id").table(Offerings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_offerings_category_id").table(Offerings::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_service_groups_pro_id")
                    .table(ServiceGroups::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Offerings {
    Table,
    ProId,
    CategoryId,
}

#[derive(DeriveIden)]
enum ServiceGroups {
    Table,
    ProId,
}
