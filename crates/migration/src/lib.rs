//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users;
mod m20240301_000002_create_client_profiles;
mod m20240301_000003_create_pro_profiles;
mod m20240301_000004_create_categories;
mod m20240301_000005_create_service_groups;
mod m20240301_000006_create_offerings;
mod m20240301_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users::Migration),
            Box::new(m20240301_000002_create_client_profiles::Migration),
            Box::new(m20240301_000003_create_pro_profiles::Migration),
            Box::new(m20240301_000004_create_categories::Migration),
            Box::new(m20240301_000005_create_service_groups::Migration),
            Box::new(m20240301_000006_create_offerings::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000007_add_indexes::Migration),
        ]
    }
}
