pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_master_data_tables;
mod m20250301_000002_create_address_book_tables;
mod m20250301_000003_create_product_tables;
mod m20250301_000004_create_inventory_tables;
mod m20250301_000005_create_job_tables;
mod m20250301_000006_create_movement_histories_table;
mod m20250301_000007_create_tariff_tables;
mod m20250315_000008_normalize_allotted_spelling;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_master_data_tables::Migration),
            Box::new(m20250301_000002_create_address_book_tables::Migration),
            Box::new(m20250301_000003_create_product_tables::Migration),
            Box::new(m20250301_000004_create_inventory_tables::Migration),
            Box::new(m20250301_000005_create_job_tables::Migration),
            Box::new(m20250301_000006_create_movement_histories_table::Migration),
            Box::new(m20250301_000007_create_tariff_tables::Migration),
            Box::new(m20250315_000008_normalize_allotted_spelling::Migration),
        ]
    }
}
