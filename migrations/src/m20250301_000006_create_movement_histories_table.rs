use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovementHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MovementHistories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MovementHistories::InventoryId).integer().not_null())
                    .col(ColumnDef::new(MovementHistories::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(MovementHistories::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MovementHistories::PortId).integer().null())
                    .col(ColumnDef::new(MovementHistories::AddressBookId).integer().null())
                    .col(ColumnDef::new(MovementHistories::ShipmentId).integer().null())
                    .col(ColumnDef::new(MovementHistories::EmptyRepoJobId).integer().null())
                    .col(ColumnDef::new(MovementHistories::Remarks).text().null())
                    .col(
                        ColumnDef::new(MovementHistories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movement_histories_inventory_id")
                            .from(MovementHistories::Table, MovementHistories::InventoryId)
                            .to(Inventories::Table, Inventories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movement_histories_inventory_id")
                    .table(MovementHistories::Table)
                    .col(MovementHistories::InventoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movement_histories_shipment_id")
                    .table(MovementHistories::Table)
                    .col(MovementHistories::ShipmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movement_histories_empty_repo_job_id")
                    .table(MovementHistories::Table)
                    .col(MovementHistories::EmptyRepoJobId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovementHistories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MovementHistories {
    Table,
    Id,
    InventoryId,
    Status,
    Date,
    PortId,
    AddressBookId,
    ShipmentId,
    EmptyRepoJobId,
    Remarks,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Inventories {
    Table,
    Id,
}
