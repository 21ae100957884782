use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shipments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shipments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Shipments::JobNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Shipments::Date).date().not_null())
                    .col(ColumnDef::new(Shipments::RefNumber).string_len(64).null())
                    .col(ColumnDef::new(Shipments::CustomerAddressBookId).integer().null())
                    .col(ColumnDef::new(Shipments::ConsigneeAddressBookId).integer().null())
                    .col(ColumnDef::new(Shipments::ShipperAddressBookId).integer().null())
                    .col(ColumnDef::new(Shipments::ProductId).integer().null())
                    .col(ColumnDef::new(Shipments::PolPortId).integer().null())
                    .col(ColumnDef::new(Shipments::PodPortId).integer().null())
                    .col(ColumnDef::new(Shipments::CarrierAddressBookId).integer().null())
                    .col(
                        ColumnDef::new(Shipments::EmptyReturnDepotAddressBookId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Shipments::VesselName).string_len(128).null())
                    .col(ColumnDef::new(Shipments::VoyageNumber).string_len(64).null())
                    .col(ColumnDef::new(Shipments::Quantity).integer().null())
                    .col(ColumnDef::new(Shipments::Remarks).text().null())
                    .col(
                        ColumnDef::new(Shipments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Shipments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmptyRepoJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmptyRepoJobs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmptyRepoJobs::JobNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(EmptyRepoJobs::Date).date().not_null())
                    .col(ColumnDef::new(EmptyRepoJobs::PolPortId).integer().null())
                    .col(ColumnDef::new(EmptyRepoJobs::PodPortId).integer().null())
                    .col(ColumnDef::new(EmptyRepoJobs::CarrierAddressBookId).integer().null())
                    .col(
                        ColumnDef::new(EmptyRepoJobs::EmptyReturnDepotAddressBookId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(EmptyRepoJobs::VesselName).string_len(128).null())
                    .col(ColumnDef::new(EmptyRepoJobs::VoyageNumber).string_len(64).null())
                    .col(ColumnDef::new(EmptyRepoJobs::Remarks).text().null())
                    .col(
                        ColumnDef::new(EmptyRepoJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmptyRepoJobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmptyRepoJobs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shipments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shipments {
    Table,
    Id,
    JobNumber,
    Date,
    RefNumber,
    CustomerAddressBookId,
    ConsigneeAddressBookId,
    ShipperAddressBookId,
    ProductId,
    PolPortId,
    PodPortId,
    CarrierAddressBookId,
    EmptyReturnDepotAddressBookId,
    VesselName,
    VoyageNumber,
    Quantity,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmptyRepoJobs {
    Table,
    Id,
    JobNumber,
    Date,
    PolPortId,
    PodPortId,
    CarrierAddressBookId,
    EmptyReturnDepotAddressBookId,
    VesselName,
    VoyageNumber,
    Remarks,
    CreatedAt,
    UpdatedAt,
}
