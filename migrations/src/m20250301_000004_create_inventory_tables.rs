use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inventories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Inventories::ContainerNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Inventories::ContainerCategory)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Inventories::ContainerType).string_len(64).null())
                    .col(ColumnDef::new(Inventories::ContainerSize).string_len(32).null())
                    .col(ColumnDef::new(Inventories::ContainerClass).string_len(64).null())
                    .col(ColumnDef::new(Inventories::Capacity).decimal_len(19, 4).null())
                    .col(ColumnDef::new(Inventories::CapacityUnit).string_len(16).null())
                    .col(ColumnDef::new(Inventories::Manufacturer).string_len(255).null())
                    .col(ColumnDef::new(Inventories::BuildYear).integer().null())
                    .col(ColumnDef::new(Inventories::GrossWeight).decimal_len(19, 4).null())
                    .col(ColumnDef::new(Inventories::TareWeight).decimal_len(19, 4).null())
                    .col(ColumnDef::new(Inventories::InitialSurvey).string_len(255).null())
                    .col(
                        ColumnDef::new(Inventories::Ownership)
                            .string_len(16)
                            .not_null()
                            .default("Own"),
                    )
                    .col(ColumnDef::new(Inventories::PortId).integer().null())
                    .col(
                        ColumnDef::new(Inventories::OnHireDepotAddressBookId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Inventories::Remarks).text().null())
                    .col(
                        ColumnDef::new(Inventories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inventories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryLeasingInfos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryLeasingInfos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InventoryLeasingInfos::InventoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryLeasingInfos::LeasorAddressBookId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(InventoryLeasingInfos::LeaseRef).string_len(64).null())
                    .col(ColumnDef::new(InventoryLeasingInfos::OnHireDate).date().null())
                    .col(ColumnDef::new(InventoryLeasingInfos::OffHireDate).date().null())
                    .col(
                        ColumnDef::new(InventoryLeasingInfos::OnHireDepotAddressBookId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(InventoryLeasingInfos::PortId).integer().null())
                    .col(
                        ColumnDef::new(InventoryLeasingInfos::LeaseRentPerDay)
                            .decimal_len(19, 4)
                            .null(),
                    )
                    .col(ColumnDef::new(InventoryLeasingInfos::Remarks).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_leasing_infos_inventory_id")
                            .from(InventoryLeasingInfos::Table, InventoryLeasingInfos::InventoryId)
                            .to(Inventories::Table, Inventories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryCertificates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryCertificates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InventoryCertificates::InventoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InventoryCertificates::InspectionDate).date().null())
                    .col(
                        ColumnDef::new(InventoryCertificates::InspectionType)
                            .string_len(64)
                            .null(),
                    )
                    .col(ColumnDef::new(InventoryCertificates::NextDueDate).date().null())
                    .col(
                        ColumnDef::new(InventoryCertificates::CertificateFile)
                            .string_len(255)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_certificates_inventory_id")
                            .from(InventoryCertificates::Table, InventoryCertificates::InventoryId)
                            .to(Inventories::Table, Inventories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryCertificates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InventoryLeasingInfos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inventories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Inventories {
    Table,
    Id,
    ContainerNumber,
    ContainerCategory,
    ContainerType,
    ContainerSize,
    ContainerClass,
    Capacity,
    CapacityUnit,
    Manufacturer,
    BuildYear,
    GrossWeight,
    TareWeight,
    InitialSurvey,
    Ownership,
    PortId,
    OnHireDepotAddressBookId,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InventoryLeasingInfos {
    Table,
    Id,
    InventoryId,
    LeasorAddressBookId,
    LeaseRef,
    OnHireDate,
    OffHireDate,
    OnHireDepotAddressBookId,
    PortId,
    LeaseRentPerDay,
    Remarks,
}

#[derive(DeriveIden)]
enum InventoryCertificates {
    Table,
    Id,
    InventoryId,
    InspectionDate,
    InspectionType,
    NextDueDate,
    CertificateFile,
}
