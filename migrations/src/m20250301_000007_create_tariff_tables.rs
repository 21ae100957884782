use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn code_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .string_len(32)
        .not_null()
        .unique_key()
        .to_owned()
}

fn money_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .decimal_len(19, 4)
        .not_null()
        .default(0)
        .to_owned()
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContainerLeaseTariffs::Table)
                    .if_not_exists()
                    .col(&mut id_col(ContainerLeaseTariffs::Id))
                    .col(&mut code_col(ContainerLeaseTariffs::TariffCode))
                    .col(
                        ColumnDef::new(ContainerLeaseTariffs::AddressBookId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContainerLeaseTariffs::ContainerCategory)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ContainerLeaseTariffs::ContainerType)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ContainerLeaseTariffs::ContainerClass)
                            .string_len(64)
                            .null(),
                    )
                    .col(&mut money_col(ContainerLeaseTariffs::LeaseRentPerDay))
                    .col(ColumnDef::new(ContainerLeaseTariffs::CurrencyId).integer().null())
                    .col(ColumnDef::new(ContainerLeaseTariffs::Remarks).text().null())
                    .col(&mut timestamp_col(ContainerLeaseTariffs::CreatedAt))
                    .col(&mut timestamp_col(ContainerLeaseTariffs::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DepotAvgTariffs::Table)
                    .if_not_exists()
                    .col(&mut id_col(DepotAvgTariffs::Id))
                    .col(&mut code_col(DepotAvgTariffs::TariffCode))
                    .col(ColumnDef::new(DepotAvgTariffs::AddressBookId).integer().not_null())
                    .col(ColumnDef::new(DepotAvgTariffs::PortId).integer().not_null())
                    .col(ColumnDef::new(DepotAvgTariffs::CurrencyId).integer().null())
                    .col(&mut money_col(DepotAvgTariffs::ManliftCharges))
                    .col(&mut money_col(DepotAvgTariffs::OnHireSurvey))
                    .col(&mut money_col(DepotAvgTariffs::OffHireSurvey))
                    .col(&mut money_col(DepotAvgTariffs::CleaningCharges))
                    .col(&mut money_col(DepotAvgTariffs::PeriodicTest))
                    .col(&mut money_col(DepotAvgTariffs::StoragePerDay))
                    .col(&mut money_col(DepotAvgTariffs::Total))
                    .col(ColumnDef::new(DepotAvgTariffs::Remarks).text().null())
                    .col(&mut timestamp_col(DepotAvgTariffs::CreatedAt))
                    .col(&mut timestamp_col(DepotAvgTariffs::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HandlingAgentTariffs::Table)
                    .if_not_exists()
                    .col(&mut id_col(HandlingAgentTariffs::Id))
                    .col(&mut code_col(HandlingAgentTariffs::TariffCode))
                    .col(
                        ColumnDef::new(HandlingAgentTariffs::AddressBookId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HandlingAgentTariffs::PortId).integer().not_null())
                    .col(ColumnDef::new(HandlingAgentTariffs::CurrencyId).integer().null())
                    .col(&mut money_col(HandlingAgentTariffs::ImportCommission))
                    .col(&mut money_col(HandlingAgentTariffs::ExportCommission))
                    .col(&mut money_col(HandlingAgentTariffs::TranshipmentCommission))
                    .col(&mut money_col(HandlingAgentTariffs::EmptyRepoCommission))
                    .col(&mut money_col(HandlingAgentTariffs::DetentionCommission))
                    .col(ColumnDef::new(HandlingAgentTariffs::Remarks).text().null())
                    .col(&mut timestamp_col(HandlingAgentTariffs::CreatedAt))
                    .col(&mut timestamp_col(HandlingAgentTariffs::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LandTransportTariffs::Table)
                    .if_not_exists()
                    .col(&mut id_col(LandTransportTariffs::Id))
                    .col(&mut code_col(LandTransportTariffs::TariffCode))
                    .col(
                        ColumnDef::new(LandTransportTariffs::AddressBookId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LandTransportTariffs::FromLocation)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LandTransportTariffs::ToLocation)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LandTransportTariffs::DistanceKm)
                            .decimal_len(19, 4)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LandTransportTariffs::TransportType)
                            .string_len(64)
                            .null(),
                    )
                    .col(&mut money_col(LandTransportTariffs::Amount))
                    .col(
                        ColumnDef::new(LandTransportTariffs::ApproximateTime)
                            .string_len(64)
                            .null(),
                    )
                    .col(ColumnDef::new(LandTransportTariffs::CurrencyId).integer().null())
                    .col(ColumnDef::new(LandTransportTariffs::Remarks).text().null())
                    .col(&mut timestamp_col(LandTransportTariffs::CreatedAt))
                    .col(&mut timestamp_col(LandTransportTariffs::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DepotCleaningTariffs::Table)
                    .if_not_exists()
                    .col(&mut id_col(DepotCleaningTariffs::Id))
                    .col(&mut code_col(DepotCleaningTariffs::TariffCode))
                    .col(
                        ColumnDef::new(DepotCleaningTariffs::AddressBookId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DepotCleaningTariffs::PortId).integer().not_null())
                    .col(ColumnDef::new(DepotCleaningTariffs::ProductId).integer().null())
                    .col(&mut money_col(DepotCleaningTariffs::CleaningCharges))
                    .col(ColumnDef::new(DepotCleaningTariffs::CurrencyId).integer().null())
                    .col(ColumnDef::new(DepotCleaningTariffs::Remarks).text().null())
                    .col(&mut timestamp_col(DepotCleaningTariffs::CreatedAt))
                    .col(&mut timestamp_col(DepotCleaningTariffs::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DepotCleaningTariffs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LandTransportTariffs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HandlingAgentTariffs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DepotAvgTariffs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContainerLeaseTariffs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContainerLeaseTariffs {
    Table,
    Id,
    TariffCode,
    AddressBookId,
    ContainerCategory,
    ContainerType,
    ContainerClass,
    LeaseRentPerDay,
    CurrencyId,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DepotAvgTariffs {
    Table,
    Id,
    TariffCode,
    AddressBookId,
    PortId,
    CurrencyId,
    ManliftCharges,
    OnHireSurvey,
    OffHireSurvey,
    CleaningCharges,
    PeriodicTest,
    StoragePerDay,
    Total,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HandlingAgentTariffs {
    Table,
    Id,
    TariffCode,
    AddressBookId,
    PortId,
    CurrencyId,
    ImportCommission,
    ExportCommission,
    TranshipmentCommission,
    EmptyRepoCommission,
    DetentionCommission,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LandTransportTariffs {
    Table,
    Id,
    TariffCode,
    AddressBookId,
    FromLocation,
    ToLocation,
    DistanceKm,
    TransportType,
    Amount,
    ApproximateTime,
    CurrencyId,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DepotCleaningTariffs {
    Table,
    Id,
    TariffCode,
    AddressBookId,
    PortId,
    ProductId,
    CleaningCharges,
    CurrencyId,
    Remarks,
    CreatedAt,
    UpdatedAt,
}
