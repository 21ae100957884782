use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Countries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Countries::CountryCode)
                            .string_len(8)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Countries::CountryName).string_len(128).not_null())
                    .col(ColumnDef::new(Countries::RegionName).string_len(128).null())
                    .col(
                        ColumnDef::new(Countries::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Countries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Countries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currencies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Currencies::CurrencyCode)
                            .string_len(3)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Currencies::CurrencyName).string_len(128).not_null())
                    .col(ColumnDef::new(Currencies::CurrencySymbol).string_len(8).null())
                    .col(
                        ColumnDef::new(Currencies::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Currencies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Currencies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExchangeRates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExchangeRates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExchangeRates::FromCurrencyId).integer().not_null())
                    .col(ColumnDef::new(ExchangeRates::ToCurrencyId).integer().not_null())
                    .col(
                        ColumnDef::new(ExchangeRates::ExchangeRate)
                            .decimal_len(19, 6)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExchangeRates::Date).date().not_null())
                    .col(
                        ColumnDef::new(ExchangeRates::VariancePercent)
                            .decimal_len(9, 4)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExchangeRates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Ports::PortCode)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Ports::PortName).string_len(128).not_null())
                    .col(ColumnDef::new(Ports::PortLongName).string_len(255).null())
                    .col(ColumnDef::new(Ports::CountryId).integer().null())
                    .col(
                        ColumnDef::new(Ports::PortType)
                            .string_len(16)
                            .not_null()
                            .default("Main"),
                    )
                    .col(ColumnDef::new(Ports::ParentPortId).integer().null())
                    .col(
                        ColumnDef::new(Ports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Ports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exchange_rates_pair")
                    .table(ExchangeRates::Table)
                    .col(ExchangeRates::FromCurrencyId)
                    .col(ExchangeRates::ToCurrencyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExchangeRates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
    CountryCode,
    CountryName,
    RegionName,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Currencies {
    Table,
    Id,
    CurrencyCode,
    CurrencyName,
    CurrencySymbol,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExchangeRates {
    Table,
    Id,
    FromCurrencyId,
    ToCurrencyId,
    ExchangeRate,
    Date,
    VariancePercent,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Ports {
    Table,
    Id,
    PortCode,
    PortName,
    PortLongName,
    CountryId,
    PortType,
    ParentPortId,
    CreatedAt,
    UpdatedAt,
}
