use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Products::ProductCode)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Products::ProductName).string_len(255).not_null())
                    .col(ColumnDef::new(Products::TradeName).string_len(255).null())
                    .col(ColumnDef::new(Products::Grade).string_len(128).null())
                    .col(ColumnDef::new(Products::Manufacturer).string_len(255).null())
                    .col(ColumnDef::new(Products::CustomerName).string_len(255).null())
                    .col(ColumnDef::new(Products::ProductType).string_len(128).null())
                    .col(ColumnDef::new(Products::TankType).string_len(128).null())
                    .col(ColumnDef::new(Products::UnNumber).string_len(32).null())
                    .col(ColumnDef::new(Products::PackagingGroup).string_len(32).null())
                    .col(ColumnDef::new(Products::ClassType).string_len(64).null())
                    .col(ColumnDef::new(Products::Remarks).text().null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductMsds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductMsds::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductMsds::ProductId).integer().not_null())
                    .col(ColumnDef::new(ProductMsds::MsdsDate).date().null())
                    .col(ColumnDef::new(ProductMsds::Remarks).text().null())
                    .col(ColumnDef::new(ProductMsds::DocumentName).string_len(255).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_msds_product_id")
                            .from(ProductMsds::Table, ProductMsds::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductMsds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    ProductCode,
    ProductName,
    TradeName,
    Grade,
    Manufacturer,
    CustomerName,
    ProductType,
    TankType,
    UnNumber,
    PackagingGroup,
    ClassType,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductMsds {
    Table,
    Id,
    ProductId,
    MsdsDate,
    Remarks,
    DocumentName,
}
