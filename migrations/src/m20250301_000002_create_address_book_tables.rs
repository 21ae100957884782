use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AddressBooks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AddressBooks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AddressBooks::RefId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AddressBooks::CompanyName).string_len(255).not_null())
                    .col(ColumnDef::new(AddressBooks::BusinessType).string_len(255).not_null())
                    .col(ColumnDef::new(AddressBooks::Address).text().null())
                    .col(ColumnDef::new(AddressBooks::Phone).string_len(64).null())
                    .col(ColumnDef::new(AddressBooks::Email).string_len(255).null())
                    .col(ColumnDef::new(AddressBooks::Website).string_len(255).null())
                    .col(ColumnDef::new(AddressBooks::CreditTerms).string_len(64).null())
                    .col(
                        ColumnDef::new(AddressBooks::CreditLimit)
                            .decimal_len(19, 4)
                            .null(),
                    )
                    .col(ColumnDef::new(AddressBooks::CountryId).integer().null())
                    .col(ColumnDef::new(AddressBooks::Remarks).text().null())
                    .col(
                        ColumnDef::new(AddressBooks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AddressBooks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AddressBookContacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AddressBookContacts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AddressBookContacts::AddressBookId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AddressBookContacts::Title).string_len(16).null())
                    .col(
                        ColumnDef::new(AddressBookContacts::FirstName)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AddressBookContacts::LastName).string_len(128).null())
                    .col(
                        ColumnDef::new(AddressBookContacts::Designation)
                            .string_len(128)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AddressBookContacts::Department)
                            .string_len(128)
                            .null(),
                    )
                    .col(ColumnDef::new(AddressBookContacts::Email).string_len(255).null())
                    .col(ColumnDef::new(AddressBookContacts::Mobile).string_len(64).null())
                    .col(ColumnDef::new(AddressBookContacts::Landline).string_len(64).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_book_contacts_address_book_id")
                            .from(AddressBookContacts::Table, AddressBookContacts::AddressBookId)
                            .to(AddressBooks::Table, AddressBooks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AddressBookBankDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AddressBookBankDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AddressBookBankDetails::AddressBookId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AddressBookBankDetails::BankName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AddressBookBankDetails::AccountNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AddressBookBankDetails::SwiftCode)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AddressBookBankDetails::IfscCode)
                            .string_len(32)
                            .null(),
                    )
                    .col(ColumnDef::new(AddressBookBankDetails::CurrencyId).integer().null())
                    .col(ColumnDef::new(AddressBookBankDetails::BankAddress).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_book_bank_details_address_book_id")
                            .from(
                                AddressBookBankDetails::Table,
                                AddressBookBankDetails::AddressBookId,
                            )
                            .to(AddressBooks::Table, AddressBooks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AddressBookBankDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AddressBookContacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AddressBooks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AddressBooks {
    Table,
    Id,
    RefId,
    CompanyName,
    BusinessType,
    Address,
    Phone,
    Email,
    Website,
    CreditTerms,
    CreditLimit,
    CountryId,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AddressBookContacts {
    Table,
    Id,
    AddressBookId,
    Title,
    FirstName,
    LastName,
    Designation,
    Department,
    Email,
    Mobile,
    Landline,
}

#[derive(DeriveIden)]
enum AddressBookBankDetails {
    Table,
    Id,
    AddressBookId,
    BankName,
    AccountNumber,
    SwiftCode,
    IfscCode,
    CurrencyId,
    BankAddress,
}
