use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "address_book_bank_details")]
#[serde(rename_all = "camelCase")]
#[schema(as = AddressBookBankDetail)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub address_book_id: i32,
    pub bank_name: String,
    pub account_number: String,
    pub swift_code: Option<String>,
    pub ifsc_code: Option<String>,
    pub currency_id: Option<i32>,
    pub bank_address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::address_book::Entity",
        from = "Column::AddressBookId",
        to = "super::address_book::Column::Id",
        on_delete = "Cascade"
    )]
    AddressBook,
}

impl Related<super::address_book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AddressBook.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
