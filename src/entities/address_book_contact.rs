use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "address_book_contacts")]
#[serde(rename_all = "camelCase")]
#[schema(as = AddressBookContact)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub address_book_id: i32,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub landline: Option<String>,
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
