use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Company record: customers, carriers, depots, lessors and agents alike
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "address_books")]
#[serde(rename_all = "camelCase")]
#[schema(as = AddressBook)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Generated reference, `RST-AB-00001` style
    #[sea_orm(unique)]
    pub ref_id: String,
    pub company_name: String,
    /// Comma-separated roles such as `Carrier,Depot Terminal`
    pub business_type: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub credit_terms: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub credit_limit: Option<Decimal>,
    pub country_id: Option<i32>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::address_book_contact::Entity")]
    Contacts,
    #[sea_orm(has_many = "super::address_book_bank_detail::Entity")]
    BankDetails,
}

impl Related<super::address_book_contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contacts.def()
    }
}

impl Related<super::address_book_bank_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankDetails.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();
        if insert {
            active_model.created_at = Set(now);
        }
        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
