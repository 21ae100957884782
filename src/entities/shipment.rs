use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Laden shipment job
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "shipments")]
#[serde(rename_all = "camelCase")]
#[schema(as = Shipment)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Generated job number, `RST/SHP/00001` style
    #[sea_orm(unique)]
    pub job_number: String,
    pub date: NaiveDate,
    pub ref_number: Option<String>,
    pub customer_address_book_id: Option<i32>,
    pub consignee_address_book_id: Option<i32>,
    pub shipper_address_book_id: Option<i32>,
    pub product_id: Option<i32>,
    /// Port of loading
    pub pol_port_id: Option<i32>,
    /// Port of discharge
    pub pod_port_id: Option<i32>,
    pub carrier_address_book_id: Option<i32>,
    pub empty_return_depot_address_book_id: Option<i32>,
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    pub quantity: Option<i32>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

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
