use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Average depot charges at a port. `total` is always the sum of the six components.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "depot_avg_tariffs")]
#[serde(rename_all = "camelCase")]
#[schema(as = DepotAvgTariff)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub tariff_code: String,
    pub address_book_id: i32,
    pub port_id: i32,
    pub currency_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub manlift_charges: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub on_hire_survey: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub off_hire_survey: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub cleaning_charges: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub periodic_test: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub storage_per_day: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total: Decimal,
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
