use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const OWNERSHIP_OWN: &str = "Own";
pub const OWNERSHIP_LEASED: &str = "Leased";

/// A tank container. Its current status is derived from the movement
/// ledger and never stored here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "inventories")]
#[serde(rename_all = "camelCase")]
#[schema(as = Inventory)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub container_number: String,
    pub container_category: String,
    pub container_type: Option<String>,
    pub container_size: Option<String>,
    pub container_class: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub capacity: Option<Decimal>,
    pub capacity_unit: Option<String>,
    pub manufacturer: Option<String>,
    pub build_year: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub gross_weight: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub tare_weight: Option<Decimal>,
    pub initial_survey: Option<String>,
    /// `Own` or `Leased`
    pub ownership: String,
    pub port_id: Option<i32>,
    pub on_hire_depot_address_book_id: Option<i32>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inventory_leasing_info::Entity")]
    LeasingInfos,
    #[sea_orm(has_many = "super::inventory_certificate::Entity")]
    Certificates,
    #[sea_orm(has_many = "super::movement_history::Entity")]
    MovementHistories,
}

impl Related<super::inventory_leasing_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeasingInfos.def()
    }
}

impl Related<super::inventory_certificate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certificates.def()
    }
}

impl Related<super::movement_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovementHistories.def()
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
            if let ActiveValue::NotSet = active_model.ownership {
                active_model.ownership = Set(OWNERSHIP_OWN.to_string());
            }
            active_model.created_at = Set(now);
        }
        active_model.updated_at = Set(now);

        Ok(active_model)
    }
}
