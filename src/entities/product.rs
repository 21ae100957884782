use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cargo product carried in tank containers
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
#[schema(as = Product)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Generated code, `RST/PRD/00001` style
    #[sea_orm(unique)]
    pub product_code: String,
    pub product_name: String,
    pub trade_name: Option<String>,
    pub grade: Option<String>,
    pub manufacturer: Option<String>,
    pub customer_name: Option<String>,
    pub product_type: Option<String>,
    pub tank_type: Option<String>,
    /// UN hazardous goods number
    pub un_number: Option<String>,
    pub packaging_group: Option<String>,
    pub class_type: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_msds::Entity")]
    Msds,
}

impl Related<super::product_msds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Msds.def()
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
