use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PORT_TYPE_MAIN: &str = "Main";
pub const PORT_TYPE_ICD: &str = "ICD";

/// Sea port or inland container depot
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "ports")]
#[serde(rename_all = "camelCase")]
#[schema(as = Port)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub port_code: String,
    pub port_name: String,
    pub port_long_name: Option<String>,
    pub country_id: Option<i32>,
    /// `Main` or `ICD`
    pub port_type: String,
    /// Main port an ICD hangs off
    pub parent_port_id: Option<i32>,
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
            if let ActiveValue::NotSet = active_model.port_type {
                active_model.port_type = Set(PORT_TYPE_MAIN.to_string());
            }
            active_model.created_at = Set(now);
        }
        active_model.updated_at = Set(now);

        Ok(active_model)
    }
}
