use crate::{
    entities::{country, port},
    errors::ServiceError,
    PaginatedResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortInput {
    #[validate(length(min = 1, max = 10, message = "port code is required"))]
    #[schema(example = "INNSA")]
    pub port_code: String,
    #[validate(length(min = 1, message = "port name is required"))]
    pub port_name: String,
    pub port_long_name: Option<String>,
    pub country_id: Option<i32>,
    /// `Main` (default) or `ICD`
    pub port_type: Option<String>,
    pub parent_port_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortInput {
    #[validate(length(min = 1, max = 10))]
    pub port_code: Option<String>,
    #[validate(length(min = 1))]
    pub port_name: Option<String>,
    pub port_long_name: Option<String>,
    pub country_id: Option<i32>,
    pub port_type: Option<String>,
    pub parent_port_id: Option<i32>,
}

fn check_port_type(port_type: &str) -> Result<(), ServiceError> {
    if port_type == port::PORT_TYPE_MAIN || port_type == port::PORT_TYPE_ICD {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(format!(
            "port type must be '{}' or '{}'",
            port::PORT_TYPE_MAIN,
            port::PORT_TYPE_ICD
        )))
    }
}

#[derive(Clone)]
pub struct PortService {
    db: Arc<DatabaseConnection>,
}

impl PortService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_port(&self, input: CreatePortInput) -> Result<port::Model, ServiceError> {
        input.validate()?;
        let code = input.port_code.trim().to_uppercase();
        let port_type = input
            .port_type
            .unwrap_or_else(|| port::PORT_TYPE_MAIN.to_string());
        check_port_type(&port_type)?;
        self.ensure_unique_code(&code, None).await?;
        if let Some(country_id) = input.country_id {
            self.ensure_country(country_id).await?;
        }
        if let Some(parent_id) = input.parent_port_id {
            self.get_port(parent_id).await.map_err(|_| {
                ServiceError::ValidationError(format!("parent port {parent_id} does not exist"))
            })?;
        }

        let created = port::ActiveModel {
            port_code: Set(code),
            port_name: Set(input.port_name),
            port_long_name: Set(input.port_long_name),
            country_id: Set(input.country_id),
            port_type: Set(port_type),
            parent_port_id: Set(input.parent_port_id),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(port_id = created.id, code = %created.port_code, "Port created");
        Ok(created)
    }

    pub async fn get_port(&self, id: i32) -> Result<port::Model, ServiceError> {
        port::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Port", id))
    }

    #[instrument(skip(self))]
    pub async fn list_ports(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<port::Model>, ServiceError> {
        let mut query = port::Entity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(port::Column::PortCode.contains(term))
                    .add(port::Column::PortName.contains(term)),
            );
        }

        let paginator = query
            .order_by_asc(port::Column::PortCode)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self))]
    pub async fn update_port(
        &self,
        id: i32,
        input: UpdatePortInput,
    ) -> Result<port::Model, ServiceError> {
        input.validate()?;
        let existing = self.get_port(id).await?;
        let mut active: port::ActiveModel = existing.into();

        if let Some(code) = input.port_code {
            let code = code.trim().to_uppercase();
            self.ensure_unique_code(&code, Some(id)).await?;
            active.port_code = Set(code);
        }
        if let Some(name) = input.port_name {
            active.port_name = Set(name);
        }
        if let Some(long_name) = input.port_long_name {
            active.port_long_name = Set(Some(long_name));
        }
        if let Some(country_id) = input.country_id {
            self.ensure_country(country_id).await?;
            active.country_id = Set(Some(country_id));
        }
        if let Some(port_type) = input.port_type {
            check_port_type(&port_type)?;
            active.port_type = Set(port_type);
        }
        if let Some(parent_id) = input.parent_port_id {
            if parent_id == id {
                return Err(ServiceError::ValidationError(
                    "a port cannot be its own parent".to_string(),
                ));
            }
            self.get_port(parent_id).await.map_err(|_| {
                ServiceError::ValidationError(format!("parent port {parent_id} does not exist"))
            })?;
            active.parent_port_id = Set(Some(parent_id));
        }

        let updated = active.update(&*self.db).await?;
        info!(port_id = id, "Port updated");
        Ok(updated)
    }

    /// Deletes the port unless an ICD still hangs off it
    #[instrument(skip(self))]
    pub async fn delete_port(&self, id: i32) -> Result<(), ServiceError> {
        self.get_port(id).await?;

        let children = port::Entity::find()
            .filter(port::Column::ParentPortId.eq(id))
            .count(&*self.db)
            .await?;
        if children > 0 {
            return Err(ServiceError::Conflict(format!(
                "port {id} is the parent of {children} port(s)"
            )));
        }

        port::Entity::delete_by_id(id).exec(&*self.db).await?;
        info!(port_id = id, "Port deleted");
        Ok(())
    }

    async fn ensure_country(&self, country_id: i32) -> Result<(), ServiceError> {
        if country::Entity::find_by_id(country_id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::ValidationError(format!(
                "country {country_id} does not exist"
            )));
        }
        Ok(())
    }

    async fn ensure_unique_code(
        &self,
        code: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = port::Entity::find().filter(port::Column::PortCode.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(port::Column::Id.ne(id));
        }
        if query.count(&*self.db).await? > 0 {
            return Err(ServiceError::Conflict(format!(
                "port code '{code}' already exists"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_type_is_main_or_icd() {
        assert!(check_port_type("Main").is_ok());
        assert!(check_port_type("ICD").is_ok());
        assert!(check_port_type("Dry").is_err());
    }
}
