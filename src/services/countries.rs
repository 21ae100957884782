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
pub struct CreateCountryInput {
    #[validate(length(min = 2, max = 3, message = "country code must be 2 or 3 letters"))]
    #[schema(example = "IN")]
    pub country_code: String,
    #[validate(length(min = 1, message = "country name is required"))]
    pub country_name: String,
    pub region_name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCountryInput {
    #[validate(length(min = 2, max = 3))]
    pub country_code: Option<String>,
    #[validate(length(min = 1))]
    pub country_name: Option<String>,
    pub region_name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct CountryService {
    db: Arc<DatabaseConnection>,
}

impl CountryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_country(
        &self,
        input: CreateCountryInput,
    ) -> Result<country::Model, ServiceError> {
        input.validate()?;
        let code = input.country_code.trim().to_uppercase();
        self.ensure_unique_code(&code, None).await?;

        let created = country::ActiveModel {
            country_code: Set(code),
            country_name: Set(input.country_name),
            region_name: Set(input.region_name),
            is_active: Set(input.is_active.unwrap_or(true)),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(country_id = created.id, code = %created.country_code, "Country created");
        Ok(created)
    }

    pub async fn get_country(&self, id: i32) -> Result<country::Model, ServiceError> {
        country::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Country", id))
    }

    #[instrument(skip(self))]
    pub async fn list_countries(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<country::Model>, ServiceError> {
        let mut query = country::Entity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(country::Column::CountryCode.contains(term))
                    .add(country::Column::CountryName.contains(term)),
            );
        }

        let paginator = query
            .order_by_asc(country::Column::CountryName)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self))]
    pub async fn update_country(
        &self,
        id: i32,
        input: UpdateCountryInput,
    ) -> Result<country::Model, ServiceError> {
        input.validate()?;
        let existing = self.get_country(id).await?;
        let mut active: country::ActiveModel = existing.into();

        if let Some(code) = input.country_code {
            let code = code.trim().to_uppercase();
            self.ensure_unique_code(&code, Some(id)).await?;
            active.country_code = Set(code);
        }
        if let Some(name) = input.country_name {
            active.country_name = Set(name);
        }
        if let Some(region) = input.region_name {
            active.region_name = Set(Some(region));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        let updated = active.update(&*self.db).await?;
        info!(country_id = id, "Country updated");
        Ok(updated)
    }

    /// Activates or deactivates the country
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, is_active: bool) -> Result<country::Model, ServiceError> {
        let existing = self.get_country(id).await?;
        let mut active: country::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        let updated = active.update(&*self.db).await?;

        info!(country_id = id, is_active, "Country status changed");
        Ok(updated)
    }

    /// Deletes the country unless a port still references it
    #[instrument(skip(self))]
    pub async fn delete_country(&self, id: i32) -> Result<(), ServiceError> {
        self.get_country(id).await?;

        let ports = port::Entity::find()
            .filter(port::Column::CountryId.eq(id))
            .count(&*self.db)
            .await?;
        if ports > 0 {
            return Err(ServiceError::Conflict(format!(
                "country {id} is referenced by {ports} port(s)"
            )));
        }

        country::Entity::delete_by_id(id).exec(&*self.db).await?;
        info!(country_id = id, "Country deleted");
        Ok(())
    }

    async fn ensure_unique_code(&self, code: &str, exclude_id: Option<i32>) -> Result<(), ServiceError> {
        let mut query = country::Entity::find().filter(country::Column::CountryCode.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(country::Column::Id.ne(id));
        }
        if query.count(&*self.db).await? > 0 {
            return Err(ServiceError::Conflict(format!(
                "country code '{code}' already exists"
            )));
        }
        Ok(())
    }
}
