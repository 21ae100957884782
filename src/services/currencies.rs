use crate::{
    entities::{currency, exchange_rate},
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
pub struct CreateCurrencyInput {
    #[validate(length(equal = 3, message = "currency code must be 3 letters"))]
    #[schema(example = "USD")]
    pub currency_code: String,
    #[validate(length(min = 1, message = "currency name is required"))]
    pub currency_name: String,
    pub currency_symbol: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCurrencyInput {
    #[validate(length(equal = 3))]
    pub currency_code: Option<String>,
    #[validate(length(min = 1))]
    pub currency_name: Option<String>,
    pub currency_symbol: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct CurrencyService {
    db: Arc<DatabaseConnection>,
}

impl CurrencyService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_currency(
        &self,
        input: CreateCurrencyInput,
    ) -> Result<currency::Model, ServiceError> {
        input.validate()?;
        let code = input.currency_code.trim().to_uppercase();
        self.ensure_unique_code(&code, None).await?;

        let created = currency::ActiveModel {
            currency_code: Set(code),
            currency_name: Set(input.currency_name),
            currency_symbol: Set(input.currency_symbol),
            is_active: Set(input.is_active.unwrap_or(true)),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(currency_id = created.id, code = %created.currency_code, "Currency created");
        Ok(created)
    }

    pub async fn get_currency(&self, id: i32) -> Result<currency::Model, ServiceError> {
        currency::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Currency", id))
    }

    #[instrument(skip(self))]
    pub async fn list_currencies(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<currency::Model>, ServiceError> {
        let mut query = currency::Entity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(currency::Column::CurrencyCode.contains(term))
                    .add(currency::Column::CurrencyName.contains(term)),
            );
        }

        let paginator = query
            .order_by_asc(currency::Column::CurrencyCode)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self))]
    pub async fn update_currency(
        &self,
        id: i32,
        input: UpdateCurrencyInput,
    ) -> Result<currency::Model, ServiceError> {
        input.validate()?;
        let existing = self.get_currency(id).await?;
        let mut active: currency::ActiveModel = existing.into();

        if let Some(code) = input.currency_code {
            let code = code.trim().to_uppercase();
            self.ensure_unique_code(&code, Some(id)).await?;
            active.currency_code = Set(code);
        }
        if let Some(name) = input.currency_name {
            active.currency_name = Set(name);
        }
        if let Some(symbol) = input.currency_symbol {
            active.currency_symbol = Set(Some(symbol));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        let updated = active.update(&*self.db).await?;
        info!(currency_id = id, "Currency updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i32,
        is_active: bool,
    ) -> Result<currency::Model, ServiceError> {
        let existing = self.get_currency(id).await?;
        let mut active: currency::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        let updated = active.update(&*self.db).await?;

        info!(currency_id = id, is_active, "Currency status changed");
        Ok(updated)
    }

    /// Deletes the currency unless an exchange rate still quotes it
    #[instrument(skip(self))]
    pub async fn delete_currency(&self, id: i32) -> Result<(), ServiceError> {
        self.get_currency(id).await?;

        let rates = exchange_rate::Entity::find()
            .filter(
                Condition::any()
                    .add(exchange_rate::Column::FromCurrencyId.eq(id))
                    .add(exchange_rate::Column::ToCurrencyId.eq(id)),
            )
            .count(&*self.db)
            .await?;
        if rates > 0 {
            return Err(ServiceError::Conflict(format!(
                "currency {id} is used by {rates} exchange rate(s)"
            )));
        }

        currency::Entity::delete_by_id(id).exec(&*self.db).await?;
        info!(currency_id = id, "Currency deleted");
        Ok(())
    }

    async fn ensure_unique_code(
        &self,
        code: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = currency::Entity::find().filter(currency::Column::CurrencyCode.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(currency::Column::Id.ne(id));
        }
        if query.count(&*self.db).await? > 0 {
            return Err(ServiceError::Conflict(format!(
                "currency code '{code}' already exists"
            )));
        }
        Ok(())
    }
}
