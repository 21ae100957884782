use crate::{
    entities::{currency, exchange_rate},
    errors::ServiceError,
    PaginatedResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExchangeRateInput {
    pub from_currency_id: i32,
    pub to_currency_id: i32,
    #[schema(example = "83.125")]
    pub exchange_rate: Decimal,
    pub date: NaiveDate,
    pub variance_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExchangeRateInput {
    pub from_currency_id: Option<i32>,
    pub to_currency_id: Option<i32>,
    pub exchange_rate: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub variance_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExchangeRateFilter {
    pub from_currency_id: Option<i32>,
    pub to_currency_id: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn check_rate(rate: Decimal) -> Result<(), ServiceError> {
    if rate <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "exchange rate must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ExchangeRateService {
    db: Arc<DatabaseConnection>,
}

impl ExchangeRateService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_rate(
        &self,
        input: CreateExchangeRateInput,
    ) -> Result<exchange_rate::Model, ServiceError> {
        check_rate(input.exchange_rate)?;
        self.check_pair(input.from_currency_id, input.to_currency_id)
            .await?;

        let created = exchange_rate::ActiveModel {
            from_currency_id: Set(input.from_currency_id),
            to_currency_id: Set(input.to_currency_id),
            exchange_rate: Set(input.exchange_rate),
            date: Set(input.date),
            variance_percent: Set(input.variance_percent),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(exchange_rate_id = created.id, "Exchange rate created");
        Ok(created)
    }

    pub async fn get_rate(&self, id: i32) -> Result<exchange_rate::Model, ServiceError> {
        exchange_rate::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Exchange rate", id))
    }

    /// Rates newest first, optionally for one currency pair side
    #[instrument(skip(self))]
    pub async fn list_rates(
        &self,
        filter: &ExchangeRateFilter,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<exchange_rate::Model>, ServiceError> {
        let mut query = exchange_rate::Entity::find();
        if let Some(from) = filter.from_currency_id {
            query = query.filter(exchange_rate::Column::FromCurrencyId.eq(from));
        }
        if let Some(to) = filter.to_currency_id {
            query = query.filter(exchange_rate::Column::ToCurrencyId.eq(to));
        }

        let paginator = query
            .order_by_desc(exchange_rate::Column::Date)
            .order_by_desc(exchange_rate::Column::Id)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self))]
    pub async fn update_rate(
        &self,
        id: i32,
        input: UpdateExchangeRateInput,
    ) -> Result<exchange_rate::Model, ServiceError> {
        let existing = self.get_rate(id).await?;

        let from = input.from_currency_id.unwrap_or(existing.from_currency_id);
        let to = input.to_currency_id.unwrap_or(existing.to_currency_id);
        if input.from_currency_id.is_some() || input.to_currency_id.is_some() {
            self.check_pair(from, to).await?;
        }

        let mut active: exchange_rate::ActiveModel = existing.into();
        active.from_currency_id = Set(from);
        active.to_currency_id = Set(to);
        if let Some(rate) = input.exchange_rate {
            check_rate(rate)?;
            active.exchange_rate = Set(rate);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(variance) = input.variance_percent {
            active.variance_percent = Set(Some(variance));
        }

        let updated = active.update(&*self.db).await?;
        info!(exchange_rate_id = id, "Exchange rate updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_rate(&self, id: i32) -> Result<(), ServiceError> {
        self.get_rate(id).await?;
        exchange_rate::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        info!(exchange_rate_id = id, "Exchange rate deleted");
        Ok(())
    }

    /// Both currencies must exist and differ
    async fn check_pair(&self, from: i32, to: i32) -> Result<(), ServiceError> {
        if from == to {
            return Err(ServiceError::ValidationError(
                "from and to currencies must differ".to_string(),
            ));
        }
        for id in [from, to] {
            if currency::Entity::find_by_id(id)
                .one(&*self.db)
                .await?
                .is_none()
            {
                return Err(ServiceError::ValidationError(format!(
                    "currency {id} does not exist"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rate_must_be_positive() {
        assert!(check_rate(dec!(0.0001)).is_ok());
        assert!(check_rate(Decimal::ZERO).is_err());
        assert!(check_rate(dec!(-1)).is_err());
    }
}
