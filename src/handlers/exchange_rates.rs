use super::common::{created_response, no_content_response};
use crate::{
    entities::exchange_rate,
    errors::ApiError,
    services::exchange_rates::{
        CreateExchangeRateInput, ExchangeRateFilter, UpdateExchangeRateInput,
    },
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};

pub fn exchange_rate_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rates).post(create_rate))
        .route("/:id", get(get_rate).patch(update_rate).delete(delete_rate))
}

#[utoipa::path(
    get,
    path = "/api/v1/exchange-rates",
    params(ExchangeRateFilter),
    responses(
        (status = 200, description = "Rates listed, newest date first", body = ApiResponse<PaginatedResponse<exchange_rate::Model>>)
    ),
    tag = "master-data"
)]
pub async fn list_rates(
    State(state): State<AppState>,
    Query(filter): Query<ExchangeRateFilter>,
) -> ApiResult<PaginatedResponse<exchange_rate::Model>> {
    let (page, limit) = state.paging(filter.page.unwrap_or(1), filter.limit);
    let rates = state
        .services
        .exchange_rates
        .list_rates(&filter, page, limit)
        .await?;
    Ok(Json(ApiResponse::success(rates)))
}

#[utoipa::path(
    post,
    path = "/api/v1/exchange-rates",
    request_body = CreateExchangeRateInput,
    responses(
        (status = 201, description = "Rate recorded", body = ApiResponse<exchange_rate::Model>),
        (status = 400, description = "Same currency on both sides or rate not positive", body = crate::errors::ErrorResponse),
        (status = 404, description = "Currency not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn create_rate(
    State(state): State<AppState>,
    Json(payload): Json<CreateExchangeRateInput>,
) -> Result<(StatusCode, Json<ApiResponse<exchange_rate::Model>>), ApiError> {
    let rate = state.services.exchange_rates.create_rate(payload).await?;
    Ok(created_response(rate))
}

#[utoipa::path(
    get,
    path = "/api/v1/exchange-rates/{id}",
    params(("id" = i32, Path, description = "Exchange rate id")),
    responses(
        (status = 200, description = "Rate found", body = ApiResponse<exchange_rate::Model>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn get_rate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<exchange_rate::Model> {
    let rate = state.services.exchange_rates.get_rate(id).await?;
    Ok(Json(ApiResponse::success(rate)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/exchange-rates/{id}",
    params(("id" = i32, Path, description = "Exchange rate id")),
    request_body = UpdateExchangeRateInput,
    responses(
        (status = 200, description = "Rate updated", body = ApiResponse<exchange_rate::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn update_rate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateExchangeRateInput>,
) -> ApiResult<exchange_rate::Model> {
    let rate = state.services.exchange_rates.update_rate(id, payload).await?;
    Ok(Json(ApiResponse::success(rate)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/exchange-rates/{id}",
    params(("id" = i32, Path, description = "Exchange rate id")),
    responses(
        (status = 204, description = "Rate deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn delete_rate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.exchange_rates.delete_rate(id).await?;
    Ok(no_content_response())
}
