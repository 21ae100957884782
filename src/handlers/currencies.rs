use super::common::{created_response, no_content_response};
use crate::{
    entities::currency,
    errors::ApiError,
    services::{
        currencies::{CreateCurrencyInput, UpdateCurrencyInput},
        ActiveStatusInput,
    },
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::{get, patch},
    Router,
};

pub fn currency_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_currencies).post(create_currency))
        .route("/:id", get(get_currency).patch(update_currency).delete(delete_currency))
        .route("/:id/status", patch(set_currency_status))
}

#[utoipa::path(
    get,
    path = "/api/v1/currency",
    params(ListQuery),
    responses(
        (status = 200, description = "Currency list", body = ApiResponse<PaginatedResponse<currency::Model>>)
    ),
    tag = "master-data"
)]
pub async fn list_currencies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<currency::Model>> {
    let (page, limit) = state.paging(query.page, query.limit);
    let rows = state
        .services
        .currencies
        .list_currencies(page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

#[utoipa::path(
    post,
    path = "/api/v1/currency",
    request_body = CreateCurrencyInput,
    responses(
        (status = 201, description = "Currency created", body = ApiResponse<currency::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn create_currency(
    State(state): State<AppState>,
    Json(payload): Json<CreateCurrencyInput>,
) -> Result<(StatusCode, Json<ApiResponse<currency::Model>>), ApiError> {
    let created = state.services.currencies.create_currency(payload).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/currency/{id}",
    params(("id" = i32, Path, description = "Currency id")),
    responses(
        (status = 200, description = "Currency found", body = ApiResponse<currency::Model>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn get_currency(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<currency::Model> {
    let row = state.services.currencies.get_currency(id).await?;
    Ok(Json(ApiResponse::success(row)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/currency/{id}",
    params(("id" = i32, Path, description = "Currency id")),
    request_body = UpdateCurrencyInput,
    responses(
        (status = 200, description = "Currency updated", body = ApiResponse<currency::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn update_currency(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCurrencyInput>,
) -> ApiResult<currency::Model> {
    let row = state.services.currencies.update_currency(id, payload).await?;
    Ok(Json(ApiResponse::success(row)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/currency/{id}/status",
    params(("id" = i32, Path, description = "Currency id")),
    request_body = ActiveStatusInput,
    responses(
        (status = 200, description = "Currency activated or deactivated", body = ApiResponse<currency::Model>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn set_currency_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActiveStatusInput>,
) -> ApiResult<currency::Model> {
    let row = state
        .services
        .currencies
        .set_status(id, payload.is_active)
        .await?;
    Ok(Json(ApiResponse::success(row)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/currency/{id}",
    params(("id" = i32, Path, description = "Currency id")),
    responses(
        (status = 204, description = "Currency deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Still referenced", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn delete_currency(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.currencies.delete_currency(id).await?;
    Ok(no_content_response())
}
