use super::common::{created_response, no_content_response};
use crate::{
    entities::country,
    errors::ApiError,
    services::{
        countries::{CreateCountryInput, UpdateCountryInput},
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

/// Country master data, nested under `/country`
pub fn country_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_countries).post(create_country))
        .route("/:id", get(get_country).patch(update_country).delete(delete_country))
        .route("/:id/status", patch(set_country_status))
}

#[utoipa::path(
    get,
    path = "/api/v1/country",
    params(ListQuery),
    responses(
        (status = 200, description = "Country list", body = ApiResponse<PaginatedResponse<country::Model>>)
    ),
    tag = "master-data"
)]
pub async fn list_countries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<country::Model>> {
    let (page, limit) = state.paging(query.page, query.limit);
    let rows = state
        .services
        .countries
        .list_countries(page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

#[utoipa::path(
    post,
    path = "/api/v1/country",
    request_body = CreateCountryInput,
    responses(
        (status = 201, description = "Country created", body = ApiResponse<country::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn create_country(
    State(state): State<AppState>,
    Json(payload): Json<CreateCountryInput>,
) -> Result<(StatusCode, Json<ApiResponse<country::Model>>), ApiError> {
    let created = state.services.countries.create_country(payload).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/country/{id}",
    params(("id" = i32, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country found", body = ApiResponse<country::Model>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn get_country(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<country::Model> {
    let row = state.services.countries.get_country(id).await?;
    Ok(Json(ApiResponse::success(row)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/country/{id}",
    params(("id" = i32, Path, description = "Country id")),
    request_body = UpdateCountryInput,
    responses(
        (status = 200, description = "Country updated", body = ApiResponse<country::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn update_country(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCountryInput>,
) -> ApiResult<country::Model> {
    let row = state.services.countries.update_country(id, payload).await?;
    Ok(Json(ApiResponse::success(row)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/country/{id}/status",
    params(("id" = i32, Path, description = "Country id")),
    request_body = ActiveStatusInput,
    responses(
        (status = 200, description = "Country activated or deactivated", body = ApiResponse<country::Model>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn set_country_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ActiveStatusInput>,
) -> ApiResult<country::Model> {
    let row = state
        .services
        .countries
        .set_status(id, payload.is_active)
        .await?;
    Ok(Json(ApiResponse::success(row)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/country/{id}",
    params(("id" = i32, Path, description = "Country id")),
    responses(
        (status = 204, description = "Country deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Still referenced", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn delete_country(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.countries.delete_country(id).await?;
    Ok(no_content_response())
}
