use super::common::{created_response, no_content_response};
use crate::{
    errors::ApiError,
    services::inventory::{
        CreateInventoryInput, InventoryDetail, InventorySummary, UpdateInventoryInput,
    },
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};

/// Container inventory routes, nested under `/inventory`
pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory))
        .route(
            "/:id",
            get(get_inventory)
                .patch(update_inventory)
                .delete(delete_inventory),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    params(ListQuery),
    responses(
        (status = 200, description = "Containers listed with their current status", body = ApiResponse<PaginatedResponse<InventorySummary>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<InventorySummary>> {
    let (page, limit) = state.paging(query.page, query.limit);
    let items = state
        .services
        .inventory
        .list_inventory(page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = CreateInventoryInput,
    responses(
        (status = 201, description = "Container registered as AVAILABLE", body = ApiResponse<InventoryDetail>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Container number already registered", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn create_inventory(
    State(state): State<AppState>,
    Json(payload): Json<CreateInventoryInput>,
) -> Result<(StatusCode, Json<ApiResponse<InventoryDetail>>), ApiError> {
    let detail = state.services.inventory.create_inventory(payload).await?;
    Ok(created_response(detail))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}",
    params(("id" = i32, Path, description = "Inventory id")),
    responses(
        (status = 200, description = "Container with leasing info, certificates and current status", body = ApiResponse<InventoryDetail>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<InventoryDetail> {
    let detail = state.services.inventory.get_inventory(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/inventory/{id}",
    params(("id" = i32, Path, description = "Inventory id")),
    request_body = UpdateInventoryInput,
    responses(
        (status = 200, description = "Container updated", body = ApiResponse<InventoryDetail>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Container number already registered", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInventoryInput>,
) -> ApiResult<InventoryDetail> {
    let detail = state
        .services
        .inventory
        .update_inventory(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    params(("id" = i32, Path, description = "Inventory id")),
    responses(
        (status = 204, description = "Container and its history deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.inventory.delete_inventory(id).await?;
    Ok(no_content_response())
}
