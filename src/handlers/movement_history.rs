use super::common::created_response;
use crate::{
    entities::movement_history,
    errors::ApiError,
    services::movement_history::{BulkStatusUpdateRequest, MovementFilter, MovementHistoryView},
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

/// Movement ledger routes, nested under `/movement-history`
pub fn movement_history_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movements))
        .route("/latest", get(latest_movements))
        .route("/container/:inventory_id", get(container_history))
        .route("/bulk-create", post(bulk_create))
}

#[utoipa::path(
    get,
    path = "/api/v1/movement-history",
    params(MovementFilter),
    responses(
        (status = 200, description = "Ledger rows, newest first", body = ApiResponse<PaginatedResponse<MovementHistoryView>>),
        (status = 400, description = "Unknown status filter", body = crate::errors::ErrorResponse)
    ),
    tag = "movement-history"
)]
pub async fn list_movements(
    State(state): State<AppState>,
    Query(filter): Query<MovementFilter>,
) -> ApiResult<PaginatedResponse<MovementHistoryView>> {
    let (page, limit) = state.paging(filter.page.unwrap_or(1), filter.limit);
    let rows = state
        .services
        .movement_history
        .list(&filter, page, limit)
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

#[utoipa::path(
    get,
    path = "/api/v1/movement-history/latest",
    params(MovementFilter),
    responses(
        (status = 200, description = "Current row of each matching container", body = ApiResponse<Vec<MovementHistoryView>>),
        (status = 400, description = "Unknown status filter", body = crate::errors::ErrorResponse)
    ),
    tag = "movement-history"
)]
pub async fn latest_movements(
    State(state): State<AppState>,
    Query(filter): Query<MovementFilter>,
) -> ApiResult<Vec<MovementHistoryView>> {
    let rows = state.services.movement_history.latest(&filter).await?;
    Ok(Json(ApiResponse::success(rows)))
}

#[utoipa::path(
    get,
    path = "/api/v1/movement-history/container/{inventory_id}",
    params(("inventory_id" = i32, Path, description = "Inventory id")),
    responses(
        (status = 200, description = "Full history of one container", body = ApiResponse<Vec<MovementHistoryView>>),
        (status = 404, description = "Container not found", body = crate::errors::ErrorResponse)
    ),
    tag = "movement-history"
)]
pub async fn container_history(
    State(state): State<AppState>,
    Path(inventory_id): Path<i32>,
) -> ApiResult<Vec<MovementHistoryView>> {
    let rows = state
        .services
        .movement_history
        .for_container(inventory_id)
        .await?;
    Ok(Json(ApiResponse::success(rows)))
}

#[utoipa::path(
    post,
    path = "/api/v1/movement-history/bulk-create",
    request_body = BulkStatusUpdateRequest,
    responses(
        (status = 201, description = "One new ledger row per selected container", body = ApiResponse<Vec<movement_history::Model>>),
        (status = 400, description = "Selection rejected; nothing written", body = crate::errors::ErrorResponse),
        (status = 404, description = "Selected row not found", body = crate::errors::ErrorResponse)
    ),
    tag = "movement-history"
)]
pub async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<BulkStatusUpdateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<movement_history::Model>>>), ApiError> {
    let rows = state
        .services
        .movement_history
        .apply_bulk_status_update(payload)
        .await?;
    Ok(created_response(rows))
}
