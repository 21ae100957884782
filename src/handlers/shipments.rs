use super::common::{created_response, no_content_response, NextCode};
use crate::{
    entities::shipment,
    errors::ApiError,
    services::shipments::{CreateShipmentInput, ShipmentDetail, UpdateShipmentInput},
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};

/// Shipment job routes, nested under `/shipment`
pub fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shipments).post(create_shipment))
        .route("/job/next", get(next_job_number))
        .route(
            "/:id",
            get(get_shipment)
                .patch(update_shipment)
                .delete(delete_shipment),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/shipment",
    params(ListQuery),
    responses(
        (status = 200, description = "Shipments listed", body = ApiResponse<PaginatedResponse<shipment::Model>>)
    ),
    tag = "shipments"
)]
pub async fn list_shipments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<shipment::Model>> {
    let (page, limit) = state.paging(query.page, query.limit);
    let shipments = state
        .services
        .shipments
        .list_shipments(page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(shipments)))
}

#[utoipa::path(
    get,
    path = "/api/v1/shipment/job/next",
    responses(
        (status = 200, description = "Job number the next shipment would receive", body = ApiResponse<NextCode>)
    ),
    tag = "shipments"
)]
pub async fn next_job_number(State(state): State<AppState>) -> ApiResult<NextCode> {
    let code = state.services.shipments.next_job_number().await?;
    Ok(Json(ApiResponse::success(NextCode::from(code))))
}

#[utoipa::path(
    post,
    path = "/api/v1/shipment",
    request_body = CreateShipmentInput,
    responses(
        (status = 201, description = "Shipment created and containers allotted", body = ApiResponse<ShipmentDetail>),
        (status = 400, description = "Invalid request or container not available", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn create_shipment(
    State(state): State<AppState>,
    Json(payload): Json<CreateShipmentInput>,
) -> Result<(StatusCode, Json<ApiResponse<ShipmentDetail>>), ApiError> {
    let detail = state.services.shipments.create_shipment(payload).await?;
    Ok(created_response(detail))
}

#[utoipa::path(
    get,
    path = "/api/v1/shipment/{id}",
    params(("id" = i32, Path, description = "Shipment id")),
    responses(
        (status = 200, description = "Shipment with its linked containers", body = ApiResponse<ShipmentDetail>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ShipmentDetail> {
    let detail = state.services.shipments.get_shipment(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/shipment/{id}",
    params(("id" = i32, Path, description = "Shipment id")),
    request_body = UpdateShipmentInput,
    responses(
        (status = 200, description = "Shipment updated", body = ApiResponse<ShipmentDetail>),
        (status = 400, description = "Invalid request or container not available", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateShipmentInput>,
) -> ApiResult<ShipmentDetail> {
    let detail = state
        .services
        .shipments
        .update_shipment(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/shipment/{id}",
    params(("id" = i32, Path, description = "Shipment id")),
    responses(
        (status = 204, description = "Shipment deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Movement records refer to the shipment", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.shipments.delete_shipment(id).await?;
    Ok(no_content_response())
}
