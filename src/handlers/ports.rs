use super::common::{created_response, no_content_response};
use crate::{
    entities::port,
    errors::ApiError,
    services::ports::{CreatePortInput, UpdatePortInput},
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};

/// Port master data, nested under `/ports`
pub fn port_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ports).post(create_port))
        .route("/:id", get(get_port).patch(update_port).delete(delete_port))
}

#[utoipa::path(
    get,
    path = "/api/v1/ports",
    params(ListQuery),
    responses(
        (status = 200, description = "Ports listed", body = ApiResponse<PaginatedResponse<port::Model>>)
    ),
    tag = "master-data"
)]
pub async fn list_ports(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<port::Model>> {
    let (page, limit) = state.paging(query.page, query.limit);
    let ports = state
        .services
        .ports
        .list_ports(page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(ports)))
}

#[utoipa::path(
    post,
    path = "/api/v1/ports",
    request_body = CreatePortInput,
    responses(
        (status = 201, description = "Port created", body = ApiResponse<port::Model>),
        (status = 400, description = "Invalid request or unknown parent port", body = crate::errors::ErrorResponse),
        (status = 409, description = "Port code already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn create_port(
    State(state): State<AppState>,
    Json(payload): Json<CreatePortInput>,
) -> Result<(StatusCode, Json<ApiResponse<port::Model>>), ApiError> {
    let port = state.services.ports.create_port(payload).await?;
    Ok(created_response(port))
}

#[utoipa::path(
    get,
    path = "/api/v1/ports/{id}",
    params(("id" = i32, Path, description = "Port id")),
    responses(
        (status = 200, description = "Port found", body = ApiResponse<port::Model>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn get_port(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<port::Model> {
    let port = state.services.ports.get_port(id).await?;
    Ok(Json(ApiResponse::success(port)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/ports/{id}",
    params(("id" = i32, Path, description = "Port id")),
    request_body = UpdatePortInput,
    responses(
        (status = 200, description = "Port updated", body = ApiResponse<port::Model>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Port code already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn update_port(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePortInput>,
) -> ApiResult<port::Model> {
    let port = state.services.ports.update_port(id, payload).await?;
    Ok(Json(ApiResponse::success(port)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/ports/{id}",
    params(("id" = i32, Path, description = "Port id")),
    responses(
        (status = 204, description = "Port deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Port still has ICDs attached", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn delete_port(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.ports.delete_port(id).await?;
    Ok(no_content_response())
}
