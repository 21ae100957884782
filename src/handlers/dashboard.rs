use crate::{services::dashboard::ContainerSummary, ApiResponse, ApiResult, AppState};
use axum::{extract::State, response::Json, routing::get, Router};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/container-summary", get(container_summary))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/container-summary",
    responses(
        (status = 200, description = "Container counts by current status", body = ApiResponse<ContainerSummary>)
    ),
    tag = "dashboard"
)]
pub async fn container_summary(State(state): State<AppState>) -> ApiResult<ContainerSummary> {
    let summary = state.services.dashboard.container_summary().await?;
    Ok(Json(ApiResponse::success(summary)))
}
