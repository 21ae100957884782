use super::common::{created_response, no_content_response, NextCode};
use crate::{
    entities::empty_repo_job,
    errors::ApiError,
    services::empty_repo_jobs::{
        CreateEmptyRepoJobInput, EmptyRepoJobDetail, UpdateEmptyRepoJobInput,
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

/// Empty repositioning job routes, nested under `/empty-repo-job`
pub fn empty_repo_job_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/job/next", get(next_job_number))
        .route("/:id", get(get_job).patch(update_job).delete(delete_job))
}

#[utoipa::path(
    get,
    path = "/api/v1/empty-repo-job",
    params(ListQuery),
    responses(
        (status = 200, description = "Jobs listed", body = ApiResponse<PaginatedResponse<empty_repo_job::Model>>)
    ),
    tag = "empty-repo-jobs"
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<empty_repo_job::Model>> {
    let (page, limit) = state.paging(query.page, query.limit);
    let jobs = state
        .services
        .empty_repo_jobs
        .list_jobs(page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(jobs)))
}

#[utoipa::path(
    get,
    path = "/api/v1/empty-repo-job/job/next",
    responses(
        (status = 200, description = "Job number the next job would receive", body = ApiResponse<NextCode>)
    ),
    tag = "empty-repo-jobs"
)]
pub async fn next_job_number(State(state): State<AppState>) -> ApiResult<NextCode> {
    let code = state.services.empty_repo_jobs.next_job_number().await?;
    Ok(Json(ApiResponse::success(NextCode::from(code))))
}

#[utoipa::path(
    post,
    path = "/api/v1/empty-repo-job",
    request_body = CreateEmptyRepoJobInput,
    responses(
        (status = 201, description = "Job created and containers allotted", body = ApiResponse<EmptyRepoJobDetail>),
        (status = 400, description = "Invalid request or container not available", body = crate::errors::ErrorResponse)
    ),
    tag = "empty-repo-jobs"
)]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmptyRepoJobInput>,
) -> Result<(StatusCode, Json<ApiResponse<EmptyRepoJobDetail>>), ApiError> {
    let detail = state.services.empty_repo_jobs.create_job(payload).await?;
    Ok(created_response(detail))
}

#[utoipa::path(
    get,
    path = "/api/v1/empty-repo-job/{id}",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job with its linked containers", body = ApiResponse<EmptyRepoJobDetail>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "empty-repo-jobs"
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<EmptyRepoJobDetail> {
    let detail = state.services.empty_repo_jobs.get_job(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/empty-repo-job/{id}",
    params(("id" = i32, Path, description = "Job id")),
    request_body = UpdateEmptyRepoJobInput,
    responses(
        (status = 200, description = "Job updated", body = ApiResponse<EmptyRepoJobDetail>),
        (status = 400, description = "Invalid request or container not available", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "empty-repo-jobs"
)]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEmptyRepoJobInput>,
) -> ApiResult<EmptyRepoJobDetail> {
    let detail = state.services.empty_repo_jobs.update_job(id, payload).await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/empty-repo-job/{id}",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Movement records refer to the job", body = crate::errors::ErrorResponse)
    ),
    tag = "empty-repo-jobs"
)]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.empty_repo_jobs.delete_job(id).await?;
    Ok(no_content_response())
}
