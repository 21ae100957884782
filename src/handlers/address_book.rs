use super::common::{created_response, no_content_response, NextCode};
use crate::{
    entities::address_book,
    errors::ApiError,
    services::address_book::{AddressBookDetail, CreateAddressBookInput, UpdateAddressBookInput},
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};

/// Address book routes, nested under `/addressbook`
pub fn address_book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/next-ref-id", get(next_ref_id))
        .route("/:id", get(get_entry).patch(update_entry).delete(delete_entry))
}

#[utoipa::path(
    get,
    path = "/api/v1/addressbook",
    params(ListQuery),
    responses(
        (status = 200, description = "Entries listed", body = ApiResponse<PaginatedResponse<address_book::Model>>)
    ),
    tag = "address-book"
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<address_book::Model>> {
    let (page, limit) = state.paging(query.page, query.limit);
    let entries = state
        .services
        .address_book
        .list_entries(page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(entries)))
}

#[utoipa::path(
    get,
    path = "/api/v1/addressbook/next-ref-id",
    responses(
        (status = 200, description = "Reference id the next entry would receive", body = ApiResponse<NextCode>)
    ),
    tag = "address-book"
)]
pub async fn next_ref_id(State(state): State<AppState>) -> ApiResult<NextCode> {
    let code = state.services.address_book.next_ref_id().await?;
    Ok(Json(ApiResponse::success(NextCode::from(code))))
}

#[utoipa::path(
    post,
    path = "/api/v1/addressbook",
    request_body = CreateAddressBookInput,
    responses(
        (status = 201, description = "Entry created with contacts and bank details", body = ApiResponse<AddressBookDetail>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "address-book"
)]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateAddressBookInput>,
) -> Result<(StatusCode, Json<ApiResponse<AddressBookDetail>>), ApiError> {
    let detail = state.services.address_book.create_entry(payload).await?;
    Ok(created_response(detail))
}

#[utoipa::path(
    get,
    path = "/api/v1/addressbook/{id}",
    params(("id" = i32, Path, description = "Address book id")),
    responses(
        (status = 200, description = "Entry with contacts and bank details", body = ApiResponse<AddressBookDetail>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "address-book"
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<AddressBookDetail> {
    let detail = state.services.address_book.get_entry(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/addressbook/{id}",
    params(("id" = i32, Path, description = "Address book id")),
    request_body = UpdateAddressBookInput,
    responses(
        (status = 200, description = "Entry updated; children upserted and removed", body = ApiResponse<AddressBookDetail>),
        (status = 400, description = "Invalid request or foreign child id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "address-book"
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAddressBookInput>,
) -> ApiResult<AddressBookDetail> {
    let detail = state
        .services
        .address_book
        .update_entry(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/addressbook/{id}",
    params(("id" = i32, Path, description = "Address book id")),
    responses(
        (status = 204, description = "Entry and its children deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "address-book"
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.address_book.delete_entry(id).await?;
    Ok(no_content_response())
}
