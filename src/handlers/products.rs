use super::common::{created_response, no_content_response, NextCode};
use crate::{
    entities::product,
    errors::ApiError,
    services::products::{CreateProductInput, ProductDetail, UpdateProductInput},
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};
use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Form part carrying the product JSON
const DATA_PART: &str = "data";

/// Product routes, nested under `/products`
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/next-id", get(next_product_code))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

fn bad_request(message: &str, details: impl ToString) -> ApiError {
    ApiError::BadRequest {
        message: message.to_string(),
        details: Some(details.to_string()),
    }
}

/// Reads the payload from a JSON body, or from the `data` part of a form.
/// File parts are skipped.
async fn json_or_form_data<T: DeserializeOwned>(
    request: Request,
    state: &AppState,
) -> Result<T, ApiError> {
    if !is_multipart(&request) {
        let Json(payload) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| bad_request("Invalid JSON body", rejection.body_text()))?;
        return Ok(payload);
    }

    let mut form = Multipart::from_request(request, state)
        .await
        .map_err(|rejection| bad_request("Invalid multipart body", rejection.body_text()))?;

    while let Some(field) = form
        .next_field()
        .await
        .map_err(|e| bad_request("Invalid multipart body", e.body_text()))?
    {
        if field.name() != Some(DATA_PART) {
            debug!(part = ?field.name(), "Skipping form part");
            continue;
        }
        let text = field
            .text()
            .await
            .map_err(|e| bad_request("Invalid multipart body", e.body_text()))?;
        return serde_json::from_str(&text)
            .map_err(|e| bad_request("Invalid JSON in data part", e));
    }

    Err(ApiError::BadRequest {
        message: format!("Multipart body has no `{DATA_PART}` part"),
        details: None,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ListQuery),
    responses(
        (status = 200, description = "Products listed", body = ApiResponse<PaginatedResponse<product::Model>>)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<product::Model>> {
    let (page, limit) = state.paging(query.page, query.limit);
    let products = state
        .services
        .products
        .list_products(page, limit, query.search)
        .await?;
    Ok(Json(ApiResponse::success(products)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/next-id",
    responses(
        (status = 200, description = "Code the next product would receive", body = ApiResponse<NextCode>)
    ),
    tag = "products"
)]
pub async fn next_product_code(State(state): State<AppState>) -> ApiResult<NextCode> {
    let code = state.services.products.next_product_code().await?;
    Ok(Json(ApiResponse::success(NextCode::from(code))))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body(
        content = CreateProductInput,
        description = "JSON body, or multipart form data whose `data` part holds the same JSON"
    ),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductDetail>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Product code already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<ApiResponse<ProductDetail>>), ApiError> {
    let payload: CreateProductInput = json_or_form_data(request, &state).await?;
    let detail = state.services.products.create_product(payload).await?;
    Ok(created_response(detail))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with its MSDS documents", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ProductDetail> {
    let detail = state.services.products.get_product(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body(
        content = UpdateProductInput,
        description = "JSON body, or multipart form data whose `data` part holds the same JSON"
    ),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductDetail>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    request: Request,
) -> ApiResult<ProductDetail> {
    let payload: UpdateProductInput = json_or_form_data(request, &state).await?;
    let detail = state.services.products.update_product(id, payload).await?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product and its MSDS documents deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.services.products.delete_product(id).await?;
    Ok(no_content_response())
}
