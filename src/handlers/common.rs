use crate::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Preview of the next generated reference code
#[derive(Debug, Serialize, ToSchema)]
pub struct NextCode {
    #[schema(example = "P00001")]
    pub code: String,
}

impl From<String> for NextCode {
    fn from(code: String) -> Self {
        Self { code }
    }
}
