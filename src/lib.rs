//! RST Logistics API library
//!
//! Back-office REST API for tank container logistics: master data, the
//! address book, container inventory, products, tariffs, shipment and empty
//! repositioning jobs, and the container movement ledger.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod middleware_helpers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use utoipa::{IntoParams, ToSchema};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: Arc<events::EventSender>,
    pub services: handlers::AppServices,
}

impl AppState {
    /// Builds the state and every service over one connection pool
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: Arc<events::EventSender>,
    ) -> Self {
        let services = handlers::AppServices::new(db.clone(), event_sender.clone());
        Self {
            db,
            config,
            event_sender,
            services,
        }
    }

    /// Page and clamped page size for a list request
    pub fn paging(&self, page: u64, limit: Option<u64>) -> (u64, u64) {
        (page.max(1), self.config.page_size(limit))
    }
}

// Common query parameters for list endpoints
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

fn default_page() -> u64 {
    1
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit)
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[tokio::test]
    async fn error_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-err"), async {
                ApiResponse::<()>::error("oops".into())
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-err"));
        assert!(!meta.timestamp.is_empty());
    }

    #[test]
    fn meta_serializes_in_camel_case() {
        let meta = ResponseMeta {
            request_id: Some("abc".into()),
            timestamp: "2025-03-01T00:00:00+00:00".into(),
        };
        let value = serde_json::to_value(meta).unwrap();
        assert_eq!(value["requestId"], "abc");
    }

    #[test]
    fn pagination_rounds_pages_up() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 41, 1, 20);
        assert_eq!(page.total_pages, 3);
        assert_eq!(PaginatedResponse::<i32>::new(vec![], 0, 1, 20).total_pages, 0);
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ApiError>;

/// The application router: versioned API, metrics, API docs and the request
/// layers. CORS and the health probes are added by the binary.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "rst-logistics-api up" }))
        .route(
            "/metrics",
            get(|| async move {
                match metrics::metrics_handler().await {
                    Ok(body) => (StatusCode::OK, body),
                    Err(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        String::from("metrics error"),
                    ),
                }
            }),
        )
        .route(
            "/metrics/json",
            get(|| async move {
                match metrics::metrics_json_handler().await {
                    Ok(json) => (StatusCode::OK, Json(json)),
                    Err(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"error": "metrics error"})),
                    ),
                }
            }),
        )
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .layer(axum::middleware::from_fn(metrics::metrics_middleware))
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        // Outermost, so spans and error bodies see the request id
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}

/// Every versioned route, mounted under `/api/v1`
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Service status
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        // Container inventory and the movement ledger
        .nest("/inventory", handlers::inventory::inventory_routes())
        .nest(
            "/movement-history",
            handlers::movement_history::movement_history_routes(),
        )
        .nest("/dashboard", handlers::dashboard::dashboard_routes())
        // Jobs
        .nest("/shipment", handlers::shipments::shipment_routes())
        .nest(
            "/empty-repo-job",
            handlers::empty_repo_jobs::empty_repo_job_routes(),
        )
        // Products and the address book
        .nest("/products", handlers::products::product_routes())
        .nest("/addressbook", handlers::address_book::address_book_routes())
        // Tariffs
        .nest(
            "/container-lease-tariff",
            handlers::tariffs::container_lease_tariff_routes(),
        )
        .nest(
            "/depot-avg-tariff",
            handlers::tariffs::depot_avg_tariff_routes(),
        )
        .nest(
            "/handling-agent-tariff",
            handlers::tariffs::handling_agent_tariff_routes(),
        )
        .nest(
            "/land-transport-tariff",
            handlers::tariffs::land_transport_tariff_routes(),
        )
        .nest(
            "/depot-cleaning-tariff",
            handlers::tariffs::depot_cleaning_tariff_routes(),
        )
        // Master data
        .nest("/country", handlers::countries::country_routes())
        .nest("/currency", handlers::currencies::currency_routes())
        .nest(
            "/exchange-rates",
            handlers::exchange_rates::exchange_rate_routes(),
        )
        .nest("/ports", handlers::ports::port_routes())
}

async fn api_status(State(state): State<AppState>) -> ApiResult<Value> {
    let status_data = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "git": option_env!("GIT_HASH").unwrap_or("unknown"),
        "service": "rst-logistics-api",
        "environment": state.config.environment,
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(e) => {
            ::tracing::warn!(error = %e, "Database ping failed");
            "unhealthy"
        }
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}

pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::errors::{ApiError, ServiceError};
    pub use crate::events::{Event, EventSender};
    pub use crate::models::{CodeSeries, ContainerStatus, StatusBucket};
    pub use crate::{ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse};
}
