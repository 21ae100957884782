//! Handlers for the five tariff tables. They differ only in entity and
//! path, so one macro stamps out a module of handlers per table.

use super::common::{created_response, no_content_response, NextCode};
use crate::{
    entities::{
        container_lease_tariff, depot_avg_tariff, depot_cleaning_tariff, handling_agent_tariff,
        land_transport_tariff,
    },
    errors::ApiError,
    services::tariffs::{
        CreateContainerLeaseTariffInput, CreateDepotAvgTariffInput,
        CreateDepotCleaningTariffInput, CreateHandlingAgentTariffInput,
        CreateLandTransportTariffInput, TariffFilter, UpdateContainerLeaseTariffInput,
        UpdateDepotAvgTariffInput, UpdateDepotCleaningTariffInput,
        UpdateHandlingAgentTariffInput, UpdateLandTransportTariffInput,
    },
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};

macro_rules! tariff_handlers {
    (
        $module:ident, $routes:ident, $entity:ident, $service:ident,
        $create:ident, $update:ident,
        root = $root:tt, next = $next:tt, item = $item:tt
    ) => {
        pub mod $module {
            use super::*;

            #[utoipa::path(
                get,
                path = $root,
                params(TariffFilter),
                responses(
                    (status = 200, description = "Tariffs listed", body = ApiResponse<PaginatedResponse<$entity::Model>>)
                ),
                tag = "tariffs"
            )]
            pub async fn list_tariffs(
                State(state): State<AppState>,
                Query(filter): Query<TariffFilter>,
            ) -> ApiResult<PaginatedResponse<$entity::Model>> {
                let (page, limit) = state.paging(filter.page.unwrap_or(1), filter.limit);
                let rows = state.services.$service.list(&filter, page, limit).await?;
                Ok(Json(ApiResponse::success(rows)))
            }

            #[utoipa::path(
                get,
                path = $next,
                responses(
                    (status = 200, description = "Code the next tariff would receive", body = ApiResponse<NextCode>)
                ),
                tag = "tariffs"
            )]
            pub async fn next_tariff_code(State(state): State<AppState>) -> ApiResult<NextCode> {
                let code = state.services.$service.next_tariff_code().await?;
                Ok(Json(ApiResponse::success(NextCode::from(code))))
            }

            #[utoipa::path(
                post,
                path = $root,
                request_body = $create,
                responses(
                    (status = 201, description = "Tariff created", body = ApiResponse<$entity::Model>),
                    (status = 400, description = "Negative charge", body = crate::errors::ErrorResponse),
                    (status = 404, description = "Address book entry not found", body = crate::errors::ErrorResponse)
                ),
                tag = "tariffs"
            )]
            pub async fn create_tariff(
                State(state): State<AppState>,
                Json(payload): Json<$create>,
            ) -> Result<(StatusCode, Json<ApiResponse<$entity::Model>>), ApiError> {
                let created = state.services.$service.create(payload).await?;
                Ok(created_response(created))
            }

            #[utoipa::path(
                get,
                path = $item,
                params(("id" = i32, Path, description = "Tariff id")),
                responses(
                    (status = 200, description = "Tariff found", body = ApiResponse<$entity::Model>),
                    (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
                ),
                tag = "tariffs"
            )]
            pub async fn get_tariff(
                State(state): State<AppState>,
                Path(id): Path<i32>,
            ) -> ApiResult<$entity::Model> {
                let row = state.services.$service.get(id).await?;
                Ok(Json(ApiResponse::success(row)))
            }

            #[utoipa::path(
                patch,
                path = $item,
                params(("id" = i32, Path, description = "Tariff id")),
                request_body = $update,
                responses(
                    (status = 200, description = "Tariff updated", body = ApiResponse<$entity::Model>),
                    (status = 400, description = "Negative charge", body = crate::errors::ErrorResponse),
                    (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
                ),
                tag = "tariffs"
            )]
            pub async fn update_tariff(
                State(state): State<AppState>,
                Path(id): Path<i32>,
                Json(payload): Json<$update>,
            ) -> ApiResult<$entity::Model> {
                let row = state.services.$service.update(id, payload).await?;
                Ok(Json(ApiResponse::success(row)))
            }

            #[utoipa::path(
                delete,
                path = $item,
                params(("id" = i32, Path, description = "Tariff id")),
                responses(
                    (status = 204, description = "Tariff deleted"),
                    (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
                ),
                tag = "tariffs"
            )]
            pub async fn delete_tariff(
                State(state): State<AppState>,
                Path(id): Path<i32>,
            ) -> Result<Response, ApiError> {
                state.services.$service.delete(id).await?;
                Ok(no_content_response())
            }
        }

        pub fn $routes() -> Router<AppState> {
            Router::new()
                .route("/", get($module::list_tariffs).post($module::create_tariff))
                .route("/next-tariff-code", get($module::next_tariff_code))
                .route(
                    "/:id",
                    get($module::get_tariff)
                        .patch($module::update_tariff)
                        .delete($module::delete_tariff),
                )
        }
    };
}

tariff_handlers!(
    container_lease, container_lease_tariff_routes, container_lease_tariff,
    container_lease_tariffs, CreateContainerLeaseTariffInput, UpdateContainerLeaseTariffInput,
    root = "/api/v1/container-lease-tariff",
    next = "/api/v1/container-lease-tariff/next-tariff-code",
    item = "/api/v1/container-lease-tariff/{id}"
);

tariff_handlers!(
    depot_avg, depot_avg_tariff_routes, depot_avg_tariff,
    depot_avg_tariffs, CreateDepotAvgTariffInput, UpdateDepotAvgTariffInput,
    root = "/api/v1/depot-avg-tariff",
    next = "/api/v1/depot-avg-tariff/next-tariff-code",
    item = "/api/v1/depot-avg-tariff/{id}"
);

tariff_handlers!(
    handling_agent, handling_agent_tariff_routes, handling_agent_tariff,
    handling_agent_tariffs, CreateHandlingAgentTariffInput, UpdateHandlingAgentTariffInput,
    root = "/api/v1/handling-agent-tariff",
    next = "/api/v1/handling-agent-tariff/next-tariff-code",
    item = "/api/v1/handling-agent-tariff/{id}"
);

tariff_handlers!(
    land_transport, land_transport_tariff_routes, land_transport_tariff,
    land_transport_tariffs, CreateLandTransportTariffInput, UpdateLandTransportTariffInput,
    root = "/api/v1/land-transport-tariff",
    next = "/api/v1/land-transport-tariff/next-tariff-code",
    item = "/api/v1/land-transport-tariff/{id}"
);

tariff_handlers!(
    depot_cleaning, depot_cleaning_tariff_routes, depot_cleaning_tariff,
    depot_cleaning_tariffs, CreateDepotCleaningTariffInput, UpdateDepotCleaningTariffInput,
    root = "/api/v1/depot-cleaning-tariff",
    next = "/api/v1/depot-cleaning-tariff/next-tariff-code",
    item = "/api/v1/depot-cleaning-tariff/{id}"
);
