use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RST Logistics API",
        version = "1.0.0",
        description = r#"
# RST Logistics API

Back-office API for a tank container operator.

## Features

- **Container inventory** with leasing information and certificates
- **Movement ledger**: an append-only history per container, advanced in bulk
  through a fixed status graph
- **Jobs**: shipments and empty repositioning jobs with container allotment
- **Products** with MSDS documents
- **Address book** with contacts and bank details
- **Tariffs**: container lease, depot average, handling agent, land transport
  and depot cleaning
- **Master data**: countries, currencies, exchange rates and ports

## Error Handling

Errors share one body:

```json
{
  "error": "Bad Request",
  "message": "containers must share current status",
  "requestId": "5f0c…",
  "timestamp": "2025-03-01T00:00:00Z"
}
```

## Pagination

List endpoints take `page` (default 1), `limit` (default 20, capped by
configuration) and, where noted, `search`.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "inventory", description = "Container inventory"),
        (name = "movement-history", description = "Container movement ledger"),
        (name = "shipments", description = "Shipment jobs"),
        (name = "empty-repo-jobs", description = "Empty repositioning jobs"),
        (name = "products", description = "Products and MSDS"),
        (name = "address-book", description = "Counterparties"),
        (name = "tariffs", description = "Tariff tables"),
        (name = "master-data", description = "Countries, currencies, exchange rates and ports"),
        (name = "dashboard", description = "Summaries")
    ),
    paths(
        // Inventory
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::create_inventory,
        crate::handlers::inventory::get_inventory,
        crate::handlers::inventory::update_inventory,
        crate::handlers::inventory::delete_inventory,

        // Movement history
        crate::handlers::movement_history::list_movements,
        crate::handlers::movement_history::latest_movements,
        crate::handlers::movement_history::container_history,
        crate::handlers::movement_history::bulk_create,

        // Jobs
        crate::handlers::shipments::list_shipments,
        crate::handlers::shipments::next_job_number,
        crate::handlers::shipments::create_shipment,
        crate::handlers::shipments::get_shipment,
        crate::handlers::shipments::update_shipment,
        crate::handlers::shipments::delete_shipment,
        crate::handlers::empty_repo_jobs::list_jobs,
        crate::handlers::empty_repo_jobs::next_job_number,
        crate::handlers::empty_repo_jobs::create_job,
        crate::handlers::empty_repo_jobs::get_job,
        crate::handlers::empty_repo_jobs::update_job,
        crate::handlers::empty_repo_jobs::delete_job,

        // Products
        crate::handlers::products::list_products,
        crate::handlers::products::next_product_code,
        crate::handlers::products::create_product,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,

        // Address book
        crate::handlers::address_book::list_entries,
        crate::handlers::address_book::next_ref_id,
        crate::handlers::address_book::create_entry,
        crate::handlers::address_book::get_entry,
        crate::handlers::address_book::update_entry,
        crate::handlers::address_book::delete_entry,

        // Tariffs
        crate::handlers::tariffs::container_lease::list_tariffs,
        crate::handlers::tariffs::container_lease::next_tariff_code,
        crate::handlers::tariffs::container_lease::create_tariff,
        crate::handlers::tariffs::container_lease::get_tariff,
        crate::handlers::tariffs::container_lease::update_tariff,
        crate::handlers::tariffs::container_lease::delete_tariff,
        crate::handlers::tariffs::depot_avg::list_tariffs,
        crate::handlers::tariffs::depot_avg::next_tariff_code,
        crate::handlers::tariffs::depot_avg::create_tariff,
        crate::handlers::tariffs::depot_avg::get_tariff,
        crate::handlers::tariffs::depot_avg::update_tariff,
        crate::handlers::tariffs::depot_avg::delete_tariff,
        crate::handlers::tariffs::handling_agent::list_tariffs,
        crate::handlers::tariffs::handling_agent::next_tariff_code,
        crate::handlers::tariffs::handling_agent::create_tariff,
        crate::handlers::tariffs::handling_agent::get_tariff,
        crate::handlers::tariffs::handling_agent::update_tariff,
        crate::handlers::tariffs::handling_agent::delete_tariff,
        crate::handlers::tariffs::land_transport::list_tariffs,
        crate::handlers::tariffs::land_transport::next_tariff_code,
        crate::handlers::tariffs::land_transport::create_tariff,
        crate::handlers::tariffs::land_transport::get_tariff,
        crate::handlers::tariffs::land_transport::update_tariff,
        crate::handlers::tariffs::land_transport::delete_tariff,
        crate::handlers::tariffs::depot_cleaning::list_tariffs,
        crate::handlers::tariffs::depot_cleaning::next_tariff_code,
        crate::handlers::tariffs::depot_cleaning::create_tariff,
        crate::handlers::tariffs::depot_cleaning::get_tariff,
        crate::handlers::tariffs::depot_cleaning::update_tariff,
        crate::handlers::tariffs::depot_cleaning::delete_tariff,

        // Master data
        crate::handlers::countries::list_countries,
        crate::handlers::countries::create_country,
        crate::handlers::countries::get_country,
        crate::handlers::countries::update_country,
        crate::handlers::countries::set_country_status,
        crate::handlers::countries::delete_country,
        crate::handlers::currencies::list_currencies,
        crate::handlers::currencies::create_currency,
        crate::handlers::currencies::get_currency,
        crate::handlers::currencies::update_currency,
        crate::handlers::currencies::set_currency_status,
        crate::handlers::currencies::delete_currency,
        crate::handlers::exchange_rates::list_rates,
        crate::handlers::exchange_rates::create_rate,
        crate::handlers::exchange_rates::get_rate,
        crate::handlers::exchange_rates::update_rate,
        crate::handlers::exchange_rates::delete_rate,
        crate::handlers::ports::list_ports,
        crate::handlers::ports::create_port,
        crate::handlers::ports::get_port,
        crate::handlers::ports::update_port,
        crate::handlers::ports::delete_port,

        // Dashboard
        crate::handlers::dashboard::container_summary,
    ),
    components(
        schemas(
            crate::ListQuery,
            crate::ResponseMeta,
            crate::handlers::common::NextCode,
            crate::services::ActiveStatusInput,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_domain() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("RST Logistics API"));
        assert!(json.contains("/api/v1/movement-history/bulk-create"));
        assert!(json.contains("/api/v1/depot-cleaning-tariff/next-tariff-code"));
        assert!(json.contains("/api/v1/country/{id}/status"));
    }
}
