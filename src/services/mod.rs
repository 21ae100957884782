// Shared building blocks
pub mod child_sync;
pub mod reference_codes;

// Container ledger and the transition engine
pub mod movement_history;

// Domain services
pub mod address_book;
pub mod countries;
pub mod currencies;
pub mod dashboard;
pub mod empty_repo_jobs;
pub mod exchange_rates;
pub mod inventory;
pub mod jobs;
pub mod ports;
pub mod products;
pub mod shipments;
pub mod tariffs;

use serde::Deserialize;
use utoipa::ToSchema;

/// Body of the `PATCH …/:id/status` endpoints
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveStatusInput {
    pub is_active: bool,
}
