pub mod address_book;
pub mod common;
pub mod countries;
pub mod currencies;
pub mod dashboard;
pub mod empty_repo_jobs;
pub mod exchange_rates;
pub mod inventory;
pub mod movement_history;
pub mod ports;
pub mod products;
pub mod shipments;
pub mod tariffs;

use crate::entities::{
    container_lease_tariff, depot_avg_tariff, depot_cleaning_tariff, handling_agent_tariff,
    land_transport_tariff,
};
use crate::events::EventSender;
use crate::services::{
    address_book::AddressBookService, countries::CountryService, currencies::CurrencyService,
    dashboard::DashboardService, empty_repo_jobs::EmptyRepoJobService,
    exchange_rates::ExchangeRateService, inventory::InventoryService,
    movement_history::MovementHistoryService, ports::PortService, products::ProductService,
    shipments::ShipmentService, tariffs::TariffService,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub inventory: Arc<InventoryService>,
    pub movement_history: Arc<MovementHistoryService>,
    pub shipments: Arc<ShipmentService>,
    pub empty_repo_jobs: Arc<EmptyRepoJobService>,
    pub products: Arc<ProductService>,
    pub address_book: Arc<AddressBookService>,
    pub countries: Arc<CountryService>,
    pub currencies: Arc<CurrencyService>,
    pub exchange_rates: Arc<ExchangeRateService>,
    pub ports: Arc<PortService>,
    pub dashboard: Arc<DashboardService>,
    pub container_lease_tariffs: Arc<TariffService<container_lease_tariff::Entity>>,
    pub depot_avg_tariffs: Arc<TariffService<depot_avg_tariff::Entity>>,
    pub handling_agent_tariffs: Arc<TariffService<handling_agent_tariff::Entity>>,
    pub land_transport_tariffs: Arc<TariffService<land_transport_tariff::Entity>>,
    pub depot_cleaning_tariffs: Arc<TariffService<depot_cleaning_tariff::Entity>>,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self {
            inventory: Arc::new(InventoryService::new(db.clone(), event_sender.clone())),
            movement_history: Arc::new(MovementHistoryService::new(
                db.clone(),
                event_sender.clone(),
            )),
            shipments: Arc::new(ShipmentService::new(db.clone(), event_sender.clone())),
            empty_repo_jobs: Arc::new(EmptyRepoJobService::new(
                db.clone(),
                event_sender.clone(),
            )),
            products: Arc::new(ProductService::new(db.clone(), event_sender.clone())),
            address_book: Arc::new(AddressBookService::new(db.clone(), event_sender.clone())),
            countries: Arc::new(CountryService::new(db.clone())),
            currencies: Arc::new(CurrencyService::new(db.clone())),
            exchange_rates: Arc::new(ExchangeRateService::new(db.clone())),
            ports: Arc::new(PortService::new(db.clone())),
            dashboard: Arc::new(DashboardService::new(db.clone())),
            container_lease_tariffs: Arc::new(TariffService::new(
                db.clone(),
                event_sender.clone(),
            )),
            depot_avg_tariffs: Arc::new(TariffService::new(db.clone(), event_sender.clone())),
            handling_agent_tariffs: Arc::new(TariffService::new(
                db.clone(),
                event_sender.clone(),
            )),
            land_transport_tariffs: Arc::new(TariffService::new(
                db.clone(),
                event_sender.clone(),
            )),
            depot_cleaning_tariffs: Arc::new(TariffService::new(db, event_sender)),
        }
    }
}
