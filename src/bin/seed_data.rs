//! Seed data script - populates the database with demo master data, a few
//! containers and a shipment that has moved them along.
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - countries, currencies, an exchange rate and ports (one ICD)
//! - a customer, a carrier and a depot in the address book
//! - one product
//! - four containers, three allotted to a shipment and gated in

use anyhow::Context;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use rst_logistics_api::{
    config, db,
    events::{process_events, EventSender},
    handlers::AppServices,
};

/// Builds a service input from JSON, the same way a request body would be read
fn input<T: DeserializeOwned>(value: Value) -> anyhow::Result<T> {
    serde_json::from_value(value).context("invalid seed input")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    info!("=== RST Logistics seed data ===");
    let pool = db::establish_connection_from_app_config(&cfg).await?;
    db::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let (tx, rx) = mpsc::channel(cfg.event_channel_capacity);
    tokio::spawn(process_events(rx));
    let services = AppServices::new(pool, Arc::new(EventSender::new(tx)));

    let existing = services.countries.list_countries(1, 1, None).await?;
    if existing.total > 0 {
        info!("Database already holds master data; nothing to do");
        return Ok(());
    }

    // Master data
    info!("Creating master data...");
    let india = services
        .countries
        .create_country(input(json!({"countryCode": "IN", "countryName": "India", "regionName": "Asia"}))?)
        .await?;
    let uae = services
        .countries
        .create_country(input(json!({"countryCode": "AE", "countryName": "United Arab Emirates", "regionName": "Middle East"}))?)
        .await?;
    let usd = services
        .currencies
        .create_currency(input(json!({"currencyCode": "USD", "currencyName": "US Dollar", "currencySymbol": "$"}))?)
        .await?;
    let inr = services
        .currencies
        .create_currency(input(json!({"currencyCode": "INR", "currencyName": "Indian Rupee", "currencySymbol": "₹"}))?)
        .await?;
    services
        .exchange_rates
        .create_rate(input(json!({
            "fromCurrencyId": usd.id,
            "toCurrencyId": inr.id,
            "exchangeRate": "83.10",
            "date": Utc::now().date_naive(),
        }))?)
        .await?;

    let nhava_sheva = services
        .ports
        .create_port(input(json!({"portCode": "INNSA", "portName": "Nhava Sheva", "countryId": india.id}))?)
        .await?;
    services
        .ports
        .create_port(input(json!({
            "portCode": "INTKD",
            "portName": "Tughlakabad ICD",
            "countryId": india.id,
            "portType": "ICD",
            "parentPortId": nhava_sheva.id,
        }))?)
        .await?;
    let jebel_ali = services
        .ports
        .create_port(input(json!({"portCode": "AEJEA", "portName": "Jebel Ali", "countryId": uae.id}))?)
        .await?;

    // Counterparties
    info!("Creating address book...");
    let customer = services
        .address_book
        .create_entry(input(json!({
            "companyName": "Deccan Chemicals Ltd",
            "businessType": "Customer",
            "countryId": india.id,
            "contacts": [{"firstName": "Asha", "lastName": "Rao", "designation": "Logistics"}],
        }))?)
        .await?;
    let carrier = services
        .address_book
        .create_entry(input(json!({"companyName": "Gulf Line Shipping", "businessType": "Carrier", "countryId": uae.id}))?)
        .await?;
    let depot = services
        .address_book
        .create_entry(input(json!({"companyName": "Jebel Ali Tank Depot", "businessType": "Depot", "countryId": uae.id}))?)
        .await?;

    let product = services
        .products
        .create_product(input(json!({
            "productName": "Isopropyl Alcohol",
            "unNumber": "1219",
            "classType": "3",
            "packagingGroup": "II",
        }))?)
        .await?;

    // Containers
    info!("Registering containers...");
    let mut container_ids = Vec::new();
    for number in ["RSTU1000010", "RSTU1000026", "RSTU1000031", "RSTU1000047"] {
        let container = services
            .inventory
            .create_inventory(input(json!({
                "containerNumber": number,
                "containerCategory": "Tank",
                "containerType": "T11",
                "containerSize": "20",
                "capacity": "26000",
                "capacityUnit": "L",
                "ownership": "Own",
                "portId": nhava_sheva.id,
                "onHireDepotAddressBookId": depot.entry.id,
            }))?)
            .await?;
        container_ids.push(container.inventory.id);
    }

    // One shipment moving three of them
    info!("Creating shipment...");
    let allotted: Vec<i32> = container_ids.iter().copied().take(3).collect();
    let shipment = services
        .shipments
        .create_shipment(input(json!({
            "date": Utc::now().date_naive(),
            "customerAddressBookId": customer.entry.id,
            "productId": product.product.id,
            "polPortId": nhava_sheva.id,
            "podPortId": jebel_ali.id,
            "carrierAddressBookId": carrier.entry.id,
            "emptyReturnDepotAddressBookId": depot.entry.id,
            "vesselName": "MV Coral Star",
            "voyageNumber": "024W",
            "containers": allotted,
        }))?)
        .await?;

    let allotted_rows: Vec<i32> = shipment.containers.iter().map(|c| c.movement_id).collect();
    for status in ["EMPTY PICKED UP", "GATE-IN"] {
        services
            .movement_history
            .apply_bulk_status_update(input(json!({
                "ids": allotted_rows,
                "newStatus": status,
                "jobNumber": shipment.shipment.job_number,
                "date": Utc::now().to_rfc3339(),
            }))?)
            .await?;
    }

    let summary = services.dashboard.container_summary().await?;
    info!(
        total = summary.total,
        available = summary.available,
        in_transit = summary.in_transit,
        "Seed complete"
    );
    Ok(())
}
