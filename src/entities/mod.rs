// Master data
pub mod country;
pub mod currency;
pub mod exchange_rate;
pub mod port;

// Address book and its children
pub mod address_book;
pub mod address_book_bank_detail;
pub mod address_book_contact;

// Products
pub mod product;
pub mod product_msds;

// Container inventory and the movement ledger
pub mod inventory;
pub mod inventory_certificate;
pub mod inventory_leasing_info;
pub mod movement_history;

// Jobs
pub mod empty_repo_job;
pub mod shipment;

// Tariffs
pub mod container_lease_tariff;
pub mod depot_avg_tariff;
pub mod depot_cleaning_tariff;
pub mod handling_agent_tariff;
pub mod land_transport_tariff;
