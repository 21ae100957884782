//! The five tariff tables share one lifecycle: a generated code, an owning
//! address book entry, non-negative charges and plain CRUD. [`Tariff`]
//! describes one table and [`TariffService`] runs the lifecycle for it.

use crate::{
    entities::{
        container_lease_tariff, depot_avg_tariff, depot_cleaning_tariff, handling_agent_tariff,
        land_transport_tariff,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{
        address_book::ensure_address_book,
        reference_codes::{CodedEntity, ReferenceCodeService},
    },
    PaginatedResponse,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::Deserialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

/// One tariff table
pub trait Tariff: CodedEntity {
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + From<Self::Model> + Send;
    type Create: Clone + Send + Sync + 'static;
    type Update: Send + 'static;

    /// Name used in logs, events and messages
    const LABEL: &'static str;

    fn id_column() -> Self::Column;

    fn address_book_column() -> Self::Column;

    /// Unsaved row for `input`; id and timestamps are placeholders
    fn draft(code: String, input: Self::Create) -> Self::Model;

    /// Applies the fields present in `input`
    fn apply(row: &mut Self::Model, input: Self::Update);

    /// Recomputes derived columns
    fn finalize(_row: &mut Self::Model) {}

    /// Named charges that must not be negative
    fn charges(row: &Self::Model) -> Vec<(&'static str, Decimal)>;

    fn address_book_id(row: &Self::Model) -> i32;

    fn code(row: &Self::Model) -> &str;
}

/// Rejects negative charges
pub fn check_charges(charges: &[(&'static str, Decimal)]) -> Result<(), ServiceError> {
    match charges.iter().find(|(_, amount)| amount.is_sign_negative() && !amount.is_zero()) {
        Some((name, _)) => Err(ServiceError::ValidationError(format!(
            "{name} cannot be negative"
        ))),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TariffFilter {
    /// Substring of the tariff code
    pub search: Option<String>,
    pub address_book_id: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

pub struct TariffService<E> {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    codes: ReferenceCodeService,
    _tariff: PhantomData<fn() -> E>,
}

impl<E> Clone for TariffService<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            event_sender: self.event_sender.clone(),
            codes: self.codes.clone(),
            _tariff: PhantomData,
        }
    }
}

impl<E> TariffService<E>
where
    E: Tariff,
    E::Model: IntoActiveModel<E::Active> + Clone + Send + Sync,
{
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        let codes = ReferenceCodeService::new(db.clone(), event_sender.clone());
        Self {
            db,
            event_sender,
            codes,
            _tariff: PhantomData,
        }
    }

    pub async fn next_tariff_code(&self) -> Result<String, ServiceError> {
        self.codes.preview::<E>().await
    }

    #[instrument(skip(self, input), fields(tariff = E::LABEL))]
    pub async fn create(&self, input: E::Create) -> Result<E::Model, ServiceError> {
        let mut preview = E::draft(String::new(), input.clone());
        E::finalize(&mut preview);
        check_charges(&E::charges(&preview))?;
        ensure_address_book(&*self.db, E::address_book_id(&preview)).await?;

        let created = self
            .codes
            .create_with_code::<E, _, _, _>(|code| {
                let mut row = E::draft(code, input.clone());
                E::finalize(&mut row);
                let db = self.db.clone();
                async move {
                    let mut active: E::Active = row.into();
                    active = active.reset_all();
                    active.not_set(E::id_column());
                    Ok::<_, ServiceError>(active.insert(&*db).await?)
                }
            })
            .await?;

        self.event_sender
            .send_or_log(Event::TariffCreated {
                tariff_type: E::LABEL.to_string(),
                tariff_code: E::code(&created).to_string(),
            })
            .await;
        info!(tariff = E::LABEL, code = %E::code(&created), "Tariff created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<E::Model, ServiceError> {
        E::find()
            .filter(E::id_column().eq(id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(E::LABEL, id))
    }

    #[instrument(skip(self), fields(tariff = E::LABEL))]
    pub async fn list(
        &self,
        filter: &TariffFilter,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<E::Model>, ServiceError> {
        let mut query = E::find();
        if let Some(term) = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            query = query.filter(E::code_column().contains(term));
        }
        if let Some(address_book_id) = filter.address_book_id {
            query = query.filter(E::address_book_column().eq(address_book_id));
        }

        let paginator = query
            .order_by_desc(E::id_column())
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self, input), fields(tariff = E::LABEL))]
    pub async fn update(&self, id: i32, input: E::Update) -> Result<E::Model, ServiceError> {
        let existing = self.get(id).await?;
        let previous_book = E::address_book_id(&existing);

        let mut row = existing;
        E::apply(&mut row, input);
        E::finalize(&mut row);
        check_charges(&E::charges(&row))?;
        if E::address_book_id(&row) != previous_book {
            ensure_address_book(&*self.db, E::address_book_id(&row)).await?;
        }

        let active: E::Active = row.into();
        let updated = active.reset_all().update(&*self.db).await?;

        info!(tariff = E::LABEL, id, "Tariff updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(tariff = E::LABEL))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.get(id).await?;
        E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(&*self.db)
            .await?;
        info!(tariff = E::LABEL, id, "Tariff deleted");
        Ok(())
    }
}

// Container lease

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContainerLeaseTariffInput {
    pub address_book_id: i32,
    pub container_category: Option<String>,
    pub container_type: Option<String>,
    pub container_class: Option<String>,
    pub lease_rent_per_day: Decimal,
    pub currency_id: Option<i32>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContainerLeaseTariffInput {
    pub address_book_id: Option<i32>,
    pub container_category: Option<String>,
    pub container_type: Option<String>,
    pub container_class: Option<String>,
    pub lease_rent_per_day: Option<Decimal>,
    pub currency_id: Option<i32>,
    pub remarks: Option<String>,
}

impl Tariff for container_lease_tariff::Entity {
    type Active = container_lease_tariff::ActiveModel;
    type Create = CreateContainerLeaseTariffInput;
    type Update = UpdateContainerLeaseTariffInput;

    const LABEL: &'static str = "Container lease tariff";

    fn id_column() -> Self::Column {
        container_lease_tariff::Column::Id
    }

    fn address_book_column() -> Self::Column {
        container_lease_tariff::Column::AddressBookId
    }

    fn draft(code: String, input: Self::Create) -> container_lease_tariff::Model {
        let now = Utc::now();
        container_lease_tariff::Model {
            id: 0,
            tariff_code: code,
            address_book_id: input.address_book_id,
            container_category: input.container_category,
            container_type: input.container_type,
            container_class: input.container_class,
            lease_rent_per_day: input.lease_rent_per_day,
            currency_id: input.currency_id,
            remarks: input.remarks,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(row: &mut container_lease_tariff::Model, input: Self::Update) {
        if let Some(v) = input.address_book_id {
            row.address_book_id = v;
        }
        if let Some(v) = input.container_category {
            row.container_category = Some(v);
        }
        if let Some(v) = input.container_type {
            row.container_type = Some(v);
        }
        if let Some(v) = input.container_class {
            row.container_class = Some(v);
        }
        if let Some(v) = input.lease_rent_per_day {
            row.lease_rent_per_day = v;
        }
        if let Some(v) = input.currency_id {
            row.currency_id = Some(v);
        }
        if let Some(v) = input.remarks {
            row.remarks = Some(v);
        }
    }

    fn charges(row: &container_lease_tariff::Model) -> Vec<(&'static str, Decimal)> {
        vec![("leaseRentPerDay", row.lease_rent_per_day)]
    }

    fn address_book_id(row: &container_lease_tariff::Model) -> i32 {
        row.address_book_id
    }

    fn code(row: &container_lease_tariff::Model) -> &str {
        &row.tariff_code
    }
}

// Depot average

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepotAvgTariffInput {
    pub address_book_id: i32,
    pub port_id: i32,
    pub currency_id: Option<i32>,
    #[serde(default)]
    pub manlift_charges: Decimal,
    #[serde(default)]
    pub on_hire_survey: Decimal,
    #[serde(default)]
    pub off_hire_survey: Decimal,
    #[serde(default)]
    pub cleaning_charges: Decimal,
    #[serde(default)]
    pub periodic_test: Decimal,
    #[serde(default)]
    pub storage_per_day: Decimal,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepotAvgTariffInput {
    pub address_book_id: Option<i32>,
    pub port_id: Option<i32>,
    pub currency_id: Option<i32>,
    pub manlift_charges: Option<Decimal>,
    pub on_hire_survey: Option<Decimal>,
    pub off_hire_survey: Option<Decimal>,
    pub cleaning_charges: Option<Decimal>,
    pub periodic_test: Option<Decimal>,
    pub storage_per_day: Option<Decimal>,
    pub remarks: Option<String>,
}

impl Tariff for depot_avg_tariff::Entity {
    type Active = depot_avg_tariff::ActiveModel;
    type Create = CreateDepotAvgTariffInput;
    type Update = UpdateDepotAvgTariffInput;

    const LABEL: &'static str = "Depot average tariff";

    fn id_column() -> Self::Column {
        depot_avg_tariff::Column::Id
    }

    fn address_book_column() -> Self::Column {
        depot_avg_tariff::Column::AddressBookId
    }

    fn draft(code: String, input: Self::Create) -> depot_avg_tariff::Model {
        let now = Utc::now();
        depot_avg_tariff::Model {
            id: 0,
            tariff_code: code,
            address_book_id: input.address_book_id,
            port_id: input.port_id,
            currency_id: input.currency_id,
            manlift_charges: input.manlift_charges,
            on_hire_survey: input.on_hire_survey,
            off_hire_survey: input.off_hire_survey,
            cleaning_charges: input.cleaning_charges,
            periodic_test: input.periodic_test,
            storage_per_day: input.storage_per_day,
            total: Decimal::ZERO,
            remarks: input.remarks,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(row: &mut depot_avg_tariff::Model, input: Self::Update) {
        if let Some(v) = input.address_book_id {
            row.address_book_id = v;
        }
        if let Some(v) = input.port_id {
            row.port_id = v;
        }
        if let Some(v) = input.currency_id {
            row.currency_id = Some(v);
        }
        if let Some(v) = input.manlift_charges {
            row.manlift_charges = v;
        }
        if let Some(v) = input.on_hire_survey {
            row.on_hire_survey = v;
        }
        if let Some(v) = input.off_hire_survey {
            row.off_hire_survey = v;
        }
        if let Some(v) = input.cleaning_charges {
            row.cleaning_charges = v;
        }
        if let Some(v) = input.periodic_test {
            row.periodic_test = v;
        }
        if let Some(v) = input.storage_per_day {
            row.storage_per_day = v;
        }
        if let Some(v) = input.remarks {
            row.remarks = Some(v);
        }
    }

    fn finalize(row: &mut depot_avg_tariff::Model) {
        row.total = depot_avg_total(row);
    }

    fn charges(row: &depot_avg_tariff::Model) -> Vec<(&'static str, Decimal)> {
        vec![
            ("manliftCharges", row.manlift_charges),
            ("onHireSurvey", row.on_hire_survey),
            ("offHireSurvey", row.off_hire_survey),
            ("cleaningCharges", row.cleaning_charges),
            ("periodicTest", row.periodic_test),
            ("storagePerDay", row.storage_per_day),
        ]
    }

    fn address_book_id(row: &depot_avg_tariff::Model) -> i32 {
        row.address_book_id
    }

    fn code(row: &depot_avg_tariff::Model) -> &str {
        &row.tariff_code
    }
}

/// Sum of the six depot charge components
pub fn depot_avg_total(row: &depot_avg_tariff::Model) -> Decimal {
    row.manlift_charges
        + row.on_hire_survey
        + row.off_hire_survey
        + row.cleaning_charges
        + row.periodic_test
        + row.storage_per_day
}

// Handling agent

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHandlingAgentTariffInput {
    pub address_book_id: i32,
    pub port_id: i32,
    pub currency_id: Option<i32>,
    #[serde(default)]
    pub import_commission: Decimal,
    #[serde(default)]
    pub export_commission: Decimal,
    #[serde(default)]
    pub transhipment_commission: Decimal,
    #[serde(default)]
    pub empty_repo_commission: Decimal,
    #[serde(default)]
    pub detention_commission: Decimal,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHandlingAgentTariffInput {
    pub address_book_id: Option<i32>,
    pub port_id: Option<i32>,
    pub currency_id: Option<i32>,
    pub import_commission: Option<Decimal>,
    pub export_commission: Option<Decimal>,
    pub transhipment_commission: Option<Decimal>,
    pub empty_repo_commission: Option<Decimal>,
    pub detention_commission: Option<Decimal>,
    pub remarks: Option<String>,
}

impl Tariff for handling_agent_tariff::Entity {
    type Active = handling_agent_tariff::ActiveModel;
    type Create = CreateHandlingAgentTariffInput;
    type Update = UpdateHandlingAgentTariffInput;

    const LABEL: &'static str = "Handling agent tariff";

    fn id_column() -> Self::Column {
        handling_agent_tariff::Column::Id
    }

    fn address_book_column() -> Self::Column {
        handling_agent_tariff::Column::AddressBookId
    }

    fn draft(code: String, input: Self::Create) -> handling_agent_tariff::Model {
        let now = Utc::now();
        handling_agent_tariff::Model {
            id: 0,
            tariff_code: code,
            address_book_id: input.address_book_id,
            port_id: input.port_id,
            currency_id: input.currency_id,
            import_commission: input.import_commission,
            export_commission: input.export_commission,
            transhipment_commission: input.transhipment_commission,
            empty_repo_commission: input.empty_repo_commission,
            detention_commission: input.detention_commission,
            remarks: input.remarks,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(row: &mut handling_agent_tariff::Model, input: Self::Update) {
        if let Some(v) = input.address_book_id {
            row.address_book_id = v;
        }
        if let Some(v) = input.port_id {
            row.port_id = v;
        }
        if let Some(v) = input.currency_id {
            row.currency_id = Some(v);
        }
        if let Some(v) = input.import_commission {
            row.import_commission = v;
        }
        if let Some(v) = input.export_commission {
            row.export_commission = v;
        }
        if let Some(v) = input.transhipment_commission {
            row.transhipment_commission = v;
        }
        if let Some(v) = input.empty_repo_commission {
            row.empty_repo_commission = v;
        }
        if let Some(v) = input.detention_commission {
            row.detention_commission = v;
        }
        if let Some(v) = input.remarks {
            row.remarks = Some(v);
        }
    }

    fn charges(row: &handling_agent_tariff::Model) -> Vec<(&'static str, Decimal)> {
        vec![
            ("importCommission", row.import_commission),
            ("exportCommission", row.export_commission),
            ("transhipmentCommission", row.transhipment_commission),
            ("emptyRepoCommission", row.empty_repo_commission),
            ("detentionCommission", row.detention_commission),
        ]
    }

    fn address_book_id(row: &handling_agent_tariff::Model) -> i32 {
        row.address_book_id
    }

    fn code(row: &handling_agent_tariff::Model) -> &str {
        &row.tariff_code
    }
}

// Land transport

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLandTransportTariffInput {
    pub address_book_id: i32,
    pub from_location: String,
    pub to_location: String,
    pub distance_km: Option<Decimal>,
    pub transport_type: Option<String>,
    pub amount: Decimal,
    pub approximate_time: Option<String>,
    pub currency_id: Option<i32>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLandTransportTariffInput {
    pub address_book_id: Option<i32>,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub distance_km: Option<Decimal>,
    pub transport_type: Option<String>,
    pub amount: Option<Decimal>,
    pub approximate_time: Option<String>,
    pub currency_id: Option<i32>,
    pub remarks: Option<String>,
}

impl Tariff for land_transport_tariff::Entity {
    type Active = land_transport_tariff::ActiveModel;
    type Create = CreateLandTransportTariffInput;
    type Update = UpdateLandTransportTariffInput;

    const LABEL: &'static str = "Land transport tariff";

    fn id_column() -> Self::Column {
        land_transport_tariff::Column::Id
    }

    fn address_book_column() -> Self::Column {
        land_transport_tariff::Column::AddressBookId
    }

    fn draft(code: String, input: Self::Create) -> land_transport_tariff::Model {
        let now = Utc::now();
        land_transport_tariff::Model {
            id: 0,
            tariff_code: code,
            address_book_id: input.address_book_id,
            from_location: input.from_location,
            to_location: input.to_location,
            distance_km: input.distance_km,
            transport_type: input.transport_type,
            amount: input.amount,
            approximate_time: input.approximate_time,
            currency_id: input.currency_id,
            remarks: input.remarks,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(row: &mut land_transport_tariff::Model, input: Self::Update) {
        if let Some(v) = input.address_book_id {
            row.address_book_id = v;
        }
        if let Some(v) = input.from_location {
            row.from_location = v;
        }
        if let Some(v) = input.to_location {
            row.to_location = v;
        }
        if let Some(v) = input.distance_km {
            row.distance_km = Some(v);
        }
        if let Some(v) = input.transport_type {
            row.transport_type = Some(v);
        }
        if let Some(v) = input.amount {
            row.amount = v;
        }
        if let Some(v) = input.approximate_time {
            row.approximate_time = Some(v);
        }
        if let Some(v) = input.currency_id {
            row.currency_id = Some(v);
        }
        if let Some(v) = input.remarks {
            row.remarks = Some(v);
        }
    }

    fn charges(row: &land_transport_tariff::Model) -> Vec<(&'static str, Decimal)> {
        let mut charges = vec![("amount", row.amount)];
        if let Some(distance) = row.distance_km {
            charges.push(("distanceKm", distance));
        }
        charges
    }

    fn address_book_id(row: &land_transport_tariff::Model) -> i32 {
        row.address_book_id
    }

    fn code(row: &land_transport_tariff::Model) -> &str {
        &row.tariff_code
    }
}

// Depot cleaning

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepotCleaningTariffInput {
    pub address_book_id: i32,
    pub port_id: i32,
    pub product_id: Option<i32>,
    pub cleaning_charges: Decimal,
    pub currency_id: Option<i32>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepotCleaningTariffInput {
    pub address_book_id: Option<i32>,
    pub port_id: Option<i32>,
    pub product_id: Option<i32>,
    pub cleaning_charges: Option<Decimal>,
    pub currency_id: Option<i32>,
    pub remarks: Option<String>,
}

impl Tariff for depot_cleaning_tariff::Entity {
    type Active = depot_cleaning_tariff::ActiveModel;
    type Create = CreateDepotCleaningTariffInput;
    type Update = UpdateDepotCleaningTariffInput;

    const LABEL: &'static str = "Depot cleaning tariff";

    fn id_column() -> Self::Column {
        depot_cleaning_tariff::Column::Id
    }

    fn address_book_column() -> Self::Column {
        depot_cleaning_tariff::Column::AddressBookId
    }

    fn draft(code: String, input: Self::Create) -> depot_cleaning_tariff::Model {
        let now = Utc::now();
        depot_cleaning_tariff::Model {
            id: 0,
            tariff_code: code,
            address_book_id: input.address_book_id,
            port_id: input.port_id,
            product_id: input.product_id,
            cleaning_charges: input.cleaning_charges,
            currency_id: input.currency_id,
            remarks: input.remarks,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(row: &mut depot_cleaning_tariff::Model, input: Self::Update) {
        if let Some(v) = input.address_book_id {
            row.address_book_id = v;
        }
        if let Some(v) = input.port_id {
            row.port_id = v;
        }
        if let Some(v) = input.product_id {
            row.product_id = Some(v);
        }
        if let Some(v) = input.cleaning_charges {
            row.cleaning_charges = v;
        }
        if let Some(v) = input.currency_id {
            row.currency_id = Some(v);
        }
        if let Some(v) = input.remarks {
            row.remarks = Some(v);
        }
    }

    fn charges(row: &depot_cleaning_tariff::Model) -> Vec<(&'static str, Decimal)> {
        vec![("cleaningCharges", row.cleaning_charges)]
    }

    fn address_book_id(row: &depot_cleaning_tariff::Model) -> i32 {
        row.address_book_id
    }

    fn code(row: &depot_cleaning_tariff::Model) -> &str {
        &row.tariff_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn depot_input() -> CreateDepotAvgTariffInput {
        CreateDepotAvgTariffInput {
            address_book_id: 1,
            port_id: 2,
            currency_id: None,
            manlift_charges: dec!(10),
            on_hire_survey: dec!(20.50),
            off_hire_survey: dec!(20.50),
            cleaning_charges: dec!(45),
            periodic_test: dec!(100),
            storage_per_day: dec!(4),
            remarks: None,
        }
    }

    #[test]
    fn depot_total_is_sum_of_components() {
        let mut row = depot_avg_tariff::Entity::draft("RST-DAT-00001".into(), depot_input());
        depot_avg_tariff::Entity::finalize(&mut row);
        assert_eq!(row.total, dec!(200.00));
    }

    #[test]
    fn depot_total_follows_updates() {
        let mut row = depot_avg_tariff::Entity::draft("RST-DAT-00001".into(), depot_input());
        depot_avg_tariff::Entity::apply(
            &mut row,
            UpdateDepotAvgTariffInput {
                storage_per_day: Some(dec!(9)),
                ..Default::default()
            },
        );
        depot_avg_tariff::Entity::finalize(&mut row);
        assert_eq!(row.total, dec!(205.00));
    }

    #[test]
    fn negative_charges_are_rejected() {
        assert!(check_charges(&[("amount", dec!(0)), ("fee", dec!(1.5))]).is_ok());
        let err = check_charges(&[("amount", dec!(-0.01))]).unwrap_err();
        assert!(err.to_string().contains("amount cannot be negative"));
    }
}
