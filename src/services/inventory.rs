use crate::{
    entities::{inventory, inventory_certificate, inventory_leasing_info, movement_history},
    errors::ServiceError,
    events::{Event, EventSender},
    metrics::LOGISTICS_METRICS,
    models::ContainerStatus,
    services::{
        child_sync::{child_key, delete_children, sync_children, ChildInput},
        movement_history::{append, current_record, current_records, NewMovement, Placement},
    },
    PaginatedResponse,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

/// Leasing terms attached to a container
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeasingInfoInput {
    /// Present when updating an existing row
    pub id: Option<i32>,
    pub leasor_address_book_id: Option<i32>,
    pub lease_ref: Option<String>,
    pub on_hire_date: Option<NaiveDate>,
    pub off_hire_date: Option<NaiveDate>,
    pub on_hire_depot_address_book_id: Option<i32>,
    pub port_id: Option<i32>,
    pub lease_rent_per_day: Option<Decimal>,
    pub remarks: Option<String>,
}

impl ChildInput for LeasingInfoInput {
    type Entity = inventory_leasing_info::Entity;
    type ActiveModel = inventory_leasing_info::ActiveModel;

    const LABEL: &'static str = "Leasing info";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn id_column() -> inventory_leasing_info::Column {
        inventory_leasing_info::Column::Id
    }

    fn parent_column() -> inventory_leasing_info::Column {
        inventory_leasing_info::Column::InventoryId
    }

    fn into_active_model(self, parent_id: i32) -> inventory_leasing_info::ActiveModel {
        inventory_leasing_info::ActiveModel {
            id: child_key(self.id),
            inventory_id: Set(parent_id),
            leasor_address_book_id: Set(self.leasor_address_book_id),
            lease_ref: Set(self.lease_ref),
            on_hire_date: Set(self.on_hire_date),
            off_hire_date: Set(self.off_hire_date),
            on_hire_depot_address_book_id: Set(self.on_hire_depot_address_book_id),
            port_id: Set(self.port_id),
            lease_rent_per_day: Set(self.lease_rent_per_day),
            remarks: Set(self.remarks),
        }
    }
}

/// Periodic inspection certificate
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInput {
    pub id: Option<i32>,
    pub inspection_date: Option<NaiveDate>,
    pub inspection_type: Option<String>,
    pub next_due_date: Option<NaiveDate>,
    pub certificate_file: Option<String>,
}

impl ChildInput for CertificateInput {
    type Entity = inventory_certificate::Entity;
    type ActiveModel = inventory_certificate::ActiveModel;

    const LABEL: &'static str = "Certificate";

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn id_column() -> inventory_certificate::Column {
        inventory_certificate::Column::Id
    }

    fn parent_column() -> inventory_certificate::Column {
        inventory_certificate::Column::InventoryId
    }

    fn into_active_model(self, parent_id: i32) -> inventory_certificate::ActiveModel {
        inventory_certificate::ActiveModel {
            id: child_key(self.id),
            inventory_id: Set(parent_id),
            inspection_date: Set(self.inspection_date),
            inspection_type: Set(self.inspection_type),
            next_due_date: Set(self.next_due_date),
            certificate_file: Set(self.certificate_file),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryInput {
    #[validate(length(min = 1, max = 20, message = "container number is required"))]
    #[schema(example = "RSTU1234567")]
    pub container_number: String,
    #[validate(length(min = 1, message = "container category is required"))]
    pub container_category: String,
    pub container_type: Option<String>,
    pub container_size: Option<String>,
    pub container_class: Option<String>,
    pub capacity: Option<Decimal>,
    pub capacity_unit: Option<String>,
    pub manufacturer: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub build_year: Option<i32>,
    pub gross_weight: Option<Decimal>,
    pub tare_weight: Option<Decimal>,
    pub initial_survey: Option<String>,
    /// `Own` (default) or `Leased`
    pub ownership: Option<String>,
    pub port_id: Option<i32>,
    pub on_hire_depot_address_book_id: Option<i32>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub leasing_info: Vec<LeasingInfoInput>,
    #[serde(default)]
    pub certificates: Vec<CertificateInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryInput {
    #[validate(length(min = 1, max = 20))]
    pub container_number: Option<String>,
    pub container_category: Option<String>,
    pub container_type: Option<String>,
    pub container_size: Option<String>,
    pub container_class: Option<String>,
    pub capacity: Option<Decimal>,
    pub capacity_unit: Option<String>,
    pub manufacturer: Option<String>,
    #[validate(range(min = 1900, max = 2100))]
    pub build_year: Option<i32>,
    pub gross_weight: Option<Decimal>,
    pub tare_weight: Option<Decimal>,
    pub initial_survey: Option<String>,
    pub ownership: Option<String>,
    pub port_id: Option<i32>,
    pub on_hire_depot_address_book_id: Option<i32>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub leasing_info: Vec<LeasingInfoInput>,
    #[serde(default)]
    pub removed_leasing_info_ids: Vec<i32>,
    #[serde(default)]
    pub certificates: Vec<CertificateInput>,
    #[serde(default)]
    pub removed_certificate_ids: Vec<i32>,
}

/// Container row with its ledger-derived status
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    #[serde(flatten)]
    pub inventory: inventory::Model,
    pub current_status: Option<String>,
}

/// Container with its children and ledger-derived status
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDetail {
    #[serde(flatten)]
    pub inventory: inventory::Model,
    pub current_status: Option<String>,
    pub leasing_info: Vec<inventory_leasing_info::Model>,
    pub certificates: Vec<inventory_certificate::Model>,
}

fn check_ownership(ownership: &str) -> Result<(), ServiceError> {
    if ownership == inventory::OWNERSHIP_OWN || ownership == inventory::OWNERSHIP_LEASED {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(format!(
            "ownership must be '{}' or '{}'",
            inventory::OWNERSHIP_OWN,
            inventory::OWNERSHIP_LEASED
        )))
    }
}

/// Canonical spelling of a stored status
fn display_status(raw: &str) -> String {
    ContainerStatus::parse(raw)
        .map(|status| status.as_str().to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl InventoryService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Registers a container and records it as `AVAILABLE`
    #[instrument(skip(self, input), fields(container_number = %input.container_number))]
    pub async fn create_inventory(
        &self,
        input: CreateInventoryInput,
    ) -> Result<InventoryDetail, ServiceError> {
        input.validate()?;
        let container_number = input.container_number.trim().to_uppercase();
        let ownership = input
            .ownership
            .unwrap_or_else(|| inventory::OWNERSHIP_OWN.to_string());
        check_ownership(&ownership)?;
        self.ensure_unique_container_number(&*self.db, &container_number, None)
            .await?;

        let txn = self.db.begin().await?;

        let container = inventory::ActiveModel {
            container_number: Set(container_number),
            container_category: Set(input.container_category),
            container_type: Set(input.container_type),
            container_size: Set(input.container_size),
            container_class: Set(input.container_class),
            capacity: Set(input.capacity),
            capacity_unit: Set(input.capacity_unit),
            manufacturer: Set(input.manufacturer),
            build_year: Set(input.build_year),
            gross_weight: Set(input.gross_weight),
            tare_weight: Set(input.tare_weight),
            initial_survey: Set(input.initial_survey),
            ownership: Set(ownership),
            port_id: Set(input.port_id),
            on_hire_depot_address_book_id: Set(input.on_hire_depot_address_book_id),
            remarks: Set(input.remarks),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        sync_children(&txn, container.id, input.leasing_info, &[]).await?;
        sync_children(&txn, container.id, input.certificates, &[]).await?;

        let registration = append(
            &txn,
            NewMovement {
                inventory_id: container.id,
                status: ContainerStatus::Available,
                date: Utc::now(),
                placement: Placement {
                    port_id: container.port_id,
                    address_book_id: container.on_hire_depot_address_book_id,
                },
                job: None,
                remarks: Some("Container registered".to_string()),
            },
        )
        .await?;

        txn.commit().await?;

        LOGISTICS_METRICS.containers_registered.inc();
        LOGISTICS_METRICS.movements_recorded.inc();
        self.event_sender
            .send_or_log(Event::ContainerRegistered {
                inventory_id: container.id,
                container_number: container.container_number.clone(),
            })
            .await;
        self.event_sender
            .send_or_log(Event::MovementRecorded {
                movement_id: registration.id,
                inventory_id: container.id,
                status: registration.status.clone(),
            })
            .await;

        info!(inventory_id = container.id, "Container registered");
        self.get_inventory(container.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_inventory(&self, id: i32) -> Result<InventoryDetail, ServiceError> {
        let container = self.find(id).await?;

        let leasing_info = inventory_leasing_info::Entity::find()
            .filter(inventory_leasing_info::Column::InventoryId.eq(id))
            .order_by_asc(inventory_leasing_info::Column::Id)
            .all(&*self.db)
            .await?;
        let certificates = inventory_certificate::Entity::find()
            .filter(inventory_certificate::Column::InventoryId.eq(id))
            .order_by_asc(inventory_certificate::Column::Id)
            .all(&*self.db)
            .await?;
        let current_status = current_record(&*self.db, id)
            .await?
            .map(|row| display_status(&row.status));

        Ok(InventoryDetail {
            inventory: container,
            current_status,
            leasing_info,
            certificates,
        })
    }

    /// Containers by container number, each with its current status
    #[instrument(skip(self))]
    pub async fn list_inventory(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<InventorySummary>, ServiceError> {
        let mut query = inventory::Entity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(inventory::Column::ContainerNumber.contains(term));
        }

        let paginator = query
            .order_by_asc(inventory::Column::ContainerNumber)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let containers = paginator.fetch_page(page.saturating_sub(1)).await?;

        let ids: Vec<i32> = containers.iter().map(|c| c.id).collect();
        let mut current = current_records(&*self.db, Some(&ids)).await?;

        let items = containers
            .into_iter()
            .map(|container| InventorySummary {
                current_status: current
                    .remove(&container.id)
                    .map(|row| display_status(&row.status)),
                inventory: container,
            })
            .collect();

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    /// Updates the container and syncs its leasing info and certificates
    #[instrument(skip(self, input))]
    pub async fn update_inventory(
        &self,
        id: i32,
        input: UpdateInventoryInput,
    ) -> Result<InventoryDetail, ServiceError> {
        input.validate()?;
        let container = self.find(id).await?;

        let txn = self.db.begin().await?;
        let mut active: inventory::ActiveModel = container.into();

        if let Some(number) = input.container_number {
            let number = number.trim().to_uppercase();
            self.ensure_unique_container_number(&txn, &number, Some(id))
                .await?;
            active.container_number = Set(number);
        }
        if let Some(category) = input.container_category {
            active.container_category = Set(category);
        }
        if let Some(container_type) = input.container_type {
            active.container_type = Set(Some(container_type));
        }
        if let Some(size) = input.container_size {
            active.container_size = Set(Some(size));
        }
        if let Some(class) = input.container_class {
            active.container_class = Set(Some(class));
        }
        if let Some(capacity) = input.capacity {
            active.capacity = Set(Some(capacity));
        }
        if let Some(unit) = input.capacity_unit {
            active.capacity_unit = Set(Some(unit));
        }
        if let Some(manufacturer) = input.manufacturer {
            active.manufacturer = Set(Some(manufacturer));
        }
        if let Some(year) = input.build_year {
            active.build_year = Set(Some(year));
        }
        if let Some(weight) = input.gross_weight {
            active.gross_weight = Set(Some(weight));
        }
        if let Some(weight) = input.tare_weight {
            active.tare_weight = Set(Some(weight));
        }
        if let Some(survey) = input.initial_survey {
            active.initial_survey = Set(Some(survey));
        }
        if let Some(ownership) = input.ownership {
            check_ownership(&ownership)?;
            active.ownership = Set(ownership);
        }
        if let Some(port_id) = input.port_id {
            active.port_id = Set(Some(port_id));
        }
        if let Some(depot) = input.on_hire_depot_address_book_id {
            active.on_hire_depot_address_book_id = Set(Some(depot));
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(Some(remarks));
        }
        active.update(&txn).await?;

        sync_children(&txn, id, input.leasing_info, &input.removed_leasing_info_ids).await?;
        sync_children(&txn, id, input.certificates, &input.removed_certificate_ids).await?;

        txn.commit().await?;

        info!(inventory_id = id, "Container updated");
        self.get_inventory(id).await
    }

    /// Removes the container together with its children and ledger rows
    #[instrument(skip(self))]
    pub async fn delete_inventory(&self, id: i32) -> Result<(), ServiceError> {
        self.find(id).await?;

        let txn = self.db.begin().await?;
        delete_children::<LeasingInfoInput, _>(&txn, id).await?;
        delete_children::<CertificateInput, _>(&txn, id).await?;
        let movements = movement_history::Entity::delete_many()
            .filter(movement_history::Column::InventoryId.eq(id))
            .exec(&txn)
            .await?;
        inventory::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::ContainerRemoved(id))
            .await;
        info!(
            inventory_id = id,
            movements = movements.rows_affected,
            "Container deleted"
        );
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<inventory::Model, ServiceError> {
        inventory::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Inventory", id))
    }

    async fn ensure_unique_container_number<C: ConnectionTrait>(
        &self,
        conn: &C,
        container_number: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = inventory::Entity::find()
            .filter(inventory::Column::ContainerNumber.eq(container_number));
        if let Some(id) = exclude_id {
            query = query.filter(inventory::Column::Id.ne(id));
        }
        if query.count(conn).await? > 0 {
            return Err(ServiceError::Conflict(format!(
                "container number '{container_number}' already exists"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_accepts_known_values_only() {
        assert!(check_ownership("Own").is_ok());
        assert!(check_ownership("Leased").is_ok());
        assert!(check_ownership("rented").is_err());
    }

    #[test]
    fn legacy_status_is_shown_canonically() {
        assert_eq!(display_status("ALLOTED"), "ALLOTTED");
        assert_eq!(display_status("in repair"), "in repair");
    }

    #[test]
    fn update_input_defaults_child_lists() {
        let input: UpdateInventoryInput =
            serde_json::from_value(serde_json::json!({ "remarks": "relabelled" })).unwrap();
        assert!(input.leasing_info.is_empty());
        assert!(input.removed_certificate_ids.is_empty());
        assert_eq!(input.remarks.as_deref(), Some("relabelled"));
    }
}
