use crate::{
    entities::shipment,
    errors::ServiceError,
    events::{Event, EventSender, JobKind},
    metrics::LOGISTICS_METRICS,
    services::{
        jobs::{
            allot_containers, announce_allotment, ensure_unreferenced, linked_containers,
            LinkedContainer,
        },
        movement_history::{JobLink, JobRoute},
        reference_codes::ReferenceCodeService,
    },
    PaginatedResponse,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentInput {
    pub date: NaiveDate,
    pub ref_number: Option<String>,
    pub customer_address_book_id: Option<i32>,
    pub consignee_address_book_id: Option<i32>,
    pub shipper_address_book_id: Option<i32>,
    pub product_id: Option<i32>,
    pub pol_port_id: Option<i32>,
    pub pod_port_id: Option<i32>,
    pub carrier_address_book_id: Option<i32>,
    pub empty_return_depot_address_book_id: Option<i32>,
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub remarks: Option<String>,
    /// Inventory ids to allot; each must be `AVAILABLE`
    #[serde(default)]
    pub containers: Vec<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipmentInput {
    pub date: Option<NaiveDate>,
    pub ref_number: Option<String>,
    pub customer_address_book_id: Option<i32>,
    pub consignee_address_book_id: Option<i32>,
    pub shipper_address_book_id: Option<i32>,
    pub product_id: Option<i32>,
    pub pol_port_id: Option<i32>,
    pub pod_port_id: Option<i32>,
    pub carrier_address_book_id: Option<i32>,
    pub empty_return_depot_address_book_id: Option<i32>,
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub remarks: Option<String>,
    /// Further containers to allot
    #[serde(default)]
    pub containers: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDetail {
    #[serde(flatten)]
    pub shipment: shipment::Model,
    pub containers: Vec<LinkedContainer>,
}

#[derive(Clone)]
pub struct ShipmentService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    codes: ReferenceCodeService,
}

impl ShipmentService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        let codes = ReferenceCodeService::new(db.clone(), event_sender.clone());
        Self {
            db,
            event_sender,
            codes,
        }
    }

    pub async fn next_job_number(&self) -> Result<String, ServiceError> {
        self.codes.preview::<shipment::Entity>().await
    }

    /// Creates the shipment and allots the listed containers to it
    #[instrument(skip(self, input), fields(containers = input.containers.len()))]
    pub async fn create_shipment(
        &self,
        input: CreateShipmentInput,
    ) -> Result<ShipmentDetail, ServiceError> {
        input.validate()?;

        let (job, allotted) = self
            .codes
            .create_with_code::<shipment::Entity, _, _, _>(|job_number| {
                let input = input.clone();
                let db = self.db.clone();
                async move {
                    let txn = db.begin().await?;
                    let job = shipment::ActiveModel {
                        job_number: Set(job_number),
                        date: Set(input.date),
                        ref_number: Set(input.ref_number),
                        customer_address_book_id: Set(input.customer_address_book_id),
                        consignee_address_book_id: Set(input.consignee_address_book_id),
                        shipper_address_book_id: Set(input.shipper_address_book_id),
                        product_id: Set(input.product_id),
                        pol_port_id: Set(input.pol_port_id),
                        pod_port_id: Set(input.pod_port_id),
                        carrier_address_book_id: Set(input.carrier_address_book_id),
                        empty_return_depot_address_book_id: Set(
                            input.empty_return_depot_address_book_id,
                        ),
                        vessel_name: Set(input.vessel_name),
                        voyage_number: Set(input.voyage_number),
                        quantity: Set(input.quantity),
                        remarks: Set(input.remarks),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;

                    let allotted = allot_containers(
                        &txn,
                        JobLink::Shipment(job.id),
                        &JobRoute::from(&job),
                        &input.containers,
                        Utc::now(),
                    )
                    .await?;
                    txn.commit().await?;
                    Ok::<_, ServiceError>((job, allotted))
                }
            })
            .await?;

        LOGISTICS_METRICS.jobs_created.inc();
        self.event_sender
            .send_or_log(Event::JobCreated {
                kind: JobKind::Shipment,
                id: job.id,
                job_number: job.job_number.clone(),
            })
            .await;
        announce_allotment(&self.event_sender, JobLink::Shipment(job.id), job.id, &allotted).await;

        info!(shipment_id = job.id, job_number = %job.job_number, allotted = allotted.len(), "Shipment created");
        self.get_shipment(job.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_shipment(&self, id: i32) -> Result<ShipmentDetail, ServiceError> {
        let shipment = self.find(id).await?;
        let containers = linked_containers(&*self.db, JobLink::Shipment(id)).await?;
        Ok(ShipmentDetail {
            shipment,
            containers,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_shipments(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<shipment::Model>, ServiceError> {
        let mut query = shipment::Entity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(shipment::Column::JobNumber.contains(term))
                    .add(shipment::Column::RefNumber.contains(term))
                    .add(shipment::Column::VesselName.contains(term)),
            );
        }

        let paginator = query
            .order_by_desc(shipment::Column::Date)
            .order_by_desc(shipment::Column::Id)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self, input))]
    pub async fn update_shipment(
        &self,
        id: i32,
        input: UpdateShipmentInput,
    ) -> Result<ShipmentDetail, ServiceError> {
        input.validate()?;
        let existing = self.find(id).await?;

        let txn = self.db.begin().await?;
        let mut active: shipment::ActiveModel = existing.into();

        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(v) = input.ref_number {
            active.ref_number = Set(Some(v));
        }
        if let Some(v) = input.customer_address_book_id {
            active.customer_address_book_id = Set(Some(v));
        }
        if let Some(v) = input.consignee_address_book_id {
            active.consignee_address_book_id = Set(Some(v));
        }
        if let Some(v) = input.shipper_address_book_id {
            active.shipper_address_book_id = Set(Some(v));
        }
        if let Some(v) = input.product_id {
            active.product_id = Set(Some(v));
        }
        if let Some(v) = input.pol_port_id {
            active.pol_port_id = Set(Some(v));
        }
        if let Some(v) = input.pod_port_id {
            active.pod_port_id = Set(Some(v));
        }
        if let Some(v) = input.carrier_address_book_id {
            active.carrier_address_book_id = Set(Some(v));
        }
        if let Some(v) = input.empty_return_depot_address_book_id {
            active.empty_return_depot_address_book_id = Set(Some(v));
        }
        if let Some(v) = input.vessel_name {
            active.vessel_name = Set(Some(v));
        }
        if let Some(v) = input.voyage_number {
            active.voyage_number = Set(Some(v));
        }
        if let Some(v) = input.quantity {
            active.quantity = Set(Some(v));
        }
        if let Some(v) = input.remarks {
            active.remarks = Set(Some(v));
        }
        let job = active.update(&txn).await?;

        let allotted = allot_containers(
            &txn,
            JobLink::Shipment(id),
            &JobRoute::from(&job),
            &input.containers,
            Utc::now(),
        )
        .await?;
        txn.commit().await?;

        announce_allotment(&self.event_sender, JobLink::Shipment(id), id, &allotted).await;
        info!(shipment_id = id, allotted = allotted.len(), "Shipment updated");
        self.get_shipment(id).await
    }

    /// Deletes a shipment that no movement record refers to
    #[instrument(skip(self))]
    pub async fn delete_shipment(&self, id: i32) -> Result<(), ServiceError> {
        self.find(id).await?;
        ensure_unreferenced(&*self.db, JobLink::Shipment(id)).await?;

        shipment::Entity::delete_by_id(id).exec(&*self.db).await?;
        info!(shipment_id = id, "Shipment deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<shipment::Model, ServiceError> {
        shipment::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Shipment", id))
    }
}
