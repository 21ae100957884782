use crate::{
    entities::empty_repo_job,
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

/// Repositioning of empty containers between ports
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmptyRepoJobInput {
    pub date: NaiveDate,
    pub pol_port_id: Option<i32>,
    pub pod_port_id: Option<i32>,
    pub carrier_address_book_id: Option<i32>,
    pub empty_return_depot_address_book_id: Option<i32>,
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub containers: Vec<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmptyRepoJobInput {
    pub date: Option<NaiveDate>,
    pub pol_port_id: Option<i32>,
    pub pod_port_id: Option<i32>,
    pub carrier_address_book_id: Option<i32>,
    pub empty_return_depot_address_book_id: Option<i32>,
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub containers: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmptyRepoJobDetail {
    #[serde(flatten)]
    pub job: empty_repo_job::Model,
    pub containers: Vec<LinkedContainer>,
}

#[derive(Clone)]
pub struct EmptyRepoJobService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    codes: ReferenceCodeService,
}

impl EmptyRepoJobService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        let codes = ReferenceCodeService::new(db.clone(), event_sender.clone());
        Self {
            db,
            event_sender,
            codes,
        }
    }

    pub async fn next_job_number(&self) -> Result<String, ServiceError> {
        self.codes.preview::<empty_repo_job::Entity>().await
    }

    #[instrument(skip(self, input), fields(containers = input.containers.len()))]
    pub async fn create_job(
        &self,
        input: CreateEmptyRepoJobInput,
    ) -> Result<EmptyRepoJobDetail, ServiceError> {
        let (job, allotted) = self
            .codes
            .create_with_code::<empty_repo_job::Entity, _, _, _>(|job_number| {
                let input = input.clone();
                let db = self.db.clone();
                async move {
                    let txn = db.begin().await?;
                    let job = empty_repo_job::ActiveModel {
                        job_number: Set(job_number),
                        date: Set(input.date),
                        pol_port_id: Set(input.pol_port_id),
                        pod_port_id: Set(input.pod_port_id),
                        carrier_address_book_id: Set(input.carrier_address_book_id),
                        empty_return_depot_address_book_id: Set(
                            input.empty_return_depot_address_book_id,
                        ),
                        vessel_name: Set(input.vessel_name),
                        voyage_number: Set(input.voyage_number),
                        remarks: Set(input.remarks),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;

                    let allotted = allot_containers(
                        &txn,
                        JobLink::EmptyRepoJob(job.id),
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
                kind: JobKind::EmptyRepoJob,
                id: job.id,
                job_number: job.job_number.clone(),
            })
            .await;
        announce_allotment(
            &self.event_sender,
            JobLink::EmptyRepoJob(job.id),
            job.id,
            &allotted,
        )
        .await;

        info!(
            job_id = job.id,
            job_number = %job.job_number,
            allotted = allotted.len(),
            "Empty repo job created"
        );
        self.get_job(job.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_job(&self, id: i32) -> Result<EmptyRepoJobDetail, ServiceError> {
        let job = self.find(id).await?;
        let containers = linked_containers(&*self.db, JobLink::EmptyRepoJob(id)).await?;
        Ok(EmptyRepoJobDetail { job, containers })
    }

    #[instrument(skip(self))]
    pub async fn list_jobs(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<PaginatedResponse<empty_repo_job::Model>, ServiceError> {
        let mut query = empty_repo_job::Entity::find();
        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(empty_repo_job::Column::JobNumber.contains(term))
                    .add(empty_repo_job::Column::VesselName.contains(term)),
            );
        }

        let paginator = query
            .order_by_desc(empty_repo_job::Column::Date)
            .order_by_desc(empty_repo_job::Column::Id)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    #[instrument(skip(self, input))]
    pub async fn update_job(
        &self,
        id: i32,
        input: UpdateEmptyRepoJobInput,
    ) -> Result<EmptyRepoJobDetail, ServiceError> {
        let existing = self.find(id).await?;

        let txn = self.db.begin().await?;
        let mut active: empty_repo_job::ActiveModel = existing.into();

        if let Some(date) = input.date {
            active.date = Set(date);
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
        if let Some(v) = input.remarks {
            active.remarks = Set(Some(v));
        }
        let job = active.update(&txn).await?;

        let allotted = allot_containers(
            &txn,
            JobLink::EmptyRepoJob(id),
            &JobRoute::from(&job),
            &input.containers,
            Utc::now(),
        )
        .await?;
        txn.commit().await?;

        announce_allotment(&self.event_sender, JobLink::EmptyRepoJob(id), id, &allotted).await;
        info!(job_id = id, allotted = allotted.len(), "Empty repo job updated");
        self.get_job(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_job(&self, id: i32) -> Result<(), ServiceError> {
        self.find(id).await?;
        ensure_unreferenced(&*self.db, JobLink::EmptyRepoJob(id)).await?;

        empty_repo_job::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        info!(job_id = id, "Empty repo job deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<empty_repo_job::Model, ServiceError> {
        empty_repo_job::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Empty repo job", id))
    }
}
