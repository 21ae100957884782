use crate::{
    entities::{empty_repo_job, inventory, movement_history, shipment},
    errors::ServiceError,
    events::{Event, EventSender, JobKind},
    metrics::LOGISTICS_METRICS,
    models::ContainerStatus,
    tracing::with_metrics,
    PaginatedResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Job a ledger row is linked to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobLink {
    Shipment(i32),
    EmptyRepoJob(i32),
}

impl JobLink {
    pub fn of(record: &movement_history::Model) -> Option<JobLink> {
        match (record.shipment_id, record.empty_repo_job_id) {
            (Some(id), _) => Some(JobLink::Shipment(id)),
            (None, Some(id)) => Some(JobLink::EmptyRepoJob(id)),
            (None, None) => None,
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            JobLink::Shipment(_) => JobKind::Shipment,
            JobLink::EmptyRepoJob(_) => JobKind::EmptyRepoJob,
        }
    }

    /// `(shipment_id, empty_repo_job_id)` for a row linked to `link`
    fn columns(link: Option<JobLink>) -> (Option<i32>, Option<i32>) {
        match link {
            Some(JobLink::Shipment(id)) => (Some(id), None),
            Some(JobLink::EmptyRepoJob(id)) => (None, Some(id)),
            None => (None, None),
        }
    }
}

/// The parts of a job that drive status side effects
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobRoute {
    pub job_number: String,
    pub pol_port_id: Option<i32>,
    pub pod_port_id: Option<i32>,
    pub carrier_address_book_id: Option<i32>,
    pub empty_return_depot_address_book_id: Option<i32>,
}

impl From<&shipment::Model> for JobRoute {
    fn from(job: &shipment::Model) -> Self {
        Self {
            job_number: job.job_number.clone(),
            pol_port_id: job.pol_port_id,
            pod_port_id: job.pod_port_id,
            carrier_address_book_id: job.carrier_address_book_id,
            empty_return_depot_address_book_id: job.empty_return_depot_address_book_id,
        }
    }
}

impl From<&empty_repo_job::Model> for JobRoute {
    fn from(job: &empty_repo_job::Model) -> Self {
        Self {
            job_number: job.job_number.clone(),
            pol_port_id: job.pol_port_id,
            pod_port_id: job.pod_port_id,
            carrier_address_book_id: job.carrier_address_book_id,
            empty_return_depot_address_book_id: job.empty_return_depot_address_book_id,
        }
    }
}

/// Port and counterparty of a container at one point in its history
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    pub port_id: Option<i32>,
    pub address_book_id: Option<i32>,
}

impl Placement {
    pub fn of(record: &movement_history::Model) -> Self {
        Self {
            port_id: record.port_id,
            address_book_id: record.address_book_id,
        }
    }
}

/// Caller-supplied placement for `EMPTY PICKED UP`
#[derive(Clone, Copy, Debug, Default)]
pub struct PlacementOverrides {
    pub port_id: Option<i32>,
    /// `Some(None)` clears the counterparty
    pub address_book_id: Option<Option<i32>>,
}

/// Statuses whose placement comes from the linked job
pub fn requires_job(target: ContainerStatus) -> bool {
    matches!(
        target,
        ContainerStatus::Allotted
            | ContainerStatus::GateIn
            | ContainerStatus::Sob
            | ContainerStatus::GateOut
            | ContainerStatus::EmptyReturned
    )
}

/// Where a container moving into `target` ends up.
pub fn resolve_placement(
    target: ContainerStatus,
    previous: Placement,
    route: Option<&JobRoute>,
    overrides: &PlacementOverrides,
) -> Result<Placement, ServiceError> {
    let job_route = || {
        route.ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "status {target} requires the containers to be linked to a job"
            ))
        })
    };

    let placement = match target {
        ContainerStatus::EmptyPickedUp => Placement {
            port_id: overrides.port_id.or(previous.port_id),
            address_book_id: overrides
                .address_book_id
                .unwrap_or(previous.address_book_id),
        },
        ContainerStatus::Available | ContainerStatus::Unavailable => previous,
        ContainerStatus::Allotted => Placement {
            port_id: job_route()?.pol_port_id,
            address_book_id: None,
        },
        ContainerStatus::GateIn => Placement {
            port_id: job_route()?.pol_port_id,
            address_book_id: None,
        },
        ContainerStatus::Sob => {
            let route = job_route()?;
            Placement {
                port_id: route.pod_port_id.or(route.pol_port_id),
                address_book_id: route.carrier_address_book_id,
            }
        }
        ContainerStatus::GateOut => Placement {
            port_id: job_route()?.pod_port_id,
            address_book_id: None,
        },
        ContainerStatus::EmptyReturned => {
            let route = job_route()?;
            Placement {
                port_id: route.pod_port_id,
                address_book_id: route.empty_return_depot_address_book_id,
            }
        }
    };

    Ok(placement)
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
pub fn parse_event_date(raw: &str) -> Result<DateTime<Utc>, ServiceError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ServiceError::ValidationError(format!("invalid date '{raw}'")))
}

/// Date stored for a move recorded at `at` on top of a row dated `current`.
///
/// A move on an earlier day than the current row is refused with `None`.
/// Within the same day the move lands no earlier than the current row, so a
/// plain `YYYY-MM-DD` date still becomes the container's current record.
pub fn effective_date(at: DateTime<Utc>, current: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if at.date_naive() < current.date_naive() {
        None
    } else {
        Some(at.max(current))
    }
}

/// A row about to be appended to the ledger
#[derive(Clone, Debug)]
pub struct NewMovement {
    pub inventory_id: i32,
    pub status: ContainerStatus,
    pub date: DateTime<Utc>,
    pub placement: Placement,
    pub job: Option<JobLink>,
    pub remarks: Option<String>,
}

/// Appends one row. The ledger is insert-only.
pub async fn append<C: ConnectionTrait>(
    conn: &C,
    movement: NewMovement,
) -> Result<movement_history::Model, ServiceError> {
    let (shipment_id, empty_repo_job_id) = JobLink::columns(movement.job);
    let row = movement_history::ActiveModel {
        inventory_id: Set(movement.inventory_id),
        status: Set(movement.status.as_str().to_string()),
        date: Set(movement.date),
        port_id: Set(movement.placement.port_id),
        address_book_id: Set(movement.placement.address_book_id),
        shipment_id: Set(shipment_id),
        empty_repo_job_id: Set(empty_repo_job_id),
        remarks: Set(movement.remarks),
        ..Default::default()
    };
    Ok(row.insert(conn).await?)
}

/// The current row of a container: latest date, then latest id
pub async fn current_record<C: ConnectionTrait>(
    conn: &C,
    inventory_id: i32,
) -> Result<Option<movement_history::Model>, ServiceError> {
    Ok(movement_history::Entity::find()
        .filter(movement_history::Column::InventoryId.eq(inventory_id))
        .order_by_desc(movement_history::Column::Date)
        .order_by_desc(movement_history::Column::Id)
        .one(conn)
        .await?)
}

/// Current rows keyed by container, for the given containers or all of them
pub async fn current_records<C: ConnectionTrait>(
    conn: &C,
    inventory_ids: Option<&[i32]>,
) -> Result<HashMap<i32, movement_history::Model>, ServiceError> {
    let mut query = movement_history::Entity::find();
    if let Some(ids) = inventory_ids {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        query = query.filter(movement_history::Column::InventoryId.is_in(ids.to_vec()));
    }

    let rows = query
        .order_by_asc(movement_history::Column::InventoryId)
        .order_by_desc(movement_history::Column::Date)
        .order_by_desc(movement_history::Column::Id)
        .all(conn)
        .await?;

    let mut current = HashMap::new();
    for row in rows {
        current.entry(row.inventory_id).or_insert(row);
    }
    Ok(current)
}

pub async fn load_route<C: ConnectionTrait>(
    conn: &C,
    link: JobLink,
) -> Result<JobRoute, ServiceError> {
    match link {
        JobLink::Shipment(id) => shipment::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(|job| JobRoute::from(&job))
            .ok_or_else(|| ServiceError::not_found("Shipment", id)),
        JobLink::EmptyRepoJob(id) => empty_repo_job::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(|job| JobRoute::from(&job))
            .ok_or_else(|| ServiceError::not_found("Empty repo job", id)),
    }
}

/// Absent stays `None`, an explicit `null` becomes `Some(None)`
fn deserialize_explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Bulk status change across selected ledger rows
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusUpdateRequest {
    /// Ledger row ids; each resolves to its container
    #[validate(length(min = 1, message = "select at least one container"))]
    pub ids: Vec<i32>,
    #[schema(example = "GATE-IN")]
    pub new_status: String,
    /// Job the selection belongs to; empty for containers without one
    #[schema(example = "RST/SHP/00001")]
    pub job_number: String,
    /// RFC 3339 or `YYYY-MM-DD`
    #[schema(example = "2025-03-01")]
    pub date: String,
    #[serde(default)]
    pub remarks: Option<String>,
    /// `EMPTY PICKED UP` only
    #[serde(default)]
    pub port_id: Option<i32>,
    /// `EMPTY PICKED UP` only; `null` clears the counterparty
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    #[schema(value_type = Option<i32>)]
    pub address_book_id: Option<Option<i32>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MovementFilter {
    /// Substring of the container number
    pub container_number: Option<String>,
    pub job_number: Option<String>,
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// A ledger row with its container and job numbers resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementHistoryView {
    #[serde(flatten)]
    pub record: movement_history::Model,
    pub container_number: Option<String>,
    pub job_number: Option<String>,
}

#[derive(Clone)]
pub struct MovementHistoryService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl MovementHistoryService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Ledger rows, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &MovementFilter,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<MovementHistoryView>, ServiceError> {
        let Some(condition) = self.filter_condition(filter).await? else {
            return Ok(PaginatedResponse::new(Vec::new(), 0, page, limit));
        };

        let paginator = movement_history::Entity::find()
            .filter(condition)
            .order_by_desc(movement_history::Column::Date)
            .order_by_desc(movement_history::Column::Id)
            .paginate(&*self.db, limit);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        let items = self.decorate(rows).await?;

        Ok(PaginatedResponse::new(items, total, page, limit))
    }

    /// The current row of every container matching the filter
    #[instrument(skip(self))]
    pub async fn latest(
        &self,
        filter: &MovementFilter,
    ) -> Result<Vec<MovementHistoryView>, ServiceError> {
        let container_ids = match filter.container_number.as_deref() {
            Some(number) if !number.trim().is_empty() => {
                Some(self.matching_container_ids(number).await?)
            }
            _ => None,
        };

        let current = current_records(&*self.db, container_ids.as_deref()).await?;

        let status = parse_status_filter(filter.status.as_deref())?;
        let job = match filter.job_number.as_deref() {
            Some(number) if !number.trim().is_empty() => Some(self.jobs_by_number(number).await?),
            _ => None,
        };

        let mut rows: Vec<movement_history::Model> = current
            .into_values()
            .filter(|row| {
                status.map_or(true, |s| ContainerStatus::parse(&row.status) == Some(s))
            })
            .filter(|row| {
                job.as_ref()
                    .map_or(true, |links| JobLink::of(row).is_some_and(|l| links.contains(&l)))
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        self.decorate(rows).await
    }

    /// Full history of one container, newest first
    #[instrument(skip(self))]
    pub async fn for_container(
        &self,
        inventory_id: i32,
    ) -> Result<Vec<MovementHistoryView>, ServiceError> {
        if inventory::Entity::find_by_id(inventory_id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Inventory", inventory_id));
        }

        let rows = movement_history::Entity::find()
            .filter(movement_history::Column::InventoryId.eq(inventory_id))
            .order_by_desc(movement_history::Column::Date)
            .order_by_desc(movement_history::Column::Id)
            .all(&*self.db)
            .await?;

        self.decorate(rows).await
    }

    /// Moves every selected container to `new_status` in one transaction.
    ///
    /// The selection must share one job and one current status, and the
    /// target must be reachable from that status. Nothing is written when
    /// any check fails.
    #[instrument(skip(self, request), fields(new_status = %request.new_status, selected = request.ids.len()))]
    pub async fn apply_bulk_status_update(
        &self,
        request: BulkStatusUpdateRequest,
    ) -> Result<Vec<movement_history::Model>, ServiceError> {
        match with_metrics("movement_history.bulk_update", || self.apply_bulk(&request)).await {
            Ok((inserted, job_number)) => {
                LOGISTICS_METRICS
                    .movements_recorded
                    .inc_by(inserted.len() as u64);
                for row in &inserted {
                    self.event_sender
                        .send_or_log(Event::MovementRecorded {
                            movement_id: row.id,
                            inventory_id: row.inventory_id,
                            status: row.status.clone(),
                        })
                        .await;
                }
                self.event_sender
                    .send_or_log(Event::BulkStatusApplied {
                        status: request.new_status.trim().to_string(),
                        job_number,
                        containers: inserted.len(),
                    })
                    .await;
                info!(containers = inserted.len(), "Bulk status update applied");
                Ok(inserted)
            }
            Err(e) => {
                LOGISTICS_METRICS.bulk_updates_rejected.inc();
                warn!(error = %e, "Bulk status update rejected");
                Err(e)
            }
        }
    }

    async fn apply_bulk(
        &self,
        request: &BulkStatusUpdateRequest,
    ) -> Result<(Vec<movement_history::Model>, Option<String>), ServiceError> {
        request.validate()?;
        let target = ContainerStatus::parse(&request.new_status).ok_or_else(|| {
            ServiceError::ValidationError(format!("unknown status '{}'", request.new_status))
        })?;
        let at = parse_event_date(&request.date)?;

        let txn = self.db.begin().await?;

        let row_ids: Vec<i32> = request
            .ids
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let selected = movement_history::Entity::find()
            .filter(movement_history::Column::Id.is_in(row_ids))
            .all(&txn)
            .await?;

        // One container per selection, in selection order
        let mut containers: Vec<i32> = Vec::new();
        for id in &request.ids {
            let row = selected
                .iter()
                .find(|row| row.id == *id)
                .ok_or_else(|| ServiceError::not_found("Movement history record", *id))?;
            if !containers.contains(&row.inventory_id) {
                containers.push(row.inventory_id);
            }
        }

        let mut current = current_records(&txn, Some(&containers)).await?;
        let mut currents = Vec::with_capacity(containers.len());
        for inventory_id in &containers {
            let row = current.remove(inventory_id).ok_or_else(|| {
                ServiceError::InternalError(format!("container {inventory_id} has no ledger rows"))
            })?;
            currents.push(row);
        }

        let link = JobLink::of(&currents[0]);
        if currents.iter().any(|row| JobLink::of(row) != link) {
            return Err(ServiceError::ValidationError(
                "containers must share job number".to_string(),
            ));
        }

        let expected_job = Some(request.job_number.trim()).filter(|number| !number.is_empty());
        let route = match link {
            Some(link) if expected_job.is_some() || requires_job(target) => {
                Some(load_route(&txn, link).await?)
            }
            _ => None,
        };
        if let Some(expected) = expected_job {
            if route.as_ref().map(|r| r.job_number.as_str()) != Some(expected) {
                return Err(ServiceError::ValidationError(
                    "containers must share job number".to_string(),
                ));
            }
        }

        let mut from: Option<ContainerStatus> = None;
        for row in &currents {
            let status = ContainerStatus::parse(&row.status).ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "container {} has unrecognised status '{}'",
                    row.inventory_id, row.status
                ))
            })?;
            match from {
                Some(shared) if shared != status => {
                    return Err(ServiceError::ValidationError(
                        "containers must share current status".to_string(),
                    ))
                }
                _ => from = Some(status),
            }
        }
        let from = from.ok_or_else(|| {
            ServiceError::ValidationError("select at least one container".to_string())
        })?;

        if !from.can_transition_to(target) {
            return Err(ServiceError::ValidationError(format!(
                "invalid transition from {from} to {target}"
            )));
        }

        let mut dates = Vec::with_capacity(currents.len());
        for row in &currents {
            let date = effective_date(at, row.date).ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "date {} is before the current record of container {}",
                    at.date_naive(),
                    row.inventory_id
                ))
            })?;
            dates.push(date);
        }

        let overrides = PlacementOverrides {
            port_id: request.port_id,
            address_book_id: request.address_book_id,
        };
        let job = if target.is_idle() { None } else { link };

        let mut inserted = Vec::with_capacity(currents.len());
        for (row, date) in currents.iter().zip(dates) {
            let placement = resolve_placement(target, Placement::of(row), route.as_ref(), &overrides)?;
            inserted.push(
                append(
                    &txn,
                    NewMovement {
                        inventory_id: row.inventory_id,
                        status: target,
                        date,
                        placement,
                        job,
                        remarks: request.remarks.clone(),
                    },
                )
                .await?,
            );
        }

        txn.commit().await?;
        Ok((inserted, route.map(|r| r.job_number)))
    }

    /// Translates the filter into a condition; `None` when nothing can match
    async fn filter_condition(
        &self,
        filter: &MovementFilter,
    ) -> Result<Option<Condition>, ServiceError> {
        let mut condition = Condition::all();

        if let Some(number) = filter.container_number.as_deref() {
            if !number.trim().is_empty() {
                let ids = self.matching_container_ids(number).await?;
                if ids.is_empty() {
                    return Ok(None);
                }
                condition = condition.add(movement_history::Column::InventoryId.is_in(ids));
            }
        }

        if let Some(number) = filter.job_number.as_deref() {
            if !number.trim().is_empty() {
                let links = self.jobs_by_number(number).await?;
                if links.is_empty() {
                    return Ok(None);
                }
                let mut any = Condition::any();
                for link in links {
                    any = match link {
                        JobLink::Shipment(id) => {
                            any.add(movement_history::Column::ShipmentId.eq(id))
                        }
                        JobLink::EmptyRepoJob(id) => {
                            any.add(movement_history::Column::EmptyRepoJobId.eq(id))
                        }
                    };
                }
                condition = condition.add(any);
            }
        }

        if let Some(status) = parse_status_filter(filter.status.as_deref())? {
            let mut spellings = vec![status.as_str().to_string()];
            if status == ContainerStatus::Allotted {
                spellings.push("ALLOTED".to_string());
            }
            condition = condition.add(movement_history::Column::Status.is_in(spellings));
        }

        Ok(Some(condition))
    }

    async fn matching_container_ids(&self, number: &str) -> Result<Vec<i32>, ServiceError> {
        Ok(inventory::Entity::find()
            .filter(inventory::Column::ContainerNumber.contains(number.trim()))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|container| container.id)
            .collect())
    }

    async fn jobs_by_number(&self, number: &str) -> Result<Vec<JobLink>, ServiceError> {
        let number = number.trim();
        let mut links: Vec<JobLink> = shipment::Entity::find()
            .filter(shipment::Column::JobNumber.eq(number))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|job| JobLink::Shipment(job.id))
            .collect();
        links.extend(
            empty_repo_job::Entity::find()
                .filter(empty_repo_job::Column::JobNumber.eq(number))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|job| JobLink::EmptyRepoJob(job.id)),
        );
        Ok(links)
    }

    /// Resolves container and job numbers for a batch of rows
    async fn decorate(
        &self,
        rows: Vec<movement_history::Model>,
    ) -> Result<Vec<MovementHistoryView>, ServiceError> {
        let inventory_ids: Vec<i32> = rows.iter().map(|r| r.inventory_id).collect();
        let shipment_ids: Vec<i32> = rows.iter().filter_map(|r| r.shipment_id).collect();
        let job_ids: Vec<i32> = rows.iter().filter_map(|r| r.empty_repo_job_id).collect();

        let containers: HashMap<i32, String> = inventory::Entity::find()
            .filter(inventory::Column::Id.is_in(inventory_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.container_number))
            .collect();
        let shipments: HashMap<i32, String> = if shipment_ids.is_empty() {
            HashMap::new()
        } else {
            shipment::Entity::find()
                .filter(shipment::Column::Id.is_in(shipment_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|j| (j.id, j.job_number))
                .collect()
        };
        let repo_jobs: HashMap<i32, String> = if job_ids.is_empty() {
            HashMap::new()
        } else {
            empty_repo_job::Entity::find()
                .filter(empty_repo_job::Column::Id.is_in(job_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|j| (j.id, j.job_number))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|record| {
                let job_number = match JobLink::of(&record) {
                    Some(JobLink::Shipment(id)) => shipments.get(&id).cloned(),
                    Some(JobLink::EmptyRepoJob(id)) => repo_jobs.get(&id).cloned(),
                    None => None,
                };
                MovementHistoryView {
                    container_number: containers.get(&record.inventory_id).cloned(),
                    job_number,
                    record,
                }
            })
            .collect())
    }
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<ContainerStatus>, ServiceError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => ContainerStatus::parse(raw)
            .map(Some)
            .ok_or_else(|| ServiceError::ValidationError(format!("unknown status '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn route() -> JobRoute {
        JobRoute {
            job_number: "RST/SHP/00001".into(),
            pol_port_id: Some(3),
            pod_port_id: Some(7),
            carrier_address_book_id: Some(42),
            empty_return_depot_address_book_id: Some(55),
        }
    }

    fn at(port: i32, counterparty: Option<i32>) -> Placement {
        Placement {
            port_id: Some(port),
            address_book_id: counterparty,
        }
    }

    #[test]
    fn empty_pick_up_carries_placement_over() {
        let placed = resolve_placement(
            ContainerStatus::EmptyPickedUp,
            at(9, Some(11)),
            None,
            &PlacementOverrides::default(),
        )
        .unwrap();
        assert_eq!(placed, at(9, Some(11)));
    }

    #[test]
    fn empty_pick_up_honours_overrides() {
        let overrides = PlacementOverrides {
            port_id: Some(4),
            address_book_id: Some(None),
        };
        let placed =
            resolve_placement(ContainerStatus::EmptyPickedUp, at(9, Some(11)), None, &overrides)
                .unwrap();
        assert_eq!(
            placed,
            Placement {
                port_id: Some(4),
                address_book_id: None
            }
        );
    }

    #[test]
    fn job_statuses_follow_the_route() {
        let route = route();
        let none = PlacementOverrides::default();
        let prev = at(1, Some(2));

        assert_eq!(
            resolve_placement(ContainerStatus::GateIn, prev, Some(&route), &none).unwrap(),
            at(3, None)
        );
        assert_eq!(
            resolve_placement(ContainerStatus::Sob, prev, Some(&route), &none).unwrap(),
            at(7, Some(42))
        );
        assert_eq!(
            resolve_placement(ContainerStatus::GateOut, prev, Some(&route), &none).unwrap(),
            at(7, None)
        );
        assert_eq!(
            resolve_placement(ContainerStatus::EmptyReturned, prev, Some(&route), &none).unwrap(),
            at(7, Some(55))
        );
    }

    #[test]
    fn sob_falls_back_to_origin_port() {
        let route = JobRoute {
            pod_port_id: None,
            ..route()
        };
        let placed = resolve_placement(
            ContainerStatus::Sob,
            at(1, None),
            Some(&route),
            &PlacementOverrides::default(),
        )
        .unwrap();
        assert_eq!(placed, at(3, Some(42)));
    }

    #[test]
    fn idle_statuses_keep_previous_placement() {
        for target in [ContainerStatus::Available, ContainerStatus::Unavailable] {
            let placed = resolve_placement(
                target,
                at(7, Some(55)),
                None,
                &PlacementOverrides {
                    port_id: Some(1),
                    address_book_id: Some(None),
                },
            )
            .unwrap();
            assert_eq!(placed, at(7, Some(55)));
        }
    }

    #[test]
    fn job_statuses_need_a_job() {
        let result = resolve_placement(
            ContainerStatus::GateIn,
            at(1, None),
            None,
            &PlacementOverrides::default(),
        );
        assert_matches!(result, Err(ServiceError::ValidationError(_)));
    }

    #[test]
    fn event_dates_accept_both_forms() {
        let date = parse_event_date("2025-03-01").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-03-01T00:00:00+00:00");

        let ts = parse_event_date("2025-03-01T10:15:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T08:15:00+00:00");

        assert_matches!(parse_event_date("01/03/2025"), Err(ServiceError::ValidationError(_)));
    }

    #[test]
    fn bulk_request_distinguishes_null_counterparty() {
        let absent: BulkStatusUpdateRequest = serde_json::from_value(serde_json::json!({
            "ids": [1], "newStatus": "EMPTY PICKED UP", "jobNumber": "", "date": "2025-03-01"
        }))
        .unwrap();
        assert_eq!(absent.address_book_id, None);

        let cleared: BulkStatusUpdateRequest = serde_json::from_value(serde_json::json!({
            "ids": [1], "newStatus": "EMPTY PICKED UP", "jobNumber": "", "date": "2025-03-01",
            "addressBookId": null
        }))
        .unwrap();
        assert_eq!(cleared.address_book_id, Some(None));
    }

    #[test]
    fn bulk_request_requires_job_number() {
        let missing = serde_json::from_value::<BulkStatusUpdateRequest>(serde_json::json!({
            "ids": [1], "newStatus": "UNAVAILABLE", "date": "2025-03-01"
        }));
        assert!(missing.is_err());
    }

    #[test]
    fn same_day_dates_land_on_or_after_the_current_row() {
        let current = parse_event_date("2025-03-01T10:00:00Z").unwrap();

        let plain = parse_event_date("2025-03-01").unwrap();
        assert_eq!(effective_date(plain, current), Some(current));

        let later = parse_event_date("2025-03-01T11:30:00Z").unwrap();
        assert_eq!(effective_date(later, current), Some(later));

        let next_day = parse_event_date("2025-03-02").unwrap();
        assert_eq!(effective_date(next_day, current), Some(next_day));
    }

    #[test]
    fn earlier_days_are_refused() {
        let current = parse_event_date("2025-03-01T10:00:00Z").unwrap();
        let before = parse_event_date("2025-02-28T23:59:00Z").unwrap();
        assert_eq!(effective_date(before, current), None);
    }
}
