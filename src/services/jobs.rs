//! Container bookkeeping shared by shipments and empty repositioning jobs.

use crate::{
    entities::{inventory, movement_history},
    errors::ServiceError,
    events::{Event, EventSender},
    metrics::LOGISTICS_METRICS,
    models::ContainerStatus,
    services::movement_history::{
        append, current_records, resolve_placement, JobLink, JobRoute, NewMovement, Placement,
        PlacementOverrides,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// A container whose current ledger row points at a job
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkedContainer {
    /// Current ledger row; the id to select for a bulk update
    pub movement_id: i32,
    pub inventory_id: i32,
    pub container_number: String,
    pub status: String,
    pub date: DateTime<Utc>,
    pub port_id: Option<i32>,
    pub address_book_id: Option<i32>,
}

/// Appends an `ALLOTTED` row for each container. Every container must
/// currently be `AVAILABLE`.
pub async fn allot_containers<C: ConnectionTrait>(
    conn: &C,
    link: JobLink,
    route: &JobRoute,
    inventory_ids: &[i32],
    at: DateTime<Utc>,
) -> Result<Vec<movement_history::Model>, ServiceError> {
    let mut ids: Vec<i32> = Vec::with_capacity(inventory_ids.len());
    for id in inventory_ids {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let containers: HashMap<i32, String> = inventory::Entity::find()
        .filter(inventory::Column::Id.is_in(ids.clone()))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c.container_number))
        .collect();
    let current = current_records(conn, Some(&ids)).await?;

    let mut allotted = Vec::with_capacity(ids.len());
    for id in ids {
        let number = containers.get(&id).ok_or_else(|| {
            ServiceError::ValidationError(format!("container {id} does not exist"))
        })?;
        let row = current.get(&id).ok_or_else(|| {
            ServiceError::ValidationError(format!("container {number} has no movement history"))
        })?;
        if ContainerStatus::parse(&row.status) != Some(ContainerStatus::Available) {
            return Err(ServiceError::ValidationError(format!(
                "container {number} is not AVAILABLE (current status {})",
                row.status
            )));
        }

        let placement = resolve_placement(
            ContainerStatus::Allotted,
            Placement::of(row),
            Some(route),
            &PlacementOverrides::default(),
        )?;
        allotted.push(
            append(
                conn,
                NewMovement {
                    inventory_id: id,
                    status: ContainerStatus::Allotted,
                    date: at,
                    placement,
                    job: Some(link),
                    remarks: Some(format!("Allotted to {}", route.job_number)),
                },
            )
            .await?,
        );
    }

    Ok(allotted)
}

/// Publishes the events and counters for a committed allotment
pub async fn announce_allotment(
    event_sender: &EventSender,
    link: JobLink,
    job_id: i32,
    rows: &[movement_history::Model],
) {
    if rows.is_empty() {
        return;
    }
    LOGISTICS_METRICS.movements_recorded.inc_by(rows.len() as u64);
    for row in rows {
        event_sender
            .send_or_log(Event::MovementRecorded {
                movement_id: row.id,
                inventory_id: row.inventory_id,
                status: row.status.clone(),
            })
            .await;
    }
    event_sender
        .send_or_log(Event::ContainersAllotted {
            kind: link.kind(),
            job_id,
            containers: rows.len(),
        })
        .await;
}

/// Containers currently linked to the job, by container number
pub async fn linked_containers<C: ConnectionTrait>(
    conn: &C,
    link: JobLink,
) -> Result<Vec<LinkedContainer>, ServiceError> {
    let linked: Vec<movement_history::Model> = current_records(conn, None)
        .await?
        .into_values()
        .filter(|row| JobLink::of(row) == Some(link))
        .collect();
    if linked.is_empty() {
        return Ok(Vec::new());
    }

    let numbers: HashMap<i32, String> = inventory::Entity::find()
        .filter(inventory::Column::Id.is_in(linked.iter().map(|r| r.inventory_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c.container_number))
        .collect();

    let mut containers: Vec<LinkedContainer> = linked
        .into_iter()
        .map(|row| LinkedContainer {
            container_number: numbers.get(&row.inventory_id).cloned().unwrap_or_default(),
            movement_id: row.id,
            inventory_id: row.inventory_id,
            status: ContainerStatus::parse(&row.status)
                .map(|s| s.as_str().to_string())
                .unwrap_or(row.status),
            date: row.date,
            port_id: row.port_id,
            address_book_id: row.address_book_id,
        })
        .collect();
    containers.sort_by(|a, b| a.container_number.cmp(&b.container_number));
    Ok(containers)
}

/// A job referenced by any ledger row cannot be deleted
pub async fn ensure_unreferenced<C: ConnectionTrait>(
    conn: &C,
    link: JobLink,
) -> Result<(), ServiceError> {
    let column = match link {
        JobLink::Shipment(_) => movement_history::Column::ShipmentId,
        JobLink::EmptyRepoJob(_) => movement_history::Column::EmptyRepoJobId,
    };
    let id = match link {
        JobLink::Shipment(id) | JobLink::EmptyRepoJob(id) => id,
    };

    let references = movement_history::Entity::find()
        .filter(column.eq(id))
        .count(conn)
        .await?;
    if references > 0 {
        return Err(ServiceError::Conflict(format!(
            "job {id} is referenced by {references} movement record(s)"
        )));
    }
    Ok(())
}
