use crate::{
    entities::inventory,
    errors::ServiceError,
    models::StatusBucket,
    services::movement_history::current_records,
};
use sea_orm::{DatabaseConnection, EntityTrait, QuerySelect};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

/// Container counts by current status bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSummary {
    pub total: u64,
    pub allotted: u64,
    pub available: u64,
    pub unavailable: u64,
    pub empty_returned: u64,
    /// Everything else, including statuses that do not parse
    pub in_transit: u64,
}

impl ContainerSummary {
    pub fn add(&mut self, bucket: StatusBucket) {
        self.total += 1;
        match bucket {
            StatusBucket::Allotted => self.allotted += 1,
            StatusBucket::Available => self.available += 1,
            StatusBucket::Unavailable => self.unavailable += 1,
            StatusBucket::EmptyReturned => self.empty_returned += 1,
            StatusBucket::InTransit => self.in_transit += 1,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    db: Arc<DatabaseConnection>,
}

impl DashboardService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn container_summary(&self) -> Result<ContainerSummary, ServiceError> {
        let container_ids: Vec<i32> = inventory::Entity::find()
            .select_only()
            .column(inventory::Column::Id)
            .into_tuple()
            .all(&*self.db)
            .await?;
        let current = current_records(&*self.db, None).await?;

        let mut summary = ContainerSummary::default();
        for id in container_ids {
            let bucket = match current.get(&id) {
                Some(row) => StatusBucket::of_raw(&row.status),
                None => StatusBucket::InTransit,
            };
            summary.add(bucket);
        }

        debug!(total = summary.total, "Container summary computed");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_counted_into_total() {
        let mut summary = ContainerSummary::default();
        for raw in ["ALLOTED", "AVAILABLE", "SOB", "GATE-IN", "EMPTY RETURNED", "scrapped"] {
            summary.add(StatusBucket::of_raw(raw));
        }

        assert_eq!(
            summary,
            ContainerSummary {
                total: 6,
                allotted: 1,
                available: 1,
                unavailable: 0,
                empty_returned: 1,
                in_transit: 3,
            }
        );
    }
}
