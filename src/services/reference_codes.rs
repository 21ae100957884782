use crate::{
    entities::{
        address_book, container_lease_tariff, depot_avg_tariff, depot_cleaning_tariff,
        empty_repo_job, handling_agent_tariff, land_transport_tariff, product, shipment,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    metrics::LOGISTICS_METRICS,
    models::{reference_code, CodeSeries},
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Creates are retried this many times when the allocated code collides
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 5;

/// An entity whose rows carry a generated code from one series
pub trait CodedEntity: EntityTrait {
    const SERIES: CodeSeries;

    fn code_column() -> Self::Column;
}

macro_rules! coded_entity {
    ($module:ident, $series:expr, $column:ident) => {
        impl CodedEntity for $module::Entity {
            const SERIES: CodeSeries = $series;

            fn code_column() -> Self::Column {
                $module::Column::$column
            }
        }
    };
}

coded_entity!(product, CodeSeries::Product, ProductCode);
coded_entity!(address_book, CodeSeries::AddressBook, RefId);
coded_entity!(shipment, CodeSeries::Shipment, JobNumber);
coded_entity!(empty_repo_job, CodeSeries::EmptyRepoJob, JobNumber);
coded_entity!(container_lease_tariff, CodeSeries::ContainerLeaseTariff, TariffCode);
coded_entity!(depot_avg_tariff, CodeSeries::DepotAvgTariff, TariffCode);
coded_entity!(handling_agent_tariff, CodeSeries::HandlingAgentTariff, TariffCode);
coded_entity!(land_transport_tariff, CodeSeries::LandTransportTariff, TariffCode);
coded_entity!(depot_cleaning_tariff, CodeSeries::DepotCleaningTariff, TariffCode);

/// Reads the codes issued under the entity's prefix and returns the next one
pub async fn next_code_for<E, C>(conn: &C) -> Result<String, DbErr>
where
    E: CodedEntity,
    C: ConnectionTrait,
{
    let prefix = E::SERIES.prefix();
    let issued: Vec<String> = E::find()
        .select_only()
        .column(E::code_column())
        .filter(E::code_column().starts_with(prefix))
        .into_tuple()
        .all(conn)
        .await?;

    Ok(reference_code::next_code(
        prefix,
        issued.iter().map(String::as_str),
    ))
}

/// Allocates sequential codes and drives creates that depend on them
#[derive(Clone)]
pub struct ReferenceCodeService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl ReferenceCodeService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Next code for display; nothing is reserved
    #[instrument(skip(self), fields(series = %E::SERIES))]
    pub async fn preview<E: CodedEntity>(&self) -> Result<String, ServiceError> {
        Ok(next_code_for::<E, _>(&*self.db).await?)
    }

    /// Code to use for the next insert. A failed lookup degrades to a
    /// uniquely tagged series placeholder instead of failing the create.
    async fn allocate<E: CodedEntity>(&self) -> String {
        match next_code_for::<E, _>(&*self.db).await {
            Ok(code) => code,
            Err(e) => {
                warn!(
                    series = %E::SERIES,
                    error = %e,
                    "Reference code lookup failed, using placeholder"
                );
                LOGISTICS_METRICS.code_allocation_fallbacks.inc();
                self.event_sender
                    .send_or_log(Event::ReferenceCodeFallback {
                        prefix: E::SERIES.prefix().to_string(),
                    })
                    .await;
                let token = Uuid::new_v4().simple().to_string();
                E::SERIES.fallback_code(&token[..8])
            }
        }
    }

    /// Runs `insert` with a freshly allocated code, retrying with a new code
    /// when the insert hits a uniqueness conflict.
    pub async fn create_with_code<E, T, F, Fut>(&self, mut insert: F) -> Result<T, ServiceError>
    where
        E: CodedEntity,
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let mut attempt = 1;
        loop {
            let code = self.allocate::<E>().await;
            debug!(series = %E::SERIES, code = %code, attempt, "Allocated reference code");

            match insert(code.clone()).await {
                Err(ServiceError::Conflict(reason)) if attempt < MAX_ALLOCATION_ATTEMPTS => {
                    LOGISTICS_METRICS.code_allocation_retries.inc();
                    warn!(
                        series = %E::SERIES,
                        code = %code,
                        attempt,
                        reason = %reason,
                        "Reference code collided, retrying"
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{establish_connection_with_config, run_migrations, DbConfig};
    use assert_matches::assert_matches;
    use tokio::sync::mpsc;

    async fn service(migrated: bool) -> (ReferenceCodeService, mpsc::Receiver<Event>) {
        let db = establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        })
        .await
        .expect("in-memory sqlite");
        if migrated {
            run_migrations(&db).await.expect("migrations apply");
        }
        let (tx, rx) = mpsc::channel(16);
        let codes = ReferenceCodeService::new(Arc::new(db), Arc::new(EventSender::new(tx)));
        (codes, rx)
    }

    #[tokio::test]
    async fn conflicts_are_retried_until_the_attempt_limit() {
        let (codes, _rx) = service(true).await;
        let mut attempts = 0;

        let result = codes
            .create_with_code::<product::Entity, (), _, _>(|code| {
                attempts += 1;
                async move { Err(ServiceError::Conflict(format!("{code} already issued"))) }
            })
            .await;

        assert_matches!(result, Err(ServiceError::Conflict(_)));
        assert_eq!(attempts, MAX_ALLOCATION_ATTEMPTS);
    }

    #[tokio::test]
    async fn a_later_attempt_can_succeed() {
        let (codes, _rx) = service(true).await;
        let mut attempts = 0;

        let result = codes
            .create_with_code::<product::Entity, String, _, _>(|code| {
                attempts += 1;
                let collided = attempts < 3;
                async move {
                    if collided {
                        Err(ServiceError::Conflict("taken".to_string()))
                    } else {
                        Ok(code)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "RST/PRD/00001");
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let (codes, _rx) = service(true).await;
        let mut attempts = 0;

        let result = codes
            .create_with_code::<product::Entity, (), _, _>(|_| {
                attempts += 1;
                async { Err(ServiceError::ValidationError("bad input".to_string())) }
            })
            .await;

        assert_matches!(result, Err(ServiceError::ValidationError(_)));
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn failed_lookup_falls_back_to_a_tagged_placeholder() {
        // No migrations, so the products table is missing and the lookup fails
        let (codes, mut rx) = service(false).await;

        let first = codes
            .create_with_code::<product::Entity, String, _, _>(|code| async move { Ok(code) })
            .await
            .unwrap();
        let second = codes
            .create_with_code::<product::Entity, String, _, _>(|code| async move { Ok(code) })
            .await
            .unwrap();

        let placeholder = CodeSeries::Product.placeholder();
        assert!(first.starts_with(&format!("{placeholder}-")), "{first}");
        assert!(second.starts_with(&format!("{placeholder}-")), "{second}");
        assert_ne!(first, second);
        assert!(first.len() <= 32);

        assert_matches!(
            rx.try_recv(),
            Ok(Event::ReferenceCodeFallback { prefix }) if prefix == "RST/PRD/"
        );
    }

    #[tokio::test]
    async fn preview_surfaces_lookup_errors() {
        let (codes, _rx) = service(false).await;
        assert_matches!(
            codes.preview::<product::Entity>().await,
            Err(ServiceError::DatabaseError(_))
        );
    }
}
