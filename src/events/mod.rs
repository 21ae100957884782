use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Which kind of job a container movement or allotment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    Shipment,
    EmptyRepoJob,
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Shipment => write!(f, "shipment"),
            JobKind::EmptyRepoJob => write!(f, "empty_repo_job"),
        }
    }
}

// Domain events emitted by the services after a successful commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ContainerRegistered {
        inventory_id: i32,
        container_number: String,
    },
    ContainerRemoved(i32),
    MovementRecorded {
        movement_id: i32,
        inventory_id: i32,
        status: String,
    },
    BulkStatusApplied {
        status: String,
        job_number: Option<String>,
        containers: usize,
    },
    JobCreated {
        kind: JobKind,
        id: i32,
        job_number: String,
    },
    ContainersAllotted {
        kind: JobKind,
        job_id: i32,
        containers: usize,
    },
    ProductCreated {
        id: i32,
        product_code: String,
    },
    AddressBookCreated {
        id: i32,
        ref_id: String,
    },
    TariffCreated {
        tariff_type: String,
        tariff_code: String,
    },
    ReferenceCodeFallback {
        prefix: String,
    },
    Generic {
        message: String,
        timestamp: DateTime<Utc>,
        metadata: serde_json::Value,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the processor is gone.
    /// Events are emitted after commit so a dropped event never undoes a write.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!(error = %e, "Domain event dropped");
        }
    }
}

/// Drains the event channel, logging each event. Runs until every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::ContainerRegistered {
                inventory_id,
                container_number,
            } => {
                info!(inventory_id, container_number = %container_number, "Container registered");
            }
            Event::ContainerRemoved(inventory_id) => {
                info!(inventory_id, "Container removed");
            }
            Event::MovementRecorded {
                movement_id,
                inventory_id,
                status,
            } => {
                debug!(movement_id, inventory_id, status = %status, "Movement recorded");
            }
            Event::BulkStatusApplied {
                status,
                job_number,
                containers,
            } => {
                info!(
                    status = %status,
                    job_number = job_number.as_deref().unwrap_or("-"),
                    containers,
                    "Bulk status update applied"
                );
            }
            Event::JobCreated {
                kind,
                id,
                job_number,
            } => {
                info!(kind = %kind, id, job_number = %job_number, "Job created");
            }
            Event::ContainersAllotted {
                kind,
                job_id,
                containers,
            } => {
                info!(kind = %kind, job_id, containers, "Containers allotted to job");
            }
            Event::ProductCreated { id, product_code } => {
                info!(id, product_code = %product_code, "Product created");
            }
            Event::AddressBookCreated { id, ref_id } => {
                info!(id, ref_id = %ref_id, "Address book entry created");
            }
            Event::TariffCreated {
                tariff_type,
                tariff_code,
            } => {
                info!(tariff_type = %tariff_type, tariff_code = %tariff_code, "Tariff created");
            }
            Event::ReferenceCodeFallback { prefix } => {
                warn!(prefix = %prefix, "Record created with placeholder reference code");
            }
            Event::Generic { message, .. } => {
                info!(message = %message, "Generic event");
            }
        }
    }

    info!("Event processing loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sender_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender
            .send(Event::ContainerRemoved(7))
            .await
            .expect("channel open");

        match rx.recv().await {
            Some(Event::ContainerRemoved(id)) => assert_eq!(id, 7),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_or_log_tolerates_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        assert!(sender.send(Event::ContainerRemoved(1)).await.is_err());
        sender.send_or_log(Event::ContainerRemoved(1)).await;
    }

    #[tokio::test]
    async fn processor_exits_when_senders_drop() {
        let (tx, rx) = mpsc::channel(4);
        let handle = tokio::spawn(process_events(rx));

        let sender = EventSender::new(tx);
        sender
            .send_or_log(Event::JobCreated {
                kind: JobKind::Shipment,
                id: 1,
                job_number: "RST/SHP/00001".into(),
            })
            .await;
        drop(sender);

        handle.await.expect("processor task finished cleanly");
    }
}
