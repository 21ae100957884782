#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{json, Value};
use rst_logistics_api::{
    config::AppConfig,
    db,
    entities::movement_history,
    events::{self, EventSender},
    models::ContainerStatus,
    services::movement_history::{append, JobLink, NewMovement, Placement},
    AppState,
};
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Helper harness for spinning up the application over an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        // One connection, so every query sees the same in-memory database
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let (event_tx, event_rx) = mpsc::channel(256);
        let event_task = tokio::spawn(events::process_events(event_rx));
        let state = AppState::new(Arc::new(pool), cfg, Arc::new(EventSender::new(event_tx)));
        let router = rst_logistics_api::app_router(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("request")).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    /// POSTs `body` and returns the `data` of a 201 response
    pub async fn create(&self, uri: &str, body: Value) -> Value {
        let response = self.request(Method::POST, uri, Some(body)).await;
        let status = response.status();
        let json = response_json(response).await;
        assert_eq!(status, 201, "POST {uri} failed: {json}");
        json["data"].clone()
    }

    pub async fn get_data(&self, uri: &str) -> Value {
        let response = self.request(Method::GET, uri, None).await;
        let status = response.status();
        let json = response_json(response).await;
        assert_eq!(status, 200, "GET {uri} failed: {json}");
        json["data"].clone()
    }

    pub async fn create_port(&self, code: &str) -> i64 {
        let port = self
            .create(
                "/api/v1/ports",
                json!({"portCode": code, "portName": format!("Port {code}")}),
            )
            .await;
        port["id"].as_i64().expect("port id")
    }

    pub async fn create_party(&self, name: &str, business_type: &str) -> i64 {
        let entry = self
            .create(
                "/api/v1/addressbook",
                json!({"companyName": name, "businessType": business_type}),
            )
            .await;
        entry["id"].as_i64().expect("address book id")
    }

    /// Registers a container, which starts out `AVAILABLE`
    pub async fn create_container(&self, number: &str) -> i64 {
        let container = self
            .create(
                "/api/v1/inventory",
                json!({"containerNumber": number, "containerCategory": "Tank"}),
            )
            .await;
        container["id"].as_i64().expect("inventory id")
    }

    /// Appends a ledger row directly, for states the API only reaches in many steps
    pub async fn record(
        &self,
        inventory_id: i64,
        status: ContainerStatus,
        at: DateTime<Utc>,
        placement: Placement,
        job: Option<JobLink>,
    ) -> movement_history::Model {
        append(
            self.state.db.as_ref(),
            NewMovement {
                inventory_id: inventory_id as i32,
                status,
                date: at,
                placement,
                job,
                remarks: None,
            },
        )
        .await
        .expect("append movement")
    }

    pub async fn ledger_len(&self) -> u64 {
        movement_history::Entity::find()
            .count(self.state.db.as_ref())
            .await
            .expect("count ledger")
    }

    pub async fn history_of(&self, inventory_id: i64) -> Vec<movement_history::Model> {
        movement_history::Entity::find()
            .filter(movement_history::Column::InventoryId.eq(inventory_id as i32))
            .all(self.state.db.as_ref())
            .await
            .expect("load history")
    }

    pub async fn bulk(&self, body: Value) -> Response {
        self.request(Method::POST, "/api/v1/movement-history/bulk-create", Some(body))
            .await
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// A fixed instant `days` after 2030-03-01, so ledger ordering is deterministic
pub fn day(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 1, 8, 0, 0).unwrap() + chrono::Duration::days(days)
}
