mod common;

use axum::http::Method;
use chrono::Utc;
use serde_json::{json, Value};
use rst_logistics_api::{
    models::ContainerStatus,
    services::movement_history::{JobLink, Placement},
};

use common::{day, response_json, TestApp};

/// Empty repositioning job from `pol` to `pod`; returns (id, job number)
async fn empty_repo_job(app: &TestApp, pol: i64, pod: i64) -> (i32, String) {
    let job = app
        .create(
            "/api/v1/empty-repo-job",
            json!({"date": "2030-03-01", "polPortId": pol, "podPortId": pod}),
        )
        .await;
    (
        job["id"].as_i64().unwrap() as i32,
        job["jobNumber"].as_str().unwrap().to_string(),
    )
}

fn error_message(body: &Value) -> String {
    body["message"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn empty_pickup_keeps_job_and_placement() {
    let app = TestApp::new().await;
    let pol = app.create_port("INNSA").await;
    let pod = app.create_port("AEJEA").await;
    let (job_id, job_number) = empty_repo_job(&app, pol, pod).await;

    let a = app.create_container("RSTU0000001").await;
    let b = app.create_container("RSTU0000002").await;
    let placement = Placement {
        port_id: Some(pol as i32),
        address_book_id: None,
    };
    let link = Some(JobLink::EmptyRepoJob(job_id));
    let row_a = app
        .record(a, ContainerStatus::Allotted, day(1), placement, link)
        .await;
    let row_b = app
        .record(b, ContainerStatus::Allotted, day(1), placement, link)
        .await;

    let response = app
        .bulk(json!({
            "ids": [row_a.id, row_b.id],
            "newStatus": "EMPTY PICKED UP",
            "jobNumber": job_number,
            "date": "2030-03-03",
        }))
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    let rows = body["data"].as_array().expect("inserted rows");
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["status"], "EMPTY PICKED UP");
        assert_eq!(row["emptyRepoJobId"], job_id);
        assert_eq!(row["portId"], pol);
        assert_eq!(row["addressBookId"], Value::Null);
    }
}

#[tokio::test]
async fn gate_out_moves_to_discharge_port_and_clears_counterparty() {
    let app = TestApp::new().await;
    let pol = app.create_port("INNSA").await;
    let pod = app.create_port("AEJEA").await;
    let carrier = app.create_party("Gulf Line", "Carrier").await;
    let shipment = app
        .create(
            "/api/v1/shipment",
            json!({
                "date": "2030-03-01",
                "polPortId": pol,
                "podPortId": pod,
                "carrierAddressBookId": carrier,
            }),
        )
        .await;
    let shipment_id = shipment["id"].as_i64().unwrap() as i32;

    let c = app.create_container("RSTU0000003").await;
    let sob = app
        .record(
            c,
            ContainerStatus::Sob,
            day(4),
            Placement {
                port_id: Some(pod as i32),
                address_book_id: Some(carrier as i32),
            },
            Some(JobLink::Shipment(shipment_id)),
        )
        .await;

    let response = app
        .bulk(json!({
            "ids": [sob.id],
            "newStatus": "GATE-OUT",
            "jobNumber": shipment["jobNumber"],
            "date": "2030-03-10T12:00:00Z",
            "remarks": "discharged",
        }))
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    let row = &body["data"][0];
    assert_eq!(row["portId"], pod);
    assert_eq!(row["addressBookId"], Value::Null);
    assert_eq!(row["shipmentId"], shipment_id);
    assert_eq!(row["remarks"], "discharged");
}

#[tokio::test]
async fn unavailable_after_return_carries_placement_and_drops_job() {
    let app = TestApp::new().await;
    let pod = app.create_port("AEJEA").await;
    let depot = app.create_party("Jebel Ali Depot", "Depot").await;
    let (job_id, _) = empty_repo_job(&app, pod, pod).await;

    let d = app.create_container("RSTU0000004").await;
    let returned = app
        .record(
            d,
            ContainerStatus::EmptyReturned,
            day(9),
            Placement {
                port_id: Some(pod as i32),
                address_book_id: Some(depot as i32),
            },
            Some(JobLink::EmptyRepoJob(job_id)),
        )
        .await;

    let response = app
        .bulk(json!({
            "ids": [returned.id],
            "newStatus": "UNAVAILABLE",
            "jobNumber": "",
            "date": "2030-03-12",
        }))
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    let row = &body["data"][0];
    assert_eq!(row["portId"], pod);
    assert_eq!(row["addressBookId"], depot);
    assert_eq!(row["emptyRepoJobId"], Value::Null);
    assert_eq!(row["shipmentId"], Value::Null);
}

#[tokio::test]
async fn mixed_statuses_are_rejected_without_writing() {
    let app = TestApp::new().await;
    let pol = app.create_port("INNSA").await;
    let (job_id, job_number) = empty_repo_job(&app, pol, pol).await;
    let link = Some(JobLink::EmptyRepoJob(job_id));
    let placement = Placement {
        port_id: Some(pol as i32),
        address_book_id: None,
    };

    let a = app.create_container("RSTU0000005").await;
    let b = app.create_container("RSTU0000006").await;
    let row_a = app
        .record(a, ContainerStatus::Allotted, day(1), placement, link)
        .await;
    let row_b = app
        .record(b, ContainerStatus::GateIn, day(2), placement, link)
        .await;
    let before = app.ledger_len().await;

    let response = app
        .bulk(json!({
            "ids": [row_a.id, row_b.id],
            "newStatus": "EMPTY PICKED UP",
            "jobNumber": job_number,
            "date": "2030-03-05",
        }))
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(error_message(&body).contains("containers must share current status"));
    assert_eq!(app.ledger_len().await, before);
}

#[tokio::test]
async fn containers_on_different_jobs_are_rejected() {
    let app = TestApp::new().await;
    let pol = app.create_port("INNSA").await;
    let (first, _) = empty_repo_job(&app, pol, pol).await;
    let (second, _) = empty_repo_job(&app, pol, pol).await;
    let placement = Placement {
        port_id: Some(pol as i32),
        address_book_id: None,
    };

    let a = app.create_container("RSTU0000007").await;
    let b = app.create_container("RSTU0000008").await;
    let row_a = app
        .record(a, ContainerStatus::Allotted, day(1), placement, Some(JobLink::EmptyRepoJob(first)))
        .await;
    let row_b = app
        .record(b, ContainerStatus::Allotted, day(1), placement, Some(JobLink::EmptyRepoJob(second)))
        .await;
    let before = app.ledger_len().await;

    let response = app
        .bulk(json!({
            "ids": [row_a.id, row_b.id],
            "newStatus": "EMPTY PICKED UP",
            "jobNumber": "",
            "date": "2030-03-05",
        }))
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(error_message(&body).contains("containers must share job number"));
    assert_eq!(app.ledger_len().await, before);
}

#[tokio::test]
async fn transition_outside_graph_is_rejected() {
    let app = TestApp::new().await;
    let pol = app.create_port("INNSA").await;
    let (job_id, job_number) = empty_repo_job(&app, pol, pol).await;
    let a = app.create_container("RSTU0000009").await;
    let row = app
        .record(
            a,
            ContainerStatus::Allotted,
            day(1),
            Placement {
                port_id: Some(pol as i32),
                address_book_id: None,
            },
            Some(JobLink::EmptyRepoJob(job_id)),
        )
        .await;
    let before = app.ledger_len().await;

    let response = app
        .bulk(json!({
            "ids": [row.id],
            "newStatus": "SOB",
            "jobNumber": job_number,
            "date": "2030-03-05",
        }))
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(error_message(&body).contains("invalid transition"));
    assert_eq!(app.ledger_len().await, before);
}

#[tokio::test]
async fn allotment_is_not_a_bulk_transition() {
    let app = TestApp::new().await;
    let a = app.create_container("RSTU0000010").await;
    let current = app.history_of(a).await.remove(0);

    // AVAILABLE may not be allotted through a bulk update, legacy spelling or not
    let response = app
        .bulk(json!({
            "ids": [current.id],
            "newStatus": "ALLOTED",
            "jobNumber": "",
            "date": Utc::now().to_rfc3339(),
        }))
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(error_message(&body).contains("invalid transition"));
}

#[tokio::test]
async fn malformed_date_and_unknown_status_are_rejected() {
    let app = TestApp::new().await;
    let a = app.create_container("RSTU0000011").await;
    let current = app.history_of(a).await.remove(0);

    let response = app
        .bulk(json!({"ids": [current.id], "newStatus": "UNAVAILABLE", "jobNumber": "", "date": "03/01/2030"}))
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .bulk(json!({"ids": [current.id], "newStatus": "SCRAPPED", "jobNumber": "", "date": "2030-03-01"}))
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .bulk(json!({"ids": [999_999], "newStatus": "UNAVAILABLE", "jobNumber": "", "date": "2030-03-01"}))
        .await;
    assert_eq!(response.status(), 404);

    let response = app
        .bulk(json!({"ids": [current.id], "newStatus": "UNAVAILABLE", "date": "2030-03-01"}))
        .await;
    assert!(response.status().is_client_error());

    assert_eq!(app.history_of(a).await.len(), 1);
}

#[tokio::test]
async fn same_day_update_becomes_the_current_record() {
    let app = TestApp::new().await;
    let a = app.create_container("RSTU0000014").await;
    let registered = app.history_of(a).await.remove(0);
    let today = registered.date.format("%Y-%m-%d").to_string();

    let response = app
        .bulk(json!({
            "ids": [registered.id],
            "newStatus": "UNAVAILABLE",
            "jobNumber": "",
            "date": today,
        }))
        .await;
    assert_eq!(response.status(), 201);
    let body = response_json(response).await;
    let moved = body["data"][0]["id"].as_i64().unwrap();

    let latest = app
        .get_data("/api/v1/movement-history/latest?status=UNAVAILABLE")
        .await;
    let latest = latest.as_array().unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0]["id"], moved);

    let inventory = app.get_data(&format!("/api/v1/inventory/{a}")).await;
    assert_eq!(inventory["currentStatus"], "UNAVAILABLE");

    // The container is no longer AVAILABLE, so repeating the move is refused
    let response = app
        .bulk(json!({
            "ids": [registered.id],
            "newStatus": "UNAVAILABLE",
            "jobNumber": "",
            "date": today,
        }))
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(app.history_of(a).await.len(), 2);
}

#[tokio::test]
async fn backdated_update_is_rejected_without_writing() {
    let app = TestApp::new().await;
    let a = app.create_container("RSTU0000015").await;
    let registered = app.history_of(a).await.remove(0);

    let response = app
        .bulk(json!({
            "ids": [registered.id],
            "newStatus": "UNAVAILABLE",
            "jobNumber": "",
            "date": "2020-01-01",
        }))
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(error_message(&body).contains("before the current record"));
    assert_eq!(app.history_of(a).await.len(), 1);

    let inventory = app.get_data(&format!("/api/v1/inventory/{a}")).await;
    assert_eq!(inventory["currentStatus"], "AVAILABLE");
}

#[tokio::test]
async fn ledger_views_follow_the_latest_row() {
    let app = TestApp::new().await;
    let a = app.create_container("RSTU0000012").await;
    let b = app.create_container("RSTU0000013").await;
    let registered = app.history_of(a).await.remove(0);

    let response = app
        .bulk(json!({
            "ids": [registered.id],
            "newStatus": "UNAVAILABLE",
            "jobNumber": "",
            "date": "2030-03-02",
        }))
        .await;
    assert_eq!(response.status(), 201);

    let history = app
        .get_data(&format!("/api/v1/movement-history/container/{a}"))
        .await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["status"], "UNAVAILABLE");
    assert_eq!(history[0]["containerNumber"], "RSTU0000012");

    let latest = app
        .get_data("/api/v1/movement-history/latest?status=UNAVAILABLE")
        .await;
    let latest = latest.as_array().unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0]["inventoryId"], a);

    let page = app
        .get_data("/api/v1/movement-history?containerNumber=RSTU0000013")
        .await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["inventoryId"], b);

    let inventory = app.get_data(&format!("/api/v1/inventory/{a}")).await;
    assert_eq!(inventory["currentStatus"], "UNAVAILABLE");

    let response = app
        .request(Method::GET, "/api/v1/movement-history/container/424242", None)
        .await;
    assert_eq!(response.status(), 404);
}
