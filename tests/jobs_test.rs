mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn job_numbers_are_issued_in_sequence() {
    let app = TestApp::new().await;

    let next = app.get_data("/api/v1/shipment/job/next").await;
    assert_eq!(next["code"], "RST/SHP/00001");

    let first = app
        .create("/api/v1/shipment", json!({"date": "2030-03-01"}))
        .await;
    assert_eq!(first["jobNumber"], "RST/SHP/00001");
    let second = app
        .create("/api/v1/shipment", json!({"date": "2030-03-02"}))
        .await;
    assert_eq!(second["jobNumber"], "RST/SHP/00002");

    let repo = app
        .create("/api/v1/empty-repo-job", json!({"date": "2030-03-02"}))
        .await;
    assert_eq!(repo["jobNumber"], "RST/ERJ/00001");
}

#[tokio::test]
async fn shipment_allots_available_containers() {
    let app = TestApp::new().await;
    let pol = app.create_port("INNSA").await;
    let pod = app.create_port("AEJEA").await;
    let b = app.create_container("RSTU0000002").await;
    let a = app.create_container("RSTU0000001").await;

    let shipment = app
        .create(
            "/api/v1/shipment",
            json!({
                "date": "2030-03-01",
                "polPortId": pol,
                "podPortId": pod,
                "containers": [b, a, b],
            }),
        )
        .await;

    let containers = shipment["containers"].as_array().unwrap();
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0]["containerNumber"], "RSTU0000001");
    assert_eq!(containers[1]["containerNumber"], "RSTU0000002");
    for container in containers {
        assert_eq!(container["status"], "ALLOTTED");
        assert_eq!(container["portId"], pol);
    }

    let inventory = app.get_data(&format!("/api/v1/inventory/{a}")).await;
    assert_eq!(inventory["currentStatus"], "ALLOTTED");
}

#[tokio::test]
async fn allotting_a_busy_container_fails_as_a_whole() {
    let app = TestApp::new().await;
    let free = app.create_container("RSTU0000003").await;
    let busy = app.create_container("RSTU0000004").await;
    app.create(
        "/api/v1/shipment",
        json!({"date": "2030-03-01", "containers": [busy]}),
    )
    .await;
    let before = app.ledger_len().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/shipment",
            Some(json!({"date": "2030-03-02", "containers": [free, busy]})),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("not AVAILABLE"));
    assert_eq!(app.ledger_len().await, before);

    let page = app.get_data("/api/v1/shipment").await;
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn update_allots_further_containers() {
    let app = TestApp::new().await;
    let a = app.create_container("RSTU0000005").await;
    let job = app
        .create("/api/v1/empty-repo-job", json!({"date": "2030-03-01"}))
        .await;
    let id = job["id"].as_i64().unwrap();
    assert!(job["containers"].as_array().unwrap().is_empty());

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/empty-repo-job/{id}"),
            Some(json!({"vesselName": "MSC Aurora", "containers": [a]})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["vesselName"], "MSC Aurora");
    assert_eq!(body["data"]["containers"][0]["inventoryId"], a);
}

#[tokio::test]
async fn referenced_job_cannot_be_deleted() {
    let app = TestApp::new().await;
    let a = app.create_container("RSTU0000006").await;
    let used = app
        .create("/api/v1/shipment", json!({"date": "2030-03-01", "containers": [a]}))
        .await;
    let unused = app
        .create("/api/v1/shipment", json!({"date": "2030-03-01"}))
        .await;

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/shipment/{}", used["id"]),
            None,
        )
        .await;
    assert_eq!(response.status(), 409);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/shipment/{}", unused["id"]),
            None,
        )
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request(Method::GET, "/api/v1/shipment/9999", None)
        .await;
    assert_eq!(response.status(), 404);
}
