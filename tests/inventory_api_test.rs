mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn registered_container_starts_available() {
    let app = TestApp::new().await;
    let port = app.create_port("INNSA").await;

    let created = app
        .create(
            "/api/v1/inventory",
            json!({
                "containerNumber": " rstu7654321 ",
                "containerCategory": "Tank",
                "capacity": "26000",
                "portId": port,
                "leasingInfo": [{"leaseRef": "L-1", "leaseRentPerDay": "12.50"}],
                "certificates": [{"inspectionType": "5Y", "nextDueDate": "2031-01-01"}],
            }),
        )
        .await;

    assert_eq!(created["containerNumber"], "RSTU7654321");
    assert_eq!(created["ownership"], "Own");
    assert_eq!(created["currentStatus"], "AVAILABLE");
    assert_eq!(created["leasingInfo"].as_array().unwrap().len(), 1);
    assert_eq!(created["certificates"][0]["inspectionType"], "5Y");

    let id = created["id"].as_i64().unwrap();
    let history = app.history_of(id).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, "AVAILABLE");
    assert_eq!(history[0].port_id, Some(port as i32));
}

#[tokio::test]
async fn duplicate_container_number_conflicts() {
    let app = TestApp::new().await;
    app.create_container("RSTU1111111").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory",
            Some(json!({"containerNumber": "rstu1111111", "containerCategory": "Tank"})),
        )
        .await;
    assert_eq!(response.status(), 409);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory",
            Some(json!({"containerNumber": "", "containerCategory": "Tank"})),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory",
            Some(json!({
                "containerNumber": "RSTU2222222",
                "containerCategory": "Tank",
                "ownership": "Rented",
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn update_syncs_child_rows() {
    let app = TestApp::new().await;
    let created = app
        .create(
            "/api/v1/inventory",
            json!({
                "containerNumber": "RSTU3333333",
                "containerCategory": "Tank",
                "certificates": [
                    {"inspectionType": "2.5Y"},
                    {"inspectionType": "5Y"},
                ],
            }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();
    let first = created["certificates"][0]["id"].as_i64().unwrap();
    let second = created["certificates"][1]["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/inventory/{id}"),
            Some(json!({
                "remarks": "re-tested",
                "certificates": [
                    {"id": first, "inspectionType": "2.5Y", "certificateFile": "cert.pdf"},
                    {"inspectionType": "Ad hoc"},
                ],
                "removedCertificateIds": [second],
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let certificates = body["data"]["certificates"].as_array().unwrap();
    assert_eq!(certificates.len(), 2);
    assert_eq!(certificates[0]["id"], first);
    assert_eq!(certificates[0]["certificateFile"], "cert.pdf");
    assert_eq!(certificates[1]["inspectionType"], "Ad hoc");
    assert_eq!(body["data"]["remarks"], "re-tested");
}

#[tokio::test]
async fn child_of_another_container_is_rejected() {
    let app = TestApp::new().await;
    let owner = app
        .create(
            "/api/v1/inventory",
            json!({
                "containerNumber": "RSTU4444444",
                "containerCategory": "Tank",
                "leasingInfo": [{"leaseRef": "L-9"}],
            }),
        )
        .await;
    let foreign = owner["leasingInfo"][0]["id"].as_i64().unwrap();
    let other = app.create_container("RSTU5555555").await;

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/inventory/{other}"),
            Some(json!({"removedLeasingInfoIds": [foreign]})),
        )
        .await;
    assert_eq!(response.status(), 400);

    let owner_id = owner["id"].as_i64().unwrap();
    let reloaded = app.get_data(&format!("/api/v1/inventory/{owner_id}")).await;
    assert_eq!(reloaded["leasingInfo"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_removes_container_and_its_ledger() {
    let app = TestApp::new().await;
    let id = app.create_container("RSTU6666666").await;
    let keep = app.create_container("RSTU6666667").await;

    let response = app
        .request(Method::DELETE, &format!("/api/v1/inventory/{id}"), None)
        .await;
    assert_eq!(response.status(), 204);

    assert!(app.history_of(id).await.is_empty());
    assert_eq!(app.history_of(keep).await.len(), 1);

    let response = app
        .request(Method::GET, &format!("/api/v1/inventory/{id}"), None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn list_is_searchable_and_paged() {
    let app = TestApp::new().await;
    for n in 1..=3 {
        app.create_container(&format!("RSTU900000{n}")).await;
    }
    app.create_container("ABCU1234567").await;

    let page = app.get_data("/api/v1/inventory?search=RSTU&limit=2").await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["items"][0]["containerNumber"], "RSTU9000001");
    assert_eq!(page["items"][0]["currentStatus"], "AVAILABLE");
}
