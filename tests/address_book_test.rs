mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn entries_receive_sequential_ref_ids() {
    let app = TestApp::new().await;

    let next = app.get_data("/api/v1/addressbook/next-ref-id").await;
    assert_eq!(next["code"], "RST-AB-00001");

    let entry = app
        .create(
            "/api/v1/addressbook",
            json!({
                "companyName": "Gulf Line",
                "businessType": "Carrier",
                "email": "ops@gulfline.example",
                "contacts": [{"firstName": "Asha", "email": "asha@gulfline.example"}],
                "bankDetails": [{"bankName": "First Bank", "accountNumber": "0012345"}],
            }),
        )
        .await;
    assert_eq!(entry["refId"], "RST-AB-00001");
    assert_eq!(entry["contacts"].as_array().unwrap().len(), 1);
    assert_eq!(entry["bankDetails"][0]["accountNumber"], "0012345");

    let next = app.get_data("/api/v1/addressbook/next-ref-id").await;
    assert_eq!(next["code"], "RST-AB-00002");
}

#[tokio::test]
async fn invalid_entries_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/addressbook",
            Some(json!({"companyName": "", "businessType": "Carrier"})),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request(
            Method::POST,
            "/api/v1/addressbook",
            Some(json!({
                "companyName": "Overdrawn Ltd",
                "businessType": "Customer",
                "creditLimit": "-10",
            })),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("credit limit"));
}

#[tokio::test]
async fn contacts_are_upserted_and_removed() {
    let app = TestApp::new().await;
    let entry = app
        .create(
            "/api/v1/addressbook",
            json!({
                "companyName": "Jebel Ali Depot",
                "businessType": "Depot",
                "contacts": [{"firstName": "Omar"}, {"firstName": "Lina"}],
            }),
        )
        .await;
    let id = entry["id"].as_i64().unwrap();
    let omar = entry["contacts"][0]["id"].as_i64().unwrap();
    let lina = entry["contacts"][1]["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/addressbook/{id}"),
            Some(json!({
                "contacts": [
                    {"id": omar, "firstName": "Omar", "designation": "Manager"},
                    {"firstName": "Ravi"},
                ],
                "removedContactIds": [lina],
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let contacts = body["data"]["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0]["designation"], "Manager");
    assert_eq!(contacts[1]["firstName"], "Ravi");
}

#[tokio::test]
async fn foreign_child_ids_are_rejected() {
    let app = TestApp::new().await;
    let owner = app
        .create(
            "/api/v1/addressbook",
            json!({
                "companyName": "Owner",
                "businessType": "Customer",
                "contacts": [{"firstName": "Kept"}],
            }),
        )
        .await;
    let foreign = owner["contacts"][0]["id"].as_i64().unwrap();
    let other = app.create_party("Other", "Customer").await;

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/addressbook/{other}"),
            Some(json!({"contacts": [{"id": foreign, "firstName": "Hijacked"}]})),
        )
        .await;
    assert_eq!(response.status(), 400);

    let owner_id = owner["id"].as_i64().unwrap();
    let reloaded = app.get_data(&format!("/api/v1/addressbook/{owner_id}")).await;
    assert_eq!(reloaded["contacts"][0]["firstName"], "Kept");
}

#[tokio::test]
async fn delete_removes_entry() {
    let app = TestApp::new().await;
    let id = app.create_party("Short Lived", "Vendor").await;

    let response = app
        .request(Method::DELETE, &format!("/api/v1/addressbook/{id}"), None)
        .await;
    assert_eq!(response.status(), 204);

    let response = app
        .request(Method::GET, &format!("/api/v1/addressbook/{id}"), None)
        .await;
    assert_eq!(response.status(), 404);
}
