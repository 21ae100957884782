mod common;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request},
};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;
use rst_logistics_api::entities::product;

use common::{response_json, TestApp};

const BOUNDARY: &str = "rst-boundary";

fn multipart_body(data: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"msdsFile\"; filename=\"msds.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         %PDF-1.4\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"data\"\r\n\r\n\
         {data}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

#[tokio::test]
async fn product_codes_follow_the_highest_issued() {
    let app = TestApp::new().await;

    let next = app.get_data("/api/v1/products/next-id").await;
    assert_eq!(next["code"], "RST/PRD/00001");

    let created = app
        .create("/api/v1/products", json!({"productName": "Acetone"}))
        .await;
    assert_eq!(created["productCode"], "RST/PRD/00001");

    let next = app.get_data("/api/v1/products/next-id").await;
    assert_eq!(next["code"], "RST/PRD/00002");
}

#[tokio::test]
async fn malformed_codes_are_ignored_when_numbering() {
    let app = TestApp::new().await;
    product::ActiveModel {
        product_code: Set("RST/PRD/ABC".to_string()),
        product_name: Set("Imported".to_string()),
        ..Default::default()
    }
    .insert(app.state.db.as_ref())
    .await
    .expect("insert product");

    let next = app.get_data("/api/v1/products/next-id").await;
    assert_eq!(next["code"], "RST/PRD/00001");
}

#[tokio::test]
async fn multipart_create_reads_the_data_part() {
    let app = TestApp::new().await;
    let data = json!({
        "productName": "Methanol",
        "unNumber": "1230",
        "msds": [{"documentName": "msds.pdf", "msdsDate": "2030-01-15"}],
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/products")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(&data.to_string())))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), 201);

    let body = response_json(response).await;
    assert_eq!(body["data"]["productName"], "Methanol");
    assert_eq!(body["data"]["unNumber"], "1230");
    assert_eq!(body["data"]["msds"][0]["documentName"], "msds.pdf");
}

#[tokio::test]
async fn multipart_without_data_part_is_rejected() {
    let app = TestApp::new().await;
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"other\"\r\n\r\n\
         x\r\n\
         --{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/products")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn msds_rows_are_synced_on_update() {
    let app = TestApp::new().await;
    let created = app
        .create(
            "/api/v1/products",
            json!({
                "productName": "Toluene",
                "msds": [{"documentName": "v1.pdf"}, {"documentName": "v2.pdf"}],
            }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();
    let first = created["msds"][0]["id"].as_i64().unwrap();
    let second = created["msds"][1]["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/products/{id}"),
            Some(json!({
                "grade": "Industrial",
                "msds": [{"id": second, "documentName": "v2-rev.pdf"}],
                "removedMsdsIds": [first],
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["grade"], "Industrial");
    let msds = body["data"]["msds"].as_array().unwrap();
    assert_eq!(msds.len(), 1);
    assert_eq!(msds[0]["documentName"], "v2-rev.pdf");

    let response = app
        .request(Method::DELETE, &format!("/api/v1/products/{id}"), None)
        .await;
    assert_eq!(response.status(), 204);
}
