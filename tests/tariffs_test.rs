mod common;

use axum::http::Method;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::str::FromStr;

use common::{response_json, TestApp};

fn amount(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal string")).expect("decimal")
}

#[tokio::test]
async fn each_tariff_table_has_its_own_series() {
    let app = TestApp::new().await;
    let series = [
        ("container-lease-tariff", "RST-CLT-00001"),
        ("depot-avg-tariff", "RST-DAT-00001"),
        ("handling-agent-tariff", "RST-HA-00001"),
        ("land-transport-tariff", "RST-LT-00001"),
        ("depot-cleaning-tariff", "RST-DC-00001"),
    ];
    for (path, expected) in series {
        let next = app
            .get_data(&format!("/api/v1/{path}/next-tariff-code"))
            .await;
        assert_eq!(next["code"], expected, "{path}");
    }
}

#[tokio::test]
async fn depot_average_total_is_derived() {
    let app = TestApp::new().await;
    let depot = app.create_party("Nhava Sheva Depot", "Depot").await;
    let port = app.create_port("INNSA").await;

    let tariff = app
        .create(
            "/api/v1/depot-avg-tariff",
            json!({
                "addressBookId": depot,
                "portId": port,
                "manliftCharges": "10",
                "onHireSurvey": "25.50",
                "offHireSurvey": "25.50",
                "cleaningCharges": "40",
                "periodicTest": "100",
                "storagePerDay": "4",
            }),
        )
        .await;
    assert_eq!(tariff["tariffCode"], "RST-DAT-00001");
    assert_eq!(amount(&tariff["total"]), dec!(205));

    let id = tariff["id"].as_i64().unwrap();
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/depot-avg-tariff/{id}"),
            Some(json!({"storagePerDay": "9"})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(amount(&body["data"]["total"]), dec!(210));
}

#[tokio::test]
async fn negative_charges_are_rejected() {
    let app = TestApp::new().await;
    let lessor = app.create_party("Lessor", "Leasor").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/container-lease-tariff",
            Some(json!({"addressBookId": lessor, "leaseRentPerDay": "-1"})),
        )
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("cannot be negative"));

    let created = app
        .create(
            "/api/v1/container-lease-tariff",
            json!({"addressBookId": lessor, "leaseRentPerDay": "0"}),
        )
        .await;
    let id = created["id"].as_i64().unwrap();
    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/container-lease-tariff/{id}"),
            Some(json!({"leaseRentPerDay": "-0.01"})),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn owner_must_exist() {
    let app = TestApp::new().await;
    let port = app.create_port("AEJEA").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/depot-cleaning-tariff",
            Some(json!({"addressBookId": 4242, "portId": port, "cleaningCharges": "80"})),
        )
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn tariffs_filter_by_owner_and_delete() {
    let app = TestApp::new().await;
    let hauler = app.create_party("Road Hauler", "Transporter").await;
    let other = app.create_party("Other Hauler", "Transporter").await;

    let first = app
        .create(
            "/api/v1/land-transport-tariff",
            json!({
                "addressBookId": hauler,
                "fromLocation": "Nhava Sheva",
                "toLocation": "Tughlakabad",
                "distanceKm": "1400",
                "amount": "950",
            }),
        )
        .await;
    app.create(
        "/api/v1/land-transport-tariff",
        json!({
            "addressBookId": other,
            "fromLocation": "Mundra",
            "toLocation": "Ahmedabad",
            "amount": "300",
        }),
    )
    .await;
    assert_eq!(first["tariffCode"], "RST-LT-00001");

    let page = app
        .get_data(&format!("/api/v1/land-transport-tariff?addressBookId={hauler}"))
        .await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["fromLocation"], "Nhava Sheva");

    let id = first["id"].as_i64().unwrap();
    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/land-transport-tariff/{id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), 204);
    let response = app
        .request(Method::GET, &format!("/api/v1/land-transport-tariff/{id}"), None)
        .await;
    assert_eq!(response.status(), 404);
}
