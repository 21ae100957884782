mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn country_codes_are_unique_and_normalised() {
    let app = TestApp::new().await;
    let india = app
        .create("/api/v1/country", json!({"countryCode": "in", "countryName": "India"}))
        .await;
    assert_eq!(india["countryCode"], "IN");
    assert_eq!(india["isActive"], true);

    let response = app
        .request(
            Method::POST,
            "/api/v1/country",
            Some(json!({"countryCode": "IN", "countryName": "Duplicate"})),
        )
        .await;
    assert_eq!(response.status(), 409);

    let response = app
        .request(
            Method::POST,
            "/api/v1/country",
            Some(json!({"countryCode": "INDIA", "countryName": "Too long"})),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn country_status_toggles_and_delete_respects_ports() {
    let app = TestApp::new().await;
    let country = app
        .create("/api/v1/country", json!({"countryCode": "AE", "countryName": "UAE"}))
        .await;
    let id = country["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PATCH,
            &format!("/api/v1/country/{id}/status"),
            Some(json!({"isActive": false})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["isActive"], false);

    let port = app
        .create(
            "/api/v1/ports",
            json!({"portCode": "AEJEA", "portName": "Jebel Ali", "countryId": id}),
        )
        .await;

    let response = app
        .request(Method::DELETE, &format!("/api/v1/country/{id}"), None)
        .await;
    assert_eq!(response.status(), 409);

    let port_id = port["id"].as_i64().unwrap();
    let response = app
        .request(Method::DELETE, &format!("/api/v1/ports/{port_id}"), None)
        .await;
    assert_eq!(response.status(), 204);
    let response = app
        .request(Method::DELETE, &format!("/api/v1/country/{id}"), None)
        .await;
    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn icd_hangs_off_a_parent_port() {
    let app = TestApp::new().await;
    let parent = app.create_port("INNSA").await;

    let icd = app
        .create(
            "/api/v1/ports",
            json!({
                "portCode": "intkd",
                "portName": "Tughlakabad",
                "portType": "ICD",
                "parentPortId": parent,
            }),
        )
        .await;
    assert_eq!(icd["portCode"], "INTKD");
    assert_eq!(icd["parentPortId"], parent);

    let response = app
        .request(
            Method::POST,
            "/api/v1/ports",
            Some(json!({"portCode": "XXORP", "portName": "Orphan", "parentPortId": 4040})),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request(
            Method::POST,
            "/api/v1/ports",
            Some(json!({"portCode": "XXBAD", "portName": "Bad type", "portType": "Dry"})),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .request(Method::DELETE, &format!("/api/v1/ports/{parent}"), None)
        .await;
    assert_eq!(response.status(), 409);

    let response = app
        .request(
            Method::POST,
            "/api/v1/ports",
            Some(json!({"portCode": "INNSA", "portName": "Again"})),
        )
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn exchange_rates_need_two_distinct_currencies() {
    let app = TestApp::new().await;
    let usd = app
        .create(
            "/api/v1/currency",
            json!({"currencyCode": "usd", "currencyName": "US Dollar", "currencySymbol": "$"}),
        )
        .await;
    let inr = app
        .create("/api/v1/currency", json!({"currencyCode": "INR", "currencyName": "Rupee"}))
        .await;
    assert_eq!(usd["currencyCode"], "USD");

    let response = app
        .request(
            Method::POST,
            "/api/v1/currency",
            Some(json!({"currencyCode": "USD", "currencyName": "Again"})),
        )
        .await;
    assert_eq!(response.status(), 409);

    let rate = app
        .create(
            "/api/v1/exchange-rates",
            json!({
                "fromCurrencyId": usd["id"],
                "toCurrencyId": inr["id"],
                "exchangeRate": "83.25",
                "date": "2030-03-01",
            }),
        )
        .await;
    assert_eq!(rate["exchangeRate"].as_str().and_then(|r| r.parse::<f64>().ok()), Some(83.25));

    for body in [
        json!({"fromCurrencyId": usd["id"], "toCurrencyId": usd["id"], "exchangeRate": "1", "date": "2030-03-01"}),
        json!({"fromCurrencyId": usd["id"], "toCurrencyId": inr["id"], "exchangeRate": "0", "date": "2030-03-01"}),
        json!({"fromCurrencyId": usd["id"], "toCurrencyId": 999, "exchangeRate": "2", "date": "2030-03-01"}),
    ] {
        let response = app
            .request(Method::POST, "/api/v1/exchange-rates", Some(body))
            .await;
        assert_eq!(response.status(), 400);
    }

    let usd_id = usd["id"].as_i64().unwrap();
    let response = app
        .request(Method::DELETE, &format!("/api/v1/currency/{usd_id}"), None)
        .await;
    assert_eq!(response.status(), 409);

    let page = app
        .get_data(&format!("/api/v1/exchange-rates?fromCurrencyId={usd_id}"))
        .await;
    assert_eq!(page["total"], 1);
}
