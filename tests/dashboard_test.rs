mod common;

use serde_json::json;
use rst_logistics_api::{
    models::ContainerStatus,
    services::movement_history::{JobLink, Placement},
};

use common::{day, TestApp};

#[tokio::test]
async fn empty_fleet_reports_zeroes() {
    let app = TestApp::new().await;
    let summary = app.get_data("/api/v1/dashboard/container-summary").await;
    assert_eq!(summary["total"], 0);
    assert_eq!(summary["inTransit"], 0);
}

#[tokio::test]
async fn containers_are_counted_by_current_status() {
    let app = TestApp::new().await;
    let ids = [
        app.create_container("RSTU0000001").await,
        app.create_container("RSTU0000002").await,
        app.create_container("RSTU0000003").await,
        app.create_container("RSTU0000004").await,
        app.create_container("RSTU0000005").await,
    ];
    let shipment = app
        .create("/api/v1/shipment", json!({"date": "2030-03-01", "containers": [ids[0]]}))
        .await;
    let link = Some(JobLink::Shipment(shipment["id"].as_i64().unwrap() as i32));

    app.record(ids[1], ContainerStatus::Sob, day(3), Placement::default(), link)
        .await;
    app.record(ids[2], ContainerStatus::EmptyReturned, day(5), Placement::default(), link)
        .await;
    app.record(ids[3], ContainerStatus::Unavailable, day(1), Placement::default(), None)
        .await;

    let summary = app.get_data("/api/v1/dashboard/container-summary").await;
    assert_eq!(summary["total"], 5);
    assert_eq!(summary["allotted"], 1);
    assert_eq!(summary["inTransit"], 1);
    assert_eq!(summary["emptyReturned"], 1);
    assert_eq!(summary["unavailable"], 1);
    assert_eq!(summary["available"], 1);
}
