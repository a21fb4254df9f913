//! Integration tests for the sync client against a mock pipeline
//! service.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetmon_api::PipelineClient;
use fleetmon_core::{Device, DeviceCategory, DeviceStatus, DeviceStore, SyncClient};

fn client_for(server: &MockServer) -> SyncClient {
    let client = PipelineClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    SyncClient::from_client(client, "127.0.0.1", 1)
}

fn local_store() -> DeviceStore {
    DeviceStore::with_devices(vec![
        Device {
            category: DeviceCategory::Server,
            name: "web-1".into(),
            serial_number: "S01".into(),
            install_date: "2022-01-10".parse().unwrap(),
            status: DeviceStatus::Working,
        },
        Device {
            category: DeviceCategory::Printer,
            name: "laser-a".into(),
            serial_number: "P01".into(),
            install_date: "2020-03-15".parse().unwrap(),
            status: DeviceStatus::Broken,
        },
    ])
}

// ── Pull ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn pull_replaces_the_local_set_with_mapped_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "serialNumber": "R-100",
                "name": "rack-db",
                "categoryCode": "SRV-DB",
                "statusCode": "MAINTENANCE",
                "installDate": "2021-05-05"
            },
            {
                "serialNumber": "R-200",
                "name": "lobby-print",
                "categoryCode": "PRN-MFU",
                "statusCode": "REPAIR",
                "installDate": "2019-08-20"
            },
            {
                "serialNumber": "R-300",
                "name": "mystery-box",
                "categoryCode": "GADGET",
                "statusCode": "LIMBO",
                "installDate": "2023-01-01"
            }
        ])))
        .mount(&server)
        .await;

    let mut store = local_store();
    let count = client_for(&server).pull(&mut store).await.unwrap();

    assert_eq!(count, 3);
    let devices = store.snapshot();
    assert_eq!(devices.len(), 3);

    assert_eq!(devices[0].name, "rack-db");
    assert_eq!(devices[0].category, DeviceCategory::Server);
    assert_eq!(devices[0].status, DeviceStatus::Working);

    assert_eq!(devices[1].category, DeviceCategory::Printer);
    assert_eq!(devices[1].status, DeviceStatus::Broken);

    // Unknown codes fall back to PC / Working.
    assert_eq!(devices[2].category, DeviceCategory::PC);
    assert_eq!(devices[2].status, DeviceStatus::Working);
}

#[tokio::test]
async fn pull_of_an_empty_remote_set_empties_the_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut store = local_store();
    let count = client_for(&server).pull(&mut store).await.unwrap();

    assert_eq!(count, 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn failed_pull_leaves_the_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "extract stage offline",
            "code": "E_EXTRACT"
        })))
        .mount(&server)
        .await;

    let mut store = local_store();
    let before = store.snapshot();
    let err = client_for(&server).pull(&mut store).await.unwrap_err();

    assert!(matches!(err, fleetmon_core::CoreError::Api { .. }));
    assert_eq!(store.snapshot(), before);
}

// ── Commit ───────────────────────────────────────────────────────────

#[tokio::test]
async fn commit_stages_the_full_set_and_reports_transform_counts() {
    let server = MockServer::start().await;
    let batch_id = "7f3b2a10-9c44-4e6b-8f1d-2a5c9e7d0b31";

    Mock::given(method("POST"))
        .and(path("/api/v1/staging/batches"))
        .and(body_partial_json(json!({
            "source": "APP",
            "devices": [
                {
                    "name": "web-1",
                    "serialNumber": "S01",
                    "category": "SERVER",
                    "status": "WORKING",
                    "installDate": "2022-01-10"
                },
                {
                    "name": "laser-a",
                    "serialNumber": "P01",
                    "category": "PRINTER",
                    "status": "BROKEN",
                    "installDate": "2020-03-15"
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "batchId": batch_id })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/staging/batches/{batch_id}/transform")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "inserted": 1,
            "updated": 1,
            "rejected": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = local_store();
    let result = client_for(&server).commit(&store).await.unwrap();

    assert_eq!(result.inserted, 1);
    assert_eq!(result.updated, 1);
    assert_eq!(result.rejected, 0);
    // Commit never mutates local state.
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn transform_failure_surfaces_as_a_rejection() {
    let server = MockServer::start().await;
    let batch_id = "11111111-2222-3333-4444-555555555555";

    Mock::given(method("POST"))
        .and(path("/api/v1/staging/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "batchId": batch_id })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/staging/batches/{batch_id}/transform")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "duplicate serial in batch",
            "code": "E_DUP_SERIAL"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).commit(&local_store()).await.unwrap_err();
    match err {
        fleetmon_core::CoreError::TransformRejection { message } => {
            assert!(message.contains("duplicate serial"));
        }
        other => panic!("expected TransformRejection, got {other:?}"),
    }
}

// ── Push ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn push_returns_ordered_step_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/pipeline/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "step": "extract", "status": "ok" },
            { "step": "transform", "status": "ok", "details": "42 rows" },
            { "step": "load", "status": "failed", "details": "disk full" }
        ])))
        .mount(&server)
        .await;

    let steps = client_for(&server).push().await.unwrap();

    let names: Vec<_> = steps.iter().map(|s| s.step.as_str()).collect();
    assert_eq!(names, ["extract", "transform", "load"]);
    assert_eq!(steps[0].details, None);
    assert_eq!(steps[2].status, "failed");
    assert_eq!(steps[2].details.as_deref(), Some("disk full"));
}

// ── Authentication ───────────────────────────────────────────────────

#[tokio::test]
async fn rejected_credentials_surface_as_authentication_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut store = DeviceStore::new();
    let err = client_for(&server).pull(&mut store).await.unwrap_err();

    assert!(matches!(
        err,
        fleetmon_core::CoreError::Authentication { .. }
    ));
    assert!(store.is_empty());
}
