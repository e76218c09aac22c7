use std::time::{Duration, Instant};

use roomsync::models::{DaySchedule, SchedulePatch, WeeklySchedule};
use roomsync::services::DeviceSyncClient;
use serde_json::json;
use tokio::net::TcpListener;

mod common;

use common::fake_device::{unreachable_address, FakeDevice};

#[tokio::test]
async fn test_push_temp_config() {
    let device = FakeDevice::start().await;
    let client = DeviceSyncClient::new().unwrap();

    let status = client.push_temp_config(device.address(), 19.5, 23.0).await;
    assert!(status.success);
    assert_eq!(status.error, None);

    let requests = device.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, "/temp");
    assert_eq!(
        requests[0].body,
        Some(json!({"minTemp": 19.5, "maxTemp": 23.0}))
    );
}

#[tokio::test]
async fn test_push_hours_config_wire_format() {
    let device = FakeDevice::start().await;
    let client = DeviceSyncClient::new().unwrap();

    let week = WeeklySchedule::normalize(&SchedulePatch {
        monday: Some(DaySchedule::open("08:30", "17:00")),
        ..Default::default()
    });

    let status = client.push_hours_config(device.address(), &week).await;
    assert!(status.success);

    let requests = device.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, "/hours");

    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(body.as_object().unwrap().len(), 7);
    assert_eq!(body["monday"], json!({"start": "08:30", "end": "17:00"}));
    // closed days carry explicit nulls and nothing else
    assert_eq!(body["wednesday"], json!({"start": null, "end": null}));
}

#[tokio::test]
async fn test_push_reports_device_error_status() {
    let device = FakeDevice::with_status(500).await;
    let client = DeviceSyncClient::new().unwrap();

    let status = client.push_temp_config(device.address(), 20.0, 24.0).await;
    assert!(!status.success);
    assert_eq!(
        status.error,
        Some("device responded with status 500".to_string())
    );
}

#[tokio::test]
async fn test_push_fails_fast_when_connection_refused() {
    let address = unreachable_address().await;
    let client = DeviceSyncClient::new().unwrap();

    let status = client.push_temp_config(&address, 20.0, 24.0).await;
    assert!(!status.success);
    assert!(
        status
            .error
            .unwrap()
            .starts_with("failed to connect to device")
    );
}

#[tokio::test]
async fn test_push_gives_up_after_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    // hold accepted connections open without ever answering
    tokio::spawn(async move {
        let mut open = Vec::new();
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            open.push(stream);
        }
    });

    let client = DeviceSyncClient::with_timeout(Duration::from_millis(200)).unwrap();

    let started = Instant::now();
    let status = client.push_temp_config(&address, 20.0, 24.0).await;

    assert!(!status.success);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(
        status
            .error
            .unwrap()
            .starts_with("failed to connect to device")
    );
}

#[tokio::test]
async fn test_ping() {
    let device = FakeDevice::start().await;
    let client = DeviceSyncClient::new().unwrap();

    assert!(client.ping(device.address()).await);

    let requests = device.requests().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/");

    // an error status is not reachable enough
    let failing = FakeDevice::with_status(500).await;
    assert!(!client.ping(failing.address()).await);

    let dead = unreachable_address().await;
    assert!(!client.ping(&dead).await);
}
