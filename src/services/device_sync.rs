use std::time::Duration;

use serde::Serialize;

use crate::models::WeeklySchedule;

/// Single attempt per push, no retry. A room mutation must never wait
/// longer than this on an unreachable device.
pub const PUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one push. Failures ride on the owning mutation's response
/// instead of failing it, an offline device is an expected condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncStatus {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

pub struct DeviceSyncClient {
    client: reqwest::Client,
}

impl DeviceSyncClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(PUSH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }

    /// `PATCH http://{address}/temp` with the room's comfort bounds.
    pub async fn push_temp_config(
        &self,
        address: &str,
        min_temp: f64,
        max_temp: f64,
    ) -> SyncStatus {
        let body = serde_json::json!({
            "minTemp": min_temp,
            "maxTemp": max_temp,
        });

        self.patch(address, "temp", &body).await
    }

    /// `PATCH http://{address}/hours` with the whole week keyed by day
    /// name. Closed days carry null times, the device clears them.
    pub async fn push_hours_config(&self, address: &str, schedule: &WeeklySchedule) -> SyncStatus {
        let body = hours_body(schedule);

        self.patch(address, "hours", &body).await
    }

    /// Reachability probe, `GET http://{address}/`.
    pub async fn ping(&self, address: &str) -> bool {
        let url = format!("http://{address}/");

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn patch(&self, address: &str, path: &str, body: &serde_json::Value) -> SyncStatus {
        let url = format!("http://{address}/{path}");

        tracing::debug!("push {} config to {}", path, address);

        match self.client.patch(&url).json(body).send().await {
            Ok(response) if response.status().is_success() => SyncStatus::ok(),
            Ok(response) => {
                let reason = format!("device responded with status {}", response.status().as_u16());
                tracing::warn!("{} config push to {} failed: {}", path, address, reason);

                SyncStatus::failed(reason)
            }
            Err(error) => {
                let reason = format!("failed to connect to device: {error}");
                tracing::warn!("{} config push to {} failed: {}", path, address, reason);

                SyncStatus::failed(reason)
            }
        }
    }
}

fn hours_body(schedule: &WeeklySchedule) -> serde_json::Value {
    let mut body = serde_json::Map::new();

    for (day, entry) in schedule.days() {
        body.insert(
            day.to_string(),
            serde_json::json!({
                "start": entry.start,
                "end": entry.end,
            }),
        );
    }

    serde_json::Value::Object(body)
}
