use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::broadcast;

use crate::configs::Storage;
use crate::errors::MeasurementError;
use crate::models::{Measurement, NewMeasurement, Room};
use crate::repositories::{MeasurementRepository, RoomRepository};
use crate::services::threshold::{self, Alert};

/// Broadcast when a stored reading breaches a configured bound. Alerts
/// are emitted for external notification, nothing is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AlertEvent {
    pub room_id: String,
    pub room_name: String,
    pub measurement_id: i64,
    pub alert: Alert,
}

pub struct MeasurementService {
    rooms: RoomRepository,
    measurements: MeasurementRepository,
    sender: broadcast::Sender<AlertEvent>,
}

impl MeasurementService {
    pub fn new(storage: Arc<Storage>) -> Self {
        let (sender, _) = broadcast::channel(100);

        Self {
            rooms: RoomRepository::new(storage.clone()),
            measurements: MeasurementRepository::new(storage),
            sender,
        }
    }

    /// New receiver for alert events. A subscriber that lags too far
    /// behind misses events, the channel never blocks ingestion.
    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.sender.subscribe()
    }

    /// Stores one reading for a live room, then evaluates thresholds on
    /// it. An unknown or deleted room rejects the reading before any
    /// write happens.
    pub async fn ingest(
        &self,
        room_id: &str,
        reading: NewMeasurement,
    ) -> Result<Measurement, MeasurementError> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or(MeasurementError::RoomNotFound)?;

        self.store_and_evaluate(&room, reading).await
    }

    /// Batch ingest for devices that only know their own address. The
    /// whole batch is rejected when no live room is bound to it.
    pub async fn ingest_from_device(
        &self,
        address: &str,
        readings: Vec<NewMeasurement>,
    ) -> Result<Vec<Measurement>, MeasurementError> {
        let room = self
            .rooms
            .find_by_device_address(address)
            .await?
            .ok_or_else(|| MeasurementError::UnknownDevice(address.to_string()))?;

        let mut stored = Vec::with_capacity(readings.len());
        for reading in readings {
            stored.push(self.store_and_evaluate(&room, reading).await?);
        }

        Ok(stored)
    }

    /// Latest readings, newest first. History stays addressable after the
    /// owning room is soft-deleted, so no existence check here.
    pub async fn latest_measurements(
        &self,
        room_id: &str,
        limit: i64,
    ) -> Result<Vec<Measurement>, MeasurementError> {
        Ok(self
            .measurements
            .find_latest_by_room_id(room_id, limit)
            .await?)
    }

    pub async fn measurements_between(
        &self,
        room_id: &str,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
    ) -> Result<Vec<Measurement>, MeasurementError> {
        Ok(self
            .measurements
            .find_by_room_id_and_time_range(room_id, start_time, end_time)
            .await?)
    }

    /// Today's readings, midnight UTC to now.
    pub async fn measurements_today(
        &self,
        room_id: &str,
    ) -> Result<Vec<Measurement>, MeasurementError> {
        let now = OffsetDateTime::now_utc();
        let midnight = now.replace_time(time::Time::MIDNIGHT);

        self.measurements_between(room_id, midnight, now).await
    }

    async fn store_and_evaluate(
        &self,
        room: &Room,
        reading: NewMeasurement,
    ) -> Result<Measurement, MeasurementError> {
        let measurement = self.measurements.create(&room.id, &reading).await?;

        for alert in threshold::evaluate(room, &measurement) {
            tracing::warn!("room {} ({}): {}", room.id, room.name, alert);

            // nobody listening is fine, alerts are best-effort
            let _ = self.sender.send(AlertEvent {
                room_id: room.id.clone(),
                room_name: room.name.clone(),
                measurement_id: measurement.id,
                alert,
            });
        }

        Ok(measurement)
    }
}
