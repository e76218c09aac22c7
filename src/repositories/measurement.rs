use std::sync::Arc;

use sqlx::Error;
use time::{OffsetDateTime, UtcOffset};

use crate::configs::Storage;
use crate::models::{Measurement, NewMeasurement};

pub struct MeasurementRepository {
    storage: Arc<Storage>,
}

impl MeasurementRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl MeasurementRepository {
    // Persist a reading, stamping it with the current time when the device
    // sent none. Stored in UTC so text-encoded timestamps compare correctly.
    pub async fn create(&self, room_id: &str, item: &NewMeasurement) -> Result<Measurement, Error> {
        let timestamp = item
            .timestamp
            .unwrap_or_else(OffsetDateTime::now_utc)
            .to_offset(UtcOffset::UTC);

        let measurement: Measurement = sqlx::query_as(
            r#"
            INSERT INTO measurements (room_id, timestamp, co2, temperature, humidity, climate_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(timestamp)
        .bind(item.co2)
        .bind(item.temperature)
        .bind(item.humidity)
        .bind(item.climate_status)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(measurement)
    }

    // Latest N readings for a room
    pub async fn find_latest_by_room_id(
        &self,
        room_id: &str,
        limit: i64,
    ) -> Result<Vec<Measurement>, Error> {
        let measurements: Vec<Measurement> = sqlx::query_as(
            r#"
            SELECT * FROM measurements
            WHERE room_id = $1
            ORDER BY timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(room_id)
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(measurements)
    }

    // Readings within a time range, oldest first
    pub async fn find_by_room_id_and_time_range(
        &self,
        room_id: &str,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
    ) -> Result<Vec<Measurement>, Error> {
        let measurements: Vec<Measurement> = sqlx::query_as(
            r#"
            SELECT * FROM measurements
            WHERE room_id = $1 AND timestamp >= $2 AND timestamp <= $3
            ORDER BY timestamp ASC
            "#,
        )
        .bind(room_id)
        // bounds take the same UTC normalization as stored rows, the text
        // comparison only holds within a single offset
        .bind(start_time.to_offset(UtcOffset::UTC))
        .bind(end_time.to_offset(UtcOffset::UTC))
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(measurements)
    }
}
