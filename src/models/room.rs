use serde::{Deserialize, Serialize};

use super::Table;
use super::schedule::{SchedulePatch, WeeklySchedule};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub device_address: Option<String>,
    pub volume: f64,
    pub glazed_surface: f64,
    pub door_count: i64,
    pub exterior_wall_count: i64,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub co2_threshold: Option<f64>,
    pub min_humidity: Option<f64>,
    pub max_humidity: Option<f64>,
    #[sqlx(json)]
    pub schedule: WeeklySchedule,
    /// Soft-delete flag, a dropped room keeps its measurement history.
    pub is_exists: bool,
}

/// Create input. Structural fields are optional here so their absence can
/// be reported as a validation error instead of a deserialization one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRoom {
    pub name: String,
    pub device_address: Option<String>,
    pub volume: Option<f64>,
    pub glazed_surface: Option<f64>,
    pub door_count: Option<i64>,
    pub exterior_wall_count: Option<i64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub co2_threshold: Option<f64>,
    pub min_humidity: Option<f64>,
    pub max_humidity: Option<f64>,
    #[serde(default)]
    pub schedule: SchedulePatch,
}

/// Partial update, only supplied fields change. A field cannot be cleared
/// back to null through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub device_address: Option<String>,
    pub volume: Option<f64>,
    pub glazed_surface: Option<f64>,
    pub door_count: Option<i64>,
    pub exterior_wall_count: Option<i64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub co2_threshold: Option<f64>,
    pub min_humidity: Option<f64>,
    pub max_humidity: Option<f64>,
    pub schedule: Option<SchedulePatch>,
}

#[derive(Clone)]
pub struct RoomTable;

impl Table for RoomTable {
    fn name(&self) -> &'static str {
        "rooms"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS rooms (
                id TEXT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                device_address VARCHAR(255),
                volume REAL NOT NULL,
                glazed_surface REAL NOT NULL,
                door_count INTEGER NOT NULL,
                exterior_wall_count INTEGER NOT NULL,
                min_temp REAL,
                max_temp REAL,
                co2_threshold REAL,
                min_humidity REAL,
                max_humidity REAL,
                schedule JSON NOT NULL,
                is_exists BOOLEAN NOT NULL DEFAULT TRUE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS rooms;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
