use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Measurement {
    pub id: i64,
    pub room_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub co2: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub climate_status: Option<bool>,
}

/// Device-originated reading. Older firmware revisions spell the fields
/// differently, those spellings are accepted as aliases. A field the
/// device never sent stays absent, it is not defaulted to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeasurement {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    #[serde(alias = "value_co2", alias = "valueCO2")]
    pub co2: Option<f64>,
    #[serde(alias = "value_temp", alias = "valueTemp")]
    pub temperature: Option<f64>,
    #[serde(alias = "value_hum", alias = "valueHum")]
    pub humidity: Option<f64>,
    #[serde(alias = "clim_status", alias = "climStatus")]
    pub climate_status: Option<bool>,
}

#[derive(Clone)]
pub struct MeasurementTable;

impl Table for MeasurementTable {
    fn name(&self) -> &'static str {
        "measurements"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS measurements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_id TEXT NOT NULL,
                timestamp TIMESTAMP NOT NULL,
                co2 REAL,
                temperature REAL,
                humidity REAL,
                climate_status BOOLEAN,
                FOREIGN KEY (room_id) REFERENCES rooms (id)
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS measurements;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["rooms"]
    }
}
