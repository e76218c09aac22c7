use std::fmt;

use serde::Serialize;

use crate::models::{Measurement, Room};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Co2AboveThreshold,
    TemperatureBelowMinimum,
    TemperatureAboveMaximum,
    HumidityBelowMinimum,
    HumidityAboveMaximum,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            AlertKind::Co2AboveThreshold => "CO2 above threshold",
            AlertKind::TemperatureBelowMinimum => "temperature below minimum",
            AlertKind::TemperatureAboveMaximum => "temperature above maximum",
            AlertKind::HumidityBelowMinimum => "humidity below minimum",
            AlertKind::HumidityAboveMaximum => "humidity above maximum",
        };

        f.write_str(kind)
    }
}

/// One breached bound: the measured value and the limit it crossed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub value: f64,
    pub limit: f64,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AlertKind::Co2AboveThreshold => {
                write!(f, "CO2 level ({}) exceeds threshold ({})", self.value, self.limit)
            }
            AlertKind::TemperatureBelowMinimum => {
                write!(f, "Temperature ({}) below minimum ({})", self.value, self.limit)
            }
            AlertKind::TemperatureAboveMaximum => {
                write!(f, "Temperature ({}) above maximum ({})", self.value, self.limit)
            }
            AlertKind::HumidityBelowMinimum => {
                write!(f, "Humidity ({}) below minimum ({})", self.value, self.limit)
            }
            AlertKind::HumidityAboveMaximum => {
                write!(f, "Humidity ({}) above maximum ({})", self.value, self.limit)
            }
        }
    }
}

/// Compares a reading against the room's configured bounds and returns one
/// alert per breached bound. A bound the room never configured suppresses
/// its check, and an absent reading checks nothing. Zero is a real reading,
/// only `None` means "no sensor value".
pub fn evaluate(room: &Room, measurement: &Measurement) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let (Some(limit), Some(value)) = (room.co2_threshold, measurement.co2) {
        if value > limit {
            alerts.push(Alert {
                kind: AlertKind::Co2AboveThreshold,
                value,
                limit,
            });
        }
    }

    if let (Some(limit), Some(value)) = (room.min_temp, measurement.temperature) {
        if value < limit {
            alerts.push(Alert {
                kind: AlertKind::TemperatureBelowMinimum,
                value,
                limit,
            });
        }
    }

    if let (Some(limit), Some(value)) = (room.max_temp, measurement.temperature) {
        if value > limit {
            alerts.push(Alert {
                kind: AlertKind::TemperatureAboveMaximum,
                value,
                limit,
            });
        }
    }

    if let (Some(limit), Some(value)) = (room.min_humidity, measurement.humidity) {
        if value < limit {
            alerts.push(Alert {
                kind: AlertKind::HumidityBelowMinimum,
                value,
                limit,
            });
        }
    }

    if let (Some(limit), Some(value)) = (room.max_humidity, measurement.humidity) {
        if value > limit {
            alerts.push(Alert {
                kind: AlertKind::HumidityAboveMaximum,
                value,
                limit,
            });
        }
    }

    alerts
}
