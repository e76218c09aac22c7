use crate::errors::ScheduleError;

#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Room name already exists")]
    RoomNameExists,

    #[error("Missing value for {0}")]
    MissingField(&'static str),

    #[error("Negative value {value} for {field}")]
    NegativeField { field: &'static str, value: f64 },

    #[error("Minimum temperature {min} is above maximum temperature {max}")]
    TemperatureBoundsInverted { min: f64, max: f64 },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
