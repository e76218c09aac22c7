#[derive(Debug, thiserror::Error)]
pub enum MeasurementError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("No room is bound to device {0}")]
    UnknownDevice(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
