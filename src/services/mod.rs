pub mod threshold;

mod device_sync;
mod measurement_service;
mod room_service;

pub use device_sync::{DeviceSyncClient, SyncStatus, PUSH_TIMEOUT};
pub use measurement_service::{AlertEvent, MeasurementService};
pub use room_service::{DeviceSyncReport, RoomMutation, RoomService};
pub use threshold::{Alert, AlertKind};
