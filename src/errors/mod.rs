pub mod measurement;
pub mod room;
pub mod schedule;

pub use measurement::MeasurementError;
pub use room::RoomError;
pub use schedule::{ScheduleError, ScheduleViolation, TimeField};
