mod measurement;
mod room;

pub use measurement::MeasurementRepository;
pub use room::RoomRepository;
