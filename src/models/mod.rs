mod measurement;
mod room;
mod schedule;

pub use measurement::{Measurement, MeasurementTable, NewMeasurement};
pub use room::{NewRoom, Room, RoomPatch, RoomTable};
pub use schedule::{DaySchedule, SchedulePatch, Weekday, WeeklySchedule};

pub trait Table {
    /// The table name
    fn name(&self) -> &'static str;

    /// DDL that creates the table
    fn create(&self) -> String;

    /// DDL that drops the table
    fn dispose(&self) -> String;

    /// Names of the tables this table references
    fn dependencies(&self) -> Vec<&'static str>;
}
