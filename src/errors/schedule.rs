use std::fmt;

use crate::models::Weekday;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid schedule: {}", format_violations(.violations))]
    Invalid { violations: Vec<ScheduleViolation> },
}

/// One broken rule on one day. A whole-week validation pass returns every
/// violation it found, not just the first.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleViolation {
    #[error("Missing {field} time for {day}")]
    MissingTime { day: Weekday, field: TimeField },

    #[error("Invalid {field} time \"{value}\" for {day}")]
    InvalidFormat {
        day: Weekday,
        field: TimeField,
        value: String,
    },

    #[error("Start time {start} is after end time {end} for {day}")]
    StartAfterEnd {
        day: Weekday,
        start: String,
        end: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Start => f.write_str("start"),
            TimeField::End => f.write_str("end"),
        }
    }
}

fn format_violations(violations: &[ScheduleViolation]) -> String {
    violations
        .iter()
        .map(|violation| violation.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
