use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleViolation, TimeField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub is_closed: bool,
}

impl DaySchedule {
    pub fn closed() -> Self {
        Self {
            start: None,
            end: None,
            is_closed: true,
        }
    }

    pub fn open(start: &str, end: &str) -> Self {
        Self {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            is_closed: false,
        }
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self::closed()
    }
}

/// A full week of opening hours. Every day is always present, a day the
/// caller never supplied stays closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklySchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

/// Day-wise partial schedule, only supplied days replace stored ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulePatch {
    pub monday: Option<DaySchedule>,
    pub tuesday: Option<DaySchedule>,
    pub wednesday: Option<DaySchedule>,
    pub thursday: Option<DaySchedule>,
    pub friday: Option<DaySchedule>,
    pub saturday: Option<DaySchedule>,
    pub sunday: Option<DaySchedule>,
}

impl WeeklySchedule {
    /// Builds a full week from a day-wise partial input. Missing days come
    /// out closed and stray times on closed days are dropped.
    pub fn normalize(partial: &SchedulePatch) -> Self {
        Self::default().apply(partial)
    }

    /// Merges a day-wise patch over this week. Closed days never keep
    /// leftover times, whether they come from the patch or the base week.
    pub fn apply(&self, patch: &SchedulePatch) -> Self {
        let mut week = self.clone();

        for (entry, patched) in [
            (&mut week.monday, &patch.monday),
            (&mut week.tuesday, &patch.tuesday),
            (&mut week.wednesday, &patch.wednesday),
            (&mut week.thursday, &patch.thursday),
            (&mut week.friday, &patch.friday),
            (&mut week.saturday, &patch.saturday),
            (&mut week.sunday, &patch.sunday),
        ] {
            if let Some(day) = patched {
                *entry = day.clone();
            }
            if entry.is_closed {
                entry.start = None;
                entry.end = None;
            }
        }

        week
    }

    /// Week-ordered view, used by validation and the device hours payload.
    pub fn days(&self) -> [(Weekday, &DaySchedule); 7] {
        [
            (Weekday::Monday, &self.monday),
            (Weekday::Tuesday, &self.tuesday),
            (Weekday::Wednesday, &self.wednesday),
            (Weekday::Thursday, &self.thursday),
            (Weekday::Friday, &self.friday),
            (Weekday::Saturday, &self.saturday),
            (Weekday::Sunday, &self.sunday),
        ]
    }

    /// Checks every open day for present, well formed and ordered times.
    /// Violations are collected across the whole week so a caller can fix
    /// the schedule in one round-trip instead of one day at a time.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let mut violations = Vec::new();

        for (day, entry) in self.days() {
            if entry.is_closed {
                continue;
            }

            let start = checked_time(day, TimeField::Start, entry.start.as_deref(), &mut violations);
            let end = checked_time(day, TimeField::End, entry.end.as_deref(), &mut violations);

            if let (Some((start_at, start_text)), Some((end_at, end_text))) = (start, end) {
                if start_at > end_at {
                    violations.push(ScheduleViolation::StartAfterEnd {
                        day,
                        start: start_text.to_string(),
                        end: end_text.to_string(),
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::Invalid { violations })
        }
    }
}

fn checked_time<'a>(
    day: Weekday,
    field: TimeField,
    value: Option<&'a str>,
    violations: &mut Vec<ScheduleViolation>,
) -> Option<(u16, &'a str)> {
    match value {
        None => {
            violations.push(ScheduleViolation::MissingTime { day, field });
            None
        }
        Some(text) => match parse_grid_time(text) {
            Some(minutes) => Some((minutes, text)),
            None => {
                violations.push(ScheduleViolation::InvalidFormat {
                    day,
                    field,
                    value: text.to_string(),
                });
                None
            }
        },
    }
}

/// Parses `HH:MM` on a 30 minute grid into minutes since midnight. Hours
/// are exactly two digits 00..=23 and minutes are either "00" or "30".
fn parse_grid_time(value: &str) -> Option<u16> {
    let (hours, minutes) = value.split_once(':')?;

    if hours.len() != 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: u16 = hours.parse().ok()?;
    if hour > 23 {
        return None;
    }

    let minute = match minutes {
        "00" => 0,
        "30" => 30,
        _ => return None,
    };

    Some(hour * 60 + minute)
}
