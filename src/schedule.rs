//! SUMA task schedule validation.
//!
//! A schedule is five whitespace-separated fields, cron style:
//! `minute hour day month weekday`. Each field is `*` or an integer in range.

use thiserror::Error;

/// Range of each field, in order.
const FIELDS: [(&str, u32, u32); 5] = [
    ("minute", 0, 59),
    ("hour", 0, 23),
    ("day", 1, 31),
    ("month", 1, 12),
    ("weekday", 0, 6),
];

/// A `sched_time` that is not five in-range fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Bad schedule time '{0}'")]
pub struct BadScheduleTime(pub String);

/// What an edit does with a task, from its `sched_time` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleRequest {
    /// No schedule given: save the task.
    Save,
    /// Blank schedule: remove the schedule.
    Unschedule,
    /// Valid schedule.
    Schedule(String),
}

impl ScheduleRequest {
    pub fn from_param(sched_time: Option<&str>) -> Result<Self, BadScheduleTime> {
        match sched_time {
            None => Ok(Self::Save),
            Some(spec) if spec.trim().is_empty() => Ok(Self::Unschedule),
            Some(spec) => {
                validate_schedule(spec)?;
                Ok(Self::Schedule(spec.to_string()))
            }
        }
    }
}

/// `*` or a plain integer within `[min, max]`.
pub fn check_time(value: &str, min: u32, max: u32) -> bool {
    if value == "*" {
        return true;
    }
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    value.parse::<u32>().is_ok_and(|v| (min..=max).contains(&v))
}

/// Validate a five-field schedule.
pub fn validate_schedule(spec: &str) -> Result<(), BadScheduleTime> {
    let fields: Vec<&str> = spec.split_whitespace().collect();
    let valid = fields.len() == FIELDS.len()
        && fields
            .iter()
            .zip(FIELDS.iter())
            .all(|(value, (_, min, max))| check_time(value, *min, *max));

    if valid {
        Ok(())
    } else {
        Err(BadScheduleTime(spec.to_string()))
    }
}
