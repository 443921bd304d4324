//! Work entry model.
//!
//! A work entry is one contiguous shift: a work date, start and end times
//! at minute precision, and the task performed. Duration is computed from
//! the times at construction and stored as a 2-decimal-place hour value.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// One contiguous shift worked by an employee.
///
/// Entries become immutable once their parent week leaves the `open`
/// state; the week enforces this by only accepting entries while open.
///
/// # Example
///
/// ```
/// use youth_labor_engine::models::WorkEntry;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let entry = WorkEntry::new(
///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
///     "harvest",
///     false,
/// )
/// .unwrap();
/// assert_eq!(entry.hours, Decimal::new(450, 2)); // 4.50
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The calendar date the shift was worked.
    pub work_date: NaiveDate,
    /// Shift start time (minute precision, local wall clock).
    pub start_time: NaiveTime,
    /// Shift end time (minute precision, local wall clock).
    pub end_time: NaiveTime,
    /// The task code performed during the shift.
    pub task_code: String,
    /// Shift duration in hours, rounded to 2 decimal places.
    pub hours: Decimal,
    /// Whether school was in session on the work date.
    pub is_school_day: bool,
    /// Optional note explaining a manual override.
    #[serde(default)]
    pub override_note: Option<String>,
    /// Name of the supervisor attesting to the shift, when required.
    #[serde(default)]
    pub supervisor_attestation: Option<String>,
    /// Whether a meal break was confirmed for the shift.
    #[serde(default)]
    pub meal_break_confirmed: Option<bool>,
}

impl WorkEntry {
    /// Creates a new entry, computing its duration from the times.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEntry`] when the end time is not
    /// after the start time. Shifts do not span midnight; an overnight
    /// shift is recorded as two entries.
    pub fn new(
        work_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        task_code: &str,
        is_school_day: bool,
    ) -> EngineResult<WorkEntry> {
        let id = Uuid::new_v4();
        if end_time <= start_time {
            return Err(EngineError::InvalidEntry {
                entry_id: id,
                message: "end time must be after start time".to_string(),
            });
        }

        Ok(WorkEntry {
            id,
            work_date,
            start_time,
            end_time,
            task_code: task_code.to_string(),
            hours: duration_hours(start_time, end_time),
            is_school_day,
            override_note: None,
            supervisor_attestation: None,
            meal_break_confirmed: None,
        })
    }
}

/// Computes the duration between two same-day times in decimal hours,
/// rounded to 2 decimal places.
pub fn duration_hours(start_time: NaiveTime, end_time: NaiveTime) -> Decimal {
    let minutes = (end_time - start_time).num_minutes();
    (Decimal::new(minutes, 0) / Decimal::new(60, 0)).round_dp(2)
}
