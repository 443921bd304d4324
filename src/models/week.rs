//! Work week (timesheet) model and state machine.
//!
//! A week is one employee crossed with one Sunday-aligned 7-day period.
//! It moves `open -> submitted -> approved`, with `submitted -> open`
//! available when a reviewer returns it for correction. Entries may only
//! be attached while the week is open, which is what makes them immutable
//! afterwards.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkEntry;

/// The lifecycle state of a work week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    /// Entries may be added or corrected.
    Open,
    /// Submitted for review; all compliance checks passed at submission.
    Submitted,
    /// Approved for payroll.
    Approved,
}

impl std::fmt::Display for WeekStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekStatus::Open => write!(f, "open"),
            WeekStatus::Submitted => write!(f, "submitted"),
            WeekStatus::Approved => write!(f, "approved"),
        }
    }
}

/// One employee's timesheet for one Sunday-aligned week.
///
/// # Example
///
/// ```
/// use youth_labor_engine::models::{Week, WeekStatus};
/// use chrono::NaiveDate;
///
/// // 2024-06-02 is a Sunday
/// let week = Week::new(
///     "emp_001".to_string(),
///     NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(week.status, WeekStatus::Open);
/// assert_eq!(
///     week.period_end(),
///     NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    /// Unique identifier for the week.
    pub id: Uuid,
    /// The employee this timesheet belongs to.
    pub employee_id: String,
    /// The Sunday the week starts on.
    pub week_start: NaiveDate,
    /// Current lifecycle state.
    pub status: WeekStatus,
    /// The entries recorded against this week.
    pub entries: Vec<WorkEntry>,
}

impl Week {
    /// Creates a new open week.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WeekStartNotSunday`] when `week_start` is
    /// not a Sunday.
    pub fn new(employee_id: String, week_start: NaiveDate) -> EngineResult<Week> {
        if week_start.weekday() != Weekday::Sun {
            return Err(EngineError::WeekStartNotSunday { week_start });
        }
        Ok(Week {
            id: Uuid::new_v4(),
            employee_id,
            week_start,
            status: WeekStatus::Open,
            entries: Vec::new(),
        })
    }

    /// The Saturday ending this week (inclusive).
    pub fn period_end(&self) -> NaiveDate {
        self.week_start + Duration::days(6)
    }

    /// Checks whether a date falls within the week's 7-day span.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date <= self.period_end()
    }

    /// Adds an entry to an open week.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidWeekState`] when the week is not open
    ///   (entries are immutable once the week has been submitted).
    /// - [`EngineError::EntryOutsideWeek`] when the entry's work date is
    ///   outside the 7-day span.
    pub fn add_entry(&mut self, entry: WorkEntry) -> EngineResult<()> {
        if self.status != WeekStatus::Open {
            return Err(EngineError::InvalidWeekState {
                week_id: self.id,
                expected: WeekStatus::Open.to_string(),
                actual: self.status.to_string(),
            });
        }
        if !self.contains_date(entry.work_date) {
            return Err(EngineError::EntryOutsideWeek {
                work_date: entry.work_date,
                week_start: self.week_start,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Marks the week submitted. Caller is responsible for having run the
    /// compliance gate first; see `MemoryStore::submit_week`.
    pub(crate) fn mark_submitted(&mut self) -> EngineResult<()> {
        self.transition(WeekStatus::Open, WeekStatus::Submitted)
    }

    /// Approves a submitted week.
    pub(crate) fn mark_approved(&mut self) -> EngineResult<()> {
        self.transition(WeekStatus::Submitted, WeekStatus::Approved)
    }

    /// Returns a submitted week to open for correction.
    pub(crate) fn mark_reopened(&mut self) -> EngineResult<()> {
        self.transition(WeekStatus::Submitted, WeekStatus::Open)
    }

    fn transition(&mut self, expected: WeekStatus, next: WeekStatus) -> EngineResult<()> {
        if self.status != expected {
            return Err(EngineError::InvalidWeekState {
                week_id: self.id,
                expected: expected.to_string(),
                actual: self.status.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}
