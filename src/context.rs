//! Compliance context construction.
//!
//! The [`ComplianceContext`] assembles, for one employee and one work
//! week, everything the rules need: per-day hour totals, per-day age
//! bands (a week can span a birthday), per-day ordered entries, school
//! flags, and the employee's documents. Building it is pure: identical
//! inputs always produce an identical context, which is what makes the
//! rules deterministic and testable.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::calendar::AgeBand;
use crate::error::{EngineError, EngineResult};
use crate::models::{ComplianceDocument, Employee, WorkEntry};

/// Everything the compliance rules need to evaluate one week.
///
/// All per-day maps contain every date of the 7-day span, worked or not,
/// and use `BTreeMap` so iteration order is chronological.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceContext {
    /// The employee under evaluation.
    pub employee: Employee,
    /// The Sunday the week starts on.
    pub week_start: NaiveDate,
    /// The date the checks are being run (age_at_check derives from it).
    pub check_date: NaiveDate,
    /// Date -> summed hours for that date (zero for unworked days).
    pub daily_hours: BTreeMap<NaiveDate, Decimal>,
    /// Date -> the employee's age as of that date.
    pub daily_ages: BTreeMap<NaiveDate, u32>,
    /// Date -> the employee's age band as of that date.
    pub daily_age_bands: BTreeMap<NaiveDate, AgeBand>,
    /// Date -> entries for that date, ordered by start time.
    pub daily_entries: BTreeMap<NaiveDate, Vec<WorkEntry>>,
    /// True when any entry in the week is flagged as a school day.
    pub is_school_week: bool,
    /// The dates flagged as school days, in chronological order.
    pub school_days: Vec<NaiveDate>,
    /// The employee's compliance documents.
    pub documents: Vec<ComplianceDocument>,
}

impl ComplianceContext {
    /// Builds the context for one employee-week.
    ///
    /// # Errors
    ///
    /// - [`EngineError::WeekStartNotSunday`] when `week_start` is not a
    ///   Sunday.
    /// - [`EngineError::EntryOutsideWeek`] when any entry's work date
    ///   falls outside the 7-day span.
    ///
    /// # Example
    ///
    /// ```
    /// use youth_labor_engine::context::ComplianceContext;
    /// use youth_labor_engine::models::{Employee, EmployeeStatus, WorkEntry};
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     date_of_birth: NaiveDate::from_ymd_opt(2009, 1, 10).unwrap(),
    ///     is_supervisor: false,
    ///     status: EmployeeStatus::Active,
    /// };
    /// let entry = WorkEntry::new(
    ///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    ///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    ///     "harvest",
    ///     false,
    /// )
    /// .unwrap();
    ///
    /// let ctx = ComplianceContext::build(
    ///     employee,
    ///     NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
    ///     vec![entry],
    ///     vec![],
    ///     NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
    /// )
    /// .unwrap();
    /// assert!(!ctx.is_school_week);
    /// assert_eq!(ctx.daily_hours.len(), 7);
    /// ```
    pub fn build(
        employee: Employee,
        week_start: NaiveDate,
        entries: Vec<WorkEntry>,
        documents: Vec<ComplianceDocument>,
        check_date: NaiveDate,
    ) -> EngineResult<ComplianceContext> {
        if week_start.weekday() != Weekday::Sun {
            return Err(EngineError::WeekStartNotSunday { week_start });
        }

        let week_end = week_start + Duration::days(6);
        for entry in &entries {
            if entry.work_date < week_start || entry.work_date > week_end {
                return Err(EngineError::EntryOutsideWeek {
                    work_date: entry.work_date,
                    week_start,
                });
            }
        }

        let mut daily_hours = BTreeMap::new();
        let mut daily_ages = BTreeMap::new();
        let mut daily_age_bands = BTreeMap::new();
        let mut daily_entries: BTreeMap<NaiveDate, Vec<WorkEntry>> = BTreeMap::new();

        for offset in 0..7 {
            let date = week_start + Duration::days(offset);
            daily_hours.insert(date, Decimal::ZERO);
            daily_ages.insert(date, employee.age_on(date));
            daily_age_bands.insert(date, employee.age_band_on(date));
            daily_entries.insert(date, Vec::new());
        }

        for entry in entries {
            if let Some(total) = daily_hours.get_mut(&entry.work_date) {
                *total += entry.hours;
            }
            if let Some(day) = daily_entries.get_mut(&entry.work_date) {
                day.push(entry);
            }
        }
        for day in daily_entries.values_mut() {
            day.sort_by_key(|entry| entry.start_time);
        }

        let school_days: Vec<NaiveDate> = daily_entries
            .iter()
            .filter(|(_, day)| day.iter().any(|entry| entry.is_school_day))
            .map(|(date, _)| *date)
            .collect();
        let is_school_week = !school_days.is_empty();

        Ok(ComplianceContext {
            employee,
            week_start,
            check_date,
            daily_hours,
            daily_ages,
            daily_age_bands,
            daily_entries,
            is_school_week,
            school_days,
            documents,
        })
    }

    /// The dates of the week whose age band matches `band`, chronological.
    pub fn dates_in_band(&self, band: AgeBand) -> Vec<NaiveDate> {
        self.daily_age_bands
            .iter()
            .filter(|(_, day_band)| **day_band == band)
            .map(|(date, _)| *date)
            .collect()
    }

    /// True when at least one date of the week falls in `band`.
    pub fn has_band(&self, band: AgeBand) -> bool {
        self.daily_age_bands.values().any(|day_band| *day_band == band)
    }

    /// True when the date is flagged as a school day.
    pub fn is_school_day(&self, date: NaiveDate) -> bool {
        self.school_days.contains(&date)
    }

    /// The entries for a date, ordered by start time.
    pub fn entries_on(&self, date: NaiveDate) -> &[WorkEntry] {
        self.daily_entries
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The summed hours for a date (zero for unworked days).
    pub fn hours_on(&self, date: NaiveDate) -> Decimal {
        self.daily_hours.get(&date).copied().unwrap_or(Decimal::ZERO)
    }
}
