//! Effective-dated rate resolution.
//!
//! The rate in force for a task code on a work date is the one with the
//! maximum effective date on or before that date. Absence of a rate is a
//! hard error at the calling layer, never a zero-rate fallback.

use chrono::NaiveDate;

use crate::models::TaskCodeRate;

/// Selects the rate in force on `work_date` from a rate history.
///
/// The history does not need to be sorted. Returns `None` when no rate
/// has an effective date on or before the work date; callers map that to
/// [`crate::error::EngineError::RateNotFound`].
///
/// # Example
///
/// ```
/// use youth_labor_engine::models::TaskCodeRate;
/// use youth_labor_engine::payroll::resolve_effective_rate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rates = vec![
///     TaskCodeRate {
///         task_code: "harvest".to_string(),
///         effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         hourly_rate: Decimal::new(800, 2),
///     },
///     TaskCodeRate {
///         task_code: "harvest".to_string(),
///         effective_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///         hourly_rate: Decimal::new(900, 2),
///     },
/// ];
///
/// let in_march = resolve_effective_rate(&rates, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
/// assert_eq!(in_march.unwrap().hourly_rate, Decimal::new(800, 2));
///
/// let in_july = resolve_effective_rate(&rates, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
/// assert_eq!(in_july.unwrap().hourly_rate, Decimal::new(900, 2));
/// ```
pub fn resolve_effective_rate(
    rates: &[TaskCodeRate],
    work_date: NaiveDate,
) -> Option<&TaskCodeRate> {
    rates
        .iter()
        .filter(|rate| rate.effective_date <= work_date)
        .max_by_key(|rate| rate.effective_date)
}
