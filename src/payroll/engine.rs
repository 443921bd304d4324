//! Payroll earnings computation.
//!
//! Earnings accumulate into two buckets keyed by the task code's
//! agricultural flag. Overtime applies only to the non-agricultural
//! bucket above 40 hours per week, and only as the extra 0.5x premium on
//! the bucket's weighted average rate; straight time for those hours is
//! already in the bucket total. All math is decimal; rounding to 2
//! places happens only when the record is built.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::config::WageFloors;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollRecord, TaskCode, TaskCodeRate, Week, WeekStatus, WorkEntry, money};
use crate::payroll::rates::resolve_effective_rate;
use crate::store::MemoryStore;

/// Weekly hours past which non-agricultural work earns the overtime
/// premium.
pub const WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// The 0.5x overtime premium multiplier.
const OVERTIME_PREMIUM_MULTIPLIER: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// A resolved rate below the statutory floor for its bucket.
///
/// Floor violations never block payroll; they are logged for operator
/// follow-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WageFloorWarning {
    /// The task code whose rate is below the floor.
    pub task_code: String,
    /// The resolved hourly rate.
    pub rate: Decimal,
    /// The statutory floor it was compared against.
    pub floor: Decimal,
    /// Whether the agricultural or non-agricultural floor applied.
    pub agricultural: bool,
}

/// The raw result of computing one week's earnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarningsBreakdown {
    /// Hours worked on agricultural task codes.
    pub agricultural_hours: Decimal,
    /// Earnings from agricultural task codes.
    pub agricultural_earnings: Decimal,
    /// Hours worked on non-agricultural task codes.
    pub non_agricultural_hours: Decimal,
    /// Straight-time earnings from non-agricultural task codes.
    pub non_agricultural_earnings: Decimal,
    /// Non-agricultural hours beyond the weekly threshold.
    pub overtime_hours: Decimal,
    /// The overtime premium (0.5x the weighted average rate).
    pub overtime_earnings: Decimal,
    /// Agricultural + non-agricultural + overtime premium.
    pub total_earnings: Decimal,
    /// Below-floor rates encountered, deduplicated per task code.
    pub warnings: Vec<WageFloorWarning>,
}

impl EarningsBreakdown {
    /// Builds the immutable payroll record for a week, rounding every
    /// monetary and hour field to scale 2.
    pub fn to_record(&self, week: &Week) -> PayrollRecord {
        PayrollRecord {
            id: Uuid::new_v4(),
            week_id: week.id,
            period_start: week.week_start,
            period_end: week.period_end(),
            agricultural_hours: money(self.agricultural_hours),
            agricultural_earnings: money(self.agricultural_earnings),
            non_agricultural_hours: money(self.non_agricultural_hours),
            non_agricultural_earnings: money(self.non_agricultural_earnings),
            overtime_hours: money(self.overtime_hours),
            overtime_earnings: money(self.overtime_earnings),
            total_earnings: money(self.total_earnings),
            calculated_at: Utc::now(),
            exported_at: None,
        }
    }
}

/// Computes one week's earnings from its entries.
///
/// Every entry's rate is resolved as of its own work date, so a rate
/// change mid-week pays each day at the rate then in force.
///
/// # Errors
///
/// - [`EngineError::TaskCodeNotFound`] when an entry references an
///   unknown task code.
/// - [`EngineError::RateNotFound`] when no rate was in force on an
///   entry's work date. This is a hard error: payroll never falls back
///   to a zero rate.
pub fn compute_week_earnings(
    entries: &[WorkEntry],
    task_codes: &HashMap<String, TaskCode>,
    rate_histories: &HashMap<String, Vec<TaskCodeRate>>,
    floors: &WageFloors,
) -> EngineResult<EarningsBreakdown> {
    let mut agricultural_hours = Decimal::ZERO;
    let mut agricultural_earnings = Decimal::ZERO;
    let mut non_agricultural_hours = Decimal::ZERO;
    let mut non_agricultural_earnings = Decimal::ZERO;
    let mut warnings: Vec<WageFloorWarning> = Vec::new();

    for entry in entries {
        let task = task_codes
            .get(&entry.task_code)
            .ok_or_else(|| EngineError::TaskCodeNotFound {
                code: entry.task_code.clone(),
            })?;
        let history = rate_histories
            .get(&entry.task_code)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let rate = resolve_effective_rate(history, entry.work_date).ok_or_else(|| {
            EngineError::RateNotFound {
                task_code: entry.task_code.clone(),
                date: entry.work_date,
            }
        })?;

        let floor = if task.is_agricultural {
            floors.agricultural
        } else {
            floors.non_agricultural
        };
        if rate.hourly_rate < floor {
            let already_noted = warnings.iter().any(|warning| {
                warning.task_code == entry.task_code && warning.rate == rate.hourly_rate
            });
            if !already_noted {
                warnings.push(WageFloorWarning {
                    task_code: entry.task_code.clone(),
                    rate: rate.hourly_rate,
                    floor,
                    agricultural: task.is_agricultural,
                });
            }
        }

        let earnings = entry.hours * rate.hourly_rate;
        if task.is_agricultural {
            agricultural_hours += entry.hours;
            agricultural_earnings += earnings;
        } else {
            non_agricultural_hours += entry.hours;
            non_agricultural_earnings += earnings;
        }
    }

    let overtime_hours = if non_agricultural_hours > WEEKLY_OVERTIME_THRESHOLD {
        non_agricultural_hours - WEEKLY_OVERTIME_THRESHOLD
    } else {
        Decimal::ZERO
    };
    let overtime_earnings = if overtime_hours > Decimal::ZERO {
        let weighted_average_rate = non_agricultural_earnings / non_agricultural_hours;
        overtime_hours * weighted_average_rate * OVERTIME_PREMIUM_MULTIPLIER
    } else {
        Decimal::ZERO
    };

    Ok(EarningsBreakdown {
        agricultural_hours,
        agricultural_earnings,
        non_agricultural_hours,
        non_agricultural_earnings,
        overtime_hours,
        overtime_earnings,
        total_earnings: agricultural_earnings + non_agricultural_earnings + overtime_earnings,
        warnings,
    })
}

/// Calculates payroll for an approved week.
///
/// Idempotent per week: when a record already exists it is returned
/// unchanged rather than recalculated. Wage-floor violations are logged
/// and never block the calculation.
///
/// # Errors
///
/// - [`EngineError::WeekNotFound`] for an unknown week.
/// - [`EngineError::InvalidWeekState`] when the week is not approved.
/// - Any error from [`compute_week_earnings`].
pub fn calculate_payroll(
    store: &MemoryStore,
    floors: &WageFloors,
    week_id: Uuid,
) -> EngineResult<PayrollRecord> {
    let week = require_approved(store, week_id)?;

    if let Some(existing) = store.payroll_record_for_week(week_id) {
        return Ok(existing);
    }

    compute_and_insert(store, floors, &week)
}

/// Deletes an approved week's record and recalculates from scratch.
///
/// Used after rate corrections. Never valid on a non-approved week.
pub fn recalculate_payroll(
    store: &MemoryStore,
    floors: &WageFloors,
    week_id: Uuid,
) -> EngineResult<PayrollRecord> {
    let week = require_approved(store, week_id)?;

    store.delete_payroll_record(week_id);
    compute_and_insert(store, floors, &week)
}

fn require_approved(store: &MemoryStore, week_id: Uuid) -> EngineResult<Week> {
    let week = store.week(week_id)?;
    if week.status != WeekStatus::Approved {
        return Err(EngineError::InvalidWeekState {
            week_id,
            expected: WeekStatus::Approved.to_string(),
            actual: week.status.to_string(),
        });
    }
    Ok(week)
}

fn compute_and_insert(
    store: &MemoryStore,
    floors: &WageFloors,
    week: &Week,
) -> EngineResult<PayrollRecord> {
    let breakdown = compute_week_earnings(
        &week.entries,
        &store.task_codes_snapshot(),
        &store.rate_histories_snapshot(),
        floors,
    )?;

    for warning in &breakdown.warnings {
        warn!(
            task_code = %warning.task_code,
            rate = %warning.rate,
            floor = %warning.floor,
            agricultural = warning.agricultural,
            week_id = %week.id,
            "Resolved rate is below the statutory minimum wage floor"
        );
    }

    // A concurrent calculation may have inserted between the existence
    // check and here; the store returns the stored record either way.
    Ok(store.insert_payroll_record(breakdown.to_record(week)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SupervisionLevel;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn task(code: &str, agricultural: bool) -> TaskCode {
        TaskCode {
            code: code.to_string(),
            name: format!("Task {}", code),
            is_agricultural: agricultural,
            is_hazardous: false,
            minimum_age: 12,
            supervision: SupervisionLevel::None,
            solo_cash_handling: false,
            involves_driving: false,
            power_machinery: false,
        }
    }

    fn rate(code: &str, effective: NaiveDate, hourly: &str) -> TaskCodeRate {
        TaskCodeRate {
            task_code: code.to_string(),
            effective_date: effective,
            hourly_rate: dec(hourly),
        }
    }

    fn entry(code: &str, d: NaiveDate, start: NaiveTime, end: NaiveTime) -> WorkEntry {
        WorkEntry::new(d, start, end, code, false).unwrap()
    }

    fn floors() -> WageFloors {
        WageFloors {
            agricultural: dec("7.25"),
            non_agricultural: dec("10.00"),
        }
    }

    fn setup(
        tasks: &[TaskCode],
        rates: &[TaskCodeRate],
    ) -> (HashMap<String, TaskCode>, HashMap<String, Vec<TaskCodeRate>>) {
        let task_map = tasks
            .iter()
            .map(|task| (task.code.clone(), task.clone()))
            .collect();
        let mut rate_map: HashMap<String, Vec<TaskCodeRate>> = HashMap::new();
        for r in rates {
            rate_map.entry(r.task_code.clone()).or_default().push(r.clone());
        }
        (task_map, rate_map)
    }

    /// PE-001: 45 non-agricultural hours at $20 yields a $50 premium
    #[test]
    fn test_overtime_premium_example() {
        let (tasks, rates) = setup(
            &[task("register", false)],
            &[rate("register", date(2024, 1, 1), "20.00")],
        );
        // 9 hours on five days = 45 hours.
        let entries: Vec<WorkEntry> = (2..7)
            .map(|d| entry("register", date(2024, 6, d), time(8, 0), time(17, 0)))
            .collect();

        let breakdown =
            compute_week_earnings(&entries, &tasks, &rates, &floors()).unwrap();

        assert_eq!(breakdown.non_agricultural_hours, dec("45.00"));
        assert_eq!(breakdown.non_agricultural_earnings, dec("900"));
        assert_eq!(breakdown.overtime_hours, dec("5.00"));
        assert_eq!(breakdown.overtime_earnings.round_dp(2), dec("50.00"));
        assert_eq!(breakdown.total_earnings.round_dp(2), dec("950.00"));
        assert!(breakdown.warnings.is_empty());
    }

    /// PE-002: agricultural hours never earn overtime
    #[test]
    fn test_agricultural_bucket_has_no_overtime() {
        let (tasks, rates) = setup(
            &[task("harvest", true)],
            &[rate("harvest", date(2024, 1, 1), "12.00")],
        );
        let entries: Vec<WorkEntry> = (2..7)
            .map(|d| entry("harvest", date(2024, 6, d), time(7, 0), time(16, 0)))
            .collect(); // 45 hours

        let breakdown =
            compute_week_earnings(&entries, &tasks, &rates, &floors()).unwrap();

        assert_eq!(breakdown.agricultural_hours, dec("45.00"));
        assert_eq!(breakdown.overtime_hours, Decimal::ZERO);
        assert_eq!(breakdown.overtime_earnings, Decimal::ZERO);
        assert_eq!(breakdown.total_earnings, dec("540"));
    }

    /// PE-003: buckets split by the task's agricultural flag
    #[test]
    fn test_buckets_split_by_flag() {
        let (tasks, rates) = setup(
            &[task("harvest", true), task("register", false)],
            &[
                rate("harvest", date(2024, 1, 1), "10.00"),
                rate("register", date(2024, 1, 1), "14.00"),
            ],
        );
        let entries = vec![
            entry("harvest", date(2024, 6, 3), time(7, 0), time(11, 0)), // 4h ag
            entry("register", date(2024, 6, 3), time(12, 0), time(15, 0)), // 3h non-ag
        ];

        let breakdown =
            compute_week_earnings(&entries, &tasks, &rates, &floors()).unwrap();

        assert_eq!(breakdown.agricultural_hours, dec("4.00"));
        assert_eq!(breakdown.agricultural_earnings, dec("40"));
        assert_eq!(breakdown.non_agricultural_hours, dec("3.00"));
        assert_eq!(breakdown.non_agricultural_earnings, dec("42"));
        assert_eq!(breakdown.total_earnings, dec("82"));
    }

    /// PE-004: each entry resolves the rate for its own work date
    #[test]
    fn test_mid_week_rate_change() {
        let (tasks, rates) = setup(
            &[task("register", false)],
            &[
                rate("register", date(2024, 1, 1), "10.00"),
                rate("register", date(2024, 6, 5), "12.00"),
            ],
        );
        let entries = vec![
            entry("register", date(2024, 6, 4), time(9, 0), time(13, 0)), // 4h @ 10
            entry("register", date(2024, 6, 5), time(9, 0), time(13, 0)), // 4h @ 12
        ];

        let breakdown =
            compute_week_earnings(&entries, &tasks, &rates, &floors()).unwrap();

        assert_eq!(breakdown.non_agricultural_earnings, dec("88"));
    }

    /// PE-005: a missing rate is a hard error, not a $0 fallback
    #[test]
    fn test_missing_rate_is_hard_error() {
        let (tasks, rates) = setup(
            &[task("register", false)],
            &[rate("register", date(2024, 6, 10), "12.00")],
        );
        let entries = vec![entry("register", date(2024, 6, 3), time(9, 0), time(13, 0))];

        let result = compute_week_earnings(&entries, &tasks, &rates, &floors());
        assert!(matches!(
            result,
            Err(EngineError::RateNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_task_code_is_hard_error() {
        let (tasks, rates) = setup(&[], &[]);
        let entries = vec![entry("mystery", date(2024, 6, 3), time(9, 0), time(13, 0))];

        let result = compute_week_earnings(&entries, &tasks, &rates, &floors());
        assert!(matches!(
            result,
            Err(EngineError::TaskCodeNotFound { .. })
        ));
    }

    /// PE-006: below-floor rates warn but never fail
    #[test]
    fn test_below_floor_rate_warns_but_computes() {
        let (tasks, rates) = setup(
            &[task("register", false)],
            &[rate("register", date(2024, 1, 1), "9.00")], // floor is 10.00
        );
        let entries = vec![
            entry("register", date(2024, 6, 3), time(9, 0), time(13, 0)),
            entry("register", date(2024, 6, 4), time(9, 0), time(13, 0)),
        ];

        let breakdown =
            compute_week_earnings(&entries, &tasks, &rates, &floors()).unwrap();

        // One warning for the task despite two entries.
        assert_eq!(breakdown.warnings.len(), 1);
        assert_eq!(breakdown.warnings[0].task_code, "register");
        assert_eq!(breakdown.warnings[0].rate, dec("9.00"));
        assert_eq!(breakdown.warnings[0].floor, dec("10.00"));
        assert!(!breakdown.warnings[0].agricultural);
        assert_eq!(breakdown.total_earnings, dec("72"));
    }

    /// PE-007: blended rates use the weighted average for the premium
    #[test]
    fn test_blended_overtime_uses_weighted_average() {
        let (tasks, rates) = setup(
            &[task("register", false), task("stocking", false)],
            &[
                rate("register", date(2024, 1, 1), "10.00"),
                rate("stocking", date(2024, 1, 1), "20.00"),
            ],
        );
        // 22 hours at $10 and 22 hours at $20: 44 hours, $660, average $15.
        let mut entries = Vec::new();
        for d in 2..6 {
            entries.push(entry("register", date(2024, 6, d), time(6, 0), time(11, 30)));
            entries.push(entry("stocking", date(2024, 6, d), time(12, 0), time(17, 30)));
        }

        let breakdown =
            compute_week_earnings(&entries, &tasks, &rates, &floors()).unwrap();

        assert_eq!(breakdown.non_agricultural_hours, dec("44.00"));
        assert_eq!(breakdown.overtime_hours, dec("4.00"));
        // 4 x $15 x 0.5 = $30.
        assert_eq!(breakdown.overtime_earnings.round_dp(2), dec("30.00"));
    }

    #[test]
    fn test_empty_week_computes_zero() {
        let (tasks, rates) = setup(&[], &[]);
        let breakdown =
            compute_week_earnings(&[], &tasks, &rates, &floors()).unwrap();
        assert_eq!(breakdown.total_earnings, Decimal::ZERO);
        assert_eq!(breakdown.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_to_record_rounds_to_scale_two() {
        let week = Week::new(
            "emp_001".to_string(),
            date(2024, 6, 2),
        )
        .unwrap();
        let breakdown = EarningsBreakdown {
            agricultural_hours: dec("0"),
            agricultural_earnings: dec("0"),
            non_agricultural_hours: dec("45"),
            non_agricultural_earnings: dec("900"),
            overtime_hours: dec("5"),
            overtime_earnings: dec("50.000"),
            total_earnings: dec("950.0000"),
            warnings: vec![],
        };

        let record = breakdown.to_record(&week);
        assert_eq!(record.total_earnings.to_string(), "950.00");
        assert_eq!(record.overtime_earnings.to_string(), "50.00");
        assert_eq!(record.period_start, date(2024, 6, 2));
        assert_eq!(record.period_end, date(2024, 6, 8));
        assert!(record.exported_at.is_none());
    }
}
