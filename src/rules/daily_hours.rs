//! Daily hour limit rules.
//!
//! Each age band carries a hard daily cap: 4 hours for 12-13, 3 hours on
//! school days / 8 hours otherwise for 14-15, and 9 hours for 16-17.
//! Each rule evaluates only the days whose age band matches, so a week
//! spanning a birthday is checked band-by-band.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calendar::AgeBand;
use crate::context::ComplianceContext;
use crate::models::{RuleCategory, RuleEvaluation};
use crate::rules::Rule;

/// Daily cap for ages 12-13.
pub const DAILY_LIMIT_12_13: Decimal = Decimal::from_parts(4, 0, 0, false, 0);
/// School-day daily cap for ages 14-15.
pub const SCHOOL_DAY_LIMIT_14_15: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
/// Non-school-day daily cap for ages 14-15.
pub const NON_SCHOOL_DAY_LIMIT_14_15: Decimal = Decimal::from_parts(8, 0, 0, false, 0);
/// Daily cap for ages 16-17.
pub const DAILY_LIMIT_16_17: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// One day whose total exceeded its cap.
struct DailyViolation {
    date: NaiveDate,
    hours: Decimal,
    limit: Decimal,
}

/// Collects the band's days whose summed hours exceed the per-day limit,
/// in chronological order.
fn daily_violations(
    ctx: &ComplianceContext,
    band: AgeBand,
    limit_for: impl Fn(NaiveDate) -> Decimal,
) -> Vec<DailyViolation> {
    ctx.dates_in_band(band)
        .into_iter()
        .filter_map(|date| {
            let hours = ctx.hours_on(date);
            let limit = limit_for(date);
            (hours > limit).then_some(DailyViolation { date, hours, limit })
        })
        .collect()
}

/// Ids of every entry on the violating dates, chronological.
fn entries_on_dates(ctx: &ComplianceContext, dates: &[NaiveDate]) -> Vec<Uuid> {
    dates
        .iter()
        .flat_map(|date| ctx.entries_on(*date).iter().map(|entry| entry.id))
        .collect()
}

/// Builds the evaluation shared by the three daily-limit rules. The first
/// chronological violation is the representative failure; every violating
/// date and its entries are listed for the caller.
fn evaluate_daily_limit(
    ctx: &ComplianceContext,
    band: AgeBand,
    limit_for: impl Fn(NaiveDate) -> Decimal,
    limit_label: &str,
    remediation: &str,
) -> RuleEvaluation {
    let violations = daily_violations(ctx, band, &limit_for);

    if violations.is_empty() {
        let max_daily = ctx
            .dates_in_band(band)
            .into_iter()
            .map(|date| ctx.hours_on(date))
            .max()
            .unwrap_or(Decimal::ZERO);
        return RuleEvaluation::pass(serde_json::json!({
            "limit_hours": limit_label,
            "max_daily_hours": max_daily.normalize().to_string(),
        }));
    }

    let first = &violations[0];
    let affected_dates: Vec<NaiveDate> = violations.iter().map(|v| v.date).collect();
    let affected_entries = entries_on_dates(ctx, &affected_dates);

    RuleEvaluation::fail(
        serde_json::json!({
            "limit_hours": first.limit.normalize().to_string(),
            "actual_hours": first.hours.normalize().to_string(),
            "violations": violations
                .iter()
                .map(|v| serde_json::json!({
                    "date": v.date,
                    "hours": v.hours.normalize().to_string(),
                    "limit_hours": v.limit.normalize().to_string(),
                }))
                .collect::<Vec<_>>(),
        }),
        format!(
            "Worked {} hours on {}; the daily limit for ages {} is {} hours",
            first.hours.normalize(),
            first.date,
            band,
            first.limit.normalize()
        ),
        remediation,
        affected_dates,
        affected_entries,
    )
}

/// Daily hour limit for ages 12-13 (4 hours).
pub struct DailyHours12To13;

impl Rule for DailyHours12To13 {
    fn id(&self) -> &'static str {
        "daily_hours_12_13"
    }

    fn name(&self) -> &'static str {
        "Daily hour limit (12-13)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages12To13]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_daily_limit(
            ctx,
            AgeBand::Ages12To13,
            |_| DAILY_LIMIT_12_13,
            "4",
            "Reduce the day's recorded hours to 4 or fewer, or move part of the work to another day",
        )
    }
}

/// Daily hour limit for ages 14-15 (3 hours on school days, 8 otherwise).
pub struct DailyHours14To15;

impl Rule for DailyHours14To15 {
    fn id(&self) -> &'static str {
        "daily_hours_14_15"
    }

    fn name(&self) -> &'static str {
        "Daily hour limit (14-15)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages14To15]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_daily_limit(
            ctx,
            AgeBand::Ages14To15,
            |date| {
                if ctx.is_school_day(date) {
                    SCHOOL_DAY_LIMIT_14_15
                } else {
                    NON_SCHOOL_DAY_LIMIT_14_15
                }
            },
            "3 on school days, 8 otherwise",
            "Reduce school-day hours to 3 or fewer (8 on non-school days), or correct the school-day flag if school was not in session",
        )
    }
}

/// Daily hour limit for ages 16-17 (9 hours).
pub struct DailyHours16To17;

impl Rule for DailyHours16To17 {
    fn id(&self) -> &'static str {
        "daily_hours_16_17"
    }

    fn name(&self) -> &'static str {
        "Daily hour limit (16-17)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages16To17]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_daily_limit(
            ctx,
            AgeBand::Ages16To17,
            |_| DAILY_LIMIT_16_17,
            "9",
            "Reduce the day's recorded hours to 9 or fewer, or move part of the work to another day",
        )
    }
}
