//! Weekly hour limit rules.
//!
//! Weekly caps by age band: 24 hours for 12-13, 18 hours in a school week
//! / 40 otherwise for 14-15, and 48 hours for 16-17. Totals are summed
//! over the days whose age band matches, so a birthday week is capped
//! band-by-band.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calendar::AgeBand;
use crate::context::ComplianceContext;
use crate::models::{RuleCategory, RuleEvaluation};
use crate::rules::Rule;

/// Weekly cap for ages 12-13.
pub const WEEKLY_LIMIT_12_13: Decimal = Decimal::from_parts(24, 0, 0, false, 0);
/// School-week weekly cap for ages 14-15.
pub const SCHOOL_WEEK_LIMIT_14_15: Decimal = Decimal::from_parts(18, 0, 0, false, 0);
/// Non-school-week weekly cap for ages 14-15.
pub const NON_SCHOOL_WEEK_LIMIT_14_15: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
/// Weekly cap for ages 16-17.
pub const WEEKLY_LIMIT_16_17: Decimal = Decimal::from_parts(48, 0, 0, false, 0);

/// Builds the evaluation shared by the three weekly-limit rules. The
/// violation is the aggregate total, so every worked day in the band and
/// its entries are listed as affected.
fn evaluate_weekly_limit(
    ctx: &ComplianceContext,
    band: AgeBand,
    limit: Decimal,
    limit_description: &str,
    remediation: &str,
) -> RuleEvaluation {
    let band_dates = ctx.dates_in_band(band);
    let total: Decimal = band_dates.iter().map(|date| ctx.hours_on(*date)).sum();

    if total <= limit {
        return RuleEvaluation::pass(serde_json::json!({
            "limit_hours": limit_description,
            "total_hours": total.normalize().to_string(),
        }));
    }

    let worked_dates: Vec<NaiveDate> = band_dates
        .iter()
        .copied()
        .filter(|date| ctx.hours_on(*date) > Decimal::ZERO)
        .collect();
    let affected_entries: Vec<Uuid> = worked_dates
        .iter()
        .flat_map(|date| ctx.entries_on(*date).iter().map(|entry| entry.id))
        .collect();

    RuleEvaluation::fail(
        serde_json::json!({
            "limit_hours": limit.normalize().to_string(),
            "actual_hours": total.normalize().to_string(),
            "worked_days": worked_dates.len(),
        }),
        format!(
            "Worked {} hours across ages-{} days this week; the weekly limit is {} hours",
            total.normalize(),
            band,
            limit.normalize()
        ),
        remediation,
        worked_dates,
        affected_entries,
    )
}

/// Weekly hour limit for ages 12-13 (24 hours).
pub struct WeeklyHours12To13;

impl Rule for WeeklyHours12To13 {
    fn id(&self) -> &'static str {
        "weekly_hours_12_13"
    }

    fn name(&self) -> &'static str {
        "Weekly hour limit (12-13)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages12To13]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_weekly_limit(
            ctx,
            AgeBand::Ages12To13,
            WEEKLY_LIMIT_12_13,
            "24",
            "Reduce the week's total hours to 24 or fewer",
        )
    }
}

/// Weekly hour limit for ages 14-15 (18 hours in a school week, 40
/// otherwise).
pub struct WeeklyHours14To15;

impl Rule for WeeklyHours14To15 {
    fn id(&self) -> &'static str {
        "weekly_hours_14_15"
    }

    fn name(&self) -> &'static str {
        "Weekly hour limit (14-15)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages14To15]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        let (limit, description) = if ctx.is_school_week {
            (SCHOOL_WEEK_LIMIT_14_15, "18 (school week)")
        } else {
            (NON_SCHOOL_WEEK_LIMIT_14_15, "40 (non-school week)")
        };
        evaluate_weekly_limit(
            ctx,
            AgeBand::Ages14To15,
            limit,
            description,
            "Reduce the week's total hours below the school-week limit, or correct school-day flags if school was not in session",
        )
    }
}

/// Weekly hour limit for ages 16-17 (48 hours).
pub struct WeeklyHours16To17;

impl Rule for WeeklyHours16To17 {
    fn id(&self) -> &'static str {
        "weekly_hours_16_17"
    }

    fn name(&self) -> &'static str {
        "Weekly hour limit (16-17)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages16To17]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_weekly_limit(
            ctx,
            AgeBand::Ages16To17,
            WEEKLY_LIMIT_16_17,
            "48",
            "Reduce the week's total hours to 48 or fewer",
        )
    }
}
