//! School-hours restriction rules.
//!
//! Workers under 16 may not work during school hours (7:00am-3:00pm) on
//! school days. An entry overlaps school hours unless it ends by 7:00am
//! or starts at 3:00pm or later. The rules are not applicable in a week
//! with no school days.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar::{AgeBand, minutes_since_midnight};
use crate::context::ComplianceContext;
use crate::models::{RuleCategory, RuleEvaluation, WorkEntry};
use crate::rules::Rule;

/// School hours begin at 7:00am (minutes since midnight).
pub const SCHOOL_HOURS_START_MIN: u32 = 7 * 60;
/// School hours end at 3:00pm (minutes since midnight).
pub const SCHOOL_HOURS_END_MIN: u32 = 15 * 60;

/// Returns true when an entry overlaps the 7:00am-3:00pm school window.
pub fn overlaps_school_hours(entry: &WorkEntry) -> bool {
    let start = minutes_since_midnight(entry.start_time);
    let end = minutes_since_midnight(entry.end_time);
    !(end <= SCHOOL_HOURS_START_MIN || start >= SCHOOL_HOURS_END_MIN)
}

/// Shared evaluation for the two school-hours rules.
fn evaluate_school_hours(ctx: &ComplianceContext, band: AgeBand) -> RuleEvaluation {
    let school_dates: Vec<NaiveDate> = ctx
        .dates_in_band(band)
        .into_iter()
        .filter(|date| ctx.is_school_day(*date))
        .collect();

    if school_dates.is_empty() {
        return RuleEvaluation::not_applicable(serde_json::json!({
            "reason": "no school days in this week for the rule's age band",
        }));
    }

    let violations: Vec<&WorkEntry> = school_dates
        .iter()
        .flat_map(|date| ctx.entries_on(*date))
        .filter(|entry| overlaps_school_hours(entry))
        .collect();

    if violations.is_empty() {
        return RuleEvaluation::pass(serde_json::json!({
            "window": "07:00-15:00",
            "school_days_checked": school_dates.len(),
        }));
    }

    let first = violations[0];
    let mut affected_dates: Vec<NaiveDate> =
        violations.iter().map(|entry| entry.work_date).collect();
    affected_dates.dedup();
    let affected_entries: Vec<Uuid> = violations.iter().map(|entry| entry.id).collect();

    RuleEvaluation::fail(
        serde_json::json!({
            "window": "07:00-15:00",
            "entry_start": first.start_time.format("%H:%M").to_string(),
            "entry_end": first.end_time.format("%H:%M").to_string(),
            "violation_count": violations.len(),
        }),
        format!(
            "Entry on {} from {} to {} overlaps school hours (07:00-15:00)",
            first.work_date,
            first.start_time.format("%H:%M"),
            first.end_time.format("%H:%M")
        ),
        "Schedule the shift to end by 7:00am or start at 3:00pm or later on school days",
        affected_dates,
        affected_entries,
    )
}

/// No work during school hours for ages 12-13.
pub struct SchoolHours12To13;

impl Rule for SchoolHours12To13 {
    fn id(&self) -> &'static str {
        "school_hours_12_13"
    }

    fn name(&self) -> &'static str {
        "School hours restriction (12-13)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::TimeWindow
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages12To13]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_school_hours(ctx, AgeBand::Ages12To13)
    }
}

/// No work during school hours for ages 14-15.
pub struct SchoolHours14To15;

impl Rule for SchoolHours14To15 {
    fn id(&self) -> &'static str {
        "school_hours_14_15"
    }

    fn name(&self) -> &'static str {
        "School hours restriction (14-15)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::TimeWindow
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages14To15]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_school_hours(ctx, AgeBand::Ages14To15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleOutcome;
    use crate::rules::test_support::*;

    /// SH-001: ending exactly at 7:00am does not overlap
    #[test]
    fn test_entry_ending_at_7am_passes() {
        let monday = date(2024, 6, 3);
        let ctx = context_for(
            dob_for_age(13),
            vec![entry(monday, time(5, 0), time(7, 0), true)],
            vec![],
        );

        let result = SchoolHours12To13.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Pass);
    }

    /// SH-002: starting exactly at 3:00pm does not overlap
    #[test]
    fn test_entry_starting_at_3pm_passes() {
        let monday = date(2024, 6, 3);
        let ctx = context_for(
            dob_for_age(15),
            vec![entry(monday, time(15, 0), time(18, 0), true)],
            vec![],
        );

        let result = SchoolHours14To15.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Pass);
    }

    /// SH-003: one-minute overlap at either edge fails
    #[test]
    fn test_one_minute_overlap_fails() {
        let monday = date(2024, 6, 3);
        let ctx = context_for(
            dob_for_age(13),
            vec![entry(monday, time(5, 0), time(7, 1), true)],
            vec![],
        );
        assert_eq!(
            SchoolHours12To13.evaluate(&ctx).result,
            RuleOutcome::Fail
        );

        let ctx = context_for(
            dob_for_age(13),
            vec![entry(monday, time(14, 59), time(18, 0), true)],
            vec![],
        );
        assert_eq!(
            SchoolHours12To13.evaluate(&ctx).result,
            RuleOutcome::Fail
        );
    }

    /// SH-004: an entry spanning the whole window fails
    #[test]
    fn test_midday_entry_fails_with_detail() {
        let monday = date(2024, 6, 3);
        let ctx = context_for(
            dob_for_age(15),
            vec![entry(monday, time(9, 0), time(12, 0), true)],
            vec![],
        );

        let result = SchoolHours14To15.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Fail);
        assert_eq!(result.detail["entry_start"], "09:00");
        assert_eq!(result.detail["entry_end"], "12:00");
        assert_eq!(result.affected_dates, vec![monday]);
        assert!(
            result
                .error_message
                .unwrap()
                .contains("overlaps school hours")
        );
    }

    /// SH-005: not applicable in a week with no school days
    #[test]
    fn test_not_applicable_without_school_days() {
        let monday = date(2024, 6, 3);
        let ctx = context_for(
            dob_for_age(13),
            vec![entry(monday, time(9, 0), time(12, 0), false)],
            vec![],
        );

        let result = SchoolHours12To13.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::NotApplicable);
    }

    /// SH-006: only school days are checked
    #[test]
    fn test_non_school_day_midday_entry_ignored() {
        let monday = date(2024, 6, 3);
        let tuesday = date(2024, 6, 4);
        // Tuesday is flagged a school day, Monday's midday entry is not.
        let ctx = context_for(
            dob_for_age(13),
            vec![
                entry(monday, time(9, 0), time(12, 0), false),
                entry(tuesday, time(16, 0), time(18, 0), true),
            ],
            vec![],
        );

        let result = SchoolHours12To13.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Pass);
    }

    /// SH-007: all violating entries are listed, first is representative
    #[test]
    fn test_multiple_violations_all_listed() {
        let monday = date(2024, 6, 3);
        let wednesday = date(2024, 6, 5);
        let ctx = context_for(
            dob_for_age(15),
            vec![
                entry(wednesday, time(10, 0), time(12, 0), true),
                entry(monday, time(8, 0), time(10, 0), true),
            ],
            vec![],
        );

        let result = SchoolHours14To15.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Fail);
        assert_eq!(result.detail["violation_count"], 2);
        assert_eq!(result.affected_dates, vec![monday, wednesday]);
        assert_eq!(result.affected_entries.len(), 2);
        assert!(result.error_message.unwrap().contains("2024-06-03"));
    }
}
