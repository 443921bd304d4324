//! Maximum worked days rule for ages 16-17.
//!
//! A 16-17-year-old may work at most 6 of the week's 7 days. Only days
//! whose age band is 16-17 are counted, consistent with the other hour
//! rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calendar::AgeBand;
use crate::context::ComplianceContext;
use crate::models::{RuleCategory, RuleEvaluation};
use crate::rules::Rule;

/// Maximum worked days per week for ages 16-17.
pub const MAX_WORK_DAYS_16_17: usize = 6;

/// At most six worked days per week for ages 16-17.
pub struct MaxWorkDays16To17;

impl Rule for MaxWorkDays16To17 {
    fn id(&self) -> &'static str {
        "max_work_days_16_17"
    }

    fn name(&self) -> &'static str {
        "Maximum worked days (16-17)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hours
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages16To17]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        let worked_dates: Vec<NaiveDate> = ctx
            .dates_in_band(AgeBand::Ages16To17)
            .into_iter()
            .filter(|date| ctx.hours_on(*date) > Decimal::ZERO)
            .collect();

        if worked_dates.len() <= MAX_WORK_DAYS_16_17 {
            return RuleEvaluation::pass(serde_json::json!({
                "limit_days": MAX_WORK_DAYS_16_17,
                "worked_days": worked_dates.len(),
            }));
        }

        let affected_entries: Vec<Uuid> = worked_dates
            .iter()
            .flat_map(|date| ctx.entries_on(*date).iter().map(|entry| entry.id))
            .collect();

        RuleEvaluation::fail(
            serde_json::json!({
                "limit_days": MAX_WORK_DAYS_16_17,
                "worked_days": worked_dates.len(),
            }),
            format!(
                "Worked {} days this week; ages 16-17 may work at most {} days",
                worked_dates.len(),
                MAX_WORK_DAYS_16_17
            ),
            "Remove the entries from at least one day so the week has a day of rest",
            worked_dates,
            affected_entries,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleOutcome;
    use crate::rules::test_support::*;

    fn entries_for_days(count: u32) -> Vec<crate::models::WorkEntry> {
        (0..count)
            .map(|offset| {
                entry(
                    date(2024, 6, 2 + offset),
                    time(9, 0),
                    time(13, 0),
                    false,
                )
            })
            .collect()
    }

    /// MD-001: six worked days pass
    #[test]
    fn test_six_days_pass() {
        let ctx = context_for(dob_for_age(17), entries_for_days(6), vec![]);
        let result = MaxWorkDays16To17.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Pass);
        assert_eq!(result.detail["worked_days"], 6);
    }

    /// MD-002: seven worked days fail
    #[test]
    fn test_seven_days_fail() {
        let ctx = context_for(dob_for_age(17), entries_for_days(7), vec![]);
        let result = MaxWorkDays16To17.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Fail);
        assert_eq!(result.detail["worked_days"], 7);
        assert_eq!(result.affected_dates.len(), 7);
        assert!(result.error_message.unwrap().contains("7 days"));
    }

    /// MD-003: multiple entries on one day count as one worked day
    #[test]
    fn test_multiple_entries_one_day_counted_once() {
        let mut entries = entries_for_days(6);
        entries.push(entry(date(2024, 6, 2), time(14, 0), time(16, 0), false));
        let ctx = context_for(dob_for_age(16), entries, vec![]);

        let result = MaxWorkDays16To17.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Pass);
        assert_eq!(result.detail["worked_days"], 6);
    }

    #[test]
    fn test_only_band_days_counted() {
        // 18th birthday on Friday 2024-06-07: the adult days do not count
        // toward the 16-17 worked-day total.
        let ctx = context_for(date(2006, 6, 7), entries_for_days(7), vec![]);
        let result = MaxWorkDays16To17.evaluate(&ctx);
        assert_eq!(result.result, RuleOutcome::Pass);
        assert_eq!(result.detail["worked_days"], 5);
    }
}
