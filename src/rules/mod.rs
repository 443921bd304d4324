//! Compliance rule evaluation engine.
//!
//! Each rule is an independent, pure check over a [`ComplianceContext`]:
//! it consumes the context and produces a pass / fail / not-applicable
//! result with structured diagnostic detail. The registry is a fixed,
//! versioned, ordered list; there is no dynamic rule discovery.
//!
//! [`evaluate_week`] runs the entire registry and returns the complete
//! result list. It never short-circuits on a failure: the caller gets
//! every outcome, and the submission gate simply refuses the transition
//! when any result failed.

mod daily_hours;
mod documentation;
mod school_hours;
mod time_window;
mod weekly_hours;
mod work_days;

pub use daily_hours::{
    DAILY_LIMIT_12_13, DAILY_LIMIT_16_17, DailyHours12To13, DailyHours14To15,
    DailyHours16To17, NON_SCHOOL_DAY_LIMIT_14_15, SCHOOL_DAY_LIMIT_14_15,
};
pub use documentation::{ParentalConsentRule, SafetyTrainingRule, WorkPermitRule};
pub use school_hours::{
    SCHOOL_HOURS_END_MIN, SCHOOL_HOURS_START_MIN, SchoolHours12To13, SchoolHours14To15,
    overlaps_school_hours,
};
pub use time_window::{
    EARLIEST_START_14_15, EARLIEST_START_16_17, LATEST_END_14_15, LATEST_END_16_17,
    SCHOOL_NIGHT_LATEST_END_16_17, SUMMER_LATEST_END_14_15, WorkWindow14To15,
    WorkWindow16To17, is_school_night,
};
pub use weekly_hours::{
    NON_SCHOOL_WEEK_LIMIT_14_15, SCHOOL_WEEK_LIMIT_14_15, WEEKLY_LIMIT_12_13,
    WEEKLY_LIMIT_16_17, WeeklyHours12To13, WeeklyHours14To15, WeeklyHours16To17,
};
pub use work_days::{MAX_WORK_DAYS_16_17, MaxWorkDays16To17};

use crate::calendar::AgeBand;
use crate::context::ComplianceContext;
use crate::models::{ComplianceCheckResult, RuleCategory, RuleEvaluation};

/// One compliance rule.
///
/// Implementations are pure: `evaluate` reads the context and returns a
/// result without side effects. A rule may assume the engine has already
/// checked that at least one day of the week falls in one of its age
/// bands; it is still free to return not-applicable for its own
/// preconditions (e.g. a school-day rule in a week with no school days).
pub trait Rule: Send + Sync {
    /// Stable identifier, part of the persisted contract.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// The category this rule belongs to.
    fn category(&self) -> RuleCategory;

    /// The age bands this rule applies to.
    fn age_bands(&self) -> &'static [AgeBand];

    /// Evaluates the rule against one week's context.
    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation;
}

/// Returns the fixed, ordered rule registry.
///
/// The order is stable so persisted result lists line up across runs:
/// hour rules first, then time-of-day windows, then documentation.
pub fn standard_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DailyHours12To13),
        Box::new(DailyHours14To15),
        Box::new(DailyHours16To17),
        Box::new(WeeklyHours12To13),
        Box::new(WeeklyHours14To15),
        Box::new(WeeklyHours16To17),
        Box::new(MaxWorkDays16To17),
        Box::new(SchoolHours12To13),
        Box::new(SchoolHours14To15),
        Box::new(WorkWindow14To15),
        Box::new(WorkWindow16To17),
        Box::new(ParentalConsentRule),
        Box::new(WorkPermitRule),
        Box::new(SafetyTrainingRule),
    ]
}

/// Runs the full rule registry against one week's context.
///
/// Every rule contributes exactly one result; rules whose age bands never
/// occur in the week report not-applicable. The week is submit-eligible
/// only when zero results are failures.
///
/// # Example
///
/// ```
/// use youth_labor_engine::context::ComplianceContext;
/// use youth_labor_engine::models::{Employee, EmployeeStatus, RuleOutcome};
/// use youth_labor_engine::rules::evaluate_week;
/// use chrono::NaiveDate;
///
/// let adult = Employee {
///     id: "emp_001".to_string(),
///     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
///     is_supervisor: false,
///     status: EmployeeStatus::Active,
/// };
/// let ctx = ComplianceContext::build(
///     adult,
///     NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
///     vec![],
///     vec![],
///     NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
/// )
/// .unwrap();
///
/// let results = evaluate_week(&ctx);
/// // No rule applies to an adult-only week.
/// assert!(results.iter().all(|r| r.result == RuleOutcome::NotApplicable));
/// ```
pub fn evaluate_week(ctx: &ComplianceContext) -> Vec<ComplianceCheckResult> {
    let age_at_check = ctx.employee.age_on(ctx.check_date);

    standard_rules()
        .iter()
        .map(|rule| {
            let applicable = rule.age_bands().iter().any(|band| ctx.has_band(*band));
            let evaluation = if applicable {
                rule.evaluate(ctx)
            } else {
                RuleEvaluation::not_applicable(serde_json::json!({
                    "reason": "no days in the rule's age bands this week",
                    "age_bands": rule.age_bands(),
                }))
            };
            ComplianceCheckResult::from_evaluation(
                rule.id(),
                rule.name(),
                rule.category(),
                age_at_check,
                evaluation,
            )
        })
        .collect()
}

/// The minor age bands, shared by the documentation rules.
pub(crate) const MINOR_BANDS: [AgeBand; 3] = [
    AgeBand::Ages12To13,
    AgeBand::Ages14To15,
    AgeBand::Ages16To17,
];


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::models::RuleOutcome;

    #[test]
    fn test_registry_is_fixed_and_ordered() {
        let rules = standard_rules();
        let ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(
            ids,
            vec![
                "daily_hours_12_13",
                "daily_hours_14_15",
                "daily_hours_16_17",
                "weekly_hours_12_13",
                "weekly_hours_14_15",
                "weekly_hours_16_17",
                "max_work_days_16_17",
                "school_hours_12_13",
                "school_hours_14_15",
                "work_window_14_15",
                "work_window_16_17",
                "parental_consent",
                "work_permit",
                "safety_training",
            ]
        );
    }

    #[test]
    fn test_registry_ids_are_unique() {
        let rules = standard_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), standard_rules().len());
    }

    #[test]
    fn test_evaluate_week_returns_one_result_per_rule() {
        let ctx = context_for(dob_for_age(15), vec![], vec![]);
        let results = evaluate_week(&ctx);
        assert_eq!(results.len(), standard_rules().len());
    }

    #[test]
    fn test_rules_outside_band_are_not_applicable() {
        // A 15-year-old week: 12-13 and 16-17 rules do not apply.
        let ctx = context_for(dob_for_age(15), vec![], vec![]);
        let results = evaluate_week(&ctx);

        let by_id = |id: &str| {
            results
                .iter()
                .find(|r| r.rule_id == id)
                .unwrap_or_else(|| panic!("missing result for {}", id))
        };

        assert_eq!(
            by_id("daily_hours_12_13").result,
            RuleOutcome::NotApplicable
        );
        assert_eq!(
            by_id("daily_hours_16_17").result,
            RuleOutcome::NotApplicable
        );
        assert_eq!(
            by_id("max_work_days_16_17").result,
            RuleOutcome::NotApplicable
        );
    }

    #[test]
    fn test_evaluate_week_does_not_short_circuit() {
        // A 13-year-old with no documents and an over-limit day: several
        // rules fail and all results are still reported.
        let ctx = context_for(
            dob_for_age(13),
            vec![entry(date(2024, 6, 3), time(8, 0), time(13, 0), false)],
            vec![],
        );
        let results = evaluate_week(&ctx);

        let failures: Vec<&str> = results
            .iter()
            .filter(|r| r.result == RuleOutcome::Fail)
            .map(|r| r.rule_id.as_str())
            .collect();

        assert!(failures.contains(&"daily_hours_12_13"));
        assert!(failures.contains(&"parental_consent"));
        assert!(failures.contains(&"safety_training"));
        assert_eq!(results.len(), standard_rules().len());
    }

    #[test]
    fn test_age_at_check_uses_check_date() {
        let ctx = context_for(dob_for_age(15), vec![], vec![]);
        let results = evaluate_week(&ctx);
        assert!(results.iter().all(|r| r.age_at_check == 15));
    }
}
