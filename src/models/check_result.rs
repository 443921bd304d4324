//! Compliance check result models.
//!
//! One [`ComplianceCheckResult`] captures a single rule's outcome for a
//! single week. Results are written once per (week, rule) at submission
//! time and never mutated; resubmission after a correction replaces the
//! whole set. The structured `detail` payload is the stable contract
//! consumed by review UIs and exports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The category a compliance rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Daily/weekly hour caps and worked-day counts.
    Hours,
    /// Permitted time-of-day windows.
    TimeWindow,
    /// Required documents on file.
    Documentation,
}

/// The outcome of evaluating one rule against one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOutcome {
    /// The rule's requirement was met.
    Pass,
    /// The rule's requirement was violated.
    Fail,
    /// The rule's precondition did not hold this week (distinct from pass).
    NotApplicable,
}

/// The raw product of a rule's `evaluate` call, before the engine stamps
/// it with the rule's identity and the employee's age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEvaluation {
    /// Pass, fail, or not applicable.
    pub result: RuleOutcome,
    /// Structured diagnostic detail (thresholds, observed values).
    pub detail: serde_json::Value,
    /// Formatted violation message; present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// What the operator should do about a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_guidance: Option<String>,
    /// Every date on which the violation occurred, in chronological order.
    #[serde(default)]
    pub affected_dates: Vec<NaiveDate>,
    /// Every entry implicated in the violation, in chronological order.
    #[serde(default)]
    pub affected_entries: Vec<Uuid>,
}

impl RuleEvaluation {
    /// A passing evaluation with descriptive detail.
    pub fn pass(detail: serde_json::Value) -> RuleEvaluation {
        RuleEvaluation {
            result: RuleOutcome::Pass,
            detail,
            error_message: None,
            remediation_guidance: None,
            affected_dates: Vec::new(),
            affected_entries: Vec::new(),
        }
    }

    /// A failing evaluation with its full diagnostic payload.
    pub fn fail(
        detail: serde_json::Value,
        error_message: impl Into<String>,
        remediation_guidance: impl Into<String>,
        affected_dates: Vec<NaiveDate>,
        affected_entries: Vec<Uuid>,
    ) -> RuleEvaluation {
        RuleEvaluation {
            result: RuleOutcome::Fail,
            detail,
            error_message: Some(error_message.into()),
            remediation_guidance: Some(remediation_guidance.into()),
            affected_dates,
            affected_entries,
        }
    }

    /// A not-applicable evaluation, with the unmet precondition described
    /// in the detail payload.
    pub fn not_applicable(detail: serde_json::Value) -> RuleEvaluation {
        RuleEvaluation {
            result: RuleOutcome::NotApplicable,
            detail,
            error_message: None,
            remediation_guidance: None,
            affected_dates: Vec::new(),
            affected_entries: Vec::new(),
        }
    }
}

/// One rule's persisted outcome for one week.
///
/// # Example
///
/// ```
/// use youth_labor_engine::models::{ComplianceCheckResult, RuleCategory, RuleEvaluation, RuleOutcome};
///
/// let result = ComplianceCheckResult::from_evaluation(
///     "daily_hours_12_13",
///     "Daily hour limit (12-13)",
///     RuleCategory::Hours,
///     13,
///     RuleEvaluation::pass(serde_json::json!({"limit_hours": "4"})),
/// );
/// assert_eq!(result.result, RuleOutcome::Pass);
/// assert_eq!(result.age_at_check, 13);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheckResult {
    /// Stable identifier of the rule that produced this result.
    pub rule_id: String,
    /// Human-readable rule name.
    pub rule_name: String,
    /// The rule's category.
    pub category: RuleCategory,
    /// Pass, fail, or not applicable.
    pub result: RuleOutcome,
    /// Structured diagnostic detail.
    pub detail: serde_json::Value,
    /// Formatted violation message; present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Remediation guidance; present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_guidance: Option<String>,
    /// Every affected date, chronological.
    pub affected_dates: Vec<NaiveDate>,
    /// Every affected entry id, chronological.
    pub affected_entries: Vec<Uuid>,
    /// The employee's age on the date the check was run.
    pub age_at_check: u32,
}

impl ComplianceCheckResult {
    /// Stamps a rule's evaluation with the rule identity and check age.
    pub fn from_evaluation(
        rule_id: &str,
        rule_name: &str,
        category: RuleCategory,
        age_at_check: u32,
        evaluation: RuleEvaluation,
    ) -> ComplianceCheckResult {
        ComplianceCheckResult {
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            category,
            result: evaluation.result,
            detail: evaluation.detail,
            error_message: evaluation.error_message,
            remediation_guidance: evaluation.remediation_guidance,
            affected_dates: evaluation.affected_dates,
            affected_entries: evaluation.affected_entries,
            age_at_check,
        }
    }

    /// Returns true when this result is a failure.
    pub fn is_fail(&self) -> bool {
        self.result == RuleOutcome::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(serde_json::to_string(&RuleOutcome::Pass).unwrap(), "\"pass\"");
        assert_eq!(serde_json::to_string(&RuleOutcome::Fail).unwrap(), "\"fail\"");
        assert_eq!(
            serde_json::to_string(&RuleOutcome::NotApplicable).unwrap(),
            "\"not_applicable\""
        );
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&RuleCategory::Hours).unwrap(),
            "\"hours\""
        );
        assert_eq!(
            serde_json::to_string(&RuleCategory::TimeWindow).unwrap(),
            "\"time_window\""
        );
        assert_eq!(
            serde_json::to_string(&RuleCategory::Documentation).unwrap(),
            "\"documentation\""
        );
    }

    #[test]
    fn test_pass_has_no_message_fields() {
        let evaluation = RuleEvaluation::pass(serde_json::json!({"limit_hours": "4"}));
        assert_eq!(evaluation.result, RuleOutcome::Pass);
        assert!(evaluation.error_message.is_none());
        assert!(evaluation.remediation_guidance.is_none());
        assert!(evaluation.affected_dates.is_empty());

        let json = serde_json::to_string(&evaluation).unwrap();
        assert!(!json.contains("error_message"));
        assert!(!json.contains("remediation_guidance"));
    }

    #[test]
    fn test_fail_carries_full_payload() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let entry_id = Uuid::new_v4();
        let evaluation = RuleEvaluation::fail(
            serde_json::json!({"limit_hours": "4", "actual_hours": "4.01"}),
            "Worked 4.01 hours on 2024-06-03; the daily limit is 4",
            "Reduce the recorded hours or split the shift across days",
            vec![date],
            vec![entry_id],
        );

        assert_eq!(evaluation.result, RuleOutcome::Fail);
        assert_eq!(evaluation.affected_dates, vec![date]);
        assert_eq!(evaluation.affected_entries, vec![entry_id]);
        assert!(evaluation.error_message.unwrap().contains("4.01"));
    }

    #[test]
    fn test_from_evaluation_stamps_identity_and_age() {
        let result = ComplianceCheckResult::from_evaluation(
            "work_permit",
            "Work permit on file",
            RuleCategory::Documentation,
            15,
            RuleEvaluation::not_applicable(serde_json::json!({"reason": "no 14-15 days"})),
        );

        assert_eq!(result.rule_id, "work_permit");
        assert_eq!(result.rule_name, "Work permit on file");
        assert_eq!(result.category, RuleCategory::Documentation);
        assert_eq!(result.result, RuleOutcome::NotApplicable);
        assert_eq!(result.age_at_check, 15);
        assert!(!result.is_fail());
    }

    #[test]
    fn test_persisted_shape_field_names() {
        let result = ComplianceCheckResult::from_evaluation(
            "daily_hours_12_13",
            "Daily hour limit (12-13)",
            RuleCategory::Hours,
            13,
            RuleEvaluation::fail(
                serde_json::json!({"limit_hours": "4"}),
                "over the limit",
                "correct the entry",
                vec![NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()],
                vec![],
            ),
        );

        let json = serde_json::to_value(&result).unwrap();
        // Stable contract for UI/export consumers.
        assert!(json.get("rule_id").is_some());
        assert!(json.get("rule_name").is_some());
        assert!(json.get("result").is_some());
        assert!(json.get("error_message").is_some());
        assert!(json.get("remediation_guidance").is_some());
        assert!(json.get("affected_dates").is_some());
        assert!(json.get("affected_entries").is_some());
        assert_eq!(json["result"], "fail");
    }
}
