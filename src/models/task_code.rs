//! Task code and wage rate models.
//!
//! A task code is a labor classification (e.g. harvest work, register
//! duty). Its wage history is a list of effective-dated rates: the rate in
//! force on a date is the most recent one whose effective date is on or
//! before that date. Rates are append-only so the full wage history is
//! preserved for payroll recalculation and audit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How much supervision a task requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisionLevel {
    /// No supervision requirement.
    None,
    /// Supervision required when the worker is a minor.
    ForMinors,
    /// Supervision required for all workers.
    Always,
}

/// A labor classification with its statutory task flags.
///
/// The `code` is the task's immutable identity; the remaining flags
/// describe the nature of the work. Payroll consumes `is_agricultural`
/// (it selects the earnings bucket and the applicable minimum-wage
/// floor); the eligibility flags are carried for the scheduling and
/// record-keeping application around the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCode {
    /// Immutable identifying code (e.g. "harvest").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Agricultural vs. non-agricultural classification.
    pub is_agricultural: bool,
    /// Whether the task is classified as hazardous.
    pub is_hazardous: bool,
    /// The minimum age allowed to perform this task.
    pub minimum_age: u8,
    /// The supervision requirement for this task.
    pub supervision: SupervisionLevel,
    /// Whether the task involves handling cash alone.
    pub solo_cash_handling: bool,
    /// Whether the task involves driving.
    pub involves_driving: bool,
    /// Whether the task involves power machinery.
    pub power_machinery: bool,
}

/// An effective-dated hourly wage for one task code.
///
/// Multiple rates may exist per task code; the rate in force on a date is
/// the one with the maximum `effective_date <= date`. Rates are never
/// edited or deleted.
///
/// # Example
///
/// ```
/// use youth_labor_engine::models::TaskCodeRate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rate = TaskCodeRate {
///     task_code: "harvest".to_string(),
///     effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     hourly_rate: Decimal::new(800, 2), // 8.00
/// };
/// assert_eq!(rate.hourly_rate.to_string(), "8.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCodeRate {
    /// The task code this rate belongs to.
    pub task_code: String,
    /// The date this rate takes effect (inclusive).
    pub effective_date: NaiveDate,
    /// The hourly wage in force from the effective date.
    pub hourly_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_task_code(code: &str, agricultural: bool) -> TaskCode {
        TaskCode {
            code: code.to_string(),
            name: format!("Task {}", code),
            is_agricultural: agricultural,
            is_hazardous: false,
            minimum_age: 12,
            supervision: SupervisionLevel::ForMinors,
            solo_cash_handling: false,
            involves_driving: false,
            power_machinery: false,
        }
    }

    #[test]
    fn test_deserialize_task_code() {
        let json = r#"{
            "code": "register",
            "name": "Register duty",
            "is_agricultural": false,
            "is_hazardous": false,
            "minimum_age": 14,
            "supervision": "for_minors",
            "solo_cash_handling": true,
            "involves_driving": false,
            "power_machinery": false
        }"#;

        let task: TaskCode = serde_json::from_str(json).unwrap();
        assert_eq!(task.code, "register");
        assert!(!task.is_agricultural);
        assert_eq!(task.minimum_age, 14);
        assert_eq!(task.supervision, SupervisionLevel::ForMinors);
        assert!(task.solo_cash_handling);
    }

    #[test]
    fn test_supervision_level_serialization() {
        assert_eq!(
            serde_json::to_string(&SupervisionLevel::None).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&SupervisionLevel::ForMinors).unwrap(),
            "\"for_minors\""
        );
        assert_eq!(
            serde_json::to_string(&SupervisionLevel::Always).unwrap(),
            "\"always\""
        );
    }

    #[test]
    fn test_task_code_round_trip() {
        let task = create_test_task_code("harvest", true);
        let json = serde_json::to_string(&task).unwrap();
        let deserialized: TaskCode = serde_json::from_str(&json).unwrap();
        assert_eq!(task, deserialized);
    }

    #[test]
    fn test_rate_serialization_keeps_two_decimal_places() {
        let rate = TaskCodeRate {
            task_code: "harvest".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            hourly_rate: dec("8.00"),
        };

        let json = serde_json::to_string(&rate).unwrap();
        assert!(json.contains("\"hourly_rate\":\"8.00\""));
        assert!(json.contains("\"effective_date\":\"2024-01-01\""));
    }

    #[test]
    fn test_rate_deserialization() {
        let json = r#"{
            "task_code": "register",
            "effective_date": "2024-06-01",
            "hourly_rate": "9.00"
        }"#;

        let rate: TaskCodeRate = serde_json::from_str(json).unwrap();
        assert_eq!(rate.task_code, "register");
        assert_eq!(rate.hourly_rate, dec("9.00"));
    }
}
