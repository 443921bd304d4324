//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum for
//! representing workers subject to compliance checking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{AgeBand, age_band_on_date, age_on_date};

/// Represents whether an employee is active or archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// The employee is currently employed.
    Active,
    /// The employee record is retained for audit but no longer active.
    Archived,
}

/// Represents an employee subject to labor compliance checking.
///
/// Age is deliberately absent from this struct. A single work week may
/// span a birthday, so age and age band are always derived from the date
/// of birth as of a specific date.
///
/// # Example
///
/// ```
/// use youth_labor_engine::models::{Employee, EmployeeStatus};
/// use youth_labor_engine::calendar::AgeBand;
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     date_of_birth: NaiveDate::from_ymd_opt(2009, 3, 20).unwrap(),
///     is_supervisor: false,
///     status: EmployeeStatus::Active,
/// };
///
/// let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// assert_eq!(employee.age_on(date), 15);
/// assert_eq!(employee.age_band_on(date), AgeBand::Ages14To15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
    /// Whether the employee can act as a supervisor.
    pub is_supervisor: bool,
    /// Active/archived status.
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns the employee's age in whole years as of a date.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        age_on_date(self.date_of_birth, date)
    }

    /// Returns the employee's statutory age band as of a date.
    pub fn age_band_on(&self, date: NaiveDate) -> AgeBand {
        age_band_on_date(self.date_of_birth, date)
    }

    /// Returns true if the employee is a minor (under 18) as of a date.
    pub fn is_minor_on(&self, date: NaiveDate) -> bool {
        self.age_band_on(date).is_minor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(dob: NaiveDate) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            date_of_birth: dob,
            is_supervisor: false,
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn test_age_is_derived_not_stored() {
        let employee =
            create_test_employee(NaiveDate::from_ymd_opt(2010, 8, 10).unwrap());

        // Same record, different dates, different ages.
        assert_eq!(
            employee.age_on(NaiveDate::from_ymd_opt(2024, 8, 9).unwrap()),
            13
        );
        assert_eq!(
            employee.age_on(NaiveDate::from_ymd_opt(2024, 8, 10).unwrap()),
            14
        );
    }

    #[test]
    fn test_age_band_transitions_mid_week() {
        // 14th birthday on Wednesday 2024-06-05; the surrounding week
        // spans both the 12-13 and 14-15 bands.
        let employee =
            create_test_employee(NaiveDate::from_ymd_opt(2010, 6, 5).unwrap());

        assert_eq!(
            employee.age_band_on(NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()),
            AgeBand::Ages12To13
        );
        assert_eq!(
            employee.age_band_on(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()),
            AgeBand::Ages14To15
        );
    }

    #[test]
    fn test_is_minor_on() {
        let employee =
            create_test_employee(NaiveDate::from_ymd_opt(2006, 1, 2).unwrap());

        assert!(employee.is_minor_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(!employee.is_minor_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_001",
            "date_of_birth": "2008-11-30",
            "is_supervisor": false,
            "status": "active"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(
            employee.date_of_birth,
            NaiveDate::from_ymd_opt(2008, 11, 30).unwrap()
        );
        assert!(!employee.is_supervisor);
        assert_eq!(employee.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee =
            create_test_employee(NaiveDate::from_ymd_opt(2009, 2, 14).unwrap());
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::Archived).unwrap(),
            "\"archived\""
        );
    }
}
