//! Request types for the youth labor engine API.
//!
//! This module defines the JSON request structures for the `/evaluate`
//! endpoint and the week lifecycle endpoints, with conversions into
//! domain types. Times arrive as `HH:MM` strings since entries are
//! minute-precision.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ComplianceDocument, DocumentType, Employee, EmployeeStatus, WorkEntry,
};

/// Request body for the `/evaluate` endpoint.
///
/// Carries a full snapshot of the employee, week, and documents so the
/// evaluation is pure and needs nothing from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The employee information.
    pub employee: EmployeeRequest,
    /// The Sunday the week starts on.
    pub week_start: NaiveDate,
    /// The date to run the checks as of; defaults to today.
    #[serde(default)]
    pub check_date: Option<NaiveDate>,
    /// The week's work entries.
    #[serde(default)]
    pub entries: Vec<WorkEntryRequest>,
    /// The employee's compliance documents.
    #[serde(default)]
    pub documents: Vec<DocumentRequest>,
}

/// Employee information in an evaluation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
    /// Whether the employee can act as a supervisor.
    #[serde(default)]
    pub is_supervisor: bool,
}

/// Work entry information in an evaluation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkEntryRequest {
    /// The calendar date the shift was worked.
    pub work_date: NaiveDate,
    /// Shift start time as `HH:MM`.
    pub start_time: String,
    /// Shift end time as `HH:MM`.
    pub end_time: String,
    /// The task code performed.
    pub task_code: String,
    /// Whether school was in session on the work date.
    #[serde(default)]
    pub is_school_day: bool,
}

/// Document information in an evaluation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// What kind of document this is.
    pub document_type: DocumentType,
    /// Optional expiration date.
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
    /// Soft-revocation timestamp, when the document has been revoked.
    #[serde(default)]
    pub invalidated_at: Option<DateTime<Utc>>,
}

/// Optional body for the submit endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// The date to run the checks as of; defaults to today.
    #[serde(default)]
    pub check_date: Option<NaiveDate>,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            date_of_birth: req.date_of_birth,
            is_supervisor: req.is_supervisor,
            status: EmployeeStatus::Active,
        }
    }
}

fn parse_time(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| EngineError::InvalidTime {
        value: value.to_string(),
    })
}

impl WorkEntryRequest {
    /// Converts into a domain entry, parsing the `HH:MM` times.
    pub fn into_entry(self) -> EngineResult<WorkEntry> {
        WorkEntry::new(
            self.work_date,
            parse_time(&self.start_time)?,
            parse_time(&self.end_time)?,
            &self.task_code,
            self.is_school_day,
        )
    }
}

impl DocumentRequest {
    /// Converts into a domain document for the given employee.
    pub fn into_document(self, employee_id: &str) -> ComplianceDocument {
        let mut document = ComplianceDocument::new(employee_id, self.document_type);
        document.expires_at = self.expires_at;
        document.invalidated_at = self.invalidated_at;
        document
    }
}
