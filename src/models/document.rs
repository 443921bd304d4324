//! Compliance document model.
//!
//! Documents are typed records (parental consent, work permit, safety
//! training) attached to an employee. They are never hard-deleted:
//! revocation sets `invalidated_at` so the audit trail survives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of compliance document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Parental consent to employment, required for all minors.
    ParentalConsent,
    /// State work permit, required for ages 14-17.
    WorkPermit,
    /// Record of completed safety training, required for all minors.
    SafetyTraining,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::ParentalConsent => write!(f, "parental_consent"),
            DocumentType::WorkPermit => write!(f, "work_permit"),
            DocumentType::SafetyTraining => write!(f, "safety_training"),
        }
    }
}

/// A typed compliance record belonging to an employee.
///
/// # Example
///
/// ```
/// use youth_labor_engine::models::{ComplianceDocument, DocumentType};
/// use chrono::NaiveDate;
///
/// let permit = ComplianceDocument::new("emp_001", DocumentType::WorkPermit)
///     .expiring(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
///
/// let in_force = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let lapsed = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
/// assert!(permit.is_valid_on(in_force));
/// assert!(!permit.is_valid_on(lapsed));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDocument {
    /// Unique identifier for the document.
    pub id: Uuid,
    /// The employee this document belongs to.
    pub employee_id: String,
    /// What kind of document this is.
    pub document_type: DocumentType,
    /// Optional expiration date (inclusive of the day before).
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
    /// Soft-revocation timestamp; a revoked document stays on file.
    #[serde(default)]
    pub invalidated_at: Option<DateTime<Utc>>,
}

impl ComplianceDocument {
    /// Creates a non-expiring, non-revoked document.
    pub fn new(employee_id: &str, document_type: DocumentType) -> ComplianceDocument {
        ComplianceDocument {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            document_type,
            expires_at: None,
            invalidated_at: None,
        }
    }

    /// Builder-style helper setting an expiration date.
    pub fn expiring(mut self, expires_at: NaiveDate) -> ComplianceDocument {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns true when the document has been soft-revoked.
    pub fn is_revoked(&self) -> bool {
        self.invalidated_at.is_some()
    }

    /// Returns true when the document has expired as of `date`.
    ///
    /// A document with no expiration never expires. The expiration date
    /// itself is the first day the document is no longer in force.
    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        self.expires_at.is_some_and(|expires| date >= expires)
    }

    /// Returns true when the document is in force: not revoked and not
    /// expired as of `date`.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        !self.is_revoked() && !self.is_expired_on(date)
    }
}
