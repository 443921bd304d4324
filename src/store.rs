//! In-memory storage boundary.
//!
//! [`MemoryStore`] stands in for the persistence collaborator. It owns
//! the uniqueness invariants the engine depends on: at most one payroll
//! record per week and one task code per code. Both are enforced inside
//! a single write lock, and a losing concurrent insert receives the
//! already-stored row back instead of an error, so check-then-insert
//! races resolve to "already exists, re-fetch" rather than a crash or a
//! duplicate.
//!
//! The store also runs the week lifecycle: the submission gate (evaluate
//! all rules, persist the result set, transition only on zero failures),
//! approval, and reopening for correction.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::ComplianceContext;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ComplianceCheckResult, ComplianceDocument, Employee, PayrollRecord, TaskCode,
    TaskCodeRate, Week, WeekStatus, WorkEntry,
};
use crate::payroll::resolve_effective_rate;
use crate::rules::evaluate_week;

/// The outcome of a submission attempt.
///
/// Submission is not an error when rules fail: the caller always gets
/// the complete result list, and `status` reports whether the week
/// transitioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// The week that was submitted.
    pub week_id: Uuid,
    /// The week's status after the attempt (`submitted` on success,
    /// still `open` when any rule failed).
    pub status: WeekStatus,
    /// Every rule's result, in registry order.
    pub results: Vec<ComplianceCheckResult>,
}

impl SubmissionOutcome {
    /// True when the gate let the week through.
    pub fn accepted(&self) -> bool {
        self.status == WeekStatus::Submitted
    }
}

/// In-memory implementation of the storage boundary.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<HashMap<String, Employee>>,
    task_codes: RwLock<HashMap<String, TaskCode>>,
    rates: RwLock<HashMap<String, Vec<TaskCodeRate>>>,
    weeks: RwLock<HashMap<Uuid, Week>>,
    documents: RwLock<HashMap<String, Vec<ComplianceDocument>>>,
    check_results: RwLock<HashMap<Uuid, Vec<ComplianceCheckResult>>>,
    payroll_records: RwLock<HashMap<Uuid, PayrollRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    // ---- employees ----------------------------------------------------

    /// Inserts or replaces an employee record.
    pub fn upsert_employee(&self, employee: Employee) {
        self.employees
            .write()
            .expect("store lock poisoned")
            .insert(employee.id.clone(), employee);
    }

    /// Fetches an employee by id.
    pub fn employee(&self, id: &str) -> EngineResult<Employee> {
        self.employees
            .read()
            .expect("store lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    // ---- task codes and rates -----------------------------------------

    /// Inserts a task code, enforcing code uniqueness.
    ///
    /// Returns the stored record: the new one on first insert, the
    /// existing one when the code is already taken (the losing side of a
    /// concurrent create sees the winner's row, not an error).
    pub fn insert_task_code(&self, task_code: TaskCode) -> TaskCode {
        let mut task_codes = self.task_codes.write().expect("store lock poisoned");
        if let Some(existing) = task_codes.get(&task_code.code) {
            info!(code = %task_code.code, "Task code already exists; returning existing record");
            return existing.clone();
        }
        task_codes.insert(task_code.code.clone(), task_code.clone());
        task_code
    }

    /// Fetches a task code by code.
    pub fn task_code(&self, code: &str) -> EngineResult<TaskCode> {
        self.task_codes
            .read()
            .expect("store lock poisoned")
            .get(code)
            .cloned()
            .ok_or_else(|| EngineError::TaskCodeNotFound {
                code: code.to_string(),
            })
    }

    /// Appends a rate to a task code's wage history.
    ///
    /// Rate history is append-only and never rewritten: the effective
    /// date must be `today` or later, and the task code must exist.
    pub fn add_rate(&self, rate: TaskCodeRate, today: NaiveDate) -> EngineResult<()> {
        // Existence check first so an unknown code is reported as such.
        self.task_code(&rate.task_code)?;
        if rate.effective_date < today {
            return Err(EngineError::RateEffectiveDateInPast {
                task_code: rate.task_code.clone(),
                effective_date: rate.effective_date,
                today,
            });
        }
        self.rates
            .write()
            .expect("store lock poisoned")
            .entry(rate.task_code.clone())
            .or_default()
            .push(rate);
        Ok(())
    }

    /// The full rate history for a task code.
    pub fn rate_history(&self, code: &str) -> Vec<TaskCodeRate> {
        self.rates
            .read()
            .expect("store lock poisoned")
            .get(code)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolves the rate in force for a task code on a date.
    ///
    /// # Errors
    ///
    /// - [`EngineError::TaskCodeNotFound`] for an unknown code.
    /// - [`EngineError::RateNotFound`] when no rate was in force.
    pub fn effective_rate(&self, code: &str, date: NaiveDate) -> EngineResult<Decimal> {
        self.task_code(code)?;
        let history = self.rate_history(code);
        resolve_effective_rate(&history, date)
            .map(|rate| rate.hourly_rate)
            .ok_or_else(|| EngineError::RateNotFound {
                task_code: code.to_string(),
                date,
            })
    }

    /// Snapshot of all task codes, keyed by code.
    pub fn task_codes_snapshot(&self) -> HashMap<String, TaskCode> {
        self.task_codes
            .read()
            .expect("store lock poisoned")
            .clone()
    }

    /// Snapshot of all rate histories, keyed by task code.
    pub fn rate_histories_snapshot(&self) -> HashMap<String, Vec<TaskCodeRate>> {
        self.rates.read().expect("store lock poisoned").clone()
    }

    // ---- documents ----------------------------------------------------

    /// Attaches a document to its employee.
    pub fn add_document(&self, document: ComplianceDocument) {
        self.documents
            .write()
            .expect("store lock poisoned")
            .entry(document.employee_id.clone())
            .or_default()
            .push(document);
    }

    /// All documents on file for an employee, including revoked ones.
    pub fn documents_for(&self, employee_id: &str) -> Vec<ComplianceDocument> {
        self.documents
            .read()
            .expect("store lock poisoned")
            .get(employee_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Soft-revokes a document; it stays on file for audit.
    pub fn revoke_document(&self, employee_id: &str, document_id: Uuid, at: DateTime<Utc>) {
        if let Some(documents) = self
            .documents
            .write()
            .expect("store lock poisoned")
            .get_mut(employee_id)
        {
            for document in documents.iter_mut() {
                if document.id == document_id {
                    document.invalidated_at = Some(at);
                }
            }
        }
    }

    // ---- weeks --------------------------------------------------------

    /// Stores a week.
    pub fn insert_week(&self, week: Week) -> Uuid {
        let id = week.id;
        self.weeks
            .write()
            .expect("store lock poisoned")
            .insert(id, week);
        id
    }

    /// Fetches a week by id.
    pub fn week(&self, week_id: Uuid) -> EngineResult<Week> {
        self.weeks
            .read()
            .expect("store lock poisoned")
            .get(&week_id)
            .cloned()
            .ok_or(EngineError::WeekNotFound { week_id })
    }

    /// Adds an entry to an open week.
    pub fn add_entry(&self, week_id: Uuid, entry: WorkEntry) -> EngineResult<()> {
        let mut weeks = self.weeks.write().expect("store lock poisoned");
        let week = weeks
            .get_mut(&week_id)
            .ok_or(EngineError::WeekNotFound { week_id })?;
        week.add_entry(entry)
    }

    /// Runs the submission gate for an open week.
    ///
    /// Builds the compliance context, evaluates the full rule registry,
    /// persists the result set (replacing any set from a previous
    /// attempt), and transitions the week to `submitted` only when zero
    /// rules failed. Rule failures are reported in the outcome, never as
    /// an error.
    pub fn submit_week(
        &self,
        week_id: Uuid,
        check_date: NaiveDate,
    ) -> EngineResult<SubmissionOutcome> {
        let week = self.week(week_id)?;
        if week.status != WeekStatus::Open {
            return Err(EngineError::InvalidWeekState {
                week_id,
                expected: WeekStatus::Open.to_string(),
                actual: week.status.to_string(),
            });
        }

        let employee = self.employee(&week.employee_id)?;
        let documents = self.documents_for(&week.employee_id);
        let ctx = ComplianceContext::build(
            employee,
            week.week_start,
            week.entries.clone(),
            documents,
            check_date,
        )?;
        let results = evaluate_week(&ctx);
        let failures = results.iter().filter(|result| result.is_fail()).count();

        self.check_results
            .write()
            .expect("store lock poisoned")
            .insert(week_id, results.clone());

        let status = if failures == 0 {
            let mut weeks = self.weeks.write().expect("store lock poisoned");
            let stored = weeks
                .get_mut(&week_id)
                .ok_or(EngineError::WeekNotFound { week_id })?;
            stored.mark_submitted()?;
            stored.status
        } else {
            warn!(
                week_id = %week_id,
                failures,
                "Submission rejected by compliance gate"
            );
            week.status
        };

        Ok(SubmissionOutcome {
            week_id,
            status,
            results,
        })
    }

    /// The persisted check results for a week's latest submission attempt.
    pub fn check_results_for(&self, week_id: Uuid) -> Vec<ComplianceCheckResult> {
        self.check_results
            .read()
            .expect("store lock poisoned")
            .get(&week_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Approves a submitted week.
    pub fn approve_week(&self, week_id: Uuid) -> EngineResult<Week> {
        let mut weeks = self.weeks.write().expect("store lock poisoned");
        let week = weeks
            .get_mut(&week_id)
            .ok_or(EngineError::WeekNotFound { week_id })?;
        week.mark_approved()?;
        Ok(week.clone())
    }

    /// Returns a submitted week to `open` for correction.
    pub fn reopen_week(&self, week_id: Uuid) -> EngineResult<Week> {
        let mut weeks = self.weeks.write().expect("store lock poisoned");
        let week = weeks
            .get_mut(&week_id)
            .ok_or(EngineError::WeekNotFound { week_id })?;
        week.mark_reopened()?;
        Ok(week.clone())
    }

    // ---- payroll records ----------------------------------------------

    /// Inserts a payroll record, enforcing one record per week.
    ///
    /// Returns the stored record: the new one on first insert, the
    /// existing one when the week already has a record. The check and
    /// the insert happen under one write lock, so two concurrent
    /// calculations cannot both insert.
    pub fn insert_payroll_record(&self, record: PayrollRecord) -> PayrollRecord {
        let mut records = self.payroll_records.write().expect("store lock poisoned");
        if let Some(existing) = records.get(&record.week_id) {
            info!(
                week_id = %record.week_id,
                "Payroll record already exists for week; returning existing record"
            );
            return existing.clone();
        }
        records.insert(record.week_id, record.clone());
        record
    }

    /// The payroll record for a week, if one exists.
    pub fn payroll_record_for_week(&self, week_id: Uuid) -> Option<PayrollRecord> {
        self.payroll_records
            .read()
            .expect("store lock poisoned")
            .get(&week_id)
            .cloned()
    }

    /// Deletes a week's payroll record (recalculation only).
    pub fn delete_payroll_record(&self, week_id: Uuid) -> Option<PayrollRecord> {
        self.payroll_records
            .write()
            .expect("store lock poisoned")
            .remove(&week_id)
    }

    /// Stamps a week's payroll record as exported.
    pub fn mark_payroll_exported(
        &self,
        week_id: Uuid,
        at: DateTime<Utc>,
    ) -> EngineResult<PayrollRecord> {
        let mut records = self.payroll_records.write().expect("store lock poisoned");
        let record = records
            .get_mut(&week_id)
            .ok_or(EngineError::WeekNotFound { week_id })?;
        record.exported_at = Some(at);
        Ok(record.clone())
    }
}
