//! Error types for the youth labor engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during compliance evaluation
//! and payroll calculation.
//!
//! Compliance rule failures are NOT errors: they are first-class `fail`
//! results returned by the rule engine. The variants here cover
//! preconditions, configuration problems, and malformed input.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the youth labor engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use youth_labor_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::RateNotFound {
///     task_code: "harvest".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "No rate found for task code 'harvest' on date 2024-03-15"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee identifier that was not found.
        id: String,
    },

    /// No week exists with the given identifier.
    #[error("Week not found: {week_id}")]
    WeekNotFound {
        /// The week identifier that was not found.
        week_id: Uuid,
    },

    /// No task code exists with the given code.
    #[error("Task code not found: {code}")]
    TaskCodeNotFound {
        /// The task code that was not found.
        code: String,
    },

    /// No wage rate was in force for the task code on the given date.
    ///
    /// This is a hard error rather than a zero-rate fallback: silently
    /// paying $0 is unacceptable.
    #[error("No rate found for task code '{task_code}' on date {date}")]
    RateNotFound {
        /// The task code the rate was requested for.
        task_code: String,
        /// The work date for which no rate was in force.
        date: NaiveDate,
    },

    /// A new rate's effective date was in the past.
    ///
    /// Rate history is append-only; rates may only take effect today or
    /// later so the historical record is never rewritten.
    #[error(
        "Rate for task code '{task_code}' has effective date {effective_date} in the past (today is {today})"
    )]
    RateEffectiveDateInPast {
        /// The task code the rate was submitted for.
        task_code: String,
        /// The rejected effective date.
        effective_date: NaiveDate,
        /// The date the submission was validated against.
        today: NaiveDate,
    },

    /// A week was not in the state an operation requires.
    #[error("Week {week_id} is {actual}, expected {expected}")]
    InvalidWeekState {
        /// The week the operation was attempted on.
        week_id: Uuid,
        /// The state the operation requires.
        expected: String,
        /// The state the week was actually in.
        actual: String,
    },

    /// A week's start date was not Sunday-aligned.
    #[error("Week start {week_start} is not a Sunday")]
    WeekStartNotSunday {
        /// The rejected start date.
        week_start: NaiveDate,
    },

    /// A work entry's date fell outside its week's 7-day span.
    #[error("Entry dated {work_date} is outside the week starting {week_start}")]
    EntryOutsideWeek {
        /// The entry's work date.
        work_date: NaiveDate,
        /// The start of the week the entry was attached to.
        week_start: NaiveDate,
    },

    /// A work entry contained inconsistent data.
    #[error("Invalid entry '{entry_id}': {message}")]
    InvalidEntry {
        /// The ID of the invalid entry.
        entry_id: Uuid,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// A time string could not be parsed as HH:MM.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
