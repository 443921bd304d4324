//! Response types for the youth labor engine API.
//!
//! This module defines the error response structures, the status mapping
//! from engine errors, and the success payloads for evaluation and rate
//! display.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::ComplianceCheckResult;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::EmployeeNotFound { .. } => {
                (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND")
            }
            EngineError::WeekNotFound { .. } => (StatusCode::NOT_FOUND, "WEEK_NOT_FOUND"),
            EngineError::TaskCodeNotFound { .. } => {
                (StatusCode::NOT_FOUND, "TASK_CODE_NOT_FOUND")
            }
            EngineError::RateNotFound { .. } => (StatusCode::NOT_FOUND, "NO_RATE_FOUND"),
            EngineError::RateEffectiveDateInPast { .. } => {
                (StatusCode::BAD_REQUEST, "RATE_EFFECTIVE_DATE_IN_PAST")
            }
            EngineError::InvalidWeekState { .. } => {
                (StatusCode::CONFLICT, "INVALID_WEEK_STATE")
            }
            EngineError::WeekStartNotSunday { .. } => {
                (StatusCode::BAD_REQUEST, "WEEK_START_NOT_SUNDAY")
            }
            EngineError::EntryOutsideWeek { .. } => {
                (StatusCode::BAD_REQUEST, "ENTRY_OUTSIDE_WEEK")
            }
            EngineError::InvalidEntry { .. } => (StatusCode::BAD_REQUEST, "INVALID_ENTRY"),
            EngineError::InvalidTime { .. } => (StatusCode::BAD_REQUEST, "INVALID_TIME"),
            EngineError::CalculationError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CALCULATION_ERROR")
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}

/// Response body for the `/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
    /// True when zero rules failed (the week would be submit-eligible).
    pub submit_eligible: bool,
    /// Every rule's result, in registry order.
    pub results: Vec<ComplianceCheckResult>,
}

/// Response body for the rate display endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveRateResponse {
    /// The task code queried.
    pub task_code: String,
    /// The date queried.
    pub date: NaiveDate,
    /// The hourly rate in force on that date.
    pub hourly_rate: Decimal,
}
