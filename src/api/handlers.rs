//! HTTP request handlers for the youth labor engine API.
//!
//! This module contains the handler functions for all API endpoints:
//! pure week evaluation, the week lifecycle (submit/approve/reopen),
//! payroll calculation, and effective-rate display.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::ComplianceContext;
use crate::error::EngineResult;
use crate::models::{ComplianceDocument, Employee, WorkEntry};
use crate::payroll::{calculate_payroll, recalculate_payroll};
use crate::rules::evaluate_week;

use super::request::{EvaluationRequest, SubmitRequest};
use super::response::{ApiError, ApiErrorResponse, EffectiveRateResponse, EvaluationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handler))
        .route("/weeks/:week_id/submit", post(submit_handler))
        .route("/weeks/:week_id/approve", post(approve_handler))
        .route("/weeks/:week_id/reopen", post(reopen_handler))
        .route("/weeks/:week_id/payroll", post(calculate_payroll_handler))
        .route(
            "/weeks/:week_id/payroll/recalculate",
            post(recalculate_payroll_handler),
        )
        .route("/task-codes/:code/rate", get(effective_rate_handler))
        .with_state(state)
}

fn bad_json(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
}

/// Handler for POST /evaluate.
///
/// Runs the full rule registry against a posted snapshot without
/// touching the store; used by clients to preview a week's compliance
/// standing before submission.
async fn evaluate_handler(
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_json(rejection, correlation_id).into_response(),
    };

    match build_context(request) {
        Ok(ctx) => {
            let results = evaluate_week(&ctx);
            let submit_eligible = results.iter().all(|result| !result.is_fail());
            info!(
                correlation_id = %correlation_id,
                submit_eligible,
                result_count = results.len(),
                "Evaluation complete"
            );
            Json(EvaluationResponse {
                submit_eligible,
                results,
            })
            .into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Evaluation rejected");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

fn build_context(request: EvaluationRequest) -> EngineResult<ComplianceContext> {
    let employee: Employee = request.employee.into();
    let entries: Vec<WorkEntry> = request
        .entries
        .into_iter()
        .map(|entry| entry.into_entry())
        .collect::<EngineResult<_>>()?;
    let documents: Vec<ComplianceDocument> = request
        .documents
        .into_iter()
        .map(|document| document.into_document(&employee.id))
        .collect();
    let check_date = request
        .check_date
        .unwrap_or_else(|| Utc::now().date_naive());
    ComplianceContext::build(employee, request.week_start, entries, documents, check_date)
}

/// Handler for POST /weeks/:week_id/submit.
async fn submit_handler(
    State(state): State<AppState>,
    Path(week_id): Path<Uuid>,
    body: Option<Json<SubmitRequest>>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let check_date = body
        .and_then(|Json(request)| request.check_date)
        .unwrap_or_else(|| Utc::now().date_naive());
    info!(
        correlation_id = %correlation_id,
        week_id = %week_id,
        check_date = %check_date,
        "Processing submission"
    );

    match state.store().submit_week(week_id, check_date) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                week_id = %week_id,
                accepted = outcome.accepted(),
                "Submission processed"
            );
            Json(outcome).into_response()
        }
        Err(error) => ApiErrorResponse::from(error).into_response(),
    }
}

/// Handler for POST /weeks/:week_id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    Path(week_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store().approve_week(week_id) {
        Ok(week) => Json(week).into_response(),
        Err(error) => ApiErrorResponse::from(error).into_response(),
    }
}

/// Handler for POST /weeks/:week_id/reopen.
async fn reopen_handler(
    State(state): State<AppState>,
    Path(week_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store().reopen_week(week_id) {
        Ok(week) => Json(week).into_response(),
        Err(error) => ApiErrorResponse::from(error).into_response(),
    }
}

/// Handler for POST /weeks/:week_id/payroll.
async fn calculate_payroll_handler(
    State(state): State<AppState>,
    Path(week_id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, week_id = %week_id, "Calculating payroll");

    match calculate_payroll(state.store(), &state.statutory().minimum_wages, week_id) {
        Ok(record) => Json(record).into_response(),
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Payroll calculation failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for POST /weeks/:week_id/payroll/recalculate.
async fn recalculate_payroll_handler(
    State(state): State<AppState>,
    Path(week_id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, week_id = %week_id, "Recalculating payroll");

    match recalculate_payroll(state.store(), &state.statutory().minimum_wages, week_id) {
        Ok(record) => Json(record).into_response(),
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Payroll recalculation failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct RateQuery {
    date: NaiveDate,
}

/// Handler for GET /task-codes/:code/rate?date=YYYY-MM-DD.
async fn effective_rate_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<RateQuery>,
) -> impl IntoResponse {
    match state.store().effective_rate(&code, query.date) {
        Ok(hourly_rate) => Json(EffectiveRateResponse {
            task_code: code,
            date: query.date,
            hourly_rate,
        })
        .into_response(),
        Err(error) => ApiErrorResponse::from(error).into_response(),
    }
}
