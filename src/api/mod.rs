//! HTTP API module for the youth labor engine.
//!
//! This module provides the REST endpoints for compliance evaluation,
//! the week lifecycle, payroll calculation, and rate display.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    DocumentRequest, EmployeeRequest, EvaluationRequest, SubmitRequest, WorkEntryRequest,
};
pub use response::{ApiError, EffectiveRateResponse, EvaluationResponse};
pub use state::AppState;
