//! Payroll calculation for approved weeks.
//!
//! This module contains the effective-dated rate resolver and the
//! earnings engine that turns an approved week's entries into a single
//! immutable payroll record.

mod engine;
mod rates;

pub use engine::{
    EarningsBreakdown, WEEKLY_OVERTIME_THRESHOLD, WageFloorWarning, calculate_payroll,
    compute_week_earnings, recalculate_payroll,
};
pub use rates::resolve_effective_rate;
