//! Payroll record model.
//!
//! One immutable record per approved week. Monetary fields are scale-2
//! decimals so serialized values always carry exactly two fraction
//! digits, which keeps totals reproducible across recalculation and CSV
//! export.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rounds a monetary value to 2 decimal places and pins the scale to 2,
/// so `950` serializes as `"950.00"`.
pub fn money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// The immutable earnings record for one approved week.
///
/// # Example
///
/// ```
/// use youth_labor_engine::models::money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(money(Decimal::from_str("950").unwrap()).to_string(), "950.00");
/// assert_eq!(money(Decimal::from_str("49.999").unwrap()).to_string(), "50.00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The week this record was calculated for. At most one record may
    /// exist per week.
    pub week_id: Uuid,
    /// The Sunday the pay period starts on.
    pub period_start: NaiveDate,
    /// The Saturday the pay period ends on.
    pub period_end: NaiveDate,
    /// Hours worked on agricultural task codes.
    pub agricultural_hours: Decimal,
    /// Earnings from agricultural task codes.
    pub agricultural_earnings: Decimal,
    /// Hours worked on non-agricultural task codes.
    pub non_agricultural_hours: Decimal,
    /// Earnings from non-agricultural task codes (at straight time).
    pub non_agricultural_earnings: Decimal,
    /// Non-agricultural hours beyond the weekly overtime threshold.
    pub overtime_hours: Decimal,
    /// The overtime premium (the extra 0.5x component only; straight
    /// time for those hours is already in the non-agricultural bucket).
    pub overtime_earnings: Decimal,
    /// Agricultural + non-agricultural + overtime premium.
    pub total_earnings: Decimal,
    /// When the calculation ran.
    pub calculated_at: DateTime<Utc>,
    /// When the record was exported, if it has been.
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}
