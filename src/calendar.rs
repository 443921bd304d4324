//! Calendar and age classification logic.
//!
//! This module provides the pure date/time functions the rule engine is
//! built on: whole-year age calculation, statutory age bands, the summer
//! work period (June 1 through the day before Labor Day), and
//! minutes-since-midnight conversion for time-of-day window comparisons.
//!
//! All times are local wall-clock values for a fixed organizational
//! timezone; no timezone conversion happens anywhere in the engine.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A statutory age band determining which hour and time-of-day rules apply.
///
/// The partition is total: every age maps to exactly one band, with
/// thresholds at 14, 16, and 18. Ages below 12 fall into the lowest band;
/// eligibility screening for them belongs to the surrounding application.
///
/// # Example
///
/// ```
/// use youth_labor_engine::calendar::AgeBand;
///
/// assert_eq!(AgeBand::for_age(13), AgeBand::Ages12To13);
/// assert_eq!(AgeBand::for_age(14), AgeBand::Ages14To15);
/// assert_eq!(AgeBand::for_age(16), AgeBand::Ages16To17);
/// assert_eq!(AgeBand::for_age(18), AgeBand::Adult);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    /// Ages 13 and under.
    #[serde(rename = "12-13")]
    Ages12To13,
    /// Ages 14 and 15.
    #[serde(rename = "14-15")]
    Ages14To15,
    /// Ages 16 and 17.
    #[serde(rename = "16-17")]
    Ages16To17,
    /// Ages 18 and over; no minor-labor restrictions apply.
    #[serde(rename = "18+")]
    Adult,
}

impl AgeBand {
    /// Classifies an age in whole years into its statutory band.
    pub fn for_age(age: u32) -> AgeBand {
        match age {
            0..=13 => AgeBand::Ages12To13,
            14..=15 => AgeBand::Ages14To15,
            16..=17 => AgeBand::Ages16To17,
            _ => AgeBand::Adult,
        }
    }

    /// Returns true for every band other than [`AgeBand::Adult`].
    pub fn is_minor(self) -> bool {
        self != AgeBand::Adult
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgeBand::Ages12To13 => write!(f, "12-13"),
            AgeBand::Ages14To15 => write!(f, "14-15"),
            AgeBand::Ages16To17 => write!(f, "16-17"),
            AgeBand::Adult => write!(f, "18+"),
        }
    }
}

/// Calculates an employee's age in whole years as of a given date.
///
/// The count of elapsed years is decremented by one when the month/day of
/// `date` precedes the month/day of `date_of_birth`, so the age ticks over
/// exactly on the birthday. Age is never stored on an employee record; it
/// is always derived through this function for a specific date, because a
/// single week may span a birthday.
///
/// # Example
///
/// ```
/// use youth_labor_engine::calendar::age_on_date;
/// use chrono::NaiveDate;
///
/// let dob = NaiveDate::from_ymd_opt(2010, 6, 15).unwrap();
/// let day_before = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// let birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
///
/// assert_eq!(age_on_date(dob, day_before), 13);
/// assert_eq!(age_on_date(dob, birthday), 14);
/// ```
pub fn age_on_date(date_of_birth: NaiveDate, date: NaiveDate) -> u32 {
    if date < date_of_birth {
        return 0;
    }
    let mut age = date.year() - date_of_birth.year();
    if (date.month(), date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Returns the employee's age band as of a given date.
pub fn age_band_on_date(date_of_birth: NaiveDate, date: NaiveDate) -> AgeBand {
    AgeBand::for_age(age_on_date(date_of_birth, date))
}

/// Computes Labor Day (the first Monday of September) for a year.
///
/// # Example
///
/// ```
/// use youth_labor_engine::calendar::labor_day;
/// use chrono::NaiveDate;
///
/// assert_eq!(labor_day(2024), NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
/// assert_eq!(labor_day(2025), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
/// ```
pub fn labor_day(year: i32) -> NaiveDate {
    // September 1 always exists, so the unwrap cannot fire.
    let september_first = NaiveDate::from_ymd_opt(year, 9, 1).unwrap();
    let days_until_monday =
        (7 - september_first.weekday().num_days_from_monday()) % 7;
    september_first + Duration::days(days_until_monday as i64)
}

/// Returns true when a date falls in the summer work period.
///
/// The summer period runs from June 1 through the day before Labor Day.
/// During this period the 14-15 evening work boundary extends from 7pm
/// to 9pm.
///
/// # Example
///
/// ```
/// use youth_labor_engine::calendar::is_summer_period;
/// use chrono::NaiveDate;
///
/// assert!(is_summer_period(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
/// assert!(is_summer_period(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()));
/// // Labor Day 2024 is September 2
/// assert!(!is_summer_period(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()));
/// assert!(!is_summer_period(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
/// ```
pub fn is_summer_period(date: NaiveDate) -> bool {
    // June 1 always exists for the date's year.
    let june_first = NaiveDate::from_ymd_opt(date.year(), 6, 1).unwrap();
    date >= june_first && date < labor_day(date.year())
}

/// Returns true when a date's weekday is Sunday through Thursday.
///
/// Used as the fallback school-night predicate when no explicit next-day
/// entry data exists.
pub fn is_sunday_through_thursday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
}

/// Converts a wall-clock time to minutes since midnight.
///
/// All time-of-day window comparisons in the rule engine are done on this
/// representation.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Parses an `HH:MM` string into minutes since midnight.
///
/// # Example
///
/// ```
/// use youth_labor_engine::calendar::time_to_minutes;
///
/// assert_eq!(time_to_minutes("07:00").unwrap(), 420);
/// assert_eq!(time_to_minutes("23:30").unwrap(), 1410);
/// assert!(time_to_minutes("25:00").is_err());
/// ```
pub fn time_to_minutes(value: &str) -> EngineResult<u32> {
    let parsed = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        EngineError::InvalidTime {
            value: value.to_string(),
        }
    })?;
    Ok(minutes_since_midnight(parsed))
}
