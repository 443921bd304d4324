//! Permitted work window rules.
//!
//! Ages 14-15 may work 7:00am-7:00pm, extended to 9:00pm during the
//! summer period. Ages 16-17 may work 6:00am-11:30pm, cut off at 10:00pm
//! the night before a school day.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::calendar::{
    AgeBand, is_summer_period, is_sunday_through_thursday, minutes_since_midnight,
};
use crate::context::ComplianceContext;
use crate::models::{RuleCategory, RuleEvaluation, WorkEntry};
use crate::rules::Rule;

/// Earliest start for ages 14-15: 7:00am.
pub const EARLIEST_START_14_15: u32 = 7 * 60;
/// Latest end for ages 14-15 outside the summer period: 7:00pm.
pub const LATEST_END_14_15: u32 = 19 * 60;
/// Latest end for ages 14-15 during the summer period: 9:00pm.
pub const SUMMER_LATEST_END_14_15: u32 = 21 * 60;
/// Earliest start for ages 16-17: 6:00am.
pub const EARLIEST_START_16_17: u32 = 6 * 60;
/// Latest end for ages 16-17 on a non-school night: 11:30pm.
pub const LATEST_END_16_17: u32 = 23 * 60 + 30;
/// Latest end for ages 16-17 on a school night: 10:00pm.
pub const SCHOOL_NIGHT_LATEST_END_16_17: u32 = 22 * 60;

/// Returns true when `date` is the night before a school day.
///
/// The next calendar date's entries are consulted when they exist; with
/// no explicit next-day data (no entries on the next date, or the next
/// date falls outside the week) the fallback is: the week is a school
/// week and `date` is a Sunday through Thursday.
pub fn is_school_night(ctx: &ComplianceContext, date: NaiveDate) -> bool {
    let next = date + Duration::days(1);
    if !ctx.entries_on(next).is_empty() {
        return ctx.is_school_day(next);
    }
    ctx.is_school_week && is_sunday_through_thursday(date)
}

fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// One entry outside its permitted window.
struct WindowViolation<'a> {
    entry: &'a WorkEntry,
    earliest: u32,
    latest: u32,
    window_label: String,
}

/// Shared evaluation for the two work-window rules. `window_for` yields
/// the permitted window (in minutes since midnight) and its label for a
/// given date.
fn evaluate_work_window(
    ctx: &ComplianceContext,
    band: AgeBand,
    base_window_label: &str,
    window_for: impl Fn(NaiveDate) -> (u32, u32, String),
    remediation: &str,
) -> RuleEvaluation {
    let mut violations: Vec<WindowViolation<'_>> = Vec::new();
    for date in ctx.dates_in_band(band) {
        let (earliest, latest, window_label) = window_for(date);
        for entry in ctx.entries_on(date) {
            let start = minutes_since_midnight(entry.start_time);
            let end = minutes_since_midnight(entry.end_time);
            if start < earliest || end > latest {
                violations.push(WindowViolation {
                    entry,
                    earliest,
                    latest,
                    window_label: window_label.clone(),
                });
            }
        }
    }

    if violations.is_empty() {
        return RuleEvaluation::pass(serde_json::json!({
            "window": base_window_label,
        }));
    }

    let first = &violations[0];
    let mut affected_dates: Vec<NaiveDate> =
        violations.iter().map(|v| v.entry.work_date).collect();
    affected_dates.dedup();
    let affected_entries: Vec<Uuid> = violations.iter().map(|v| v.entry.id).collect();

    RuleEvaluation::fail(
        serde_json::json!({
            "window": first.window_label,
            "entry_start": first.entry.start_time.format("%H:%M").to_string(),
            "entry_end": first.entry.end_time.format("%H:%M").to_string(),
            "earliest_start": format_minutes(first.earliest),
            "latest_end": format_minutes(first.latest),
            "violation_count": violations.len(),
        }),
        format!(
            "Entry on {} from {} to {} is outside the permitted window {}",
            first.entry.work_date,
            first.entry.start_time.format("%H:%M"),
            first.entry.end_time.format("%H:%M"),
            first.window_label
        ),
        remediation,
        affected_dates,
        affected_entries,
    )
}

/// Permitted work window for ages 14-15.
pub struct WorkWindow14To15;

impl Rule for WorkWindow14To15 {
    fn id(&self) -> &'static str {
        "work_window_14_15"
    }

    fn name(&self) -> &'static str {
        "Work window (14-15)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::TimeWindow
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages14To15]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_work_window(
            ctx,
            AgeBand::Ages14To15,
            "07:00-19:00",
            |date| {
                if is_summer_period(date) {
                    (
                        EARLIEST_START_14_15,
                        SUMMER_LATEST_END_14_15,
                        "07:00-21:00 (summer)".to_string(),
                    )
                } else {
                    (
                        EARLIEST_START_14_15,
                        LATEST_END_14_15,
                        "07:00-19:00".to_string(),
                    )
                }
            },
            "Schedule 14-15-year-olds between 7:00am and 7:00pm (9:00pm June 1 through the day before Labor Day)",
        )
    }
}

/// Permitted work window for ages 16-17.
pub struct WorkWindow16To17;

impl Rule for WorkWindow16To17 {
    fn id(&self) -> &'static str {
        "work_window_16_17"
    }

    fn name(&self) -> &'static str {
        "Work window (16-17)"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::TimeWindow
    }

    fn age_bands(&self) -> &'static [AgeBand] {
        &[AgeBand::Ages16To17]
    }

    fn evaluate(&self, ctx: &ComplianceContext) -> RuleEvaluation {
        evaluate_work_window(
            ctx,
            AgeBand::Ages16To17,
            "06:00-23:30",
            |date| {
                if is_school_night(ctx, date) {
                    (
                        EARLIEST_START_16_17,
                        SCHOOL_NIGHT_LATEST_END_16_17,
                        "06:00-22:00 (school night)".to_string(),
                    )
                } else {
                    (
                        EARLIEST_START_16_17,
                        LATEST_END_16_17,
                        "06:00-23:30".to_string(),
                    )
                }
            },
            "Schedule 16-17-year-olds between 6:00am and 11:30pm, ending by 10:00pm the night before a school day",
        )
    }
}
