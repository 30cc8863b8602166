//! Reference date window computation
//!
//! A window is the inclusive `[last_day, first_day]` interval used to filter
//! date-versioned files; `first_day` is the recent bound. Both bounds can be
//! snapped backward to a fixed weekday so weekly datasets resolve the same
//! way regardless of when the job runs.

use crate::error::{Result, VerdateError};
use chrono::{Datelike, Duration, Local, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Calendar unit of the trailing history window.
///
/// Serialized with the single-letter codes used in dataset configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeScale {
    #[serde(rename = "D")]
    Days,
    #[serde(rename = "M")]
    Months,
    #[serde(rename = "Y")]
    Years,
}

/// How far back to look and which weekday to snap to.
///
/// `align_to` is a tagged optional rather than a nullable integer, so
/// "aligned to Monday" and "unaligned" cannot be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindowSpec {
    pub scale: TimeScale,
    pub length: u32,
    pub align_to: Option<Weekday>,
    /// Override for "today", used to reproduce historical runs.
    pub as_of: Option<NaiveDate>,
}

/// Inclusive reference interval with `first_day >= last_day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl ResolvedWindow {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.last_day <= day && day <= self.first_day
    }
}

/// Resolve a window specification into concrete bounds.
///
/// `first_day` is the reference date (the `as_of` override or today) snapped
/// backward to the alignment weekday; `last_day` steps back by the calendar
/// offset and is then re-snapped, so both bounds fall on the alignment
/// weekday. A zero-length window degenerates to a single day.
pub fn resolve_window(spec: &DateWindowSpec) -> Result<ResolvedWindow> {
    let first_day = snap_to_weekday(reference_day(spec.as_of), spec.align_to);
    let stepped = subtract_offset(first_day, spec.scale, spec.length)?;
    let last_day = snap_to_weekday(stepped, spec.align_to);
    Ok(ResolvedWindow {
        first_day,
        last_day,
    })
}

/// The most recent date on or before the reference date falling on the
/// alignment weekday (the reference date itself when unaligned or already
/// aligned). Used standalone by templated path formatting.
pub fn most_recent_aligned(as_of: Option<NaiveDate>, align_to: Option<Weekday>) -> NaiveDate {
    snap_to_weekday(reference_day(as_of), align_to)
}

fn reference_day(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

fn snap_to_weekday(day: NaiveDate, align_to: Option<Weekday>) -> NaiveDate {
    match align_to {
        None => day,
        Some(target) => {
            let days_back = (day.weekday().num_days_from_monday() + 7
                - target.num_days_from_monday())
                % 7;
            day - Duration::days(days_back as i64)
        }
    }
}

/// Calendar-aware subtraction. Month and year steps clamp to the last valid
/// day of the target month: Mar 31 minus one month is Feb 28, or Feb 29 in
/// leap years.
fn subtract_offset(day: NaiveDate, scale: TimeScale, length: u32) -> Result<NaiveDate> {
    let stepped = match scale {
        TimeScale::Days => day.checked_sub_signed(Duration::days(length as i64)),
        TimeScale::Months => day.checked_sub_months(Months::new(length)),
        TimeScale::Years => length
            .checked_mul(12)
            .and_then(|months| day.checked_sub_months(Months::new(months))),
    };
    stepped.ok_or_else(|| {
        VerdateError::InvalidWindow(format!("cannot step {length} {scale:?} back from {day}"))
    })
}
