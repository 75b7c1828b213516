//! # Report Window Resolution
//!
//! Turns the operator's requested date range into the instant range that
//! sales are filtered by.
//!
//! ## Live Shift vs Calendar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Requested range          Window                                        │
//! │  ───────────────          ──────                                        │
//! │  [today, today]           [shift start, now]       ← LIVE SHIFT         │
//! │                           [midnight today, now]    ← no shift known     │
//! │                                                                         │
//! │  anything else            [00:00:00.000 of start,                       │
//! │                            23:59:59.999 of end]    ← CALENDAR           │
//! │                                                                         │
//! │  Shift that began at 21:00 yesterday:                                   │
//! │                                                                         │
//! │   yesterday 00:00        21:00          today 00:00            now      │
//! │   ─────┼──────────────────┼────────────────┼────────────────────┼──►   │
//! │        │  previous shift  │◄─────────── live shift window ─────►│      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calendar days are evaluated in the caller's time zone. The current
//! instant and the zone are always passed in; nothing here reads a clock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{validate_date_range, ValidationResult};

// =============================================================================
// Report Window
// =============================================================================

/// Which rule produced a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum WindowKind {
    /// Today's report, anchored at shift start and ending now.
    LiveShift,
    /// Whole calendar days.
    Calendar,
}

/// Inclusive instant range used to filter sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportWindow {
    #[ts(as = "String")]
    pub start: DateTime<Utc>,
    #[ts(as = "String")]
    pub end: DateTime<Utc>,
    pub kind: WindowKind,
}

impl ReportWindow {
    /// `start ≤ at ≤ end`, both ends inclusive.
    ///
    /// A reversed window (start after end) contains nothing.
    #[inline]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// Inclusive calendar date range picked by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// A one-day range.
    pub fn single(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date,
        }
    }

    /// Builds a range from picker values; both must be present.
    pub fn from_inputs(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ValidationResult<Self> {
        let (start, end) = validate_date_range(start, end)?;
        Ok(DateRange { start, end })
    }

    /// Expands a quick-range shortcut around `today`.
    pub fn quick(range: QuickRange, today: NaiveDate) -> Self {
        match range {
            QuickRange::Today => DateRange::single(today),
            QuickRange::Week => {
                let since_monday = today.weekday().num_days_from_monday();
                DateRange::new(today - Duration::days(i64::from(since_monday)), today)
            }
            QuickRange::Month => {
                let first = today - Duration::days(i64::from(today.day0()));
                DateRange::new(first, last_day_of_month(today))
            }
        }
    }

    #[inline]
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Whether this is exactly "today" and so resolves to the live shift.
    #[inline]
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.start == today && self.end == today
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

// =============================================================================
// Quick Range
// =============================================================================

/// Date shortcuts offered next to the pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum QuickRange {
    /// Today only (the live shift).
    Today,
    /// Monday of the current week through today.
    Week,
    /// The whole current month.
    Month,
}

impl FromStr for QuickRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(QuickRange::Today),
            "week" => Ok(QuickRange::Week),
            "month" => Ok(QuickRange::Month),
            other => Err(ValidationError::InvalidFormat {
                field: "quick range".to_string(),
                reason: format!("unknown range '{}' (expected today, week or month)", other),
            }),
        }
    }
}

impl fmt::Display for QuickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuickRange::Today => "today",
            QuickRange::Week => "week",
            QuickRange::Month => "month",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// The calendar date of `now` in `tz`.
pub fn today_in<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// First instant of `date` in `tz`.
///
/// When local midnight does not exist (a DST gap), the naive midnight is
/// read as UTC instead.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::default());
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Last millisecond of `date` in `tz` (23:59:59.999 local).
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let next_midnight = match date.succ_opt() {
        Some(next) => start_of_day(next, tz),
        None => start_of_day(date, tz) + Duration::days(1),
    };
    next_midnight - Duration::milliseconds(1)
}

/// Resolves the instant window for a requested date range.
///
/// ## Rules
/// - `[today, today]` is the live shift: from `shift_start` (or local
///   midnight when no shift is known) to `now`
/// - anything else covers whole calendar days, start midnight to end
///   23:59:59.999
///
/// ## Example
/// ```rust
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use tally_core::window::{resolve_window, DateRange, WindowKind};
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap();
/// let shift = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
/// let today = DateRange::single(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
///
/// let window = resolve_window(&today, now, &Utc, Some(shift));
/// assert_eq!(window.kind, WindowKind::LiveShift);
/// assert_eq!((window.start, window.end), (shift, now));
/// ```
pub fn resolve_window<Tz: TimeZone>(
    range: &DateRange,
    now: DateTime<Utc>,
    tz: &Tz,
    shift_start: Option<DateTime<Utc>>,
) -> ReportWindow {
    let today = today_in(now, tz);

    if range.is_today(today) {
        let start = shift_start.unwrap_or_else(|| start_of_day(today, tz));
        return ReportWindow {
            start,
            end: now,
            kind: WindowKind::LiveShift,
        };
    }

    ReportWindow {
        start: start_of_day(range.start, tz),
        end: end_of_day(range.end, tz),
        kind: WindowKind::Calendar,
    }
}

/// Header text for a report.
///
/// A single day shows the window start with time (so a live shift reads
/// "from when"), a range shows both dates.
pub fn window_label<Tz: TimeZone>(range: &DateRange, window: &ReportWindow, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    if range.is_single_day() {
        window
            .start
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    } else {
        format!(
            "{} - {}",
            range.start.format("%Y-%m-%d"),
            range.end.format("%Y-%m-%d")
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
