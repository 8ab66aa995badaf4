//! Calendar-day normalization and week/month boundary math.
//!
//! Every date that enters the store passes through [`IntoCalendarDay`],
//! which drops the time-of-day (and, for zoned timestamps, the offset) and
//! keeps only the calendar day. Range queries then work on half-open
//! [`DayRange`]s computed by [`week_bounds`] and [`month_bounds`].

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::CalendarError;

/// Wire format for calendar days (`2023-12-25`).
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Conversion of a date-like value to the calendar day it falls on.
pub trait IntoCalendarDay {
    /// Truncate to midnight of the same calendar day.
    fn into_calendar_day(self) -> NaiveDate;
}

impl IntoCalendarDay for NaiveDate {
    fn into_calendar_day(self) -> NaiveDate {
        self
    }
}

impl IntoCalendarDay for NaiveDateTime {
    fn into_calendar_day(self) -> NaiveDate {
        self.date()
    }
}

/// Zoned timestamps keep the day as seen in their own offset, so
/// `2023-12-25T23:30:00-05:00` is the 25th even though it is the 26th in UTC.
impl<Tz: TimeZone> IntoCalendarDay for DateTime<Tz> {
    fn into_calendar_day(self) -> NaiveDate {
        self.date_naive()
    }
}

/// A half-open span of calendar days, `start <= day < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    /// First day inside the range.
    pub start: NaiveDate,
    /// First day after the range. `None` when that day lies past the last
    /// representable date, in which case the range is unbounded above.
    pub end: Option<NaiveDate>,
}

impl DayRange {
    /// Whether `day` falls inside the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && self.end.is_none_or(|end| day < end)
    }
}

/// The ISO week (Monday through Sunday) containing `day`.
///
/// Sunday counts as the seventh day, so a Sunday belongs to the week that
/// started six days earlier, never to the one starting the next morning.
pub fn week_bounds(day: NaiveDate) -> DayRange {
    let offset = u64::from(day.weekday().num_days_from_monday());
    let start = day.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN);
    DayRange {
        start,
        end: start.checked_add_days(Days::new(7)),
    }
}

/// The calendar month containing `day`.
pub fn month_bounds(day: NaiveDate) -> DayRange {
    let start = day.with_day(1).unwrap_or(day);
    DayRange {
        start,
        end: start.checked_add_months(Months::new(1)),
    }
}

/// Parse a `YYYY-MM-DD` day string.
///
/// Only four year digits, two month digits, and two day digits separated
/// by `-` are accepted. Single-digit or space-padded fields, signs, and
/// trailing times are rejected.
pub fn parse_day(s: &str) -> Result<NaiveDate, CalendarError> {
    let well_formed = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(CalendarError::InvalidDate);
    }
    NaiveDate::parse_from_str(s, DAY_FORMAT).map_err(|_e| CalendarError::InvalidDate)
}
