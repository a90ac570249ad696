//! Wall-clock arithmetic used by the slot engine.
//!
//! Availability windows and appointments are stored as a calendar date plus
//! wall-clock times. The helpers here anchor those times to a concrete day and
//! step forward by whole minutes, leaving all calendar rollover to `chrono`.

use crate::libs::error::SlotError;
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Accepted wall-clock formats, most specific first.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Combines `day` with the wall-clock `time`, dropping any sub-second part.
///
/// # Examples
///
/// ```rust
/// use chrono::{NaiveDate, NaiveTime};
/// use slotwise::libs::time::time_on_day;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let time = NaiveTime::from_hms_milli_opt(8, 30, 0, 250).unwrap();
/// assert_eq!(time_on_day(day, time), day.and_hms_opt(8, 30, 0).unwrap());
/// ```
pub fn time_on_day(day: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    let whole_seconds = time.with_nanosecond(0).unwrap_or(time);
    day.and_time(whole_seconds)
}

/// Returns `dt` moved `minutes` forward. Hour and day boundaries roll over.
pub fn add_minutes(dt: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    dt + Duration::minutes(minutes)
}

/// Parses a wall-clock string such as `08:00:00` or `08:00`.
pub fn parse_wall_clock(value: &str) -> Result<NaiveTime, SlotError> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| SlotError::InvalidTime(value.to_string()))
}

/// Parses a `YYYY-MM-DD` date, or the keyword `today`.
pub fn parse_date(value: &str, today: NaiveDate) -> Result<NaiveDate, SlotError> {
    if value.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| SlotError::InvalidDate(value.to_string()))
}

/// Parses a `HH:MM-HH:MM` range as used by the availability command.
pub fn parse_time_range(value: &str) -> Result<(NaiveTime, NaiveTime), SlotError> {
    let (start, end) = value.split_once('-').ok_or_else(|| SlotError::InvalidTime(value.to_string()))?;
    Ok((parse_wall_clock(start)?, parse_wall_clock(end)?))
}

/// Parses a `YYYY-MM` month into its first day. `current` selects the month of `today`.
pub fn parse_month(value: &str, today: NaiveDate) -> Result<NaiveDate, SlotError> {
    if value.eq_ignore_ascii_case("current") {
        return Ok(first_of_month(today));
    }
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").map_err(|_| SlotError::InvalidDate(value.to_string()))
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Last calendar day of the month containing `day`.
pub fn last_of_month(day: NaiveDate) -> NaiveDate {
    first_of_month(day)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(day)
}
