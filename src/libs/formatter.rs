//! Formatting helpers for slots, appointments and durations.
//!
//! Everything shown in tables or written to exports goes through here so the
//! console and CSV output agree on a single representation:
//!
//! - durations as `HH:MM`, negative values clamped to `00:00`
//! - wall-clock times as 24-hour `HH:MM`
//! - dates as ISO `YYYY-MM-DD`

use crate::libs::appointment::Appointment;
use crate::libs::time::add_minutes;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A slot or appointment rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedEvent {
    /// Sequential row number starting at 1
    pub id: i64,
    /// Start time as `HH:MM`
    pub start: String,
    /// End time as `HH:MM`
    pub end: String,
    /// Length as `HH:MM`
    pub duration: String,
}

/// Formats a duration as `HH:MM`. Negative durations render as `00:00`.
///
/// ```rust
/// use chrono::Duration;
/// use slotwise::libs::formatter::format_duration;
///
/// assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
/// assert_eq!(format_duration(&Duration::minutes(-5)), "00:00");
/// ```
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Renders slot start times as rows of a fixed `duration`.
pub fn format_slots(slots: &[NaiveDateTime], duration: u32) -> Vec<FormattedEvent> {
    slots
        .iter()
        .enumerate()
        .map(|(index, start)| FormattedEvent {
            id: (index + 1) as i64,
            start: format_time(start.time()),
            end: format_time(add_minutes(*start, i64::from(duration)).time()),
            duration: format_duration(&Duration::minutes(i64::from(duration))),
        })
        .collect()
}

/// Renders appointments, numbering rows by their ledger id when stored.
pub fn format_appointments(appointments: &[Appointment]) -> Vec<FormattedEvent> {
    appointments
        .iter()
        .enumerate()
        .map(|(index, appointment)| FormattedEvent {
            id: appointment.id.unwrap_or((index + 1) as i64),
            start: format_time(appointment.start_time),
            end: format_time(appointment.end_time),
            duration: format_duration(&(appointment.end() - appointment.start())),
        })
        .collect()
}
