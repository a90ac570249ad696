//! Typed errors raised at the input boundaries of the slot engine.
//!
//! The slot computation itself never fails: it works on already-typed
//! `chrono` values. Everything that turns raw text (CLI arguments, database
//! rows, booking API payloads) into those values reports problems through
//! [`SlotError`], so callers can tell a malformed record apart from an I/O
//! failure.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A wall-clock value that is neither `HH:MM:SS` nor `HH:MM`.
    #[error("invalid time '{0}', expected HH:MM:SS or HH:MM")]
    InvalidTime(String),

    /// A calendar date that is not `YYYY-MM-DD`.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A provider weekday outside 0 (Monday) ..= 6 (Sunday).
    #[error("invalid day of week {0}, expected 0 (Monday) to 6 (Sunday)")]
    InvalidWeekday(i64),

    /// An availability period that violates its invariants.
    #[error("invalid {period} period: {reason}")]
    InvalidPeriod { period: String, reason: String },

    /// A booking API payload that does not match the expected schema.
    #[error("failed to decode {what}: {reason}")]
    Decode { what: String, reason: String },

    /// A requested start time that is not among the offered slots.
    #[error("slot {0} is not available")]
    SlotUnavailable(String),
}

impl SlotError {
    pub fn decode(what: impl Into<String>, reason: impl ToString) -> Self {
        SlotError::Decode {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}
