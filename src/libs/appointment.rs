//! Already-committed bookings.

use crate::libs::time::time_on_day;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A booked appointment on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    /// Local ledger id, `None` until stored.
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub service_id: Option<i64>,
}

impl Appointment {
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Appointment {
            id: None,
            date,
            start_time,
            end_time,
            service_id: None,
        }
    }

    pub fn with_service(mut self, service_id: Option<i64>) -> Self {
        self.service_id = service_id;
        self
    }

    pub fn start(&self) -> NaiveDateTime {
        time_on_day(self.date, self.start_time)
    }

    pub fn end(&self) -> NaiveDateTime {
        time_on_day(self.date, self.end_time)
    }
}
