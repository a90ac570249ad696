//! CSV export of offered slots over a date range.
//!
//! Each row is one bookable slot: date, weekday, start, end, duration. Days
//! that are not selectable (past, no availability, fully booked) contribute
//! no rows.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slotwise::libs::export::Exporter;
//! use chrono::NaiveDate;
//!
//! let exporter = Exporter::new(None);
//! let from = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
//! let to = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
//! # let availabilities = Default::default();
//! let rows = exporter.export_slots(from, to, from, &availabilities, &[], 60)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::appointment::Appointment;
use crate::libs::availability::{AvailabilityMap, ProviderWeekday};
use crate::libs::formatter::format_slots;
use crate::libs::slots::{available_slots, day_status_on};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

pub struct Exporter {
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter writing to `output_path`, or to a timestamped
    /// `slotwise_slots_YYYYMMDD_HHMMSS.csv` in the working directory.
    pub fn new(output_path: Option<PathBuf>) -> Self {
        let output_path = output_path
            .unwrap_or_else(|| PathBuf::from(format!("slotwise_slots_{}.csv", Local::now().format("%Y%m%d_%H%M%S"))));
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes every selectable slot between `from` and `to` inclusive.
    ///
    /// `today` decides which days count as past. Returns the number of slot rows written.
    pub fn export_slots(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        today: NaiveDate,
        availabilities: &AvailabilityMap,
        appointments: &[Appointment],
        duration: u32,
    ) -> Result<usize> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["Date", "Weekday", "Start", "End", "Duration"])?;

        let mut rows = 0;
        for day in from.iter_days().take_while(|day| *day <= to) {
            if !day_status_on(today, day, availabilities, appointments, duration).is_selectable() {
                continue;
            }
            let weekday = ProviderWeekday::from_date(day);
            for slot in format_slots(&available_slots(day, availabilities, appointments, duration), duration) {
                wtr.write_record([day.to_string(), weekday.name().to_string(), slot.start, slot.end, slot.duration])?;
                rows += 1;
            }
        }

        wtr.flush()?;
        Ok(rows)
    }
}
