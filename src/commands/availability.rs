//! Provider availability management.
//!
//! Mirrors the provider settings screen: each weekday (0 = Monday .. 6 = Sunday)
//! gets up to three periods. Saving a weekday replaces its previous record.

use crate::db::availability::Availabilities;
use crate::libs::availability::{Period, PeriodKind, ProviderWeekday, WeeklyAvailability};
use crate::libs::messages::Message;
use crate::libs::time::parse_time_range;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum AvailabilityCommand {
    #[command(about = "Show the weekly availability")]
    Show,
    #[command(about = "Set the periods of a weekday, replacing any previous record")]
    Set(SetArgs),
    #[command(about = "Remove the record of a weekday")]
    Clear {
        #[arg(long, short, help = "Day of week, 0 (Monday) to 6 (Sunday)")]
        day: i64,
    },
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(long, short, help = "Day of week, 0 (Monday) to 6 (Sunday)")]
    day: i64,
    #[arg(long, help = "Morning period as HH:MM-HH:MM")]
    morning: Option<String>,
    #[arg(long, help = "Afternoon period as HH:MM-HH:MM")]
    afternoon: Option<String>,
    #[arg(long, help = "Evening period as HH:MM-HH:MM")]
    evening: Option<String>,
}

impl SetArgs {
    /// Builds the weekday record; periods not given stay switched off.
    fn to_record(&self) -> Result<WeeklyAvailability> {
        let day = ProviderWeekday::new(self.day)?;
        let mut record = WeeklyAvailability::new(day);

        let periods = [
            (PeriodKind::Morning, &self.morning),
            (PeriodKind::Afternoon, &self.afternoon),
            (PeriodKind::Evening, &self.evening),
        ];
        if periods.iter().all(|(_, range)| range.is_none()) {
            msg_bail_anyhow!(Message::AvailabilityNoPeriods);
        }
        for (kind, range) in periods {
            if let Some(range) = range {
                let (start, end) = parse_time_range(range)?;
                *record.period_mut(kind) = Period::active(start, end);
            }
        }
        record.validate()?;
        Ok(record)
    }
}

pub fn cmd(command: AvailabilityCommand) -> Result<()> {
    let store = Availabilities::new()?;
    match command {
        AvailabilityCommand::Show => {
            let availabilities = store.fetch_map()?;
            if availabilities.is_empty() {
                msg_info!(Message::AvailabilityEmpty);
                return Ok(());
            }
            msg_print!(Message::AvailabilityHeader, true);
            View::availability(&availabilities)
        }
        AvailabilityCommand::Set(args) => {
            let record = args.to_record()?;
            store.upsert(&record)?;
            msg_success!(Message::AvailabilitySaved(record.day_of_week.to_string()));
            Ok(())
        }
        AvailabilityCommand::Clear { day } => {
            let day = ProviderWeekday::new(day)?;
            if store.delete(day)? {
                msg_success!(Message::AvailabilityCleared(day.to_string()));
            } else {
                msg_warning!(Message::AvailabilityNotFound(day.to_string()));
            }
            Ok(())
        }
    }
}
