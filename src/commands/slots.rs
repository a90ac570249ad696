use crate::commands::resolve_duration;
use crate::db::appointments::Appointments;
use crate::db::availability::Availabilities;
use crate::libs::availability::ProviderWeekday;
use crate::libs::messages::Message;
use crate::libs::slots::{available_slots, day_status_on, DayStatus};
use crate::libs::time::parse_date;
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct SlotsArgs {
    #[arg(long, short, default_value = "today", help = "Date (YYYY-MM-DD or 'today')")]
    date: String,
    #[arg(long, help = "Appointment length in minutes")]
    duration: Option<u32>,
}

pub fn cmd(slots_args: SlotsArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let date = parse_date(&slots_args.date, today)?;
    let duration = resolve_duration(slots_args.duration)?;

    let availabilities = Availabilities::new()?.fetch_map()?;
    let appointments = Appointments::new()?.fetch_for_date(date)?;

    match day_status_on(today, date, &availabilities, &appointments, duration) {
        DayStatus::Past => msg_warning!(Message::DayInPast(date.to_string())),
        DayStatus::NoAvailability => {
            msg_info!(Message::DayWithoutAvailability(
                date.to_string(),
                ProviderWeekday::from_date(date).to_string()
            ))
        }
        DayStatus::FullyBooked => msg_info!(Message::DayFullyBooked(date.to_string())),
        DayStatus::Selectable(_) => {
            msg_print!(Message::SlotsHeader(date.to_string(), duration), true);
            View::slots(&available_slots(date, &availabilities, &appointments, duration), duration)?;
        }
    }
    Ok(())
}
