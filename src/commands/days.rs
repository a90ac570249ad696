//! Month calendar of bookable days, as shown to a client picking a date.

use crate::commands::resolve_duration;
use crate::db::appointments::Appointments;
use crate::db::availability::Availabilities;
use crate::libs::messages::Message;
use crate::libs::slots::is_day_selectable_on;
use crate::libs::time::{last_of_month, parse_month};
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct DaysArgs {
    #[arg(long, short, default_value = "current", help = "Month (YYYY-MM or 'current')")]
    month: String,
    #[arg(long, help = "Appointment length in minutes")]
    duration: Option<u32>,
}

pub fn cmd(days_args: DaysArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let first_day = parse_month(&days_args.month, today)?;
    let last_day = last_of_month(first_day);
    let duration = resolve_duration(days_args.duration)?;

    let availabilities = Availabilities::new()?.fetch_map()?;
    let appointments = Appointments::new()?.fetch_range(first_day, last_day)?;

    let selectable: Vec<NaiveDate> = first_day
        .iter_days()
        .take_while(|day| *day <= last_day)
        .filter(|day| is_day_selectable_on(today, *day, &availabilities, &appointments, duration))
        .collect();

    msg_print!(Message::DaysHeader(first_day.format("%B %Y").to_string(), duration), true);
    View::month(first_day, &selectable)?;
    msg_print!(Message::DaysLegend);
    msg_print!(Message::SelectableDaysCount(selectable.len()));
    Ok(())
}
