use crate::commands::resolve_duration;
use crate::db::appointments::Appointments;
use crate::db::availability::Availabilities;
use crate::libs::export::Exporter;
use crate::libs::messages::Message;
use crate::libs::time::parse_date;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use chrono::{Duration, Local};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long, default_value = "today", help = "First day (YYYY-MM-DD or 'today')")]
    from: String,
    #[arg(long, help = "Last day, inclusive (defaults to six days after --from)")]
    to: Option<String>,
    #[arg(long, help = "Appointment length in minutes")]
    duration: Option<u32>,
    #[arg(short, long, help = "Output file path")]
    output: Option<PathBuf>,
}

pub fn cmd(export_args: ExportArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let from = parse_date(&export_args.from, today)?;
    let to = match &export_args.to {
        Some(to) => parse_date(to, today)?,
        None => from + Duration::days(6),
    };
    if from > to {
        msg_bail_anyhow!(Message::ExportInvalidRange);
    }
    let duration = resolve_duration(export_args.duration)?;

    let availabilities = Availabilities::new()?.fetch_map()?;
    let appointments = Appointments::new()?.fetch_range(from, to)?;

    let exporter = Exporter::new(export_args.output);
    let rows = exporter.export_slots(from, to, today, &availabilities, &appointments, duration)?;
    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string(), rows));
    Ok(())
}
