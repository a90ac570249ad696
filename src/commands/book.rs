//! Books an offered slot.
//!
//! The requested start must be one of the slots `slotwise slots` would list
//! for that day. When the booking API is configured the reservation is posted
//! there first and only recorded locally once the API accepted it.

use crate::api::BookingClient;
use crate::commands::resolve_duration;
use crate::db::appointments::Appointments;
use crate::db::availability::Availabilities;
use crate::libs::appointment::Appointment;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::slots::ensure_offered_on;
use crate::libs::time::{add_minutes, parse_date, parse_wall_clock, time_on_day};
use crate::{msg_error_anyhow, msg_success, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct BookArgs {
    #[arg(long, short, default_value = "today", help = "Date (YYYY-MM-DD or 'today')")]
    date: String,
    #[arg(long, short, help = "Slot start time (HH:MM)")]
    time: String,
    #[arg(long, help = "Appointment length in minutes")]
    duration: Option<u32>,
    #[arg(long, help = "Service to book (defaults to the configured service)")]
    service_id: Option<i64>,
}

pub async fn cmd(book_args: BookArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let date = parse_date(&book_args.date, today)?;
    let start_time = parse_wall_clock(&book_args.time)?;
    let duration = resolve_duration(book_args.duration)?;
    let start = time_on_day(date, start_time);

    let availabilities = Availabilities::new()?.fetch_map()?;
    let store = Appointments::new()?;
    let appointments = store.fetch_for_date(date)?;

    if ensure_offered_on(today, start, &availabilities, &appointments, duration).is_err() {
        return Err(msg_error_anyhow!(Message::SlotNotOffered(date.to_string(), book_args.time)));
    }

    let config = Config::read()?;
    let service_id = book_args.service_id.or(config.booking.as_ref().map(|booking| booking.service_id));
    let mut reserved = false;
    if let (Some(booking), Some(service_id)) = (&config.booking, service_id) {
        BookingClient::new(booking)
            .reserve(date, start.time(), service_id)
            .await
            .map_err(|e| msg_error_anyhow!(Message::ReservationFailed(e.to_string())))?;
        reserved = true;
        msg_success!(Message::ReservationSent(date.to_string(), start.format("%H:%M").to_string()));
    }

    let end = add_minutes(start, i64::from(duration));
    let appointment = Appointment::new(date, start.time(), end.time()).with_service(service_id);
    let id = record_booking(&store, &appointment, reserved)?;
    info!(id, %start, duration, "appointment booked");

    msg_success!(Message::SlotBooked(date.to_string(), start.format("%H:%M").to_string()));
    Ok(())
}

/// Stores the booked appointment. When the API already holds the reservation,
/// a failed insert is reported so the ledger can be repaired with a sync.
fn record_booking(store: &Appointments, appointment: &Appointment, reserved: bool) -> Result<i64> {
    store.insert(appointment).inspect_err(|e| {
        if reserved {
            warn!(error = %e, date = %appointment.date, time = %appointment.start_time, "reservation posted but not recorded");
            msg_warning!(Message::ReservationNotRecorded(
                appointment.date.to_string(),
                appointment.start_time.format("%H:%M").to_string()
            ));
        }
    })
}
