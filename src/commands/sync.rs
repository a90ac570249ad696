use crate::api::BookingClient;
use crate::db::appointments::Appointments;
use crate::db::availability::Availabilities;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_info, msg_success};
use anyhow::Result;

/// Replaces the local availability and the configured service's appointments
/// with what the booking API reports. Nothing is written unless both requests
/// succeed and decode.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let Some(booking) = config.booking else {
        msg_bail_anyhow!(Message::BookingNotConfigured);
    };

    msg_info!(Message::SyncStarted);
    let client = BookingClient::new(&booking);
    let (availability, appointments) = tokio::try_join!(client.fetch_availability(), client.fetch_appointments())
        .map_err(|e| msg_error_anyhow!(Message::BookingRequestFailed(e.to_string())))?;

    Availabilities::new()?.replace_all(&availability)?;
    msg_success!(Message::SyncAvailabilityStored(availability.len()));

    let stored = Appointments::new()?.replace_for_service(Some(booking.service_id), &appointments)?;
    msg_success!(Message::SyncAppointmentsStored(stored));
    Ok(())
}
