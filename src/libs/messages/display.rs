//! Display implementation for slotwise application messages.
//!
//! Every user-facing string lives here, so commands only ever pick a
//! [`Message`] variant and its parameters. The macros in
//! [`super::macros`] add the status prefixes and decide whether the text goes
//! to the console or to `tracing`.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === AVAILABILITY MESSAGES ===
            Message::AvailabilityHeader => "Weekly availability".to_string(),
            Message::AvailabilitySaved(day) => format!("Availability for {} saved", day),
            Message::AvailabilityCleared(day) => format!("Availability for {} removed", day),
            Message::AvailabilityNotFound(day) => format!("No availability recorded for {}", day),
            Message::AvailabilityEmpty => "No weekly availability recorded yet. Use 'slotwise availability set' or 'slotwise sync'".to_string(),
            Message::AvailabilityNoPeriods => "At least one of --morning, --afternoon or --evening is required".to_string(),

            // === APPOINTMENT MESSAGES ===
            Message::AppointmentsHeader(scope) => format!("Appointments ({})", scope),
            Message::AppointmentAdded(id) => format!("Appointment {} added", id),
            Message::AppointmentDeleted(id) => format!("Appointment {} deleted", id),
            Message::AppointmentNotFound(id) => format!("Appointment {} not found", id),
            Message::AppointmentsEmpty => "No appointments found".to_string(),
            Message::AppointmentInvalidRange => "Appointment start time must be before its end time".to_string(),

            // === SLOT MESSAGES ===
            Message::SlotsHeader(date, duration) => format!("Available {}-minute slots for {}", duration, date),
            Message::DayInPast(date) => format!("{} is in the past, no slots can be offered", date),
            Message::DayWithoutAvailability(date, weekday) => {
                format!("{} is a {}, which has no provider availability", date, weekday)
            }
            Message::DayFullyBooked(date) => format!("{} is fully booked", date),
            Message::DaysHeader(month, duration) => format!("Selectable days in {} for {}-minute appointments", month, duration),
            Message::DaysLegend => "[dd] selectable, dd not selectable".to_string(),
            Message::SelectableDaysCount(count) => format!("{} selectable day(s)", count),
            Message::InvalidDuration => "Slot duration must be greater than zero minutes".to_string(),

            // === BOOKING MESSAGES ===
            Message::SlotBooked(date, time) => format!("Booked {} at {}", date, time),
            Message::SlotNotOffered(date, time) => format!("{} at {} is not an offered slot", date, time),
            Message::ReservationSent(date, time) => format!("Reservation for {} at {} sent to the booking API", date, time),
            Message::ReservationFailed(error) => format!("Failed to send reservation: {}", error),
            Message::ReservationNotRecorded(date, time) => {
                format!("Reservation for {} at {} was accepted by the booking API but not recorded locally. Run 'slotwise sync' to restore it", date, time)
            }

            // === SYNC MESSAGES ===
            Message::SyncStarted => "Fetching availability and appointments from the booking API".to_string(),
            Message::SyncAvailabilityStored(count) => format!("Stored {} weekly availability record(s)", count),
            Message::SyncAppointmentsStored(count) => format!("Stored {} appointment(s)", count),
            Message::BookingNotConfigured => "Booking API is not configured. Run 'slotwise init' first".to_string(),
            Message::BookingRequestFailed(error) => format!("Booking API request failed: {}", error),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path, rows) => format!("Exported {} slot(s) to {}", rows, path),
            Message::ExportInvalidRange => "Export start date must not be after the end date".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleBooking => "Booking API settings".to_string(),
            Message::ConfigModuleSlots => "Slot settings".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptBookingApiUrl => "Enter the booking API URL".to_string(),
            Message::PromptBookingAuthToken => "Enter the booking API token".to_string(),
            Message::PromptBookingProviderId => "Enter the provider id".to_string(),
            Message::PromptBookingServiceId => "Enter the service id".to_string(),
            Message::PromptDefaultDuration => "Enter the default slot duration in minutes".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseVersion(current, latest) => format!("Database schema version: {} (latest: {})", current, latest),
            Message::DatabaseNeedsUpdate => "Database has pending migrations; they run on the next command".to_string(),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::MigrationHistory => "Applied migrations:".to_string(),
            Message::MigrationHistoryEntry(version, name, applied_at) => format!("  v{}: {} (applied: {})", version, name, applied_at),
            Message::MigrationHistoryEmpty => "No migrations have been applied yet".to_string(),
        };
        write!(f, "{}", text)
    }
}
