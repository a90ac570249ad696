#[derive(Debug, Clone)]
pub enum Message {
    // === AVAILABILITY MESSAGES ===
    AvailabilityHeader,
    AvailabilitySaved(String),   // weekday
    AvailabilityCleared(String), // weekday
    AvailabilityNotFound(String),
    AvailabilityEmpty,
    AvailabilityNoPeriods,

    // === APPOINTMENT MESSAGES ===
    AppointmentsHeader(String), // date or "all"
    AppointmentAdded(i64),
    AppointmentDeleted(i64),
    AppointmentNotFound(i64),
    AppointmentsEmpty,
    AppointmentInvalidRange,

    // === SLOT MESSAGES ===
    SlotsHeader(String, u32), // date, duration
    DayInPast(String),
    DayWithoutAvailability(String, String), // date, weekday
    DayFullyBooked(String),
    DaysHeader(String, u32), // month, duration
    DaysLegend,
    SelectableDaysCount(usize),
    InvalidDuration,

    // === BOOKING MESSAGES ===
    SlotBooked(String, String), // date, time
    SlotNotOffered(String, String),
    ReservationSent(String, String),
    ReservationFailed(String),
    ReservationNotRecorded(String, String), // date, time

    // === SYNC MESSAGES ===
    SyncStarted,
    SyncAvailabilityStored(usize),
    SyncAppointmentsStored(usize),
    BookingNotConfigured,
    BookingRequestFailed(String),

    // === EXPORT MESSAGES ===
    ExportCompleted(String, usize), // path, rows
    ExportInvalidRange,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleBooking,
    ConfigModuleSlots,

    // === PROMPTS ===
    PromptSelectModules,
    PromptBookingApiUrl,
    PromptBookingAuthToken,
    PromptBookingProviderId,
    PromptBookingServiceId,
    PromptDefaultDuration,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),
    MigrationFailed(u32, String), // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32, u32), // current, latest
    DatabaseNeedsUpdate,
    DatabaseUpToDate,
    MigrationHistory,
    MigrationHistoryEntry(u32, String, String), // version, name, applied_at
    MigrationHistoryEmpty,
}
