//! Database layer for the slotwise application.
//!
//! SQLite persistence for the provider's weekly availability and the local
//! appointment ledger. Schema changes go through the versioned migration
//! system, which runs every time a [`db::Db`] is opened.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slotwise::db::{appointments::Appointments, availability::Availabilities};
//! use chrono::Local;
//!
//! let availability = Availabilities::new()?.fetch_map()?;
//! let booked = Appointments::new()?.fetch_for_date(Local::now().date_naive())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management and initialization.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Weekly availability records, one per provider weekday.
pub mod availability;

/// Booked appointments.
pub mod appointments;
