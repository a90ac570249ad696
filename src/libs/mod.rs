//! Core library modules for the slotwise application.
//!
//! ## Features
//!
//! - **Slot Engine**: Time helpers, availability model, slot expansion and conflict filtering
//! - **Core Infrastructure**: Configuration, data storage, messaging, logging
//! - **User Interface**: Console tables, month calendar, CSV export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use slotwise::db::{appointments::Appointments, availability::Availabilities};
//! use slotwise::libs::slots::available_slots;
//!
//! let today = Local::now().date_naive();
//! let availability = Availabilities::new()?.fetch_map()?;
//! let booked = Appointments::new()?.fetch_for_date(today)?;
//! let slots = available_slots(today, &availability, &booked, 30);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod appointment;
pub mod availability;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod logger;
pub mod messages;
pub mod slots;
pub mod time;
pub mod view;
