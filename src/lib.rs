//! # Slotwise - appointment slot availability
//!
//! A command-line utility and library that works out which appointment slots
//! a service provider can offer, from a weekly availability schedule and the
//! appointments already booked.
//!
//! ## Features
//!
//! - **Slot Computation**: Expand morning, afternoon and evening periods into
//!   fixed-length slots and drop those overlapping a booking
//! - **Day Eligibility**: Decide which calendar days can be offered at all
//! - **Local Ledger**: SQLite storage for availability and appointments
//! - **Booking API Sync**: Pull availability and bookings, post reservations
//! - **Data Export**: Offered slots as CSV
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slotwise::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
