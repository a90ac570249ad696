//! Clients for external services.
//!
//! The booking/profile API is the only remote collaborator: it owns provider
//! availability and committed appointments. Everything else in slotwise
//! works offline against the local database.

pub mod booking;

pub use booking::BookingClient;
