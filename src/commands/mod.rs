pub mod appointment;
pub mod availability;
pub mod book;
pub mod days;
pub mod export;
pub mod init;
pub mod migrations;
pub mod slots;
pub mod sync;

use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(subcommand, about = "Manage the provider's weekly availability")]
    Availability(availability::AvailabilityCommand),
    #[command(subcommand, about = "Manage booked appointments")]
    Appointment(appointment::AppointmentCommand),
    #[command(about = "List bookable slots for a day")]
    Slots(slots::SlotsArgs),
    #[command(about = "Show which days of a month can be booked")]
    Days(days::DaysArgs),
    #[command(about = "Book an offered slot")]
    Book(book::BookArgs),
    #[command(about = "Fetch availability and appointments from the booking API")]
    Sync,
    #[command(about = "Export offered slots to CSV")]
    Export(export::ExportArgs),
    #[command(subcommand, about = "Show database schema status and history")]
    Migrations(migrations::MigrationsCommand),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Availability(command) => availability::cmd(command),
            Commands::Appointment(command) => appointment::cmd(command),
            Commands::Slots(args) => slots::cmd(args),
            Commands::Days(args) => days::cmd(args),
            Commands::Book(args) => book::cmd(args).await,
            Commands::Sync => sync::cmd().await,
            Commands::Export(args) => export::cmd(args),
            Commands::Migrations(command) => migrations::cmd(command),
        }
    }
}

/// Slot duration from `--duration`, the config, or the built-in default. Zero is rejected.
pub(crate) fn resolve_duration(requested: Option<u32>) -> Result<u32> {
    let duration = Config::read()?.slot_duration(requested);
    if duration == 0 {
        msg_bail_anyhow!(Message::InvalidDuration);
    }
    Ok(duration)
}
