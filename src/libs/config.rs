//! Configuration management for the slotwise application.
//!
//! Settings are stored as pretty-printed JSON in the platform application data
//! directory and are split into optional modules, so a provider who only keeps
//! a local ledger never has to configure the booking API.
//!
//! ## Modules
//!
//! - **Booking**: Booking/profile API endpoint, token and the provider and
//!   service whose availability and appointments are synchronized
//! - **Slots**: Defaults for slot computation, such as the appointment length
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\slotwise\slotwise\config.json`
//! - **macOS**: `~/Library/Application Support/slotwise/slotwise/config.json`
//! - **Linux**: `~/.local/share/slotwise/slotwise/config.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slotwise::libs::config::Config;
//!
//! let config = Config::read()?;
//! let duration = config.slot_duration(None);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Slot length used when neither the command line nor the config sets one.
pub const DEFAULT_SLOT_DURATION: u32 = 60;

/// A configurable module offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Identifier used to route the wizard
    pub key: String,
    /// Display name shown during interactive setup
    pub name: String,
}

/// Booking/profile API connection settings.
///
/// The API is the source of truth for a provider's weekly availability and
/// for appointments already booked on a service. `slotwise sync` reads both,
/// `slotwise book` posts new reservations.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BookingConfig {
    /// Base URL of the booking API, without a trailing slash.
    ///
    /// Example: `https://api.example.com/v1`
    pub api_url: String,

    /// Bearer token sent with every request.
    pub auth_token: String,

    /// Provider whose weekly availability is read.
    pub provider_id: i64,

    /// Service whose appointments are read and booked.
    pub service_id: i64,
}

impl BookingConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "booking".to_string(),
            name: "Booking API".to_string(),
        }
    }

    /// Prompts for booking API settings, using `config` as defaults.
    pub fn init(config: &Option<BookingConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            api_url: "".to_string(),
            auth_token: "".to_string(),
            provider_id: 0,
            service_id: 0,
        });

        msg_print!(Message::ConfigModuleBooking);

        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBookingApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            auth_token: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBookingAuthToken.to_string())
                .default(config.auth_token)
                .interact_text()?,
            provider_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBookingProviderId.to_string())
                .default(config.provider_id)
                .interact_text()?,
            service_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBookingServiceId.to_string())
                .default(config.service_id)
                .interact_text()?,
        })
    }
}

/// Defaults for slot computation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SlotsConfig {
    /// Appointment length in minutes used when `--duration` is not given.
    pub default_duration: u32,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        SlotsConfig {
            default_duration: DEFAULT_SLOT_DURATION,
        }
    }
}

impl SlotsConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "slots".to_string(),
            name: "Slots".to_string(),
        }
    }

    pub fn init(config: &Option<SlotsConfig>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleSlots);

        Ok(Self {
            default_duration: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDefaultDuration.to_string())
                .default(default.default_duration)
                .validate_with(|value: &u32| if *value > 0 { Ok(()) } else { Err(Message::InvalidDuration.to_string()) })
                .interact_text()?,
        })
    }
}

/// Root configuration. Unconfigured modules are omitted from the JSON file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<SlotsConfig>,
}

impl Config {
    /// Loads the configuration, falling back to the default when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Resolves the slot duration: explicit value, then config, then the built-in default.
    pub fn slot_duration(&self, requested: Option<u32>) -> u32 {
        requested
            .or_else(|| self.slots.as_ref().map(|slots| slots.default_duration))
            .unwrap_or(DEFAULT_SLOT_DURATION)
    }

    /// Runs the interactive setup wizard, starting from the stored configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![BookingConfig::module(), SlotsConfig::module()];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "booking" => config.booking = Some(BookingConfig::init(&config.booking)?),
                "slots" => config.slots = Some(SlotsConfig::init(&config.slots)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
