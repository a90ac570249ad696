//! Booking/profile API client.
//!
//! Reads a provider's weekly availability and the appointments already booked
//! on a service, and posts new reservations. Responses are decoded into
//! explicit wire types first and then converted into domain types; any record
//! that does not satisfy the domain invariants fails the whole decode with a
//! [`SlotError::Decode`], so a half-understood payload never reaches the slot
//! engine.
//!
//! Each call is a single request. There is no retry, debounce or cancellation;
//! callers that need them add them around this client.
//!
//! ## Endpoints
//!
//! - `GET  {api_url}/providers/{provider_id}/availability`
//! - `GET  {api_url}/services/{service_id}/appointments`
//! - `POST {api_url}/reservations`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slotwise::api::booking::BookingClient;
//! use slotwise::libs::config::Config;
//!
//! # async fn run() -> anyhow::Result<()> {
//! if let Some(booking) = Config::read()?.booking {
//!     let client = BookingClient::new(&booking);
//!     let week = client.fetch_availability().await?;
//!     println!("{} weekday(s) available", week.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::libs::appointment::Appointment;
use crate::libs::availability::{Period, ProviderWeekday, WeeklyAvailability};
use crate::libs::config::BookingConfig;
use crate::libs::error::SlotError;
use crate::libs::time::parse_wall_clock;
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug)]
pub struct BookingClient {
    client: Client,
    config: BookingConfig,
}

/// Weekly availability as sent by the API.
#[derive(Debug, Deserialize)]
struct AvailabilityRecord {
    day_of_week: i64,
    #[serde(default)]
    morning_active: bool,
    morning_start_time: Option<String>,
    morning_end_time: Option<String>,
    #[serde(default)]
    afternoon_active: bool,
    afternoon_start_time: Option<String>,
    afternoon_end_time: Option<String>,
    #[serde(default)]
    evening_active: bool,
    evening_start_time: Option<String>,
    evening_end_time: Option<String>,
}

/// A booked appointment as sent by the API.
#[derive(Debug, Deserialize)]
struct AppointmentRecord {
    date: String,
    start_time: String,
    end_time: String,
}

/// Reservation request body.
#[derive(Debug, Serialize, PartialEq)]
pub struct Reservation {
    pub date: String,
    pub time: String,
    pub service_id: i64,
}

impl Reservation {
    pub fn new(date: NaiveDate, time: NaiveTime, service_id: i64) -> Self {
        Reservation {
            date: date.format("%Y-%m-%d").to_string(),
            time: time.format("%H:%M:%S").to_string(),
            service_id,
        }
    }
}

impl BookingClient {
    pub fn new(config: &BookingConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    pub async fn fetch_availability(&self) -> Result<Vec<WeeklyAvailability>> {
        let url = self.url(&format!("providers/{}/availability", self.config.provider_id));
        debug!(%url, "fetching weekly availability");
        let body = self
            .client
            .get(&url)
            .bearer_auth(&self.config.auth_token)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(parse_availability_payload(&body)?)
    }

    pub async fn fetch_appointments(&self) -> Result<Vec<Appointment>> {
        let url = self.url(&format!("services/{}/appointments", self.config.service_id));
        debug!(%url, "fetching booked appointments");
        let body = self
            .client
            .get(&url)
            .bearer_auth(&self.config.auth_token)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let appointments = parse_appointments_payload(&body)?
            .into_iter()
            .map(|appointment| appointment.with_service(Some(self.config.service_id)))
            .collect();
        Ok(appointments)
    }

    /// Posts a reservation for `service_id`.
    pub async fn reserve(&self, date: NaiveDate, time: NaiveTime, service_id: i64) -> Result<()> {
        let url = self.url("reservations");
        let reservation = Reservation::new(date, time, service_id);
        debug!(%url, ?reservation, "posting reservation");
        self.client
            .post(&url)
            .bearer_auth(&self.config.auth_token)
            .json(&reservation)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Decodes an availability response body.
///
/// Fails if the JSON shape is wrong, a weekday or time is malformed, an
/// active period is incomplete or inverted, or a weekday appears twice.
pub fn parse_availability_payload(body: &str) -> Result<Vec<WeeklyAvailability>, SlotError> {
    let records: Vec<AvailabilityRecord> = serde_json::from_str(body).map_err(|e| SlotError::decode("availability", e))?;

    let mut week: Vec<WeeklyAvailability> = Vec::with_capacity(records.len());
    for record in records {
        let availability = decode_availability(record)?;
        if week.iter().any(|existing| existing.day_of_week == availability.day_of_week) {
            return Err(SlotError::decode(
                "availability",
                format!("duplicate record for {}", availability.day_of_week),
            ));
        }
        week.push(availability);
    }
    week.sort_by_key(|record| record.day_of_week);
    Ok(week)
}

/// Decodes an appointments response body.
pub fn parse_appointments_payload(body: &str) -> Result<Vec<Appointment>, SlotError> {
    let records: Vec<AppointmentRecord> = serde_json::from_str(body).map_err(|e| SlotError::decode("appointments", e))?;
    records.into_iter().map(decode_appointment).collect()
}

fn decode_availability(record: AvailabilityRecord) -> Result<WeeklyAvailability, SlotError> {
    let day_of_week = ProviderWeekday::new(record.day_of_week).map_err(|e| SlotError::decode("availability", e))?;
    let availability = WeeklyAvailability {
        day_of_week,
        morning: decode_period(record.morning_active, record.morning_start_time, record.morning_end_time)?,
        afternoon: decode_period(record.afternoon_active, record.afternoon_start_time, record.afternoon_end_time)?,
        evening: decode_period(record.evening_active, record.evening_start_time, record.evening_end_time)?,
    };
    availability
        .validate()
        .map_err(|e| SlotError::decode(format!("availability for {}", day_of_week), e))?;
    Ok(availability)
}

fn decode_period(active: bool, start: Option<String>, end: Option<String>) -> Result<Period, SlotError> {
    let parse = |value: Option<String>| -> Result<Option<NaiveTime>, SlotError> {
        value
            .filter(|text| !text.trim().is_empty())
            .map(|text| parse_wall_clock(&text).map_err(|e| SlotError::decode("availability", e)))
            .transpose()
    };
    Ok(Period {
        active,
        start_time: parse(start)?,
        end_time: parse(end)?,
    })
}

fn decode_appointment(record: AppointmentRecord) -> Result<Appointment, SlotError> {
    let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d")
        .map_err(|_| SlotError::decode("appointments", SlotError::InvalidDate(record.date.clone())))?;
    let start = parse_wall_clock(&record.start_time).map_err(|e| SlotError::decode("appointments", e))?;
    let end = parse_wall_clock(&record.end_time).map_err(|e| SlotError::decode("appointments", e))?;
    if start >= end {
        return Err(SlotError::decode(
            "appointments",
            format!("appointment on {} ends before it starts", date),
        ));
    }
    Ok(Appointment::new(date, start, end))
}
