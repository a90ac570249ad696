//! Weekly recurring availability of a service provider.
//!
//! A provider publishes at most one [`WeeklyAvailability`] per weekday. Each
//! record carries three named periods (morning, afternoon, evening) that can
//! be switched on independently. Weekdays follow the provider convention
//! 0 = Monday .. 6 = Sunday, which is *not* the convention used by the month
//! calendar view (0 = Sunday); [`ProviderWeekday`] owns that translation.

use crate::libs::error::SlotError;
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::fmt;

const WEEKDAY_NAMES: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// Day of week in the provider convention, 0 = Monday .. 6 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderWeekday(u8);

impl ProviderWeekday {
    /// Builds a weekday from a raw provider index, rejecting values outside 0..=6.
    pub fn new(index: i64) -> Result<Self, SlotError> {
        match index {
            0..=6 => Ok(Self(index as u8)),
            _ => Err(SlotError::InvalidWeekday(index)),
        }
    }

    /// The provider weekday a calendar date falls on.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.weekday().num_days_from_monday() as u8)
    }

    /// Converts a Sunday-first column index (0 = Sunday) into a provider weekday.
    pub fn from_sunday_index(index: u8) -> Self {
        Self((index % 7 + 6) % 7)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Index of this weekday in a Sunday-first calendar (0 = Sunday .. 6 = Saturday).
    pub fn to_sunday_index(self) -> u8 {
        (self.0 + 1) % 7
    }

    pub fn name(self) -> &'static str {
        WEEKDAY_NAMES[self.0 as usize]
    }

    /// All weekdays in provider order.
    pub fn all() -> impl Iterator<Item = ProviderWeekday> {
        (0..7u8).map(ProviderWeekday)
    }
}

impl fmt::Display for ProviderWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The three named periods of a day, in expansion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    Morning,
    Afternoon,
    Evening,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 3] = [PeriodKind::Morning, PeriodKind::Afternoon, PeriodKind::Evening];

    pub fn name(self) -> &'static str {
        match self {
            PeriodKind::Morning => "morning",
            PeriodKind::Afternoon => "afternoon",
            PeriodKind::Evening => "evening",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One availability period of a day.
///
/// Times stay optional so inactive periods can keep whatever the provider
/// last entered. An active period must have both ends with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Period {
    pub active: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl Period {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            active: true,
            start_time: Some(start),
            end_time: Some(end),
        }
    }

    /// The `(start, end)` window of an active period, `None` when switched off.
    pub fn window(&self) -> Option<(NaiveTime, NaiveTime)> {
        if !self.active {
            return None;
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn validate(&self, kind: PeriodKind) -> Result<(), SlotError> {
        if !self.active {
            return Ok(());
        }
        let invalid = |reason: &str| SlotError::InvalidPeriod {
            period: kind.name().to_string(),
            reason: reason.to_string(),
        };
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if start < end => Ok(()),
            (Some(_), Some(_)) => Err(invalid("start time must be before end time")),
            _ => Err(invalid("an active period needs both a start and an end time")),
        }
    }
}

/// A provider's availability for one weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyAvailability {
    pub day_of_week: ProviderWeekday,
    pub morning: Period,
    pub afternoon: Period,
    pub evening: Period,
}

impl WeeklyAvailability {
    /// A record for `day_of_week` with every period switched off.
    pub fn new(day_of_week: ProviderWeekday) -> Self {
        Self {
            day_of_week,
            morning: Period::inactive(),
            afternoon: Period::inactive(),
            evening: Period::inactive(),
        }
    }

    pub fn with_period(mut self, kind: PeriodKind, period: Period) -> Self {
        *self.period_mut(kind) = period;
        self
    }

    pub fn period(&self, kind: PeriodKind) -> &Period {
        match kind {
            PeriodKind::Morning => &self.morning,
            PeriodKind::Afternoon => &self.afternoon,
            PeriodKind::Evening => &self.evening,
        }
    }

    pub fn period_mut(&mut self, kind: PeriodKind) -> &mut Period {
        match kind {
            PeriodKind::Morning => &mut self.morning,
            PeriodKind::Afternoon => &mut self.afternoon,
            PeriodKind::Evening => &mut self.evening,
        }
    }

    /// Active period windows in morning, afternoon, evening order.
    pub fn active_windows(&self) -> Vec<(PeriodKind, NaiveTime, NaiveTime)> {
        PeriodKind::ALL
            .iter()
            .filter_map(|&kind| self.period(kind).window().map(|(start, end)| (kind, start, end)))
            .collect()
    }

    pub fn validate(&self) -> Result<(), SlotError> {
        for kind in PeriodKind::ALL {
            self.period(kind).validate(kind)?;
        }
        Ok(())
    }
}

/// Availability records keyed by provider weekday.
pub type AvailabilityMap = HashMap<ProviderWeekday, WeeklyAvailability>;

/// Indexes records by weekday. A later record for the same weekday wins.
pub fn index_by_weekday(records: impl IntoIterator<Item = WeeklyAvailability>) -> AvailabilityMap {
    records.into_iter().map(|record| (record.day_of_week, record)).collect()
}
