//! Appointment slot computation.
//!
//! Turns a provider's weekly availability and the bookings already taken into
//! the list of start times a client may pick for an appointment of a fixed
//! duration. Every function here is pure: identical inputs give identical,
//! order-stable output, and nothing is cached between calls.
//!
//! ## Pipeline
//!
//! 1. **Expansion**: each active period of the day's [`WeeklyAvailability`]
//!    is cut into back-to-back slots of `duration` minutes. A slot may end
//!    exactly on the period end; partial slots are never offered.
//! 2. **Conflict filtering**: candidates overlapping a booking on the same day
//!    are dropped.
//! 3. **Eligibility**: a day is selectable when it is not in the past, the
//!    provider works that weekday, and at least one slot survives.
//!
//! Periods are expanded independently, so a slot never spans the gap between
//! two adjacent periods.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use slotwise::libs::availability::{index_by_weekday, Period, PeriodKind, ProviderWeekday, WeeklyAvailability};
//! use slotwise::libs::slots::available_slots;
//!
//! let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! let morning = Period::active(NaiveTime::from_hms_opt(8, 0, 0).unwrap(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
//! let availability = index_by_weekday(vec![
//!     WeeklyAvailability::new(ProviderWeekday::from_date(day)).with_period(PeriodKind::Morning, morning),
//! ]);
//!
//! let slots = available_slots(day, &availability, &[], 60);
//! assert_eq!(slots.len(), 2);
//! ```

use crate::libs::appointment::Appointment;
use crate::libs::availability::{AvailabilityMap, ProviderWeekday, WeeklyAvailability};
use crate::libs::error::SlotError;
use crate::libs::time::{add_minutes, time_on_day};
use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Why a day can or cannot be offered to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// The day lies before today.
    Past,
    /// The provider has no availability record for this weekday.
    NoAvailability,
    /// Availability exists but every slot is taken or none fits.
    FullyBooked,
    /// The day offers this many slots.
    Selectable(usize),
}

impl DayStatus {
    pub fn is_selectable(self) -> bool {
        matches!(self, DayStatus::Selectable(_))
    }
}

/// Cuts `[window_start, window_end]` into consecutive slots of `duration` minutes.
///
/// Returns the slot start times in chronological order. The last slot may
/// end exactly at `window_end`; a slot that would run past it is dropped.
/// A zero duration yields no slots.
pub fn generate_slots(window_start: NaiveDateTime, window_end: NaiveDateTime, duration: u32) -> Vec<NaiveDateTime> {
    let mut slots = Vec::new();
    if duration == 0 {
        return slots;
    }

    let step = i64::from(duration);
    let mut current = window_start;
    while add_minutes(current, step) <= window_end {
        slots.push(current);
        current = add_minutes(current, step);
    }
    slots
}

/// Expands every active period of `availability` on `day`.
///
/// Results are concatenated morning, afternoon, evening, each period in
/// chronological order.
pub fn expand_day(day: NaiveDate, availability: &WeeklyAvailability, duration: u32) -> Vec<NaiveDateTime> {
    availability
        .active_windows()
        .into_iter()
        .flat_map(|(_, start, end)| generate_slots(time_on_day(day, start), time_on_day(day, end), duration))
        .collect()
}

/// Removes candidates that overlap a booked appointment on the same day.
///
/// With `c` the candidate start and `e = c + duration`, a candidate is
/// rejected by an appointment `[a.start, a.end)` when it starts inside it,
/// ends inside it (`a.start < e <= a.end`), or envelops it entirely.
pub fn filter_conflicts(candidates: &[NaiveDateTime], appointments: &[Appointment], duration: u32) -> Vec<NaiveDateTime> {
    let step = i64::from(duration);
    candidates
        .iter()
        .copied()
        .filter(|&candidate| {
            let candidate_end = add_minutes(candidate, step);
            !appointments
                .iter()
                .filter(|appointment| appointment.date == candidate.date())
                .any(|appointment| overlaps(candidate, candidate_end, appointment))
        })
        .collect()
}

fn overlaps(start: NaiveDateTime, end: NaiveDateTime, appointment: &Appointment) -> bool {
    let (booked_start, booked_end) = (appointment.start(), appointment.end());

    let starts_inside = booked_start <= start && start < booked_end;
    let ends_inside = booked_start < end && end <= booked_end;
    let envelops = start <= booked_start && end >= booked_end;

    starts_inside || ends_inside || envelops
}

/// Slots a client can book on `day`, ignoring whether the day is in the past.
pub fn available_slots(
    day: NaiveDate,
    availabilities: &AvailabilityMap,
    appointments: &[Appointment],
    duration: u32,
) -> Vec<NaiveDateTime> {
    let Some(availability) = availabilities.get(&ProviderWeekday::from_date(day)) else {
        return Vec::new();
    };

    let candidates = expand_day(day, availability, duration);
    let free = filter_conflicts(&candidates, appointments, duration);
    debug!(
        %day,
        candidates = candidates.len(),
        rejected = candidates.len() - free.len(),
        "computed available slots"
    );
    free
}

/// Classifies `day` relative to `today`.
pub fn day_status_on(
    today: NaiveDate,
    day: NaiveDate,
    availabilities: &AvailabilityMap,
    appointments: &[Appointment],
    duration: u32,
) -> DayStatus {
    if day < today {
        return DayStatus::Past;
    }
    if !availabilities.contains_key(&ProviderWeekday::from_date(day)) {
        return DayStatus::NoAvailability;
    }
    match available_slots(day, availabilities, appointments, duration).len() {
        0 => DayStatus::FullyBooked,
        count => DayStatus::Selectable(count),
    }
}

/// Whether `day` may be offered, with `today` supplied by the caller.
pub fn is_day_selectable_on(
    today: NaiveDate,
    day: NaiveDate,
    availabilities: &AvailabilityMap,
    appointments: &[Appointment],
    duration: u32,
) -> bool {
    day_status_on(today, day, availabilities, appointments, duration).is_selectable()
}

/// Whether `day` may be offered, judged against the local wall-clock day.
pub fn is_day_selectable(day: NaiveDate, availabilities: &AvailabilityMap, appointments: &[Appointment], duration: u32) -> bool {
    is_day_selectable_on(Local::now().date_naive(), day, availabilities, appointments, duration)
}

/// Checks that a booking starting at `start` is one of the slots offered on its day.
///
/// Fails with [`SlotError::SlotUnavailable`] when the day is before `today`,
/// the time is not on the slot grid, or the slot is already taken.
pub fn ensure_offered_on(
    today: NaiveDate,
    start: NaiveDateTime,
    availabilities: &AvailabilityMap,
    appointments: &[Appointment],
    duration: u32,
) -> Result<(), SlotError> {
    let day = start.date();
    if day >= today && available_slots(day, availabilities, appointments, duration).contains(&start) {
        return Ok(());
    }
    Err(SlotError::SlotUnavailable(start.format("%Y-%m-%d %H:%M").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::availability::{index_by_weekday, Period, PeriodKind};
    use chrono::{Duration, NaiveTime};

    fn day() -> NaiveDate {
        // A Wednesday
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        time_on_day(day(), t(h, m))
    }

    fn morning_only() -> AvailabilityMap {
        index_by_weekday(vec![WeeklyAvailability::new(ProviderWeekday::from_date(day()))
            .with_period(PeriodKind::Morning, Period::active(t(8, 0), t(12, 0)))])
    }

    fn booked(start: NaiveTime, end: NaiveTime) -> Appointment {
        Appointment::new(day(), start, end)
    }

    #[test]
    fn generate_includes_slot_ending_on_window_end() {
        let slots = generate_slots(at(8, 0), at(12, 0), 60);
        assert_eq!(slots, vec![at(8, 0), at(9, 0), at(10, 0), at(11, 0)]);
    }

    #[test]
    fn generate_drops_partial_trailing_slot() {
        let slots = generate_slots(at(8, 0), at(9, 50), 30);
        assert_eq!(slots, vec![at(8, 0), at(8, 30), at(9, 0)]);
    }

    #[test]
    fn generate_handles_window_shorter_than_duration() {
        assert!(generate_slots(at(8, 0), at(8, 45), 60).is_empty());
    }

    #[test]
    fn generate_with_zero_duration_is_empty() {
        assert!(generate_slots(at(8, 0), at(12, 0), 0).is_empty());
    }

    #[test]
    fn generated_slots_are_evenly_spaced_and_inside_window() {
        for duration in [5u32, 15, 25, 45, 60, 90] {
            let end = at(17, 20);
            let slots = generate_slots(at(9, 10), end, duration);
            for pair in slots.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::minutes(duration as i64));
            }
            for slot in &slots {
                assert!(add_minutes(*slot, duration as i64) <= end);
            }
        }
    }

    #[test]
    fn expand_day_orders_periods_morning_to_evening() {
        let record = WeeklyAvailability::new(ProviderWeekday::from_date(day()))
            .with_period(PeriodKind::Evening, Period::active(t(18, 0), t(19, 0)))
            .with_period(PeriodKind::Afternoon, Period::active(t(14, 0), t(15, 0)))
            .with_period(PeriodKind::Morning, Period::active(t(9, 0), t(10, 0)));
        assert_eq!(expand_day(day(), &record, 30), vec![at(9, 0), at(9, 30), at(14, 0), at(14, 30), at(18, 0), at(18, 30)]);
    }

    #[test]
    fn expand_day_never_spans_adjacent_periods() {
        let record = WeeklyAvailability::new(ProviderWeekday::from_date(day()))
            .with_period(PeriodKind::Morning, Period::active(t(8, 0), t(12, 30)))
            .with_period(PeriodKind::Afternoon, Period::active(t(12, 30), t(14, 0)));
        // 12:00 would need 12:00-13:00, crossing into the afternoon period
        assert_eq!(expand_day(day(), &record, 60), vec![at(8, 0), at(9, 0), at(10, 0), at(11, 0), at(12, 30)]);
    }

    #[test]
    fn scenario_morning_hourly_slots() {
        assert_eq!(available_slots(day(), &morning_only(), &[], 60), vec![at(8, 0), at(9, 0), at(10, 0), at(11, 0)]);
    }

    #[test]
    fn scenario_booking_removes_slot_it_starts_in() {
        let bookings = vec![booked(t(9, 0), t(9, 30))];
        assert_eq!(available_slots(day(), &morning_only(), &bookings, 60), vec![at(8, 0), at(10, 0), at(11, 0)]);
    }

    #[test]
    fn scenario_long_booking_clears_the_day() {
        let bookings = vec![booked(t(8, 30), t(11, 30))];
        assert!(available_slots(day(), &morning_only(), &bookings, 60).is_empty());
        assert!(!is_day_selectable_on(day(), day(), &morning_only(), &bookings, 60));
        assert_eq!(day_status_on(day(), day(), &morning_only(), &bookings, 60), DayStatus::FullyBooked);
    }

    #[test]
    fn candidate_ending_inside_booking_is_rejected() {
        let bookings = vec![booked(t(9, 30), t(10, 0))];
        // 09:00-10:00 ends inside the booking, 10:00 starts on its end and survives
        assert_eq!(filter_conflicts(&[at(9, 0), at(10, 0)], &bookings, 60), vec![at(10, 0)]);
    }

    #[test]
    fn candidate_enveloping_booking_is_rejected() {
        let bookings = vec![booked(t(9, 15), t(9, 45))];
        assert!(filter_conflicts(&[at(9, 0)], &bookings, 60).is_empty());
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let bookings = vec![booked(t(10, 0), t(11, 0))];
        assert_eq!(filter_conflicts(&[at(9, 0), at(11, 0)], &bookings, 60), vec![at(9, 0), at(11, 0)]);
    }

    #[test]
    fn bookings_on_other_days_are_ignored() {
        let other_day = Appointment::new(day().succ_opt().unwrap(), t(9, 0), t(10, 0));
        assert_eq!(filter_conflicts(&[at(9, 0)], &[other_day], 60), vec![at(9, 0)]);
    }

    #[test]
    fn filter_preserves_candidate_order() {
        let candidates = vec![at(11, 0), at(8, 0), at(10, 0)];
        assert_eq!(filter_conflicts(&candidates, &[], 60), candidates);
    }

    #[test]
    fn computation_is_idempotent() {
        let bookings = vec![booked(t(9, 0), t(9, 30))];
        let first = available_slots(day(), &morning_only(), &bookings, 45);
        let second = available_slots(day(), &morning_only(), &bookings, 45);
        assert_eq!(first, second);
    }

    #[test]
    fn past_day_is_never_selectable() {
        let yesterday = day().pred_opt().unwrap();
        let availability = index_by_weekday(vec![WeeklyAvailability::new(ProviderWeekday::from_date(yesterday))
            .with_period(PeriodKind::Morning, Period::active(t(8, 0), t(12, 0)))]);
        assert!(!available_slots(yesterday, &availability, &[], 60).is_empty());
        assert!(!is_day_selectable_on(day(), yesterday, &availability, &[], 60));
        assert_eq!(day_status_on(day(), yesterday, &availability, &[], 60), DayStatus::Past);
    }

    #[test]
    fn day_without_weekday_record_is_not_selectable() {
        let thursday = day().succ_opt().unwrap();
        assert_eq!(day_status_on(day(), thursday, &morning_only(), &[], 60), DayStatus::NoAvailability);
    }

    #[test]
    fn today_with_free_slots_is_selectable() {
        assert_eq!(day_status_on(day(), day(), &morning_only(), &[], 60), DayStatus::Selectable(4));
        assert!(is_day_selectable_on(day(), day(), &morning_only(), &[], 60));
    }

    #[test]
    fn offered_slot_passes_booking_check() {
        assert_eq!(ensure_offered_on(day(), at(10, 0), &morning_only(), &[], 60), Ok(()));
    }

    #[test]
    fn booking_check_rejects_off_grid_taken_and_past_slots() {
        let bookings = vec![booked(t(9, 0), t(10, 0))];
        assert_eq!(
            ensure_offered_on(day(), at(8, 30), &morning_only(), &[], 60),
            Err(SlotError::SlotUnavailable("2025-03-12 08:30".to_string()))
        );
        assert!(ensure_offered_on(day(), at(9, 0), &morning_only(), &bookings, 60).is_err());
        let tomorrow = day().succ_opt().unwrap();
        assert!(ensure_offered_on(tomorrow, at(8, 0), &morning_only(), &[], 60).is_err());
    }

    #[test]
    fn wall_clock_predicate_rejects_yesterday_and_accepts_tomorrow() {
        let every_day = index_by_weekday(
            ProviderWeekday::all()
                .map(|weekday| WeeklyAvailability::new(weekday).with_period(PeriodKind::Morning, Period::active(t(8, 0), t(12, 0)))),
        );
        let today = Local::now().date_naive();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        assert!(!is_day_selectable(yesterday, &every_day, &[], 60));
        assert!(is_day_selectable(tomorrow, &every_day, &[], 60));
    }
}
