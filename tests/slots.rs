//! Slot computation against data stored in the local database.

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use slotwise::db::appointments::Appointments;
    use slotwise::db::availability::Availabilities;
    use slotwise::libs::appointment::Appointment;
    use slotwise::libs::availability::{Period, PeriodKind, ProviderWeekday, WeeklyAvailability};
    use slotwise::libs::slots::{available_slots, day_status_on, ensure_offered_on, is_day_selectable_on, DayStatus};
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Fresh database with availability on Wednesdays (08:00-12:00, 14:00-16:00).
    struct SlotsTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
        availabilities: Availabilities,
        appointments: Appointments,
    }

    impl TestContext for SlotsTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());

            let availabilities = Availabilities::new().unwrap();
            availabilities
                .upsert(
                    &WeeklyAvailability::new(ProviderWeekday::new(2).unwrap())
                        .with_period(PeriodKind::Morning, Period::active(t(8, 0), t(12, 0)))
                        .with_period(PeriodKind::Afternoon, Period::active(t(14, 0), t(16, 0))),
                )
                .unwrap();

            SlotsTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
                availabilities,
                appointments: Appointments::new().unwrap(),
            }
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// Wednesday 2025-03-12
    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        wednesday().and_time(t(h, m))
    }

    fn booked_on(ctx: &SlotsTestContext, date: NaiveDate) -> Vec<Appointment> {
        ctx.appointments.fetch_for_date(date).unwrap()
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_free_day_offers_every_period_slot(ctx: &mut SlotsTestContext) {
        let map = ctx.availabilities.fetch_map().unwrap();
        let slots = available_slots(wednesday(), &map, &[], 60);
        assert_eq!(slots, vec![at(8, 0), at(9, 0), at(10, 0), at(11, 0), at(14, 0), at(15, 0)]);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_stored_bookings_remove_overlapping_slots(ctx: &mut SlotsTestContext) {
        ctx.appointments.insert(&Appointment::new(wednesday(), t(9, 0), t(9, 30))).unwrap();
        ctx.appointments.insert(&Appointment::new(wednesday(), t(14, 30), t(15, 30))).unwrap();

        let map = ctx.availabilities.fetch_map().unwrap();
        let slots = available_slots(wednesday(), &map, &booked_on(ctx, wednesday()), 60);
        assert_eq!(slots, vec![at(8, 0), at(10, 0), at(11, 0)]);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_shorter_duration_fills_gaps(ctx: &mut SlotsTestContext) {
        ctx.appointments.insert(&Appointment::new(wednesday(), t(8, 30), t(11, 30))).unwrap();

        let map = ctx.availabilities.fetch_map().unwrap();
        let slots = available_slots(wednesday(), &map, &booked_on(ctx, wednesday()), 30);
        assert_eq!(slots, vec![at(8, 0), at(11, 30), at(14, 0), at(14, 30), at(15, 0), at(15, 30)]);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_fully_booked_day(ctx: &mut SlotsTestContext) {
        ctx.appointments.insert(&Appointment::new(wednesday(), t(8, 0), t(12, 0))).unwrap();
        ctx.appointments.insert(&Appointment::new(wednesday(), t(14, 0), t(16, 0))).unwrap();

        let map = ctx.availabilities.fetch_map().unwrap();
        let booked = booked_on(ctx, wednesday());
        assert_eq!(day_status_on(wednesday(), wednesday(), &map, &booked, 60), DayStatus::FullyBooked);
        assert!(!is_day_selectable_on(wednesday(), wednesday(), &map, &booked, 60));
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_day_statuses_around_today(ctx: &mut SlotsTestContext) {
        let map = ctx.availabilities.fetch_map().unwrap();
        let thursday = wednesday().succ_opt().unwrap();
        let next_wednesday = NaiveDate::from_ymd_opt(2025, 3, 19).unwrap();

        assert_eq!(day_status_on(thursday, wednesday(), &map, &[], 60), DayStatus::Past);
        assert_eq!(day_status_on(wednesday(), thursday, &map, &[], 60), DayStatus::NoAvailability);
        assert_eq!(day_status_on(wednesday(), next_wednesday, &map, &[], 60), DayStatus::Selectable(6));
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_clearing_weekday_removes_its_days(ctx: &mut SlotsTestContext) {
        ctx.availabilities.delete(ProviderWeekday::new(2).unwrap()).unwrap();
        let map = ctx.availabilities.fetch_map().unwrap();
        assert!(available_slots(wednesday(), &map, &[], 60).is_empty());
        assert_eq!(day_status_on(wednesday(), wednesday(), &map, &[], 60), DayStatus::NoAvailability);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_booked_slot_is_no_longer_offered(ctx: &mut SlotsTestContext) {
        let map = ctx.availabilities.fetch_map().unwrap();
        assert!(ensure_offered_on(wednesday(), at(10, 0), &map, &[], 60).is_ok());

        ctx.appointments.insert(&Appointment::new(wednesday(), t(10, 0), t(11, 0))).unwrap();
        let booked = booked_on(ctx, wednesday());
        assert!(ensure_offered_on(wednesday(), at(10, 0), &map, &booked, 60).is_err());
        assert!(ensure_offered_on(wednesday(), at(11, 0), &map, &booked, 60).is_ok());
    }
}
