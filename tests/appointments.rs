#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use slotwise::db::appointments::Appointments;
    use slotwise::libs::appointment::Appointment;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct AppointmentTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
        store: Appointments,
    }

    impl TestContext for AppointmentTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            let store = Appointments::new().unwrap();
            AppointmentTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
                store,
            }
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test_context(AppointmentTestContext)]
    #[test]
    fn test_insert_and_get_by_id(ctx: &mut AppointmentTestContext) {
        let appointment = Appointment::new(d(12), t(9, 0), t(9, 30)).with_service(Some(3));
        let id = ctx.store.insert(&appointment).unwrap();

        let stored = ctx.store.get_by_id(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.date, d(12));
        assert_eq!(stored.start_time, t(9, 0));
        assert_eq!(stored.end_time, t(9, 30));
        assert_eq!(stored.service_id, Some(3));
        assert!(ctx.store.get_by_id(id + 100).unwrap().is_none());
    }

    #[test_context(AppointmentTestContext)]
    #[test]
    fn test_inverted_range_is_rejected(ctx: &mut AppointmentTestContext) {
        assert!(ctx.store.insert(&Appointment::new(d(12), t(10, 0), t(9, 0))).is_err());
        assert!(ctx.store.insert(&Appointment::new(d(12), t(10, 0), t(10, 0))).is_err());
        assert!(ctx.store.fetch_all().unwrap().is_empty());
    }

    #[test_context(AppointmentTestContext)]
    #[test]
    fn test_fetch_for_date_is_ordered(ctx: &mut AppointmentTestContext) {
        ctx.store.insert(&Appointment::new(d(12), t(14, 0), t(15, 0))).unwrap();
        ctx.store.insert(&Appointment::new(d(12), t(8, 0), t(9, 0))).unwrap();
        ctx.store.insert(&Appointment::new(d(13), t(8, 0), t(9, 0))).unwrap();

        let starts: Vec<NaiveTime> = ctx.store.fetch_for_date(d(12)).unwrap().iter().map(|a| a.start_time).collect();
        assert_eq!(starts, vec![t(8, 0), t(14, 0)]);
    }

    #[test_context(AppointmentTestContext)]
    #[test]
    fn test_fetch_range_is_inclusive(ctx: &mut AppointmentTestContext) {
        for day in [10, 11, 14, 15] {
            ctx.store.insert(&Appointment::new(d(day), t(9, 0), t(10, 0))).unwrap();
        }
        let dates: Vec<NaiveDate> = ctx.store.fetch_range(d(11), d(14)).unwrap().iter().map(|a| a.date).collect();
        assert_eq!(dates, vec![d(11), d(14)]);
    }

    #[test_context(AppointmentTestContext)]
    #[test]
    fn test_delete(ctx: &mut AppointmentTestContext) {
        let id = ctx.store.insert(&Appointment::new(d(12), t(9, 0), t(10, 0))).unwrap();
        ctx.store.delete(id).unwrap();
        assert!(ctx.store.get_by_id(id).unwrap().is_none());
        assert!(ctx.store.delete(id).is_err());
    }

    #[test_context(AppointmentTestContext)]
    #[test]
    fn test_replace_for_service_keeps_other_services(ctx: &mut AppointmentTestContext) {
        ctx.store.insert(&Appointment::new(d(12), t(8, 0), t(9, 0)).with_service(Some(1))).unwrap();
        ctx.store.insert(&Appointment::new(d(12), t(9, 0), t(10, 0)).with_service(Some(2))).unwrap();
        ctx.store.insert(&Appointment::new(d(12), t(11, 0), t(12, 0))).unwrap();

        let synced = vec![
            Appointment::new(d(13), t(10, 0), t(11, 0)),
            Appointment::new(d(14), t(10, 0), t(11, 0)),
        ];
        assert_eq!(ctx.store.replace_for_service(Some(1), &synced).unwrap(), 2);

        let all = ctx.store.fetch_all().unwrap();
        assert_eq!(all.len(), 4);
        let service_one: Vec<NaiveDate> = all.iter().filter(|a| a.service_id == Some(1)).map(|a| a.date).collect();
        assert_eq!(service_one, vec![d(13), d(14)]);
        assert!(all.iter().any(|a| a.service_id == Some(2)));
        assert!(all.iter().any(|a| a.service_id.is_none()));
    }

    #[test_context(AppointmentTestContext)]
    #[test]
    fn test_replace_for_service_is_atomic(ctx: &mut AppointmentTestContext) {
        ctx.store.insert(&Appointment::new(d(12), t(8, 0), t(9, 0)).with_service(Some(1))).unwrap();

        let broken = vec![Appointment::new(d(13), t(10, 0), t(11, 0)), Appointment::new(d(13), t(12, 0), t(11, 0))];
        assert!(ctx.store.replace_for_service(Some(1), &broken).is_err());

        let all = ctx.store.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].date, d(12));
    }
}
