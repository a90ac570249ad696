//! Persistence of the provider's weekly availability.
//!
//! One row per provider weekday (0 = Monday .. 6 = Sunday). Writes are
//! upserts, so re-saving a weekday replaces the previous record instead of
//! creating a second one. Records are validated before they are written.

use crate::db::db::Db;
use crate::libs::availability::{index_by_weekday, AvailabilityMap, Period, ProviderWeekday, WeeklyAvailability};
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

const UPSERT: &str = "INSERT INTO availability (
        day_of_week,
        morning_active, morning_start, morning_end,
        afternoon_active, afternoon_start, afternoon_end,
        evening_active, evening_start, evening_end
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT(day_of_week) DO UPDATE SET
        morning_active = excluded.morning_active,
        morning_start = excluded.morning_start,
        morning_end = excluded.morning_end,
        afternoon_active = excluded.afternoon_active,
        afternoon_start = excluded.afternoon_start,
        afternoon_end = excluded.afternoon_end,
        evening_active = excluded.evening_active,
        evening_start = excluded.evening_start,
        evening_end = excluded.evening_end";
const SELECT_COLUMNS: &str = "SELECT day_of_week,
        morning_active, morning_start, morning_end,
        afternoon_active, afternoon_start, afternoon_end,
        evening_active, evening_start, evening_end
    FROM availability";
const DELETE_BY_DAY: &str = "DELETE FROM availability WHERE day_of_week = ?1";
const DELETE_ALL: &str = "DELETE FROM availability";

pub struct Availabilities {
    pub conn: Connection,
}

impl Availabilities {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Availabilities { conn: db.conn }
    }

    /// Inserts or replaces the record for its weekday.
    pub fn upsert(&self, record: &WeeklyAvailability) -> Result<()> {
        record.validate()?;
        upsert_with(&self.conn, record)
    }

    pub fn fetch(&self, day: ProviderWeekday) -> Result<Option<WeeklyAvailability>> {
        let sql = format!("{} WHERE day_of_week = ?1", SELECT_COLUMNS);
        let record = self.conn.query_row(&sql, params![day.index()], map_row).optional()?;
        Ok(record)
    }

    /// All records ordered Monday to Sunday.
    pub fn fetch_all(&self) -> Result<Vec<WeeklyAvailability>> {
        let sql = format!("{} ORDER BY day_of_week", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt.query_map([], map_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn fetch_map(&self) -> Result<AvailabilityMap> {
        Ok(index_by_weekday(self.fetch_all()?))
    }

    /// Removes a weekday's record. Returns `false` when there was none.
    pub fn delete(&self, day: ProviderWeekday) -> Result<bool> {
        let affected = self.conn.execute(DELETE_BY_DAY, params![day.index()])?;
        Ok(affected > 0)
    }

    /// Replaces the whole week atomically, as done after a sync.
    pub fn replace_all(&mut self, records: &[WeeklyAvailability]) -> Result<()> {
        for record in records {
            record.validate()?;
        }
        let tx = self.conn.transaction()?;
        tx.execute(DELETE_ALL, [])?;
        for record in records {
            upsert_with(&tx, record)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn upsert_with(conn: &Connection, record: &WeeklyAvailability) -> Result<()> {
    conn.execute(
        UPSERT,
        params![
            record.day_of_week.index(),
            record.morning.active,
            record.morning.start_time,
            record.morning.end_time,
            record.afternoon.active,
            record.afternoon.start_time,
            record.afternoon.end_time,
            record.evening.active,
            record.evening.start_time,
            record.evening.end_time,
        ],
    )?;
    Ok(())
}

fn map_row(row: &Row) -> rusqlite::Result<WeeklyAvailability> {
    let raw_day: i64 = row.get(0)?;
    let day_of_week = ProviderWeekday::new(raw_day).map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(e)))?;

    let period = |offset: usize| -> rusqlite::Result<Period> {
        Ok(Period {
            active: row.get(offset)?,
            start_time: row.get(offset + 1)?,
            end_time: row.get(offset + 2)?,
        })
    };

    Ok(WeeklyAvailability {
        day_of_week,
        morning: period(1)?,
        afternoon: period(4)?,
        evening: period(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::availability::PeriodKind;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn store() -> Availabilities {
        Availabilities::from_db(Db::in_memory().unwrap())
    }

    #[test]
    fn upsert_replaces_existing_weekday() {
        let store = store();
        let monday = ProviderWeekday::new(0).unwrap();

        store
            .upsert(&WeeklyAvailability::new(monday).with_period(PeriodKind::Morning, Period::active(t(8, 0), t(12, 0))))
            .unwrap();
        store
            .upsert(&WeeklyAvailability::new(monday).with_period(PeriodKind::Evening, Period::active(t(18, 0), t(21, 0))))
            .unwrap();

        let all = store.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].morning.active);
        assert_eq!(all[0].evening.window(), Some((t(18, 0), t(21, 0))));
    }

    #[test]
    fn upsert_rejects_inverted_period() {
        let store = store();
        let record = WeeklyAvailability::new(ProviderWeekday::new(3).unwrap())
            .with_period(PeriodKind::Afternoon, Period::active(t(17, 0), t(13, 0)));
        assert!(store.upsert(&record).is_err());
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn inactive_period_keeps_its_times() {
        let store = store();
        let friday = ProviderWeekday::new(4).unwrap();
        let parked = Period {
            active: false,
            start_time: Some(t(14, 0)),
            end_time: Some(t(16, 0)),
        };
        store.upsert(&WeeklyAvailability::new(friday).with_period(PeriodKind::Afternoon, parked)).unwrap();
        assert_eq!(store.fetch(friday).unwrap().unwrap().afternoon, parked);
    }

    #[test]
    fn replace_all_drops_missing_weekdays() {
        let mut store = store();
        for index in 0..5 {
            store.upsert(&WeeklyAvailability::new(ProviderWeekday::new(index).unwrap())).unwrap();
        }
        let saturday = WeeklyAvailability::new(ProviderWeekday::new(5).unwrap());
        store.replace_all(&[saturday.clone()]).unwrap();
        assert_eq!(store.fetch_all().unwrap(), vec![saturday]);
    }

    #[test]
    fn delete_reports_missing_record() {
        let store = store();
        let sunday = ProviderWeekday::new(6).unwrap();
        assert!(!store.delete(sunday).unwrap());
        store.upsert(&WeeklyAvailability::new(sunday)).unwrap();
        assert!(store.delete(sunday).unwrap());
        assert!(store.fetch(sunday).unwrap().is_none());
    }
}
