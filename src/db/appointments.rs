//! Local ledger of booked appointments.
//!
//! Appointments either come from the booking API during a sync or are
//! recorded by `slotwise book` / `slotwise appointment add`. The slot engine
//! only ever reads them.

use crate::db::db::Db;
use crate::libs::appointment::Appointment;
use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT: &str = "INSERT INTO appointments (date, start_time, end_time, service_id, created_at)
    VALUES (?1, ?2, ?3, ?4, datetime('now', 'localtime'))";
const SELECT_COLUMNS: &str = "SELECT id, date, start_time, end_time, service_id FROM appointments";
const DELETE_BY_ID: &str = "DELETE FROM appointments WHERE id = ?1";
const DELETE_BY_SERVICE: &str = "DELETE FROM appointments WHERE service_id IS ?1";

pub struct Appointments {
    pub conn: Connection,
}

impl Appointments {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Appointments { conn: db.conn }
    }

    /// Stores an appointment and returns its ledger id.
    pub fn insert(&self, appointment: &Appointment) -> Result<i64> {
        insert_with(&self.conn, appointment)?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Appointment>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        Ok(self.conn.query_row(&sql, params![id], map_row).optional()?)
    }

    /// Appointments on `date`, ordered by start time.
    pub fn fetch_for_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        let sql = format!("{} WHERE date = ?1 ORDER BY start_time", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let appointments = stmt.query_map(params![date], map_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(appointments)
    }

    /// Appointments between `from` and `to` inclusive, ordered by date and start time.
    pub fn fetch_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Appointment>> {
        let sql = format!("{} WHERE date BETWEEN ?1 AND ?2 ORDER BY date, start_time", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let appointments = stmt.query_map(params![from, to], map_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(appointments)
    }

    pub fn fetch_all(&self) -> Result<Vec<Appointment>> {
        let sql = format!("{} ORDER BY date, start_time", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let appointments = stmt.query_map([], map_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(appointments)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let affected_rows = self.conn.execute(DELETE_BY_ID, params![id])?;
        if affected_rows == 0 {
            msg_bail_anyhow!(Message::AppointmentNotFound(id));
        }
        Ok(())
    }

    /// Replaces every appointment of `service_id` with `appointments` in one transaction.
    pub fn replace_for_service(&mut self, service_id: Option<i64>, appointments: &[Appointment]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(DELETE_BY_SERVICE, params![service_id])?;
        for appointment in appointments {
            insert_with(&tx, &appointment.clone().with_service(service_id))?;
        }
        tx.commit()?;
        Ok(appointments.len())
    }
}

fn insert_with(conn: &Connection, appointment: &Appointment) -> Result<()> {
    if appointment.start_time >= appointment.end_time {
        msg_bail_anyhow!(Message::AppointmentInvalidRange);
    }
    conn.execute(
        INSERT,
        params![appointment.date, appointment.start_time, appointment.end_time, appointment.service_id],
    )?;
    Ok(())
}

fn map_row(row: &Row) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: Some(row.get(0)?),
        date: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        service_id: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn store() -> Appointments {
        Appointments::from_db(Db::in_memory().unwrap())
    }

    #[test]
    fn insert_and_read_back() {
        let store = store();
        let id = store.insert(&Appointment::new(date(), t(9, 0), t(9, 30)).with_service(Some(7))).unwrap();

        let stored = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.date, date());
        assert_eq!(stored.start_time, t(9, 0));
        assert_eq!(stored.end_time, t(9, 30));
        assert_eq!(stored.service_id, Some(7));
    }

    #[test]
    fn rejects_empty_or_inverted_range() {
        let store = store();
        assert!(store.insert(&Appointment::new(date(), t(10, 0), t(10, 0))).is_err());
        assert!(store.insert(&Appointment::new(date(), t(11, 0), t(10, 0))).is_err());
    }

    #[test]
    fn daily_fetch_is_ordered_and_scoped() {
        let store = store();
        store.insert(&Appointment::new(date(), t(15, 0), t(16, 0))).unwrap();
        store.insert(&Appointment::new(date(), t(9, 0), t(10, 0))).unwrap();
        store.insert(&Appointment::new(date().succ_opt().unwrap(), t(8, 0), t(9, 0))).unwrap();

        let daily = store.fetch_for_date(date()).unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].start_time, t(9, 0));
        assert_eq!(daily[1].start_time, t(15, 0));
    }

    #[test]
    fn replace_for_service_keeps_other_services() {
        let mut store = store();
        store.insert(&Appointment::new(date(), t(9, 0), t(10, 0)).with_service(Some(1))).unwrap();
        store.insert(&Appointment::new(date(), t(11, 0), t(12, 0)).with_service(Some(2))).unwrap();

        let fresh = vec![Appointment::new(date(), t(13, 0), t(14, 0))];
        store.replace_for_service(Some(1), &fresh).unwrap();

        let all = store.fetch_all().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|a| a.service_id == Some(2) && a.start_time == t(11, 0)));
        assert!(all.iter().any(|a| a.service_id == Some(1) && a.start_time == t(13, 0)));
    }

    #[test]
    fn delete_unknown_id_fails() {
        let store = store();
        assert!(store.delete(42).is_err());
    }
}
