//! Terminal table rendering.

use super::appointment::Appointment;
use super::availability::{AvailabilityMap, PeriodKind, ProviderWeekday};
use super::formatter::{format_appointments, format_slots, format_time};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    pub fn slots(slots: &[NaiveDateTime], duration: u32) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "START", "END", "DURATION"]);
        for slot in format_slots(slots, duration) {
            table.add_row(row![slot.id, slot.start, slot.end, slot.duration]);
        }
        table.printstd();

        Ok(())
    }

    pub fn appointments(appointments: &[Appointment]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "START", "END", "DURATION", "SERVICE"]);
        for (appointment, formatted) in appointments.iter().zip(format_appointments(appointments)) {
            table.add_row(row![
                formatted.id,
                appointment.date,
                formatted.start,
                formatted.end,
                formatted.duration,
                appointment.service_id.map_or_else(|| "-".to_string(), |id| id.to_string())
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// One row per provider weekday, one column per period.
    pub fn availability(availabilities: &AvailabilityMap) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DAY", "WEEKDAY", "MORNING", "AFTERNOON", "EVENING"]);
        for weekday in ProviderWeekday::all() {
            let Some(record) = availabilities.get(&weekday) else {
                continue;
            };
            let mut cells = vec![Cell::new(&weekday.index().to_string()), Cell::new(weekday.name())];
            for kind in PeriodKind::ALL {
                let text = record
                    .period(kind)
                    .window()
                    .map_or_else(|| "-".to_string(), |(start, end)| format!("{}-{}", format_time(start), format_time(end)));
                cells.push(Cell::new(&text));
            }
            table.add_row(Row::new(cells));
        }
        table.printstd();

        Ok(())
    }

    /// Sunday-first month grid. Selectable days are bracketed.
    pub fn month(first_day: NaiveDate, selectable: &[NaiveDate]) -> Result<()> {
        let mut table = Table::new();
        let headers = (0..7u8)
            .map(|column| {
                let name = ProviderWeekday::from_sunday_index(column).name();
                Cell::new(&name[..3])
            })
            .collect();
        table.add_row(Row::new(headers));

        for week in month_grid(first_day) {
            let cells = week
                .iter()
                .map(|day| match day {
                    Some(day) if selectable.contains(day) => Cell::new(&format!("[{:02}]", day.day())),
                    Some(day) => Cell::new(&format!(" {:02} ", day.day())),
                    None => Cell::new(""),
                })
                .collect();
            table.add_row(Row::new(cells));
        }
        table.printstd();

        Ok(())
    }
}

/// Lays out the month containing `first_day` as Sunday-first weeks.
///
/// Column positions come from the provider weekday translated to the
/// Sunday-first convention.
pub fn month_grid(first_day: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let mut weeks = Vec::new();
    let mut week: [Option<NaiveDate>; 7] = [None; 7];
    let mut day = first_day.with_day(1).unwrap_or(first_day);
    let month = day.month();

    while day.month() == month {
        let column = ProviderWeekday::from_date(day).to_sunday_index() as usize;
        week[column] = Some(day);
        if column == 6 {
            weeks.push(week);
            week = [None; 7];
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}
