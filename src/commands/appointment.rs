use crate::db::appointments::Appointments;
use crate::libs::appointment::Appointment;
use crate::libs::messages::Message;
use crate::libs::time::{parse_date, parse_wall_clock};
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum AppointmentCommand {
    #[command(about = "List appointments, optionally for one date")]
    List {
        #[arg(long, short, help = "Date to list (YYYY-MM-DD or 'today')")]
        date: Option<String>,
    },
    #[command(about = "Record a booked appointment")]
    Add {
        #[arg(long, short, default_value = "today", help = "Date (YYYY-MM-DD or 'today')")]
        date: String,
        #[arg(long, short, help = "Start time (HH:MM)")]
        start: String,
        #[arg(long, short, help = "End time (HH:MM)")]
        end: String,
        #[arg(long, help = "Service the appointment belongs to")]
        service_id: Option<i64>,
    },
    #[command(about = "Delete an appointment by id")]
    Delete { id: i64 },
}

pub fn cmd(command: AppointmentCommand) -> Result<()> {
    let store = Appointments::new()?;
    let today = Local::now().date_naive();

    match command {
        AppointmentCommand::List { date } => {
            let (scope, appointments) = match date {
                Some(date) => {
                    let date = parse_date(&date, today)?;
                    (date.to_string(), store.fetch_for_date(date)?)
                }
                None => ("all".to_string(), store.fetch_all()?),
            };
            if appointments.is_empty() {
                msg_info!(Message::AppointmentsEmpty);
                return Ok(());
            }
            msg_print!(Message::AppointmentsHeader(scope), true);
            View::appointments(&appointments)
        }
        AppointmentCommand::Add {
            date,
            start,
            end,
            service_id,
        } => {
            let appointment =
                Appointment::new(parse_date(&date, today)?, parse_wall_clock(&start)?, parse_wall_clock(&end)?).with_service(service_id);
            let id = store.insert(&appointment)?;
            msg_success!(Message::AppointmentAdded(id));
            Ok(())
        }
        AppointmentCommand::Delete { id } => {
            store.delete(id)?;
            msg_success!(Message::AppointmentDeleted(id));
            Ok(())
        }
    }
}
