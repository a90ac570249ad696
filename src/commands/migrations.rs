//! Read-only view of the database schema state. Opening the database here
//! does not apply pending migrations, so `status` reports what the next
//! regular command would do.

use crate::db::db::Db;
use crate::db::migrations::{get_db_version, needs_migration, MigrationManager};
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum MigrationsCommand {
    /// Show current database version
    Status,
    /// Show migration history
    History,
}

pub fn cmd(command: MigrationsCommand) -> Result<()> {
    let conn = Db::new_without_migrations()?;
    let manager = MigrationManager::new();

    match command {
        MigrationsCommand::Status => {
            msg_print!(Message::DatabaseVersion(get_db_version(&conn)?, manager.latest_version()));
            if needs_migration(&conn)? {
                msg_info!(Message::DatabaseNeedsUpdate);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            if get_db_version(&conn)? == 0 {
                msg_info!(Message::MigrationHistoryEmpty);
                return Ok(());
            }
            msg_print!(Message::MigrationHistory, true);
            for (version, name, applied_at) in manager.get_migration_history(&conn)? {
                msg_print!(Message::MigrationHistoryEntry(version, name, applied_at));
            }
        }
    }

    Ok(())
}
