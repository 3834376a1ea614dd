//! Ordered schema migrations for the portfolio database.
//!
//! The schema version lives in `PRAGMA user_version`; a database written by a
//! newer binary is refused rather than downgraded.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "portfolio_content",
        sql: include_str!("0001_portfolio.sql"),
    },
    Migration {
        version: 2,
        name: "flash_notices",
        sql: include_str!("0002_flash_notices.sql"),
    },
];

/// Highest schema version this build knows how to create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Version currently recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the schema up to [`latest_version`] inside one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > from).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
    }
    tx.commit()?;

    let names: Vec<&str> = pending.iter().map(|m| m.name).collect();
    info!(
        "event=db_migrate module=db status=ok from_version={from} to_version={to} applied={}",
        names.join(",")
    );
    Ok(())
}
