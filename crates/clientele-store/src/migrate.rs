use crate::error::{Result, StoreError};
use rusqlite::{Connection, OptionalExtension};

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "001_init",
    sql: include_str!("../migrations/001_init.sql"),
}];

/// Applies every pending migration inside a single transaction.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS clientele_schema (version INTEGER NOT NULL);")?;
    let current = match read_version(&tx)? {
        Some(version) => version,
        None => {
            tx.execute("INSERT INTO clientele_schema (version) VALUES (0);", [])?;
            0
        }
    };

    let latest = latest_version();
    if current > latest {
        return Err(StoreError::Migration(format!(
            "database is at version {current}, newest known is {latest}"
        )));
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)
            .map_err(|err| StoreError::Migration(format!("{}: {err}", migration.name)))?;
        let updated = tx.execute(
            "UPDATE clientele_schema SET version = ?1;",
            [migration.version],
        )?;
        if updated != 1 {
            return Err(StoreError::Migration(format!(
                "expected one schema row, found {updated}"
            )));
        }
    }

    tx.commit()?;
    Ok(())
}

/// Current schema version; 0 for a database that was never migrated.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'clientele_schema');",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }
    Ok(read_version(conn)?.unwrap_or(0))
}

pub fn latest_version() -> i64 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

fn read_version(conn: &Connection) -> Result<Option<i64>> {
    Ok(conn
        .query_row("SELECT version FROM clientele_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .optional()?)
}
