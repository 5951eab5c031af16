use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS local_storage (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            updated_at  TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS fetch_cache (
            key         TEXT PRIMARY KEY,
            body        TEXT NOT NULL,
            fetched_at  TEXT NOT NULL
        );
    ")?;
    Ok(())
}
