use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{BookError, BookResult};

/// Bumped whenever the table layout changes incompatibly.
pub const FORMAT_VERSION: i64 = 1;

/// Initialize the storage schema and stamp it with the current format version.
pub fn initialize(conn: &Connection) -> BookResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS book_metadata (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contacts (
            position INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE,
            birthday TEXT
        );

        CREATE TABLE IF NOT EXISTS phones (
            contact_name TEXT NOT NULL REFERENCES contacts(name) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            number TEXT NOT NULL,
            PRIMARY KEY (contact_name, position)
        );

        PRAGMA foreign_keys = ON;
        ",
    )?;
    conn.execute(
        "INSERT OR REPLACE INTO book_metadata (key, value) VALUES ('format_version', ?1)",
        params![FORMAT_VERSION.to_string()],
    )?;
    Ok(())
}

/// Confirms the database was written by a compatible version.
pub fn check_format(conn: &Connection) -> BookResult<()> {
    let version: Option<String> = conn
        .query_row(
            "SELECT value FROM book_metadata WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match version {
        Some(v) if v == FORMAT_VERSION.to_string() => Ok(()),
        Some(v) => Err(BookError::CorruptData(format!(
            "unsupported format version {} (expected {})",
            v, FORMAT_VERSION
        ))),
        None => Err(BookError::CorruptData("missing format version".into())),
    }
}
