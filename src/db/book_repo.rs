use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode, OpenFlags};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::schema;
use crate::error::{BookError, BookResult};
use crate::model::{Birthday, Name, Phone, Record, ValidatedField};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes `records` to a fresh database at `path`, replacing whatever the
/// file held before. The data is built next to the target and renamed over
/// it, so a failed save leaves the previous file in place. A location that
/// cannot be written is reported as an I/O error.
pub fn save<'a>(path: &Path, records: impl IntoIterator<Item = &'a Record>) -> BookResult<()> {
    let staging = staging_path(path)?;
    remove_if_exists(&staging)?;

    let result = write_database(&staging, records)
        .map_err(into_io)
        .and_then(|()| Ok(fs::rename(&staging, path)?));
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

/// Reads every record stored at `path`, in insertion order.
///
/// A missing file is reported as an I/O error of kind `NotFound`. Anything
/// that exists but does not decode into valid records is `CorruptData`.
pub fn load(path: &Path) -> BookResult<Vec<Record>> {
    fs::metadata(path)?;
    read_database(path).map_err(into_corrupt)
}

fn write_database<'a>(path: &Path, records: impl IntoIterator<Item = &'a Record>) -> BookResult<()> {
    let mut conn = Connection::open(path)?;
    schema::initialize(&conn)?;

    let tx = conn.transaction()?;
    for (position, record) in records.into_iter().enumerate() {
        insert_record(&tx, position as i64, record)?;
    }
    tx.commit()?;

    conn.close().map_err(|(_, e)| e)?;
    Ok(())
}

fn insert_record(conn: &Connection, position: i64, record: &Record) -> BookResult<()> {
    let birthday = record
        .birthday()
        .map(|b| b.date().format(DATE_FORMAT).to_string());

    conn.execute(
        "INSERT INTO contacts (position, name, birthday) VALUES (?1, ?2, ?3)",
        params![position, record.name().as_str(), birthday],
    )?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO phones (contact_name, position, number) VALUES (?1, ?2, ?3)",
    )?;
    for (index, phone) in record.phones().iter().enumerate() {
        stmt.execute(params![record.name().as_str(), index as i64, phone.as_str()])?;
    }
    Ok(())
}

fn read_database(path: &Path) -> BookResult<Vec<Record>> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    schema::check_format(&conn)?;

    let mut stmt = conn.prepare("SELECT name, birthday FROM contacts ORDER BY position")?;
    let rows = stmt
        .query_map([], |row| {
            let name: String = row.get(0)?;
            let birthday: Option<String> = row.get(1)?;
            Ok((name, birthday))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let records = rows
        .into_iter()
        .map(|(name, birthday)| row_to_record(&conn, &name, birthday.as_deref()))
        .collect::<BookResult<Vec<_>>>()?;

    Ok(records)
}

fn row_to_record(conn: &Connection, name: &str, birthday: Option<&str>) -> BookResult<Record> {
    let birthday = birthday
        .map(|s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|e| BookError::CorruptData(format!("bad birthday '{}': {}", s, e)))
                .and_then(Birthday::from_date)
        })
        .transpose()?;

    Ok(Record::from_parts(
        Name::parse(name)?,
        find_phones(conn, name)?,
        birthday,
    ))
}

fn find_phones(conn: &Connection, name: &str) -> BookResult<Vec<Phone>> {
    let mut stmt = conn.prepare_cached(
        "SELECT number FROM phones WHERE contact_name = ?1 ORDER BY position",
    )?;

    let numbers = stmt
        .query_map(params![name], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    numbers.iter().map(|n| Phone::parse(n)).collect()
}

/// Anything that goes wrong while decoding an existing file means the file is
/// unusable, except failures to get at the file in the first place.
fn into_corrupt(err: BookError) -> BookError {
    match err {
        BookError::Database(e) if is_access_failure(&e) => BookError::Database(e),
        BookError::Database(e) => BookError::CorruptData(e.to_string()),
        invalid @ BookError::InvalidFormat { .. } => BookError::CorruptData(invalid.to_string()),
        other => other,
    }
}

/// Failing to reach the storage location is an I/O problem, not a database one.
fn into_io(err: BookError) -> BookError {
    match err {
        BookError::Database(e) if is_access_failure(&e) => {
            let kind = match &e {
                rusqlite::Error::SqliteFailure(f, _)
                    if matches!(f.code, ErrorCode::PermissionDenied | ErrorCode::ReadOnly) =>
                {
                    io::ErrorKind::PermissionDenied
                }
                _ => io::ErrorKind::Other,
            };
            BookError::Io(io::Error::new(kind, e))
        }
        other => other,
    }
}

fn is_access_failure(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _) if matches!(
            f.code,
            ErrorCode::CannotOpen
                | ErrorCode::PermissionDenied
                | ErrorCode::ReadOnly
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::SystemIoFailure
        )
    )
}

fn staging_path(path: &Path) -> BookResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a file path: {}", path.display()),
        )
    })?;
    let mut staged = OsString::from(file_name);
    staged.push(".tmp");
    Ok(path.with_file_name(staged))
}

fn remove_if_exists(path: &Path) -> BookResult<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}
