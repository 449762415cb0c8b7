use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::book::AddressBook;
use crate::error::{BookError, BookResult};
use crate::model::Record;

pub const JSON_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct BookDocument {
    version: u32,
    contacts: Vec<Record>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub phones: usize,
    pub birthdays: usize,
}

/// Writes the book as pretty-printed JSON, contacts in insertion order.
pub fn export_json(book: &AddressBook, json_path: &Path) -> BookResult<usize> {
    let doc = BookDocument {
        version: JSON_VERSION,
        contacts: book.records().map(|(_, r)| r.clone()).collect(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(json_path, json)?;
    Ok(doc.contacts.len())
}

/// Reads a JSON export back into a new book. Every value goes through the
/// usual field validation; a name appearing twice is rejected.
pub fn import_json(json_path: &Path) -> BookResult<(AddressBook, ImportStats)> {
    let json_str = fs::read_to_string(json_path)?;
    let doc: BookDocument = serde_json::from_str(&json_str)?;

    if doc.version != JSON_VERSION {
        return Err(BookError::CorruptData(format!(
            "unsupported export version {} (expected {})",
            doc.version, JSON_VERSION
        )));
    }

    let mut book = AddressBook::new();
    let mut stats = ImportStats::default();
    for record in doc.contacts {
        if book.contains(record.name().as_str()) {
            return Err(BookError::AlreadyExists {
                entity_type: "Contact".into(),
                identifier: record.name().to_string(),
            });
        }
        stats.contacts += 1;
        stats.phones += record.phones().len();
        if record.birthday().is_some() {
            stats.birthdays += 1;
        }
        book.add_record(record);
    }

    Ok((book, stats))
}

/// Imports a JSON export and saves it as a new address book at `book_path`.
pub fn import_into(json_path: &Path, book_path: &Path) -> BookResult<ImportStats> {
    if book_path.exists() {
        return Err(BookError::AlreadyExists {
            entity_type: "Address book file".into(),
            identifier: book_path.display().to_string(),
        });
    }
    let (book, stats) = import_json(json_path)?;
    book.serialize(book_path)?;
    Ok(stats)
}
