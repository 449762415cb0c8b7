pub mod cursor;

use indexmap::IndexMap;
use std::path::Path;

use crate::db::book_repo;
use crate::error::{BookError, BookResult};
use crate::model::{ContactKey, Record};

pub use cursor::BookCursor;

/// Every contact, keyed by name, in the order names were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: IndexMap<ContactKey, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a previously serialized book.
    pub fn load(path: &Path) -> BookResult<Self> {
        let mut book = Self::new();
        book.deserialize(path)?;
        Ok(book)
    }

    /// Like [`AddressBook::load`], but a location with nothing saved yet
    /// yields an empty book. Other failures still surface.
    pub fn load_or_default(path: &Path) -> BookResult<Self> {
        match Self::load(path) {
            Err(e) if e.is_missing_storage() => Ok(Self::new()),
            other => other,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &ContactKey> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = (&ContactKey, &Record)> {
        self.records.iter()
    }

    /// Stores `record` under its name, discarding whatever was there before.
    /// A replaced entry keeps its original position.
    pub fn add_record(&mut self, record: Record) {
        self.records.insert(record.key(), record);
    }

    /// Merges `record` into the stored entry with the same name: phones are
    /// appended as given, the birthday is replaced only when one is supplied.
    pub fn update_record(&mut self, record: Record) -> BookResult<()> {
        let existing = self
            .records
            .get_mut(record.name().as_str())
            .ok_or_else(|| BookError::not_found("Contact", record.name().as_str()))?;

        if let Some(birthday) = record.birthday() {
            existing.set_birthday(birthday);
        }
        existing.extend_phones(record.phones().iter().cloned());
        Ok(())
    }

    /// Drops the entry for `name`, if any.
    pub fn remove_record(&mut self, name: &str) -> Option<Record> {
        self.records.shift_remove(name)
    }

    /// Case-sensitive substring match against names and phone numbers.
    pub fn search(&self, needle: &str) -> IndexMap<ContactKey, &Record> {
        self.records
            .iter()
            .filter(|(key, record)| {
                key.as_str().contains(needle)
                    || record.phones().iter().any(|p| p.as_str().contains(needle))
            })
            .map(|(key, record)| (key.clone(), record))
            .collect()
    }

    /// Writes the whole book to `path`, replacing anything already there.
    pub fn serialize(&self, path: &Path) -> BookResult<()> {
        book_repo::save(path, self.records.values())
    }

    /// Replaces the in-memory contents with what is stored at `path`.
    /// On failure the current contents are left as they were.
    pub fn deserialize(&mut self, path: &Path) -> BookResult<()> {
        let loaded = book_repo::load(path)?;
        self.records = loaded
            .into_iter()
            .map(|record| (record.key(), record))
            .collect();
        Ok(())
    }

    /// A fresh cursor positioned before the first contact.
    pub fn iter(&self) -> BookCursor<'_> {
        BookCursor::new(self)
    }
}

impl<'a> IntoIterator for &'a AddressBook {
    type Item = (&'a ContactKey, &'a Record);
    type IntoIter = BookCursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
