use super::AddressBook;
use crate::error::{BookError, BookResult};
use crate::model::{ContactKey, Record};

/// Single-pass walk over an address book in insertion order.
///
/// The entries are captured when the cursor is created. The cursor holds a
/// shared borrow of the book, so the book cannot change underneath it; to
/// start over, ask the book for a new cursor.
#[derive(Debug, Clone)]
pub struct BookCursor<'a> {
    entries: Vec<(&'a ContactKey, &'a Record)>,
    position: usize,
}

impl<'a> BookCursor<'a> {
    pub fn new(book: &'a AddressBook) -> Self {
        Self {
            entries: book.records().collect(),
            position: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.position < self.entries.len()
    }

    /// The next entry, or `EndOfSequence` once every entry has been handed out.
    pub fn advance(&mut self) -> BookResult<(&'a ContactKey, &'a Record)> {
        let entry = *self
            .entries
            .get(self.position)
            .ok_or(BookError::EndOfSequence)?;
        self.position += 1;
        Ok(entry)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.entries.len() - self.position
    }
}

impl<'a> Iterator for BookCursor<'a> {
    type Item = (&'a ContactKey, &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for BookCursor<'_> {}
