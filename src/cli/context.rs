use chrono::Local;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::book::AddressBook;
use crate::error::{BookError, BookResult};
use crate::model::FieldKind;

pub struct CLIContext {
    pub book: AddressBook,
    pub book_path: PathBuf,
    /// Set when the stored book could not be read; cleared by the first save.
    pub load_failed: bool,
}

impl CLIContext {
    pub fn new(book: AddressBook, book_path: PathBuf) -> Self {
        Self {
            book,
            book_path,
            load_failed: false,
        }
    }

    /// Loads the book at `book_path`. A missing file starts an empty book;
    /// an unreadable one is reported and also starts empty, leaving the file
    /// alone until the next save.
    pub fn open(book_path: &Path) -> Self {
        let mut load_failed = false;
        let book = match AddressBook::load(book_path) {
            Ok(book) => {
                tracing::info!(path = %book_path.display(), contacts = book.len(), "loaded address book");
                println!("Loaded {} contact(s).", book.len());
                book
            }
            Err(e) if e.is_missing_storage() => {
                tracing::info!(path = %book_path.display(), "no saved address book, starting empty");
                println!("No saved contacts found. A new address book has been created.");
                AddressBook::new()
            }
            Err(e) => {
                tracing::error!(path = %book_path.display(), error = %e, "failed to load address book");
                println!("Error loading contacts: {}", e);
                println!("Starting with an empty address book.");
                load_failed = true;
                AddressBook::new()
            }
        };
        let mut ctx = Self::new(book, book_path.to_path_buf());
        ctx.load_failed = load_failed;
        ctx
    }

    /// Write-through: every change is flushed before the command reports success.
    pub fn persist(&mut self) -> BookResult<()> {
        self.book.serialize(&self.book_path).map_err(|e| {
            tracing::error!(path = %self.book_path.display(), error = %e, "failed to save address book");
            e
        })?;
        tracing::debug!(path = %self.book_path.display(), contacts = self.book.len(), "saved address book");
        self.load_failed = false;
        Ok(())
    }

    /// Runs `change` on the book and writes the result through. If either
    /// step fails the book is restored, so memory never drifts from storage.
    pub fn apply<T>(
        &mut self,
        change: impl FnOnce(&mut AddressBook) -> BookResult<T>,
    ) -> BookResult<T> {
        let snapshot = self.book.clone();
        let result = change(&mut self.book).and_then(|value| self.persist().map(|()| value));
        if result.is_err() {
            self.book = snapshot;
        }
        result
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    pub fn today() -> chrono::NaiveDate {
        Local::now().date_naive()
    }

    /// Turn an error into the line shown to the user.
    pub fn describe_error(e: &BookError) -> String {
        match e {
            BookError::InvalidFormat {
                kind: FieldKind::Name,
                value,
            } if value.is_empty() => "The name cannot be empty.".to_string(),
            BookError::InvalidFormat { kind, value } => {
                format!("Invalid {}: '{}'. Please check it and try again.", kind, value)
            }
            BookError::NotFound { entity_type, id } if entity_type == "Phone" => {
                format!("Phone number {} not found.", id)
            }
            BookError::NotFound { id, .. } => format!("Contact {} not found.", id),
            BookError::NoBirthday { name } => format!("{} has no birthday set.", name),
            other => format!("Error: {}", other),
        }
    }
}
