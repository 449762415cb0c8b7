pub mod error;
pub mod validation;
pub mod config;
pub mod model;
pub mod book;
pub mod db;
pub mod ops;
pub mod migrate;
pub mod cli;

pub use book::{AddressBook, BookCursor};
pub use config::Config;
pub use error::{BookError, BookResult};
