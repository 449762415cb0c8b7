use thiserror::Error;

use crate::model::FieldKind;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("Invalid {kind}: '{value}'")]
    InvalidFormat { kind: FieldKind, value: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("{name} has no birthday set")]
    NoBirthday { name: String },

    #[error("No more records")]
    EndOfSequence,

    #[error("Corrupt address book data: {0}")]
    CorruptData(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BookError {
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        BookError::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// True when a load failed because nothing has been saved at the location yet.
    pub fn is_missing_storage(&self) -> bool {
        matches!(self, BookError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type BookResult<T> = Result<T, BookError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    #[error("{flag} requires a {what} argument")]
    MissingArgument { flag: String, what: String },

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
