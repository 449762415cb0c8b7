pub mod field;
pub mod key;
pub mod record;

// Re-exports for convenience
pub use field::{Birthday, FieldKind, Name, Phone, ValidatedField};
pub use key::ContactKey;
pub use record::Record;
