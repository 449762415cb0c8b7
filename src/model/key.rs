use std::borrow::Borrow;
use std::fmt;

use super::field::Name;

/// Identity of a contact inside an address book. Always derived from a
/// validated [`Name`], so it can never be empty and never changes once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactKey(String);

impl ContactKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Name> for ContactKey {
    fn from(name: &Name) -> Self {
        Self(name.as_str().to_string())
    }
}

// Lets maps keyed by ContactKey be queried with a plain &str.
impl Borrow<str> for ContactKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContactKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ContactKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ContactKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ContactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
