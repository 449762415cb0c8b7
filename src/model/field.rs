use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BookError, BookResult};
use crate::validation;

/// Which kind of value a validated field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Phone,
    Birthday,
}

impl FieldKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Phone => "phone number",
            FieldKind::Birthday => "birthday",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A value that refuses malformed input when it is built.
///
/// Construction is pure: a bad value comes back as an error and nothing is
/// retried or prompted for.
pub trait ValidatedField: Sized + fmt::Display {
    const KIND: FieldKind;

    fn parse(raw: &str) -> BookResult<Self>;

    fn kind(&self) -> FieldKind {
        Self::KIND
    }

    fn to_display_string(&self) -> String {
        self.to_string()
    }
}

fn invalid(kind: FieldKind, raw: &str) -> BookError {
    BookError::InvalidFormat {
        kind,
        value: raw.to_string(),
    }
}

// ==========================================================================
// NAME
// ==========================================================================

/// A contact's name. Any non-empty text, stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValidatedField for Name {
    const KIND: FieldKind = FieldKind::Name;

    fn parse(raw: &str) -> BookResult<Self> {
        if raw.is_empty() {
            Err(invalid(FieldKind::Name, raw))
        } else {
            Ok(Self(raw.to_string()))
        }
    }
}

// ==========================================================================
// PHONE
// ==========================================================================

/// An international phone number, kept exactly as it was typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValidatedField for Phone {
    const KIND: FieldKind = FieldKind::Phone;

    fn parse(raw: &str) -> BookResult<Self> {
        if validation::is_phone_number(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(invalid(FieldKind::Phone, raw))
        }
    }
}

// ==========================================================================
// BIRTHDAY
// ==========================================================================

/// A birth date. The raw text is resolved to a calendar date on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub const DISPLAY_FORMAT: &'static str = "%d.%m.%Y";

    /// Builds a birthday from an already-parsed date, applying the same
    /// year range as [`Birthday::parse`].
    pub fn from_date(date: NaiveDate) -> BookResult<Self> {
        validation::birth_date(date.day(), date.month(), date.year())
            .map(Self)
            .ok_or_else(|| invalid(FieldKind::Birthday, &date.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// This birthday's anniversary in `year`. A 29 February birthday falls on
    /// 28 February in common years.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, self.month(), self.day() - 1))
    }
}

impl ValidatedField for Birthday {
    const KIND: FieldKind = FieldKind::Birthday;

    fn parse(raw: &str) -> BookResult<Self> {
        validation::birthday_parts(raw)
            .and_then(|(day, month, year)| validation::birth_date(day, month, year))
            .map(Self)
            .ok_or_else(|| invalid(FieldKind::Birthday, raw))
    }
}

// ==========================================================================
// SHARED CONVERSIONS
// ==========================================================================

macro_rules! string_conversions {
    ($ty:ty) => {
        impl FromStr for $ty {
            type Err = BookError;

            fn from_str(s: &str) -> BookResult<Self> {
                <$ty as ValidatedField>::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = BookError;

            fn try_from(value: String) -> BookResult<Self> {
                <$ty as ValidatedField>::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.to_string()
            }
        }
    };
}

string_conversions!(Name);
string_conversions!(Phone);
string_conversions!(Birthday);

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::DISPLAY_FORMAT))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
