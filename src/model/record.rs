use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::field::{Birthday, Name, Phone};
use super::key::ContactKey;
use crate::error::{BookError, BookResult};

/// One contact: a name, its phone numbers in the order they were added, and
/// an optional birthday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

impl Record {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
        }
    }

    pub fn with_birthday(name: Name, birthday: Birthday) -> Self {
        let mut record = Self::new(name);
        record.birthday = Some(birthday);
        record
    }

    /// Rebuilds a record exactly as stored, duplicates included.
    pub(crate) fn from_parts(name: Name, phones: Vec<Phone>, birthday: Option<Birthday>) -> Self {
        Self {
            name,
            phones,
            birthday,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn key(&self) -> ContactKey {
        ContactKey::from(&self.name)
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<Birthday> {
        self.birthday
    }

    pub fn has_phone(&self, phone: impl AsRef<str>) -> bool {
        let wanted = phone.as_ref();
        self.phones.iter().any(|p| p.as_str() == wanted)
    }

    /// Appends `phone` unless an equal number is already present.
    /// Returns whether the list changed.
    pub fn add_phone(&mut self, phone: Phone) -> bool {
        if self.phones.contains(&phone) {
            return false;
        }
        self.phones.push(phone);
        true
    }

    /// Removes every phone that reads the same as `phone`. Returns how many
    /// were removed; zero is not an error.
    pub fn delete_phone(&mut self, phone: impl AsRef<str>) -> usize {
        let wanted = phone.as_ref();
        let before = self.phones.len();
        self.phones.retain(|p| p.as_str() != wanted);
        before - self.phones.len()
    }

    /// Replaces the first phone matching `old` with `new`, keeping its position.
    pub fn change_phone(&mut self, old: impl AsRef<str>, new: Phone) -> BookResult<()> {
        let wanted = old.as_ref();
        let slot = self
            .phones
            .iter_mut()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| BookError::not_found("Phone", wanted))?;
        *slot = new;
        Ok(())
    }

    pub fn set_birthday(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    pub fn clear_birthday(&mut self) {
        self.birthday = None;
    }

    /// Appends without duplicate suppression; merge callers dedupe first.
    pub(crate) fn extend_phones(&mut self, phones: impl IntoIterator<Item = Phone>) {
        self.phones.extend(phones);
    }

    /// Days from `today` until the next birthday, 0 if it is today.
    pub fn days_to_birthday_from(&self, today: NaiveDate) -> BookResult<i64> {
        let birthday = self.birthday.ok_or_else(|| BookError::NoBirthday {
            name: self.name.to_string(),
        })?;

        let next = match birthday.in_year(today.year()) {
            Some(date) if date >= today => Some(date),
            _ => birthday.in_year(today.year() + 1),
        }
        .ok_or_else(|| BookError::CorruptData(format!("birthday out of range: {}", birthday)))?;

        Ok((next - today).num_days())
    }

    pub fn days_to_birthday(&self) -> BookResult<i64> {
        self.days_to_birthday_from(Local::now().date_naive())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.birthday {
            Some(b) => writeln!(f, "Birthday: {}", b)?,
            None => writeln!(f, "Birthday: (none)")?,
        }
        let phones: Vec<&str> = self.phones.iter().map(Phone::as_str).collect();
        if phones.is_empty() {
            writeln!(f, "Phones: (none)")
        } else {
            writeln!(f, "Phones: {}", phones.join(", "))
        }
    }
}
