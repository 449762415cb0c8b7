use chrono::NaiveDate;

use crate::book::AddressBook;
use crate::error::{BookError, BookResult};
use crate::model::{Birthday, Name, Phone, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Created,
    Merged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The phone was removed and the contact still has `remaining` numbers.
    PhoneRemoved { remaining: usize },
    /// The last phone was removed, so the contact went with it.
    ContactRemoved,
    PhoneNotFound,
}

/// Adds a contact, or folds new phones and a birthday into an existing one.
///
/// For an existing contact, numbers that are already stored are moved to the
/// end of the list rather than duplicated.
pub fn add_contact(
    book: &mut AddressBook,
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
) -> BookResult<AddOutcome> {
    let mut record = match birthday {
        Some(b) => Record::with_birthday(name, b),
        None => Record::new(name),
    };
    for phone in phones {
        record.add_phone(phone);
    }

    if !book.contains(record.name().as_str()) {
        book.add_record(record);
        return Ok(AddOutcome::Created);
    }

    let existing = find_mut(book, record.name().as_str())?;
    for phone in record.phones() {
        existing.delete_phone(phone);
    }
    book.update_record(record)?;
    Ok(AddOutcome::Merged)
}

pub fn change_phone(book: &mut AddressBook, name: &str, old: &str, new: Phone) -> BookResult<()> {
    find_mut(book, name)?.change_phone(old, new)
}

/// Removes `phone` from a contact, dropping the contact once no numbers remain.
pub fn delete_phone(book: &mut AddressBook, name: &str, phone: &str) -> BookResult<DeleteOutcome> {
    let record = find_mut(book, name)?;
    if record.delete_phone(phone) == 0 {
        return Ok(DeleteOutcome::PhoneNotFound);
    }

    let remaining = record.phones().len();
    if remaining == 0 {
        book.remove_record(name);
        Ok(DeleteOutcome::ContactRemoved)
    } else {
        Ok(DeleteOutcome::PhoneRemoved { remaining })
    }
}

pub fn set_birthday(book: &mut AddressBook, name: &str, birthday: Birthday) -> BookResult<()> {
    find_mut(book, name)?.set_birthday(birthday);
    Ok(())
}

pub fn days_to_birthday(book: &AddressBook, name: &str, today: NaiveDate) -> BookResult<i64> {
    book.get(name)
        .ok_or_else(|| BookError::not_found("Contact", name))?
        .days_to_birthday_from(today)
}

fn find_mut<'a>(book: &'a mut AddressBook, name: &str) -> BookResult<&'a mut Record> {
    book.get_mut(name)
        .ok_or_else(|| BookError::not_found("Contact", name))
}
