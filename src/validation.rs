use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Country code, optional (bracketed) area code, then two digit groups.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?[0-9]{1,3})[-. ]?(\(?[0-9]{1,4}\)?)[-. ]?([0-9]{1,3})[-. ]?([0-9]{1,4})$")
        .expect("Failed to compile phone number regex")
});

/// Day, month and four-digit year with an optional separator between groups.
static BIRTHDAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})[\\/\-., ]?([0-9]{2})[\\/\-., ]?([0-9]{4})$")
        .expect("Failed to compile birthday regex")
});

pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MAX_BIRTH_YEAR: i32 = 2100;

pub fn is_phone_number(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Splits a birthday string into (day, month, year) if it has the right shape.
/// Ranges are not checked here.
pub fn birthday_parts(value: &str) -> Option<(u32, u32, i32)> {
    let caps = BIRTHDAY_PATTERN.captures(value)?;
    let day = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    Some((day, month, year))
}

pub fn looks_like_birthday(value: &str) -> bool {
    BIRTHDAY_PATTERN.is_match(value)
}

/// Range and calendar check for a birth date.
pub fn birth_date(day: u32, month: u32, year: i32) -> Option<NaiveDate> {
    if !(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
