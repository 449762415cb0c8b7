use chrono::NaiveDate;
use contact_book::error::BookError;
use contact_book::model::*;
use proptest::prelude::*;

fn phone(s: &str) -> Phone {
    Phone::parse(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn anna() -> Record {
    Record::new(Name::parse("Anna").unwrap())
}

// ==========================================================================
// NAME TESTS
// ==========================================================================

#[test]
fn name_accepts_any_text() {
    let name = Name::parse("Anna Maria O'Neil").unwrap();
    assert_eq!(name.as_str(), "Anna Maria O'Neil");
    assert_eq!(name.kind(), FieldKind::Name);
}

#[test]
fn name_keeps_surrounding_whitespace() {
    let name = Name::parse(" Anna ").unwrap();
    assert_eq!(name.as_str(), " Anna ");
    assert_eq!(ContactKey::from(&name).as_str(), " Anna ");
}

#[test]
fn name_accepts_whitespace_only() {
    assert_eq!(Name::parse("   ").unwrap().as_str(), "   ");
}

#[test]
fn name_rejects_empty() {
    assert!(matches!(
        Name::parse(""),
        Err(BookError::InvalidFormat {
            kind: FieldKind::Name,
            ..
        })
    ));
}

// ==========================================================================
// PHONE TESTS
// ==========================================================================

#[test]
fn phone_keeps_input_as_display_string() {
    for raw in ["+380501234567", "+1 (555) 123-4567", "050.123.45.67", "0501234567"] {
        let p = phone(raw);
        assert_eq!(p.to_display_string(), raw);
        assert_eq!(p.kind(), FieldKind::Phone);
    }
}

#[test]
fn phone_rejects_bad_input() {
    for raw in ["", "abc", "+380-50-123-45-67-89", "12345678901234567", "++380501234567", "phone 0501234567"] {
        match Phone::parse(raw) {
            Err(BookError::InvalidFormat { kind, value }) => {
                assert_eq!(kind, FieldKind::Phone);
                assert_eq!(value, raw);
            }
            other => panic!("expected InvalidFormat for {:?}, got {:?}", raw, other),
        }
    }
}

#[test]
fn phone_equality_is_by_value() {
    assert_eq!(phone("+380501234567"), phone("+380501234567"));
    assert_ne!(phone("+380501234567"), phone("+380509876543"));
}

#[test]
fn phone_from_str_validates() {
    assert!("+380501234567".parse::<Phone>().is_ok());
    assert!("not a phone".parse::<Phone>().is_err());
}

proptest! {
    #[test]
    fn phone_accepts_every_matching_shape(
        raw in r"\+?[0-9]{1,3}[-. ]?\(?[0-9]{1,4}\)?[-. ]?[0-9]{1,3}[-. ]?[0-9]{1,4}"
    ) {
        let p = Phone::parse(&raw).unwrap();
        prop_assert_eq!(p.as_str(), raw.as_str());
    }

    #[test]
    fn phone_rejects_letters(raw in r"[0-9]{3,6}[a-z][0-9]{3,6}") {
        prop_assert!(Phone::parse(&raw).is_err());
    }
}

// ==========================================================================
// BIRTHDAY TESTS
// ==========================================================================

#[test]
fn birthday_resolves_to_calendar_date() {
    let b = Birthday::parse("15-05-1990").unwrap();
    assert_eq!(b.date(), date(1990, 5, 15));
    assert_eq!(b.kind(), FieldKind::Birthday);
}

#[test]
fn birthday_accepts_any_separator_or_none() {
    for raw in ["15.05.1990", "15/05/1990", r"15\05\1990", "15,05,1990", "15 05 1990", "15051990", "15-05.1990"] {
        assert_eq!(Birthday::parse(raw).unwrap().date(), date(1990, 5, 15), "{}", raw);
    }
}

#[test]
fn birthday_rejects_impossible_dates() {
    assert!(Birthday::parse("31-02-2024").is_err());
    assert!(Birthday::parse("29-02-2023").is_err());
    assert!(Birthday::parse("01-13-2000").is_err());
    assert!(Birthday::parse("00-01-2000").is_err());
}

#[test]
fn birthday_accepts_leap_day_in_leap_year() {
    assert_eq!(Birthday::parse("29-02-2024").unwrap().date(), date(2024, 2, 29));
}

#[test]
fn birthday_year_range_is_inclusive() {
    assert!(Birthday::parse("01-01-1900").is_ok());
    assert!(Birthday::parse("31-12-2100").is_ok());
    assert!(Birthday::parse("31-12-1899").is_err());
    assert!(Birthday::parse("01-01-2101").is_err());
}

#[test]
fn birthday_rejects_wrong_shape() {
    for raw in ["1990-05-15", "5.5.1990", "15.05.90", "15..05.1990", "tomorrow"] {
        assert!(matches!(
            Birthday::parse(raw),
            Err(BookError::InvalidFormat { kind: FieldKind::Birthday, .. })
        ));
    }
}

#[test]
fn birthday_display_reparses_to_same_date() {
    let b = Birthday::parse("07/03/1985").unwrap();
    assert_eq!(b.to_string(), "07.03.1985");
    assert_eq!(Birthday::parse(&b.to_string()).unwrap(), b);
}

#[test]
fn birthday_from_date_applies_year_range() {
    assert!(Birthday::from_date(date(1985, 3, 7)).is_ok());
    assert!(Birthday::from_date(date(1850, 3, 7)).is_err());
}

// ==========================================================================
// RECORD PHONE TESTS
// ==========================================================================

#[test]
fn add_phone_is_idempotent() {
    let mut record = anna();
    assert!(record.add_phone(phone("+380501234567")));
    assert!(!record.add_phone(phone("+380501234567")));
    assert_eq!(record.phones(), &[phone("+380501234567")]);
}

#[test]
fn add_phone_keeps_insertion_order() {
    let mut record = anna();
    record.add_phone(phone("+380501111111"));
    record.add_phone(phone("+380502222222"));
    record.add_phone(phone("+380503333333"));
    let numbers: Vec<&str> = record.phones().iter().map(Phone::as_str).collect();
    assert_eq!(numbers, ["+380501111111", "+380502222222", "+380503333333"]);
}

#[test]
fn delete_phone_removes_match() {
    let mut record = anna();
    record.add_phone(phone("+380501111111"));
    record.add_phone(phone("+380502222222"));
    assert_eq!(record.delete_phone("+380501111111"), 1);
    assert_eq!(record.phones(), &[phone("+380502222222")]);
}

#[test]
fn delete_phone_without_match_is_noop() {
    let mut record = anna();
    record.add_phone(phone("+380501111111"));
    assert_eq!(record.delete_phone("+380509999999"), 0);
    assert_eq!(record.phones().len(), 1);
}

#[test]
fn delete_phone_accepts_phone_value() {
    let mut record = anna();
    let p = phone("+380501111111");
    record.add_phone(p.clone());
    record.delete_phone(&p);
    assert!(record.phones().is_empty());
}

#[test]
fn change_phone_replaces_in_place() {
    let mut record = anna();
    record.add_phone(phone("+380501111111"));
    record.add_phone(phone("+380502222222"));
    record.add_phone(phone("+380503333333"));

    record.change_phone("+380502222222", phone("+380509999999")).unwrap();

    let numbers: Vec<&str> = record.phones().iter().map(Phone::as_str).collect();
    assert_eq!(numbers, ["+380501111111", "+380509999999", "+380503333333"]);
}

#[test]
fn change_phone_missing_old_is_not_found() {
    let mut record = anna();
    record.add_phone(phone("+380501111111"));
    let result = record.change_phone("+380502222222", phone("+380509999999"));
    assert!(matches!(result, Err(BookError::NotFound { .. })));
    assert_eq!(record.phones(), &[phone("+380501111111")]);
}

#[test]
fn has_phone_compares_display_strings() {
    let mut record = anna();
    record.add_phone(phone("+380501111111"));
    assert!(record.has_phone("+380501111111"));
    assert!(!record.has_phone("380501111111"));
}

// ==========================================================================
// RECORD BIRTHDAY TESTS
// ==========================================================================

#[test]
fn days_to_birthday_without_birthday_fails() {
    let record = anna();
    assert!(matches!(
        record.days_to_birthday_from(date(2024, 6, 1)),
        Err(BookError::NoBirthday { .. })
    ));
}

#[test]
fn days_to_birthday_is_zero_on_the_day() {
    let record = Record::with_birthday(Name::parse("Anna").unwrap(), Birthday::parse("01.06.1990").unwrap());
    assert_eq!(record.days_to_birthday_from(date(2024, 6, 1)).unwrap(), 0);
}

#[test]
fn days_to_birthday_counts_forward_this_year() {
    let record = Record::with_birthday(Name::parse("Anna").unwrap(), Birthday::parse("11.06.1990").unwrap());
    assert_eq!(record.days_to_birthday_from(date(2024, 6, 1)).unwrap(), 10);
}

#[test]
fn days_to_birthday_wraps_to_next_year() {
    let record = Record::with_birthday(Name::parse("Anna").unwrap(), Birthday::parse("01.01.1990").unwrap());
    assert_eq!(record.days_to_birthday_from(date(2024, 12, 31)).unwrap(), 1);
    assert_eq!(record.days_to_birthday_from(date(2023, 1, 2)).unwrap(), 364);
}

#[test]
fn days_to_birthday_leap_day_in_common_year() {
    let record = Record::with_birthday(Name::parse("Anna").unwrap(), Birthday::parse("29.02.2000").unwrap());
    assert_eq!(record.days_to_birthday_from(date(2023, 2, 20)).unwrap(), 8);
    assert_eq!(record.days_to_birthday_from(date(2024, 2, 20)).unwrap(), 9);
}

#[test]
fn days_to_birthday_uses_today() {
    let today = chrono::Local::now().date_naive();
    let birthday = Birthday::from_date(today).unwrap();
    let record = Record::with_birthday(Name::parse("Anna").unwrap(), birthday);
    assert_eq!(record.days_to_birthday().unwrap(), 0);
}

#[test]
fn set_and_clear_birthday() {
    let mut record = anna();
    record.set_birthday(Birthday::parse("01.06.1990").unwrap());
    assert_eq!(record.birthday().unwrap().date(), date(1990, 6, 1));
    record.clear_birthday();
    assert!(record.birthday().is_none());
}

// ==========================================================================
// DISPLAY TESTS
// ==========================================================================

#[test]
fn record_renders_birthday_then_phones() {
    let mut record = Record::with_birthday(Name::parse("Anna").unwrap(), Birthday::parse("01.06.1990").unwrap());
    record.add_phone(phone("+380501111111"));
    record.add_phone(phone("+380502222222"));
    assert_eq!(
        record.to_string(),
        "Birthday: 01.06.1990\nPhones: +380501111111, +380502222222\n"
    );
}

#[test]
fn record_renders_missing_parts() {
    assert_eq!(anna().to_string(), "Birthday: (none)\nPhones: (none)\n");
}

#[test]
fn record_key_matches_name() {
    assert_eq!(anna().key(), "Anna");
}
