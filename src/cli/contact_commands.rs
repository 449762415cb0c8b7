use std::path::Path;

use crate::cli::context::CLIContext;
use crate::error::{BookError, BookResult};
use crate::migrate;
use crate::model::*;
use crate::ops::contact_ops::{self, AddOutcome, DeleteOutcome};
use crate::validation;

pub fn hello() -> String {
    "Hello! How can I help you?".into()
}

/// `add <name> <phone> [<phone>...] [birthday]`
pub fn add(ctx: &mut CLIContext, args: &str) -> BookResult<String> {
    let (name, phones, birthday) = match parse_add_args(args)? {
        Some(parsed) => parsed,
        None => return Ok("Usage: add <name> <phone> [<phone>...] [DD.MM.YYYY]".into()),
    };

    let key = ContactKey::from(&name);
    let outcome = ctx.apply(|book| contact_ops::add_contact(book, name, phones, birthday))?;

    let record = ctx
        .book
        .get(key.as_str())
        .ok_or_else(|| BookError::not_found("Contact", key.as_str()))?;
    let heading = match outcome {
        AddOutcome::Created => "Added",
        AddOutcome::Merged => "Updated",
    };
    Ok(format!("{} {}\n{}", heading, key, format_entry(&key, record)))
}

/// `change <name> <old phone> <new phone>`
pub fn change(ctx: &mut CLIContext, args: &str) -> BookResult<String> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.len() < 3 {
        return Ok("Usage: change <name> <old phone> <new phone>".into());
    }
    let (name_tokens, phones) = tokens.split_at(tokens.len() - 2);
    let name = name_tokens.join(" ");
    let new_phone = Phone::parse(phones[1])?;

    ctx.apply(|book| contact_ops::change_phone(book, &name, phones[0], new_phone.clone()))?;
    Ok(format!("Contact {} updated. New phone number: {}.", name, new_phone))
}

/// `delete <name> <phone>`
pub fn delete(ctx: &mut CLIContext, args: &str) -> BookResult<String> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.len() < 2 {
        return Ok("Usage: delete <name> <phone>".into());
    }
    let (name_tokens, phone) = tokens.split_at(tokens.len() - 1);
    let name = name_tokens.join(" ");
    let phone = phone[0];

    let has_phone = ctx
        .book
        .get(&name)
        .ok_or_else(|| BookError::not_found("Contact", &name))?
        .has_phone(phone);
    if !has_phone {
        return Ok(format!("Contact {} has no phone number {}.", name, phone));
    }

    match ctx.apply(|book| contact_ops::delete_phone(book, &name, phone))? {
        DeleteOutcome::PhoneNotFound => {
            Ok(format!("Contact {} has no phone number {}.", name, phone))
        }
        DeleteOutcome::PhoneRemoved { remaining } => Ok(format!(
            "Removed {} from {}. {} number(s) left.",
            phone, name, remaining
        )),
        DeleteOutcome::ContactRemoved => {
            Ok(format!(
                "Removed {} from {}. No numbers left, so the contact was deleted.",
                phone, name
            ))
        }
    }
}

/// `phone <name>`
pub fn phone(ctx: &CLIContext, args: &str) -> BookResult<String> {
    let name = args.trim();
    if name.is_empty() {
        return Ok("Usage: phone <name>".into());
    }
    let record = ctx
        .book
        .get(name)
        .ok_or_else(|| BookError::not_found("Contact", name))?;
    Ok(format!("Contact {}:\n{}", name, record))
}

/// `birthday <name>`
pub fn birthday(ctx: &CLIContext, args: &str) -> BookResult<String> {
    let name = args.trim();
    if name.is_empty() {
        return Ok("Usage: birthday <name>".into());
    }
    let days = contact_ops::days_to_birthday(&ctx.book, name, CLIContext::today())?;
    let date = ctx
        .book
        .get(name)
        .and_then(Record::birthday)
        .map(|b| b.to_string())
        .unwrap_or_default();

    Ok(match days {
        0 => format!("Today is {}'s birthday ({})!", name, date),
        1 => format!("{}'s birthday is tomorrow ({}).", name, date),
        n => format!("{} days until {}'s birthday ({}).", n, name, date),
    })
}

/// `set-birthday <name> <date>`
pub fn set_birthday(ctx: &mut CLIContext, args: &str) -> BookResult<String> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.len() < 2 {
        return Ok("Usage: set-birthday <name> <DD.MM.YYYY>".into());
    }
    let (name_tokens, date) = tokens.split_at(tokens.len() - 1);
    let name = name_tokens.join(" ");
    let birthday = Birthday::parse(date[0])?;

    ctx.apply(|book| contact_ops::set_birthday(book, &name, birthday))?;
    Ok(format!("Birthday of {} set to {}.", name, birthday))
}

/// `search <text>`
pub fn search(ctx: &CLIContext, args: &str) -> BookResult<String> {
    let needle = args.trim();
    if needle.is_empty() {
        return Ok("Usage: search <text>".into());
    }
    let results = ctx.book.search(needle);
    if results.is_empty() {
        return Ok(format!("No contacts matching '{}'.", needle));
    }

    let mut out = format!("Found {} contact(s):\n", results.len());
    for (key, record) in &results {
        out.push('\n');
        out.push_str(&format_entry(key, record));
    }
    Ok(out)
}

/// `export <path>`
pub fn export(ctx: &CLIContext, args: &str) -> BookResult<String> {
    let path = args.trim();
    if path.is_empty() {
        return Ok("Usage: export <path>".into());
    }
    let count = migrate::export_json(&ctx.book, Path::new(path))?;
    tracing::info!(path, contacts = count, "exported address book");
    Ok(format!("Exported {} contact(s) to {}.", count, path))
}

/// `show all`: one contact at a time, Enter for the next. EOF stops early.
pub fn show_all(ctx: &CLIContext) {
    if ctx.book.is_empty() {
        println!("The address book is empty.");
        return;
    }

    let mut cursor = ctx.book.iter();
    while let Ok((key, record)) = cursor.advance() {
        println!("{}", format_entry(key, record));
        if cursor.has_next() && ctx.read_line("Press Enter to continue...").is_none() {
            break;
        }
    }
    println!("End of list.");
}

pub fn format_entry(key: &ContactKey, record: &Record) -> String {
    format!("Name: {}\n{}", key, record)
}

/// Splits `add` arguments into name, phones and an optional trailing birthday.
///
/// The name runs up to the first token shaped like a phone number, so names
/// may contain spaces. Returns `Ok(None)` when the arguments don't have that
/// shape at all.
pub fn parse_add_args(args: &str) -> BookResult<Option<(Name, Vec<Phone>, Option<Birthday>)>> {
    let mut tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.len() < 2 {
        return Ok(None);
    }

    let birthday = match tokens.last() {
        Some(last) if tokens.len() >= 3 && validation::looks_like_birthday(last) => {
            let parsed = Birthday::parse(last)?;
            tokens.pop();
            Some(parsed)
        }
        _ => None,
    };

    // With no phone-shaped token, the last one is meant as the phone and
    // fails validation below.
    let split = tokens
        .iter()
        .position(|t| validation::is_phone_number(t))
        .unwrap_or(tokens.len() - 1);
    if split == 0 {
        return Ok(None);
    }

    let name = Name::parse(&tokens[..split].join(" "))?;
    let phones = tokens[split..]
        .iter()
        .map(|t| Phone::parse(t))
        .collect::<BookResult<Vec<_>>>()?;

    Ok(Some((name, phones, birthday)))
}
