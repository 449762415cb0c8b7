pub mod context;
pub mod contact_commands;

use std::path::Path;

use context::CLIContext;

/// Words that end the session (matched case-insensitively on the whole line).
pub const EXIT_COMMANDS: &[&str] = &["good bye", "close", "exit"];

/// What the loop should do after one line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    ShowAll,
    Help,
    Exit,
    Empty,
}

/// Run the interactive REPL against the address book stored at `book_path`.
pub fn run(book_path: &Path) {
    println!("Contact Book");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let mut ctx = CLIContext::open(book_path);
    repl_loop(&mut ctx);

    if ctx.load_failed {
        println!("Nothing was changed, so the unreadable file was left as it is. Good bye!");
        return;
    }
    match ctx.persist() {
        Ok(()) => println!("Contacts saved. Good bye!"),
        Err(e) => eprintln!("Error saving contacts: {}", e),
    }
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        match dispatch(ctx, &input) {
            Reply::Text(text) => println!("{}", text),
            Reply::ShowAll => contact_commands::show_all(ctx),
            Reply::Help => print_help(),
            Reply::Exit => break,
            Reply::Empty => {}
        }
    }
}

/// Interpret one line of input against the context.
pub fn dispatch(ctx: &mut CLIContext, input: &str) -> Reply {
    let input = input.trim();
    if input.is_empty() {
        return Reply::Empty;
    }

    let lowered = input.to_lowercase();
    if EXIT_COMMANDS.contains(&lowered.as_str()) {
        return Reply::Exit;
    }
    if lowered == "show all" {
        return Reply::ShowAll;
    }

    let (command, args) = parse_command(input);
    tracing::debug!(command, args, "dispatching command");

    let result = match command.to_lowercase().as_str() {
        "hello" | "hi" => Ok(contact_commands::hello()),
        "help" | "?" => return Reply::Help,
        "add" => contact_commands::add(ctx, args),
        "change" => contact_commands::change(ctx, args),
        "delete" => contact_commands::delete(ctx, args),
        "phone" => contact_commands::phone(ctx, args),
        "birthday" => contact_commands::birthday(ctx, args),
        "set-birthday" => contact_commands::set_birthday(ctx, args),
        "search" => contact_commands::search(ctx, args),
        "export" => contact_commands::export(ctx, args),
        _ => Ok(format!("Unknown command: {}. Type 'help' for commands.", command)),
    };

    match result {
        Ok(text) => Reply::Text(text),
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            Reply::Text(CLIContext::describe_error(&e))
        }
    }
}

/// Split input into the command word and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Contacts:
    add <name> <phone>... [birthday]   Add a contact, or add phones to an existing one
    change <name> <old> <new>          Replace one of a contact's phone numbers
    delete <name> <phone>              Remove a phone (the contact goes with its last one)
    phone <name>                       Show a contact's phones and birthday
    birthday <name>                    Days until a contact's birthday
    set-birthday <name> <date>         Set or replace a contact's birthday
    search <text>                      Find contacts by name or phone fragment
    show all                           Page through every contact

  Other:
    export <path>                      Write all contacts to a JSON file
    hello                              Say hello
    help                               Show this help
    good bye / close / exit            Save and quit

TIPS:
  - Birthdays are written DD.MM.YYYY (separators / - , \ also work)
  - Phone numbers may start with + and use dots, dashes or an (area code)"#);
}
