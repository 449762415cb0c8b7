use contact_book::config::{Action, Config};
use tracing_subscriber::EnvFilter;

fn main() {
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match config.apply_args(std::env::args().skip(1)) {
        Ok(Action::Run) => {}
        Ok(Action::ShowHelp) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information.");
            std::process::exit(1);
        }
    }

    // Logs go to stderr so they never interleave with REPL output.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(json_path) = &config.import_path {
        println!("Importing from {}...", json_path.display());
        match contact_book::migrate::import_into(json_path, &config.book_path) {
            Ok(stats) => {
                tracing::info!(contacts = stats.contacts, "import finished");
                println!("Import complete!");
                println!("  Contacts: {}", stats.contacts);
                println!("  Phones: {}", stats.phones);
                println!("  Birthdays: {}", stats.birthdays);
            }
            Err(e) => {
                tracing::error!(error = %e, "import failed");
                eprintln!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    contact_book::cli::run(&config.book_path);
}

fn print_usage() {
    println!("Contact Book - personal address book");
    println!();
    println!("Usage: contact-book [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -f, --file <PATH>      Address book file (default: ./address.book, env CONTACT_BOOK_FILE)");
    println!("  --import <JSON_PATH>   Create the address book from a JSON export");
    println!("  -h, --help             Show this help");
}
