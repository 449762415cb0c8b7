//! Runtime configuration.
//!
//! Values come from the environment (optionally seeded from a `.env` file) and
//! can be overridden by command-line flags.

use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_BOOK_FILE: &str = "./address.book";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the address book is loaded from and saved to.
    pub book_path: PathBuf,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,

    /// JSON export to import instead of starting the REPL.
    pub import_path: Option<PathBuf>,
}

/// What `apply_args` asks the binary to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run,
    ShowHelp,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            book_path: PathBuf::from(DEFAULT_BOOK_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            import_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `CONTACT_BOOK_FILE`: address book location (default `./address.book`)
    /// - `CONTACT_BOOK_LOG`: log filter (default `warn`)
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup("CONTACT_BOOK_FILE") {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: "CONTACT_BOOK_FILE".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            config.book_path = PathBuf::from(path);
        }

        if let Some(level) = lookup("CONTACT_BOOK_LOG") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Overlay command-line flags (without the program name).
    pub fn apply_args<I>(&mut self, args: I) -> ConfigResult<Action>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" | "-f" => {
                    let path = args.next().ok_or_else(|| ConfigError::MissingArgument {
                        flag: arg.clone(),
                        what: "path".to_string(),
                    })?;
                    self.book_path = PathBuf::from(path);
                }
                "--import" => {
                    let path = args.next().ok_or_else(|| ConfigError::MissingArgument {
                        flag: arg.clone(),
                        what: "JSON file path".to_string(),
                    })?;
                    self.import_path = Some(PathBuf::from(path));
                }
                "--help" | "-h" => return Ok(Action::ShowHelp),
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }
        Ok(Action::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.book_path, PathBuf::from("./address.book"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(|var| match var {
            "CONTACT_BOOK_FILE" => Some("/tmp/book.db".into()),
            "CONTACT_BOOK_LOG" => Some("debug".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.book_path, PathBuf::from("/tmp/book.db"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn blank_book_file_is_rejected() {
        let result = Config::from_lookup(|var| (var == "CONTACT_BOOK_FILE").then(|| "  ".into()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn file_flag_overrides_path() {
        let mut config = Config::default();
        let action = config.apply_args(args(&["-f", "other.book"])).unwrap();
        assert_eq!(action, Action::Run);
        assert_eq!(config.book_path, PathBuf::from("other.book"));
    }

    #[test]
    fn import_flag_sets_import_path() {
        let mut config = Config::default();
        config.apply_args(args(&["--import", "contacts.json"])).unwrap();
        assert_eq!(config.import_path, Some(PathBuf::from("contacts.json")));
    }

    #[test]
    fn help_flag_stops_parsing() {
        let mut config = Config::default();
        let action = config.apply_args(args(&["--help", "--bogus"])).unwrap();
        assert_eq!(action, Action::ShowHelp);
    }

    #[test]
    fn missing_flag_value_is_an_error() {
        let mut config = Config::default();
        let result = config.apply_args(args(&["--file"]));
        assert!(matches!(result, Err(ConfigError::MissingArgument { .. })));
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let mut config = Config::default();
        let result = config.apply_args(args(&["--verbose"]));
        assert!(matches!(result, Err(ConfigError::UnknownArgument(_))));
    }
}
