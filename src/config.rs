use std::path::PathBuf;

use crate::cli_parser::Cli;

pub const DEFAULT_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Z %Y";
pub const DEFAULT_LOG_FILE: &str = "/var/log/pm-suspend.log";
pub const DEFAULT_FIELD_LENGTH: usize = 29;
pub const DEFAULT_BATTERY_PATTERN: &str = "/var/lib/upower/history-charge-*.dat";

/// Settings shared by the extractor and the pairer for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub date_format: String,
    /// Number of leading characters of a log line holding the timestamp.
    pub field_length: usize,
    pub log_file: PathBuf,
    pub battery_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            field_length: DEFAULT_FIELD_LENGTH,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            battery_pattern: DEFAULT_BATTERY_PATTERN.to_string(),
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            date_format: cli.date_format.clone(),
            field_length: usize::from(cli.length),
            log_file: cli.file.clone(),
            battery_pattern: cli.battery_pattern.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from(["whensus", "-f", "tests/data/pm-suspend.log", "-l", "28", "-d", "%c"]);
        let config = Config::from_cli(&cli);
        assert_eq!(config.field_length, 28);
        assert_eq!(config.date_format, "%c");
        assert_eq!(config.log_file, PathBuf::from("tests/data/pm-suspend.log"));
        assert_eq!(config.battery_pattern, DEFAULT_BATTERY_PATTERN);
    }

    #[test]
    fn test_default_matches_cli_defaults() {
        let cli = Cli::parse_from(["whensus"]);
        assert_eq!(Config::from_cli(&cli), Config::default());
    }
}
