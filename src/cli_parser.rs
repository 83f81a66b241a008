use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{DEFAULT_BATTERY_PATTERN, DEFAULT_DATE_FORMAT, DEFAULT_LOG_FILE};

/// Report how long the machine slept between each suspend and resume
#[derive(Parser, Debug)]
#[command(name = "whensus", version)]
pub struct Cli {
    /// Date format of the timestamp field (chrono strftime syntax)
    #[arg(short, long = "date", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Suspend log to parse
    #[arg(short, long = "file", default_value = DEFAULT_LOG_FILE)]
    pub file: PathBuf,

    /// Length of the date field at the start of each log line
    #[arg(short, long, default_value_t = 29, value_parser = clap::value_parser!(u16).range(1..))]
    pub length: u16,

    /// Output destination
    #[arg(value_enum, short, long, default_value = "console")]
    pub output: Output,

    /// What to report
    #[arg(value_enum, short, long, default_value = "suspend")]
    pub mode: Mode,

    /// Glob pattern locating the battery charge history
    #[arg(short, long = "battery", default_value = DEFAULT_BATTERY_PATTERN)]
    pub battery_pattern: String,

    /// Restrict the combined report to one day (DD.MM.YYYY)
    #[arg(long, value_parser = parse_day)]
    pub day: Option<chrono::NaiveDate>,

    /// Write plot data here instead of stdout
    #[arg(long)]
    pub plot_file: Option<PathBuf>,

    /// Fail when suspend and resume counts differ
    #[arg(long, action)]
    pub strict: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    Console,
    Plot,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Suspend,
    Battery,
    Combined,
}

fn parse_day(s: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(s, "%d.%m.%Y")
        .map_err(|e| format!("expected DD.MM.YYYY: {e}"))
}
