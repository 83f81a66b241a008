use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::extractor::{RawTimestampField, SuspendLog};
use crate::config::Config;
use crate::error::{Result, WhensusError};

pub const CALENDAR_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Whether `format` holds a `%z`-family specifier (`%z`, `%:z`, `%::z`, `%:::z`, `%#z`).
/// An escaped `%%z` is a literal.
fn has_offset_specifier(format: &str) -> bool {
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        while let Some(':' | '#') = chars.peek() {
            chars.next();
        }
        if chars.next() == Some('z') {
            return true;
        }
    }
    false
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationRecord {
    pub index: usize,
    pub suspend: DateTime<Local>,
    pub resume: DateTime<Local>,
    pub duration: Duration,
}

impl DurationRecord {
    pub fn calendar_form(instant: &DateTime<Local>) -> String {
        instant.format(CALENDAR_FORMAT).to_string()
    }
}

/// Suspend and resume counts disagreed; pairing stopped at the shorter one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub suspends: usize,
    pub resumes: usize,
    pub difference: usize,
    pub paired: usize,
}

impl From<LengthMismatch> for WhensusError {
    fn from(m: LengthMismatch) -> Self {
        WhensusError::SequenceLengthMismatch {
            suspends: m.suspends,
            resumes: m.resumes,
            difference: m.difference,
            paired: m.paired,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub records: Vec<DurationRecord>,
    pub mismatch: Option<LengthMismatch>,
}

impl Pairing {
    /// Records only when every suspend found its resume.
    pub fn into_strict(self) -> Result<Vec<DurationRecord>> {
        match self.mismatch {
            Some(m) => Err(m.into()),
            None => Ok(self.records),
        }
    }

    pub fn total_sleep(&self) -> Duration {
        self.records
            .iter()
            .fold(Duration::zero(), |acc, r| acc + r.duration)
    }
}

/// Parse `field` strictly against `format`.
///
/// Formats without an offset specifier are read as local wall-clock time.
pub fn parse_instant(field: &RawTimestampField, format: &str) -> Result<DateTime<Local>> {
    let malformed = |reason: String| WhensusError::MalformedTimestamp {
        position: field.position,
        field: field.text.clone(),
        reason,
    };

    if has_offset_specifier(format) {
        return DateTime::parse_from_str(&field.text, format)
            .map(|dt| dt.with_timezone(&Local))
            .map_err(|e| malformed(e.to_string()));
    }

    let naive =
        NaiveDateTime::parse_from_str(&field.text, format).map_err(|e| malformed(e.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| malformed("no such local time".to_string()))
}

/// Renders like `9:19:09`, or `1 day, 2:03:04` past a day.
pub fn format_elapsed(duration: &Duration) -> String {
    let total = duration.num_seconds();
    let (sign, total) = if total < 0 { ("-", -total) } else { ("", total) };
    let days = total / 86_400;
    let rest = total % 86_400;
    let clock = format!("{}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60);
    match days {
        0 => format!("{sign}{clock}"),
        1 => format!("{sign}1 day, {clock}"),
        n => format!("{sign}{n} days, {clock}"),
    }
}

pub struct Pairer<'a> {
    config: &'a Config,
}

impl<'a> Pairer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Pairer { config }
    }

    fn parse_all(&self, fields: &[RawTimestampField]) -> Result<Vec<DateTime<Local>>> {
        let parsed: Vec<_> = fields
            .par_iter()
            .map(|field| parse_instant(field, &self.config.date_format))
            .collect();
        parsed.into_iter().collect()
    }

    pub fn pair(&self, log: &SuspendLog) -> Result<Pairing> {
        let suspends = self.parse_all(&log.suspends)?;
        let resumes = self.parse_all(&log.resumes)?;

        let mut records = Vec::with_capacity(suspends.len().min(resumes.len()));
        for (index, (suspend, resume)) in suspends.into_iter().zip(resumes).enumerate() {
            let duration = resume - suspend;
            if duration < Duration::zero() {
                return Err(WhensusError::ResultAmbiguity {
                    index,
                    suspend,
                    resume,
                });
            }
            records.push(DurationRecord {
                index,
                suspend,
                resume,
                duration,
            });
        }

        let mismatch = (log.suspends.len() != log.resumes.len()).then(|| LengthMismatch {
            suspends: log.suspends.len(),
            resumes: log.resumes.len(),
            difference: log.suspends.len().abs_diff(log.resumes.len()),
            paired: records.len(),
        });
        if let Some(m) = &mismatch {
            warn!(
                suspends = m.suspends,
                resumes = m.resumes,
                paired = m.paired,
                "suspend and resume counts differ, pairing truncated"
            );
        }
        debug!(records = records.len(), "paired suspend log");

        Ok(Pairing { records, mismatch })
    }
}
