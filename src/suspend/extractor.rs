use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, WhensusError};

pub const SUSPEND_MARKER: &str = "Running hooks for suspend";
pub const RESUME_MARKER: &str = "Running hooks for resume";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Suspend,
    Resume,
}

impl Marker {
    pub fn text(self) -> &'static str {
        match self {
            Marker::Suspend => SUSPEND_MARKER,
            Marker::Resume => RESUME_MARKER,
        }
    }

    pub fn matches(self, line: &str) -> bool {
        line.contains(self.text())
    }
}

/// Leading slice of a matching log line, expected to hold its timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTimestampField {
    /// 1-based line number in the log
    pub position: usize,
    pub text: String,
}

impl RawTimestampField {
    fn from_line(position: usize, line: &str, field_length: usize) -> Self {
        let end = line
            .char_indices()
            .nth(field_length)
            .map_or(line.len(), |(i, _)| i);
        RawTimestampField {
            position,
            text: line[..end].to_string(),
        }
    }
}

pub fn open_source(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| WhensusError::source_unavailable(path, e))
}

/// Lazy single pass over a reader, yielding the field of every line carrying `marker`.
pub struct TimestampFields<R> {
    lines: Lines<R>,
    marker: Marker,
    field_length: usize,
    line_number: usize,
}

impl<R: BufRead> TimestampFields<R> {
    pub fn new(reader: R, marker: Marker, field_length: usize) -> Self {
        TimestampFields {
            lines: reader.lines(),
            marker,
            field_length,
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for TimestampFields<R> {
    type Item = io::Result<RawTimestampField>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_number += 1;
            if self.marker.matches(&line) {
                return Some(Ok(RawTimestampField::from_line(
                    self.line_number,
                    &line,
                    self.field_length,
                )));
            }
        }
    }
}

/// Suspend and resume fields of one log, each in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SuspendLog {
    pub suspends: Vec<RawTimestampField>,
    pub resumes: Vec<RawTimestampField>,
}

impl SuspendLog {
    pub fn scan<R: BufRead>(reader: R, config: &Config) -> io::Result<Self> {
        let mut log = SuspendLog::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            // a line may carry both markers
            for (marker, target) in [
                (Marker::Suspend, &mut log.suspends),
                (Marker::Resume, &mut log.resumes),
            ] {
                if marker.matches(&line) {
                    target.push(RawTimestampField::from_line(index + 1, &line, config.field_length));
                }
            }
        }
        Ok(log)
    }

    pub fn read(path: &Path, config: &Config) -> Result<Self> {
        let reader = open_source(path)?;
        let log = Self::scan(reader, config).map_err(|e| WhensusError::read_failed(path, e))?;
        debug!(
            path = %path.display(),
            suspends = log.suspends.len(),
            resumes = log.resumes.len(),
            "scanned suspend log"
        );
        Ok(log)
    }
}
