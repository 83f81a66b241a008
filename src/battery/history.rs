use std::io::{BufRead, Lines};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use super::BatteryRecord;
use crate::error::{Result, WhensusError};
use crate::suspend::extractor::open_source;

const FIELDS_PER_LINE: usize = 3;

/// Lazy reader over a whitespace-delimited charge history
/// (`<epoch seconds> <percentage> <state>` per line).
pub struct BatteryRecords<R> {
    lines: Lines<R>,
    source: PathBuf,
    line_number: usize,
}

impl<R: BufRead> BatteryRecords<R> {
    pub fn new(reader: R, source: impl Into<PathBuf>) -> Self {
        BatteryRecords {
            lines: reader.lines(),
            source: source.into(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for BatteryRecords<R> {
    type Item = Result<BatteryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(WhensusError::read_failed(&self.source, e))),
        };
        self.line_number += 1;
        Some(parse_record(self.line_number, &line))
    }
}

fn parse_record(line_number: usize, line: &str) -> Result<BatteryRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [epoch, percentage, state] = fields.as_slice() else {
        return Err(WhensusError::malformed_record(
            line_number,
            format!("expected {FIELDS_PER_LINE} fields, found {}", fields.len()),
        ));
    };

    let seconds: i64 = epoch.parse().map_err(|_| {
        WhensusError::malformed_record(line_number, format!("'{epoch}' is not an epoch timestamp"))
    })?;
    let instant: DateTime<Local> = Local.timestamp_opt(seconds, 0).single().ok_or_else(|| {
        WhensusError::malformed_record(line_number, format!("epoch {seconds} is out of range"))
    })?;

    Ok(BatteryRecord {
        instant,
        percentage: percentage.to_string(),
        state: state.to_string(),
    })
}

pub fn read_history(path: &Path) -> Result<Vec<BatteryRecord>> {
    let reader = open_source(path)?;
    let records = BatteryRecords::new(reader, path).collect::<Result<Vec<_>>>()?;
    debug!(path = %path.display(), records = records.len(), "read battery history");
    Ok(records)
}
