use std::path::PathBuf;

use chrono::{DateTime, Local};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhensusError {
    // IO / Discovery
    #[error("cannot open {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {target}: {source}")]
    WriteFailed {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("glob pattern error: {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no battery history matches {pattern}")]
    NoBatteryHistory { pattern: String },

    // Parsing
    #[error("line {position}: timestamp '{field}' does not match the date format: {reason}")]
    MalformedTimestamp {
        position: usize,
        field: String,
        reason: String,
    },

    #[error("line {line}: malformed battery record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    // Pairing
    #[error(
        "found {suspends} suspend and {resumes} resume entries, only {paired} could be paired (difference {difference})"
    )]
    SequenceLengthMismatch {
        suspends: usize,
        resumes: usize,
        difference: usize,
        paired: usize,
    },

    #[error("pair {index}: resume at {resume} is earlier than suspend at {suspend}")]
    ResultAmbiguity {
        index: usize,
        suspend: DateTime<Local>,
        resume: DateTime<Local>,
    },
}

impl WhensusError {
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn malformed_record(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WhensusError>;
