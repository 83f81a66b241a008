use std::path::PathBuf;

use chrono::{DateTime, Local};
use glob::glob;
use tracing::warn;

use crate::error::{Result, WhensusError};

pub mod history;

pub use history::read_history;

#[derive(Debug, Clone, PartialEq)]
pub struct BatteryRecord {
    pub instant: DateTime<Local>,
    /// Charge level as written in the history file, e.g. `87.000`
    pub percentage: String,
    pub state: String,
}

impl BatteryRecord {
    pub fn percentage_value(&self) -> Option<f64> {
        self.percentage.parse().ok()
    }
}

/// First file matching `pattern`, in sorted order.
///
/// Only one history file is read per run; extra matches are logged and ignored.
pub fn locate_history(pattern: &str) -> Result<PathBuf> {
    let matches = glob(pattern).map_err(|source| WhensusError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = matches.filter_map(|entry| entry.ok()).collect();
    paths.sort();

    if paths.len() > 1 {
        warn!(
            pattern,
            matches = paths.len(),
            using = %paths[0].display(),
            "several battery histories found, reading only the first"
        );
    }
    paths
        .into_iter()
        .next()
        .ok_or_else(|| WhensusError::NoBatteryHistory {
            pattern: pattern.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_locate_history() {
        let path = locate_history("tests/data/history-charge-*.dat").unwrap();
        assert_eq!(path, Path::new("tests/data/history-charge-test.dat"));
    }

    #[test]
    fn test_locate_first_of_many() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["history-charge-b.dat", "history-charge-a.dat"] {
            fs::write(dir.path().join(name), "1700000000 87 charging\n").unwrap();
        }
        let pattern = dir.path().join("history-charge-*.dat");
        let path = locate_history(pattern.to_str().unwrap()).unwrap();
        assert_eq!(path, dir.path().join("history-charge-a.dat"));
    }

    #[test]
    fn test_locate_nothing() {
        let err = locate_history("tests/data/history-rate-*.dat").unwrap_err();
        assert!(matches!(err, WhensusError::NoBatteryHistory { .. }));
        let err = locate_history("tests/data/[").unwrap_err();
        assert!(matches!(err, WhensusError::InvalidPattern { .. }));
    }
}
