use std::io::{self, Write};

use crate::battery::BatteryRecord;
use crate::suspend::{format_elapsed, DurationRecord, Pairing};

use super::correlate::Correlated;

fn write_duration_rows<W: Write>(w: &mut W, records: &[&DurationRecord]) -> io::Result<()> {
    writeln!(
        w,
        "{:5}\t{:30}\t{:30}\t{:10}",
        "Index", "Suspend time", "Resume time", "Duration"
    )?;
    for record in records {
        writeln!(
            w,
            "{:5}\t{:30}\t{:30}\t{:10}",
            record.index,
            DurationRecord::calendar_form(&record.suspend),
            DurationRecord::calendar_form(&record.resume),
            format_elapsed(&record.duration)
        )?;
    }
    Ok(())
}

fn write_battery_rows<W: Write>(w: &mut W, records: &[&BatteryRecord]) -> io::Result<()> {
    writeln!(w, "{:5}\t{:30}\t{:10}\t{:15}", "Index", "Time", "Percentage", "State")?;
    for (index, record) in records.iter().enumerate() {
        writeln!(
            w,
            "{:5}\t{:30}\t{:10}\t{:15}",
            index,
            DurationRecord::calendar_form(&record.instant),
            record.percentage,
            record.state
        )?;
    }
    Ok(())
}

pub fn write_pairing<W: Write>(w: &mut W, pairing: &Pairing) -> io::Result<()> {
    let records: Vec<&DurationRecord> = pairing.records.iter().collect();
    write_duration_rows(w, &records)?;
    writeln!(w, "Total sleep: {}", format_elapsed(&pairing.total_sleep()))
}

pub fn write_battery<W: Write>(w: &mut W, records: &[BatteryRecord]) -> io::Result<()> {
    let records: Vec<&BatteryRecord> = records.iter().collect();
    write_battery_rows(w, &records)
}

pub fn write_correlated<W: Write>(w: &mut W, joined: &Correlated) -> io::Result<()> {
    write_duration_rows(w, &joined.durations)?;
    writeln!(w)?;
    write_battery_rows(w, &joined.battery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};

    fn record() -> DurationRecord {
        let suspend = Local.with_ymd_and_hms(2015, 10, 5, 22, 11, 3).earliest().unwrap();
        let resume = Local.with_ymd_and_hms(2015, 10, 6, 7, 30, 12).earliest().unwrap();
        DurationRecord {
            index: 0,
            suspend,
            resume,
            duration: resume - suspend,
        }
    }

    #[test]
    fn test_write_pairing() {
        let pairing = Pairing {
            records: vec![record()],
            mismatch: None,
        };
        let mut out = Vec::new();
        write_pairing(&mut out, &pairing).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Index"));
        assert!(lines[1].contains("05.10.2015 22:11:03"));
        assert!(lines[1].contains("06.10.2015 07:30:12"));
        assert!(lines[1].contains("9:19:09"));
        assert_eq!(lines[2], "Total sleep: 9:19:09");
        assert_eq!(pairing.total_sleep(), Duration::seconds(33_549));
    }

    #[test]
    fn test_write_battery() {
        let records = vec![BatteryRecord {
            instant: Local.with_ymd_and_hms(2015, 10, 6, 9, 0, 0).earliest().unwrap(),
            percentage: "75.000".to_string(),
            state: "charging".to_string(),
        }];
        let mut out = Vec::new();
        write_battery(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().next().unwrap().contains("Percentage"));
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("06.10.2015 09:00:00"));
        assert!(row.contains("75.000"));
        assert!(row.contains("charging"));
    }
}
