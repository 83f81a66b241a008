use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::battery::BatteryRecord;
use crate::suspend::DurationRecord;

#[derive(Debug, Default)]
pub struct Correlated<'a> {
    pub durations: Vec<&'a DurationRecord>,
    pub battery: Vec<&'a BatteryRecord>,
}

/// Join sleep periods with battery samples taken on the same calendar day.
///
/// A duration is kept when its suspend or resume day has battery samples.
/// With `day` set, both sides are limited to that day.
pub fn correlate<'a>(
    durations: &'a [DurationRecord],
    battery: &'a [BatteryRecord],
    day: Option<NaiveDate>,
) -> Correlated<'a> {
    let on_day = |date: NaiveDate| day.map_or(true, |d| d == date);

    let battery: Vec<&BatteryRecord> = battery
        .iter()
        .filter(|b| on_day(b.instant.date_naive()))
        .collect();
    let battery_days: BTreeSet<NaiveDate> = battery.iter().map(|b| b.instant.date_naive()).collect();

    let durations = durations
        .iter()
        .filter(|r| {
            [r.suspend.date_naive(), r.resume.date_naive()]
                .into_iter()
                .any(|date| on_day(date) && battery_days.contains(&date))
        })
        .collect();

    Correlated { durations, battery }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};

    fn local(d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2015, 10, d, h, 0, 0).earliest().unwrap()
    }

    fn duration(index: usize, from: (u32, u32), to: (u32, u32)) -> DurationRecord {
        let suspend = local(from.0, from.1);
        let resume = local(to.0, to.1);
        DurationRecord {
            index,
            suspend,
            resume,
            duration: resume - suspend,
        }
    }

    fn sample(d: u32, h: u32, percentage: &str) -> BatteryRecord {
        BatteryRecord {
            instant: local(d, h),
            percentage: percentage.to_string(),
            state: "discharging".to_string(),
        }
    }

    #[test]
    fn test_correlate_by_date() {
        let durations = vec![
            duration(0, (4, 22), (5, 7)),
            duration(1, (5, 22), (6, 7)),
            duration(2, (8, 12), (8, 13)),
        ];
        let battery = vec![sample(6, 9, "60"), sample(6, 18, "40")];

        let joined = correlate(&durations, &battery, None);
        assert_eq!(joined.durations.len(), 1);
        assert_eq!(joined.durations[0].index, 1);
        assert_eq!(joined.battery.len(), 2);
    }

    #[test]
    fn test_correlate_target_day() {
        let durations = vec![duration(0, (5, 22), (6, 7)), duration(1, (6, 12), (6, 13))];
        let battery = vec![sample(5, 20, "80"), sample(6, 9, "60")];

        let day = NaiveDate::from_ymd_opt(2015, 10, 5);
        let joined = correlate(&durations, &battery, day);
        assert_eq!(joined.battery.len(), 1);
        assert_eq!(joined.battery[0].percentage, "80");
        assert_eq!(joined.durations.len(), 1);
        assert_eq!(joined.durations[0].index, 0);

        let joined = correlate(&durations, &battery, NaiveDate::from_ymd_opt(2015, 10, 9));
        assert!(joined.durations.is_empty());
        assert!(joined.battery.is_empty());
    }
}
