//! Two-series time data for gnuplot.
//!
//! Series 0 holds the hours slept per suspend instant, series 1 the battery
//! charge per sample. Blocks are separated by two blank lines so that
//! `plot 'f' index 0 using 1:2, '' index 1 using 1:2` draws both.

use std::io::{self, Write};

use crate::battery::BatteryRecord;
use crate::suspend::DurationRecord;

fn write_block<W, I>(w: &mut W, title: &str, points: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (i64, f64)>,
{
    writeln!(w, "# {title}")?;
    for (epoch, value) in points {
        writeln!(w, "{epoch}\t{value:.3}")?;
    }
    Ok(())
}

pub fn write_series<W: Write>(
    w: &mut W,
    durations: &[&DurationRecord],
    battery: &[&BatteryRecord],
) -> io::Result<()> {
    write_block(
        w,
        "sleep hours",
        durations
            .iter()
            .map(|r| (r.suspend.timestamp(), r.duration.num_seconds() as f64 / 3600.0)),
    )?;
    write!(w, "\n\n")?;
    write_block(
        w,
        "battery percentage",
        battery
            .iter()
            .filter_map(|b| b.percentage_value().map(|p| (b.instant.timestamp(), p))),
    )
}
