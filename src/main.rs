use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use battery::{locate_history, read_history, BatteryRecord};
use cli_parser::{Cli, Mode, Output};
use config::Config;
use error::{Result, WhensusError};
use report::{console, correlate, plot};
use suspend::{Pairer, Pairing, SuspendLog};

pub mod battery;
pub mod cli_parser;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod suspend;

fn main() -> ExitCode {
    let args = Cli::parse();
    logging::init_logging(args.verbose);

    let config = Config::from_cli(&args);
    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli, config: &Config) -> Result<()> {
    match args.mode {
        Mode::Suspend => {
            let pairing = load_pairing(config, args.strict)?;
            match args.output {
                Output::Console => emit(None, |w| console::write_pairing(w, &pairing)),
                Output::Plot => {
                    let durations: Vec<_> = pairing.records.iter().collect();
                    emit(args.plot_file.as_deref(), |w| {
                        plot::write_series(w, &durations, &[])
                    })
                }
            }
        }
        Mode::Battery => {
            let records = load_battery(config)?;
            match args.output {
                Output::Console => emit(None, |w| console::write_battery(w, &records)),
                Output::Plot => {
                    let samples: Vec<_> = records.iter().collect();
                    emit(args.plot_file.as_deref(), |w| plot::write_series(w, &[], &samples))
                }
            }
        }
        Mode::Combined => {
            let pairing = load_pairing(config, args.strict)?;
            let records = load_battery(config)?;
            let joined = correlate(&pairing.records, &records, args.day);
            info!(
                durations = joined.durations.len(),
                samples = joined.battery.len(),
                "correlated by date"
            );
            match args.output {
                Output::Console => emit(None, |w| console::write_correlated(w, &joined)),
                Output::Plot => emit(args.plot_file.as_deref(), |w| {
                    plot::write_series(w, &joined.durations, &joined.battery)
                }),
            }
        }
    }
}

fn load_pairing(config: &Config, strict: bool) -> Result<Pairing> {
    let log = SuspendLog::read(&config.log_file, config)?;
    let pairing = Pairer::new(config).pair(&log)?;

    // the pairer has already logged the mismatch
    match pairing.mismatch {
        Some(mismatch) if strict => Err(mismatch.into()),
        _ => Ok(pairing),
    }
}

fn load_battery(config: &Config) -> Result<Vec<BatteryRecord>> {
    let path = locate_history(&config.battery_pattern)?;
    info!(path = %path.display(), "reading battery history");
    read_history(&path)
}

/// Run `write` against `destination`, or stdout when none is given.
fn emit<F>(destination: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(&mut Box<dyn Write>) -> io::Result<()>,
{
    let target = destination.map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    let failed = |source| WhensusError::WriteFailed {
        target: target.clone(),
        source,
    };

    let mut out: Box<dyn Write> = match destination {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(failed)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write(&mut out).map_err(failed)?;
    out.flush().map_err(failed)
}
