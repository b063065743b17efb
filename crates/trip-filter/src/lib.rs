//! Trip Filter - Command-line batch application
//!
//! Walks an input directory of raw GPX recordings, trims idle time from every
//! track, drops recordings that never moved, and writes each remaining trip
//! into the output directory named after its start time.

mod logging;
mod metadata;
mod settings;

pub use metadata::short_version_info;
pub use settings::Settings;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use trip_filter_lib::{BatchStats, DataError, TripFilter};

/// Errors that abort a batch run
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Failed to write statistics to {}: {source}", path.display())]
    StatsExport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize statistics: {0}")]
    StatsSerialize(#[from] serde_json::Error),
}

/// Run one batch with the given settings and return its statistics
pub fn run(settings: &Settings) -> Result<BatchStats, CliError> {
    let config = settings.config()?;
    let filter = TripFilter::new(config);
    let stats = filter.process_directory(&settings.input_dir, &settings.output_dir)?;

    if let Some(path) = &settings.stats_json {
        let file = File::create(path).map_err(|source| CliError::StatsExport {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &stats)?;
        tracing::info!("Statistics written to {}", path.display());
    }

    Ok(stats)
}

/// Native entry point: parse the command line, run the batch, print the report.
pub fn run_native() -> ExitCode {
    logging::setup_logging();
    metadata::log_version_info();

    let settings = Settings::from_cli();
    match run(&settings) {
        Ok(stats) => {
            println!("\n{stats}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
