use clap::Parser;
use std::path::PathBuf;
use trip_filter_lib::{Config, DEFAULT_SPEED_THRESHOLD_KMH};

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Trip Filter - Trims idle time from recorded GPX tracks and drops recordings that never moved
pub struct Settings {
    /// Directory searched recursively for *.gpx input files
    #[clap(short, long, value_name = "DIR", default_value = "./IMPORT")]
    pub input_dir: PathBuf,

    /// Directory the trimmed tracks are written to (created if missing)
    #[clap(short, long, value_name = "DIR", default_value = "./processed")]
    pub output_dir: PathBuf,

    /// Speed in km/h below which the recorder counts as stationary
    #[clap(short, long, env = "TRIP_FILTER_THRESHOLD", default_value_t = DEFAULT_SPEED_THRESHOLD_KMH)]
    pub threshold: f64,

    /// Also write the batch statistics as JSON to this file
    #[clap(long, value_name = "FILE")]
    pub stats_json: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Validated library configuration
    pub fn config(&self) -> trip_filter_lib::Result<Config> {
        Config::new(self.threshold)
    }
}
