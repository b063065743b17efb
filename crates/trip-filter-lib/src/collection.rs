//! TripFilter - Batch orchestration over directories of GPX files
//!
//! This module discovers input files, runs every file through parsing,
//! trimming and classification, writes the valid ones, and folds the per-file
//! outcomes into [`BatchStats`]. Files are processed one at a time.

use crate::{
    BatchStats, Classification, Config, DataError, FileOutcome, FilteredTrack, Result, classify,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const GPX_SUFFIX: &str = ".gpx";

/// Recursively find all `*.gpx` files under `root`, sorted by path.
///
/// Entries that cannot be read are skipped with a warning.
pub fn discover_gpx_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(GPX_SUFFIX))
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Runs the trip filter over single files or whole directories
#[derive(Debug, Clone, Default)]
pub struct TripFilter {
    /// Configuration settings
    config: Config,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TripFilter {
    /// Create a new filter with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Filter one GPX file, writing the trimmed track into `output_dir` when valid.
    ///
    /// Rejections are reported as [`FileOutcome`] values; only I/O failures are errors.
    pub fn process_file(&self, path: &Path, output_dir: &Path) -> Result<FileOutcome> {
        #[cfg(feature = "profiling")]
        profiling::scope!("trip_filter::process_file");

        if std::fs::metadata(path)?.len() == 0 {
            return Ok(FileOutcome::EmptyFile);
        }

        let reader = BufReader::new(File::open(path)?);
        let mut gpx = match gpx::read(reader) {
            Ok(gpx) => gpx,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                return Ok(FileOutcome::ParseError);
            }
        };

        if gpx.tracks.is_empty() {
            return Ok(FileOutcome::NoTracks);
        }

        let classification = classify(&mut gpx, self.config.speed_threshold_kmh);
        if let Some(outcome) = FileOutcome::from_rejection(classification) {
            return Ok(outcome);
        }
        debug_assert_eq!(classification, Classification::Valid);

        let filtered = match FilteredTrack::build(gpx) {
            Ok(filtered) => filtered,
            Err(DataError::MissingStartTime) => {
                tracing::warn!(
                    "{} has no start time after trimming, skipping",
                    path.display()
                );
                return Ok(FileOutcome::Invalid);
            }
            Err(e) => return Err(e),
        };

        let output = filtered.write_to_dir(output_dir)?;
        Ok(FileOutcome::Processed { output })
    }

    /// Filter every GPX file under `input_dir` into `output_dir`.
    ///
    /// The output directory is created if needed. A file failing with an I/O
    /// error is logged and counted, and the batch moves on.
    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchStats> {
        #[cfg(feature = "profiling")]
        profiling::scope!("trip_filter::process_directory");

        if !input_dir.is_dir() {
            return Err(DataError::InputNotFound(input_dir.to_path_buf()));
        }
        std::fs::create_dir_all(output_dir)?;

        let files = discover_gpx_files(input_dir);
        tracing::info!(
            "Processing {} GPX files from {} (threshold {} km/h)",
            files.len(),
            input_dir.display(),
            self.config.speed_threshold_kmh
        );

        let mut stats = BatchStats::new();
        let total = files.len();
        for (index, path) in files.iter().enumerate() {
            match self.process_file(path, output_dir) {
                Ok(outcome) => {
                    tracing::info!("[{}/{}] {}: {}", index + 1, total, path.display(), outcome);
                    stats.record(&outcome);
                }
                Err(e) => {
                    tracing::error!("[{}/{}] {}: {}", index + 1, total, path.display(), e);
                    stats.record_failure();
                }
            }
        }

        Ok(stats)
    }
}
