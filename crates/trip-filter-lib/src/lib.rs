//! Trip Filter Library - Trip Extraction for Recorded GPX Tracks
//!
//! This library turns raw GPS recordings, which usually include idle time before and after
//! the actual trip, into trip-only tracks. Stationary stretches are trimmed from the head and
//! tail of every segment, recordings that never moved are rejected as parked, and the
//! surviving tracks are named after their trimmed start time.
//!
//! # Architecture
//!
//! - **[`speed_kmh`]**: Speed between two consecutive points
//! - **[`trim_segment`]**: Head/tail trimming of slow points
//! - **[`classify`]**: Parked / invalid / valid classification of a whole document
//! - **[`FilteredTrack`]**: Output identity and serialization of a valid document
//! - **[`TripFilter`]**: Batch orchestration over a directory of GPX files
//!
//! # Example
//!
//! ```rust
//! use trip_filter_lib::{Classification, classify};
//!
//! let mut gpx = gpx::Gpx::default();
//! // A document without tracks has nothing to emit.
//! assert_eq!(classify(&mut gpx, 3.0), Classification::Invalid);
//! ```

mod classify;
mod collection;
mod output;
mod speed;
mod stats;
mod trim;

// Public API exports
pub use classify::{Classification, classify};
pub use collection::{TripFilter, discover_gpx_files};
pub use output::{FilteredTrack, start_time};
pub use speed::{haversine_distance_m, planar_distance_m, speed_kmh};
pub use stats::{BatchStats, FileOutcome};
pub use trim::{SegmentMotion, TrimRange, trim_range, trim_segment};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default motion threshold in km/h
pub const DEFAULT_SPEED_THRESHOLD_KMH: f64 = 3.0;

/// Configuration for trip filtering
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Speed in km/h below which movement between two points counts as stationary.
    /// Default: 3.0
    pub speed_threshold_kmh: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed_threshold_kmh: DEFAULT_SPEED_THRESHOLD_KMH,
        }
    }
}

impl Config {
    /// Create a validated configuration
    pub fn new(speed_threshold_kmh: f64) -> Result<Self> {
        if !speed_threshold_kmh.is_finite() || speed_threshold_kmh < 0.0 {
            return Err(DataError::InvalidConfig(format!(
                "speed threshold must be a finite, non-negative km/h value (got {speed_threshold_kmh})"
            )));
        }
        Ok(Self {
            speed_threshold_kmh,
        })
    }
}

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Input directory not found: {}", .0.display())]
    InputNotFound(std::path::PathBuf),

    #[error("Document has no timestamped first point to derive an output name from")]
    MissingStartTime,

    #[error("Time formatting error: {0}")]
    TimeFormat(#[from] time::error::Format),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;
