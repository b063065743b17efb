//! Per-file outcomes and batch statistics
//!
//! The orchestrator produces one [`FileOutcome`] per input file; the caller
//! owns a [`BatchStats`] and folds every outcome into it.

use crate::Classification;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file had zero bytes
    EmptyFile,
    /// The file could not be parsed as GPX
    ParseError,
    /// The file parsed but contained no tracks
    NoTracks,
    /// A segment never reached the motion threshold
    Parked,
    /// Nothing usable remained after trimming
    Invalid,
    /// The trimmed track was written to `output`
    Processed { output: PathBuf },
}

impl FileOutcome {
    /// Outcome for a classification that produced no output
    ///
    /// Returns `None` for [`Classification::Valid`], which needs an output path.
    pub fn from_rejection(classification: Classification) -> Option<Self> {
        match classification {
            Classification::Parked => Some(Self::Parked),
            Classification::Invalid => Some(Self::Invalid),
            Classification::Valid => None,
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFile => write!(f, "empty file"),
            Self::ParseError => write!(f, "parse error"),
            Self::NoTracks => write!(f, "no tracks"),
            Self::Parked => write!(f, "parked"),
            Self::Invalid => write!(f, "invalid track"),
            Self::Processed { output } => write!(f, "written to {}", output.display()),
        }
    }
}

/// Counters accumulated over a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchStats {
    /// Number of input files seen
    pub total_files: usize,
    /// Files with zero bytes
    pub empty_files: usize,
    /// Files that parsed but had no tracks
    pub no_track_files: usize,
    /// Files that failed to parse
    pub parse_errors: usize,
    /// Files classified as parked
    pub parked_tracks: usize,
    /// Files with nothing usable left after trimming
    pub invalid_tracks: usize,
    /// Files written to the output directory
    pub processed_tracks: usize,
    /// Files whose processing failed with an I/O error
    pub failed: usize,
}

impl BatchStats {
    /// Create empty statistics for a new batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file outcome
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.total_files += 1;
        match outcome {
            FileOutcome::EmptyFile => self.empty_files += 1,
            FileOutcome::ParseError => self.parse_errors += 1,
            FileOutcome::NoTracks => self.no_track_files += 1,
            FileOutcome::Parked => self.parked_tracks += 1,
            FileOutcome::Invalid => self.invalid_tracks += 1,
            FileOutcome::Processed { .. } => self.processed_tracks += 1,
        }
    }

    /// Count one file that could not be processed
    pub fn record_failure(&mut self) {
        self.total_files += 1;
        self.failed += 1;
    }

    /// Files rejected before classification (empty or without tracks)
    #[inline]
    pub fn invalid_files(&self) -> usize {
        self.empty_files + self.no_track_files
    }
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing statistics")?;
        writeln!(f, "  Input files:              {}", self.total_files)?;
        writeln!(f, "  Invalid/empty files:      {}", self.invalid_files())?;
        writeln!(f, "  Parse errors:             {}", self.parse_errors)?;
        writeln!(f, "  Invalid/empty tracks:     {}", self.invalid_tracks)?;
        writeln!(f, "  Parked (never moved):     {}", self.parked_tracks)?;
        write!(f, "  Processed tracks:         {}", self.processed_tracks)?;
        if self.failed > 0 {
            write!(f, "\n  Failed (I/O errors):      {}", self.failed)?;
        }
        Ok(())
    }
}
