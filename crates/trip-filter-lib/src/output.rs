//! Output identity and serialization of filtered tracks
//!
//! A valid document is named after the timestamp of its first retained point,
//! converted to UTC and formatted as `YYYYMMDD_HHMMSS`. `gpx::read` already
//! normalizes timestamps to UTC, so names never depend on the offset written in
//! the source file. Only the name is derived from the first point; the whole
//! trimmed document is written.

use crate::{DataError, Result};
use gpx::{Gpx, GpxVersion};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use time::{OffsetDateTime, UtcOffset};
use time::macros::format_description;

const OUTPUT_EXTENSION: &str = "gpx";

/// Written into documents that carry no `creator` of their own
const CREATOR: &str = concat!("trip-filter ", env!("CARGO_PKG_VERSION"));

/// A trimmed, valid document together with its output key
#[derive(Clone, Debug)]
pub struct FilteredTrack {
    key: String,
    gpx: Gpx,
}

/// Timestamp of the first point of the first segment of the first track.
///
/// Returns `None` if any of those is missing.
pub fn start_time(gpx: &Gpx) -> Option<OffsetDateTime> {
    gpx.tracks
        .first()?
        .segments
        .first()?
        .points
        .first()?
        .time
        .clone()
        .map(OffsetDateTime::from)
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl FilteredTrack {
    /// Derive the output key of a classified-valid document
    pub fn build(gpx: Gpx) -> Result<Self> {
        let start = start_time(&gpx)
            .ok_or(DataError::MissingStartTime)?
            .to_offset(UtcOffset::UTC);
        let key = start.format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))?;
        Ok(Self { key, gpx })
    }

    /// Output key, e.g. `20240501_073015`
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Output file name, e.g. `20240501_073015.gpx`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.key, OUTPUT_EXTENSION)
    }

    /// Access the trimmed document
    #[inline]
    pub fn gpx(&self) -> &Gpx {
        &self.gpx
    }

    /// Split into key and document
    pub fn into_parts(self) -> (String, Gpx) {
        (self.key, self.gpx)
    }

    /// Serialize as GPX 1.1 into `dir`, replacing any file with the same name.
    ///
    /// Returns the path of the written file.
    pub fn write_to_dir(self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        if path.exists() {
            tracing::warn!("Overwriting existing output {}", path.display());
        }

        let mut gpx = self.gpx;
        gpx.version = GpxVersion::Gpx11;
        gpx.creator.get_or_insert_with(|| CREATOR.to_string());

        let writer = BufWriter::new(File::create(&path)?);
        gpx::write(&gpx, writer)?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpx::{Track, TrackSegment, Waypoint};
    use time::macros::datetime;

    fn create_test_waypoint(lat: f64, lon: f64, time: Option<OffsetDateTime>) -> Waypoint {
        let mut waypoint = Waypoint::new(geo::Point::new(lon, lat));
        waypoint.time = time.map(Into::into);
        waypoint
    }

    fn create_test_gpx(first_time: Option<OffsetDateTime>) -> Gpx {
        let mut gpx = Gpx::default();
        let mut track = Track::default();
        let mut segment = TrackSegment::default();

        segment
            .points
            .push(create_test_waypoint(51.5074, -0.1278, first_time));
        segment.points.push(create_test_waypoint(
            51.5174,
            -0.1178,
            Some(datetime!(2024-05-01 08:00:00 UTC)),
        ));

        track.segments.push(segment);
        gpx.tracks.push(track);
        gpx
    }

    #[test]
    fn test_key_from_first_point() {
        let gpx = create_test_gpx(Some(datetime!(2024-05-01 07:30:15 UTC)));
        let filtered = FilteredTrack::build(gpx).unwrap();

        assert_eq!(filtered.key(), "20240501_073015");
        assert_eq!(filtered.file_name(), "20240501_073015.gpx");
    }

    #[test]
    fn test_key_is_in_utc() {
        let gpx = create_test_gpx(Some(datetime!(2024-01-01 01:59:59 +02:00)));
        let filtered = FilteredTrack::build(gpx).unwrap();
        assert_eq!(filtered.key(), "20231231_235959");
    }

    #[test]
    fn test_key_is_deterministic() {
        let gpx = create_test_gpx(Some(datetime!(2024-05-01 07:30:15 UTC)));
        let first = FilteredTrack::build(gpx.clone()).unwrap();
        let second = FilteredTrack::build(gpx).unwrap();
        assert_eq!(first.key(), second.key());
    }

    #[test]
    fn test_missing_start_time_fails_closed() {
        let untimed = create_test_gpx(None);
        assert!(matches!(
            FilteredTrack::build(untimed),
            Err(DataError::MissingStartTime)
        ));

        assert!(matches!(
            FilteredTrack::build(Gpx::default()),
            Err(DataError::MissingStartTime)
        ));

        let mut no_points = Gpx::default();
        no_points.tracks.push(Track::default());
        assert!(start_time(&no_points).is_none());
    }

    #[test]
    fn test_whole_document_is_kept() {
        let mut gpx = create_test_gpx(Some(datetime!(2024-05-01 07:30:15 UTC)));
        gpx.tracks.push(gpx.tracks[0].clone());

        let filtered = FilteredTrack::build(gpx).unwrap();
        assert_eq!(filtered.gpx().tracks.len(), 2);

        let (key, gpx) = filtered.into_parts();
        assert_eq!(key, "20240501_073015");
        assert_eq!(gpx.tracks.len(), 2);
    }

    #[test]
    fn test_write_to_dir_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let gpx = create_test_gpx(Some(datetime!(2024-05-01 07:30:15 UTC)));

        let path = FilteredTrack::build(gpx).unwrap().write_to_dir(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("20240501_073015.gpx"));

        let reader = std::io::BufReader::new(File::open(&path).unwrap());
        let written = gpx::read(reader).unwrap();
        assert_eq!(written.tracks.len(), 1);
        assert_eq!(written.tracks[0].segments[0].points.len(), 2);
        assert_eq!(
            start_time(&written),
            Some(datetime!(2024-05-01 07:30:15 UTC))
        );
    }
}
