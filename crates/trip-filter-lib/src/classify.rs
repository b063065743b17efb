//! Document classification: parked, invalid or valid
//!
//! Trimming and parked detection share one traversal over the document in
//! track-major, then segment-major order. The first segment that never reached
//! the threshold classifies the whole document as parked and ends the scan,
//! even when later tracks would have moved. Documents that survive are then
//! judged on their first track's first segment only.

use crate::trim::{SegmentMotion, trim_segment};
use gpx::Gpx;

/// Outcome of running the trip filter over one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// A segment was found that never reached the motion threshold
    Parked,
    /// Nothing usable remained after trimming
    Invalid,
    /// The trimmed document is ready to be written
    Valid,
}

/// Trim every segment of `gpx` in place and classify the result.
///
/// On [`Classification::Parked`] the document is left partially trimmed and
/// should be discarded. On the other outcomes, tracks whose first segment is
/// empty have been removed.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn classify(gpx: &mut Gpx, threshold_kmh: f64) -> Classification {
    for (track_index, track) in gpx.tracks.iter_mut().enumerate() {
        for (segment_index, segment) in track.segments.iter_mut().enumerate() {
            if trim_segment(segment, threshold_kmh) == SegmentMotion::Stationary {
                tracing::debug!(
                    "Track {} segment {} never reached {} km/h",
                    track_index,
                    segment_index,
                    threshold_kmh
                );
                return Classification::Parked;
            }
        }
    }

    gpx.tracks.retain(|track| {
        track
            .segments
            .first()
            .is_some_and(|segment| !segment.points.is_empty())
    });

    match gpx.tracks.first().and_then(|track| track.segments.first()) {
        Some(segment) if segment.points.len() > 1 => Classification::Valid,
        _ => Classification::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpx::{Track, TrackSegment, Waypoint};
    use time::{Duration, OffsetDateTime};

    /// Kilometres per degree of longitude on the equator
    const KM_PER_DEGREE: f64 = 2.0 * std::f64::consts::PI * 6_378.137 / 360.0;

    fn create_segment_with_speeds(speeds: &[f64]) -> TrackSegment {
        let mut segment = TrackSegment::default();
        let mut lon = 0.0;
        for i in 0..=speeds.len() {
            if i > 0 {
                lon += speeds[i - 1] / KM_PER_DEGREE;
            }
            let mut waypoint = Waypoint::new(geo::Point::new(lon, 0.0));
            waypoint.time = Some((OffsetDateTime::UNIX_EPOCH + Duration::hours(i as i64)).into());
            segment.points.push(waypoint);
        }
        segment
    }

    fn create_track(segments: Vec<TrackSegment>) -> Track {
        let mut track = Track::default();
        track.segments = segments;
        track
    }

    fn create_gpx(tracks: Vec<Track>) -> Gpx {
        let mut gpx = Gpx::default();
        gpx.tracks = tracks;
        gpx
    }

    #[test]
    fn test_stationary_document_is_parked() {
        let mut gpx = create_gpx(vec![create_track(vec![create_segment_with_speeds(&[
            1.0, 2.0, 1.0,
        ])])]);
        assert_eq!(classify(&mut gpx, 3.0), Classification::Parked);
    }

    #[test]
    fn test_trimmed_document_is_valid() {
        let mut gpx = create_gpx(vec![create_track(vec![create_segment_with_speeds(&[
            1.0, 1.0, 10.0, 10.0, 1.0,
        ])])]);

        assert_eq!(classify(&mut gpx, 3.0), Classification::Valid);
        assert_eq!(gpx.tracks[0].segments[0].points.len(), 3);
    }

    #[test]
    fn test_single_point_first_segment_is_invalid() {
        let mut gpx = create_gpx(vec![create_track(vec![create_segment_with_speeds(&[])])]);
        assert_eq!(classify(&mut gpx, 3.0), Classification::Invalid);
        assert_eq!(gpx.tracks[0].segments[0].points.len(), 1);
    }

    #[test]
    fn test_only_first_track_decides_validity() {
        let mut gpx = create_gpx(vec![
            create_track(vec![create_segment_with_speeds(&[])]),
            create_track(vec![create_segment_with_speeds(&[10.0, 10.0])]),
        ]);
        assert_eq!(classify(&mut gpx, 3.0), Classification::Invalid);
    }

    #[test]
    fn test_later_stationary_track_aborts_whole_document() {
        let mut gpx = create_gpx(vec![
            create_track(vec![create_segment_with_speeds(&[1.0, 10.0, 10.0, 1.0])]),
            create_track(vec![create_segment_with_speeds(&[0.5, 0.5])]),
        ]);
        assert_eq!(classify(&mut gpx, 3.0), Classification::Parked);
    }

    #[test]
    fn test_later_stationary_segment_aborts_whole_document() {
        let mut gpx = create_gpx(vec![create_track(vec![
            create_segment_with_speeds(&[10.0, 10.0]),
            create_segment_with_speeds(&[0.0, 0.0, 0.0]),
        ])]);
        assert_eq!(classify(&mut gpx, 3.0), Classification::Parked);
    }

    #[test]
    fn test_stationary_segment_stops_trimming_of_later_tracks() {
        let mut gpx = create_gpx(vec![
            create_track(vec![create_segment_with_speeds(&[1.0, 1.0])]),
            create_track(vec![create_segment_with_speeds(&[1.0, 10.0, 1.0])]),
        ]);

        assert_eq!(classify(&mut gpx, 3.0), Classification::Parked);
        assert_eq!(gpx.tracks[1].segments[0].points.len(), 4);
    }

    #[test]
    fn test_empty_first_tracks_are_dropped() {
        let mut gpx = create_gpx(vec![
            create_track(vec![TrackSegment::default()]),
            create_track(Vec::new()),
            create_track(vec![create_segment_with_speeds(&[10.0, 10.0])]),
        ]);

        assert_eq!(classify(&mut gpx, 3.0), Classification::Valid);
        assert_eq!(gpx.tracks.len(), 1);
        assert_eq!(gpx.tracks[0].segments[0].points.len(), 3);
    }

    #[test]
    fn test_all_tracks_empty_is_invalid() {
        let mut gpx = create_gpx(vec![create_track(vec![TrackSegment::default()])]);
        assert_eq!(classify(&mut gpx, 3.0), Classification::Invalid);
        assert!(gpx.tracks.is_empty());

        let mut no_tracks = Gpx::default();
        assert_eq!(classify(&mut no_tracks, 3.0), Classification::Invalid);
    }

    #[test]
    fn test_every_valid_track_is_kept() {
        let mut gpx = create_gpx(vec![
            create_track(vec![create_segment_with_speeds(&[1.0, 10.0, 1.0])]),
            create_track(vec![create_segment_with_speeds(&[5.0, 5.0, 1.0])]),
        ]);

        assert_eq!(classify(&mut gpx, 3.0), Classification::Valid);
        assert_eq!(gpx.tracks.len(), 2);
        assert_eq!(gpx.tracks[0].segments[0].points.len(), 2);
        assert_eq!(gpx.tracks[1].segments[0].points.len(), 3);
    }
}
