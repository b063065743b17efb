//! Head and tail trimming of stationary points
//!
//! Trimming removes points from both ends of a segment for as long as the
//! speed between the two outermost points stays below the motion threshold.
//! The retained range is computed with one forward and one backward scan and
//! applied with a single truncate/drain, so the cost is linear in the number
//! of points.

use crate::speed::speed_kmh;
use gpx::{TrackSegment, Waypoint};
use std::ops::Range;

/// What the head scan observed while trimming a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMotion {
    /// At least one consecutive pair reached the threshold
    Moving,
    /// Two or more points, and no consecutive pair reached the threshold
    Stationary,
    /// Fewer than two points, so no speed can be measured
    TooShort,
}

/// Retained point range of a segment after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimRange {
    /// Indices of the points to keep
    pub keep: Range<usize>,
    /// Motion observed by the head scan
    pub motion: SegmentMotion,
}

/// Compute which points of `points` survive trimming at `threshold_kmh`.
///
/// The range always holds at least one point unless `points` is empty.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn trim_range(points: &[Waypoint], threshold_kmh: f64) -> TrimRange {
    let len = points.len();
    if len < 2 {
        return TrimRange {
            keep: 0..len,
            motion: SegmentMotion::TooShort,
        };
    }

    let mut start = 0;
    while len - start > 1 && speed_kmh(&points[start], &points[start + 1]) < threshold_kmh {
        start += 1;
    }

    let mut end = len;
    while end - start > 1 && speed_kmh(&points[end - 2], &points[end - 1]) < threshold_kmh {
        end -= 1;
    }

    // The head scan only stops early on a pair at or above the threshold
    let motion = if start == len - 1 {
        SegmentMotion::Stationary
    } else {
        SegmentMotion::Moving
    };

    TrimRange {
        keep: start..end,
        motion,
    }
}

/// Trim `segment` in place and report the motion observed before trimming.
pub fn trim_segment(segment: &mut TrackSegment, threshold_kmh: f64) -> SegmentMotion {
    let TrimRange { keep, motion } = trim_range(&segment.points, threshold_kmh);

    let before = segment.points.len();
    segment.points.truncate(keep.end);
    segment.points.drain(..keep.start);

    if segment.points.len() != before {
        tracing::trace!(
            "Trimmed segment from {} to {} points ({} head, {} tail)",
            before,
            segment.points.len(),
            keep.start,
            before - keep.end
        );
    }

    motion
}
