//! Speed estimation between consecutive track points
//!
//! Speeds are in km/h, distances in meters. Elevation is ignored everywhere.

use geo::Point;
use gpx::Waypoint;
use time::OffsetDateTime;

/// Equatorial Earth radius in meters (WGS84)
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Length of one degree of arc on a sphere of `EARTH_RADIUS_M`
const ONE_DEGREE_M: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS_M / 360.0;

/// Above this coordinate delta (degrees) the planar approximation is replaced by haversine
const PLANAR_MAX_DELTA_DEG: f64 = 0.2;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Speed in km/h travelled from `p1` to `p2`.
///
/// Returns 0 when either point has no timestamp or when the elapsed time is
/// zero or negative (duplicate or out-of-order samples count as no motion).
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn speed_kmh(p1: &Waypoint, p2: &Waypoint) -> f64 {
    let (Some(t1), Some(t2)) = (timestamp(p1), timestamp(p2)) else {
        return 0.0;
    };

    let elapsed_hours = (t2 - t1).as_seconds_f64() / SECONDS_PER_HOUR;
    if elapsed_hours <= 0.0 {
        return 0.0;
    }

    let speed = planar_distance_m(p1, p2) / 1000.0 / elapsed_hours;
    if speed.is_finite() { speed } else { 0.0 }
}

/// 2-D distance in meters between two waypoints.
///
/// Short hops use an equirectangular approximation (longitude scaled by the
/// cosine of the first latitude); longer hops fall back to haversine.
#[inline]
pub fn planar_distance_m(p1: &Waypoint, p2: &Waypoint) -> f64 {
    planar_distance(p1.point(), p2.point())
}

/// Calculate the Haversine distance between two waypoints in meters
#[inline]
pub fn haversine_distance_m(p1: &Waypoint, p2: &Waypoint) -> f64 {
    haversine_distance(p1.point(), p2.point())
}

/// Points are (x = longitude, y = latitude) in degrees
fn planar_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    let delta_lat = a.y() - b.y();
    let delta_lon = a.x() - b.x();
    if delta_lat.abs() > PLANAR_MAX_DELTA_DEG || delta_lon.abs() > PLANAR_MAX_DELTA_DEG {
        return haversine_distance(a, b);
    }

    let scaled_lon = delta_lon * a.y().to_radians().cos();
    delta_lat.hypot(scaled_lon) * ONE_DEGREE_M
}

fn haversine_distance(point1: Point<f64>, point2: Point<f64>) -> f64 {
    let lat1 = point1.y().to_radians();
    let lat2 = point2.y().to_radians();
    let delta_lat = (point2.y() - point1.y()).to_radians();
    let delta_lon = (point2.x() - point1.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[inline]
fn timestamp(waypoint: &Waypoint) -> Option<OffsetDateTime> {
    waypoint.time.clone().map(OffsetDateTime::from)
}
