//! Geodesic distance calculations on the WGS84 ellipsoid
//!
//! Distances are always measured in meters along the ellipsoid surface.
//! Raw degree differences are never used as a distance proxy: meters per
//! degree of longitude shrink with latitude, so a fixed conversion factor
//! misclassifies near-threshold geometry away from the equator.

use geo::GeodesicDistance;

use crate::types::{Coordinate, Segment};

/// Geodesic distance between two coordinates, in meters
pub fn point_to_point(a: Coordinate, b: Coordinate) -> f64 {
    geo::Point::from(a).geodesic_distance(&geo::Point::from(b))
}

/// Geodesic distance from a point to the closest point on a segment,
/// in meters
///
/// The closest point may be interior to the segment or one of its
/// endpoints. The foot of the perpendicular is located in a local
/// equirectangular frame (longitude scaled by cos(latitude), so the
/// projection parameter is not skewed by latitude), then the distance
/// to it is measured geodesically.
pub fn point_to_segment(p: Coordinate, seg: Segment) -> f64 {
    let t = projection_parameter(p, seg);
    let closest = Coordinate::new(
        seg.start.lon + t * (seg.end.lon - seg.start.lon),
        seg.start.lat + t * (seg.end.lat - seg.start.lat),
    );
    point_to_point(p, closest)
}

/// Geodesic distance from a point to the closest point on any of the
/// given segments, in meters
pub fn point_to_segments(p: Coordinate, segments: &[Segment]) -> f64 {
    segments
        .iter()
        .map(|seg| point_to_segment(p, *seg))
        .fold(f64::INFINITY, f64::min)
}

/// Fraction along `seg` (clamped to [0, 1]) of the point closest to `p`
fn projection_parameter(p: Coordinate, seg: Segment) -> f64 {
    let mean_lat = (seg.start.lat + seg.end.lat) / 2.0;
    let k = mean_lat.to_radians().cos();

    let dx = (seg.end.lon - seg.start.lon) * k;
    let dy = seg.end.lat - seg.start.lat;
    let px = (p.lon - seg.start.lon) * k;
    let py = p.lat - seg.start.lat;

    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return 0.0;
    }
    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
}
