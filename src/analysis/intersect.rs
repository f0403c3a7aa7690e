//! Planar crossing detection between two polylines
//!
//! Intersection topology is computed directly on the longitude/latitude
//! pairs: at the sub-degree scale of a corridor screening, the earth's
//! curvature does not move a crossing point measurably, so planar segment
//! geometry is sufficient here. Distances are a different story and live
//! in [`super::distance`].

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};

use crate::types::{Coordinate, Polyline};

/// Coordinate equality tolerance for deduplicating intersection points,
/// in degrees
pub const DEDUP_EPSILON_DEG: f64 = 1e-9;

/// Returns every point where the two polylines cross or touch
///
/// Collinear overlaps are reported through the distinct endpoints of the
/// overlapping portion rather than dropped. Points are deduplicated
/// within [`DEDUP_EPSILON_DEG`] and returned in powerline traversal
/// order.
pub fn crossing_points(powerline: &Polyline, pipeline: &Polyline) -> Vec<Coordinate> {
    let mut points: Vec<Coordinate> = Vec::new();

    for power_seg in powerline.segments() {
        for pipe_seg in pipeline.segments() {
            match line_intersection(power_seg.to_line(), pipe_seg.to_line()) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    push_unique(&mut points, intersection.into());
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    // Degenerate overlap: keep both ends of the shared
                    // portion (a single coordinate when it collapses to
                    // a point).
                    push_unique(&mut points, intersection.start.into());
                    push_unique(&mut points, intersection.end.into());
                }
                None => {}
            }
        }
    }

    points
}

fn push_unique(points: &mut Vec<Coordinate>, candidate: Coordinate) {
    if !points
        .iter()
        .any(|p| p.approx_eq(&candidate, DEDUP_EPSILON_DEG))
    {
        points.push(candidate);
    }
}
