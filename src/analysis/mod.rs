//! Proximity and crossing analysis between two polylines
//!
//! The entry point is [`analyze`]: given a powerline and a pipeline in
//! WGS84 longitude/latitude, it reports where the two geometries cross
//! and which pipeline segments pass within a distance threshold of the
//! powerline. The computation is pure: no I/O, no logging, no state
//! between calls.

pub mod distance;
pub mod intersect;

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{Coordinate, Polyline, Segment};

/// Number of evenly spaced sample points per pipeline segment, endpoints
/// included
///
/// Sampling only endpoints or only the midpoint under-detects proximity
/// when the powerline approaches the middle of a long segment but stays
/// far from its ends.
pub const SAMPLES_PER_SEGMENT: usize = 10;

/// Result of a single [`analyze`] call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Pipeline segments within the threshold distance of the powerline,
    /// in pipeline traversal order
    pub close_segments: Vec<Segment>,
    /// Points where the two polylines cross or touch, deduplicated
    pub intersections: Vec<Coordinate>,
}

/// Analyzes a powerline/pipeline pair for crossings and proximity
///
/// `threshold_m` is the maximum geodesic distance, in meters, for a
/// pipeline segment to count as close. Fails with
/// [`Error::InvalidInput`] before any computation when either polyline
/// is degenerate or the threshold is not a positive finite number.
pub fn analyze(powerline: &Polyline, pipeline: &Polyline, threshold_m: f64) -> Result<Analysis> {
    powerline.validate()?;
    pipeline.validate()?;
    if !threshold_m.is_finite() || threshold_m <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "threshold must be a positive number of meters, got {}",
            threshold_m
        )));
    }

    let intersections = intersect::crossing_points(powerline, pipeline);

    let power_segments: Vec<Segment> = powerline.segments().collect();
    let pipe_segments: Vec<Segment> = pipeline.segments().collect();

    // Each pipeline segment is screened independently; rayon's collect
    // keeps the original segment order.
    let close_segments: Vec<Segment> = pipe_segments
        .par_iter()
        .filter(|seg| within_threshold(**seg, &power_segments, threshold_m))
        .copied()
        .collect();

    Ok(Analysis {
        close_segments,
        intersections,
    })
}

/// True when any sample point of `seg` lies within `threshold_m` meters
/// of any powerline segment
fn within_threshold(seg: Segment, power_segments: &[Segment], threshold_m: f64) -> bool {
    sample_points(seg).any(|p| {
        power_segments
            .iter()
            .any(|ps| distance::point_to_segment(p, *ps) <= threshold_m)
    })
}

/// Evenly spaced points along a segment, both endpoints included
fn sample_points(seg: Segment) -> impl Iterator<Item = Coordinate> {
    let steps = (SAMPLES_PER_SEGMENT - 1) as f64;
    (0..SAMPLES_PER_SEGMENT).map(move |i| {
        let t = i as f64 / steps;
        Coordinate::new(
            seg.start.lon + t * (seg.end.lon - seg.start.lon),
            seg.start.lat + t * (seg.end.lat - seg.start.lat),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Meridian meters per degree of latitude near the equator
    const METERS_PER_DEG_LAT: f64 = 110_574.4;

    fn line(coords: &[(f64, f64)]) -> Polyline {
        Polyline::new(
            coords
                .iter()
                .map(|&(lon, lat)| Coordinate::new(lon, lat))
                .collect(),
        )
    }

    /// Horizontal polyline on the given latitude offset (in meters north
    /// of the equator), spanning lon 0..0.01
    fn equator_parallel(offset_m: f64) -> Polyline {
        let lat = offset_m / METERS_PER_DEG_LAT;
        line(&[(0.0, lat), (0.01, lat)])
    }

    #[test]
    fn test_far_apart_yields_empty_sets() {
        let power = line(&[(0.0, 0.0), (0.01, 0.0)]);
        let pipe = line(&[(0.0, 1.0), (0.01, 1.0)]);
        let result = analyze(&power, &pipe, 300.0).unwrap();
        assert!(result.close_segments.is_empty());
        assert!(result.intersections.is_empty());
    }

    #[test]
    fn test_single_crossing_point() {
        let power = line(&[(0.0, 0.0), (0.01, 0.01)]);
        let pipe = line(&[(0.0, 0.01), (0.01, 0.0)]);
        let result = analyze(&power, &pipe, 300.0).unwrap();
        assert_eq!(result.intersections.len(), 1);
        assert!(result.intersections[0].approx_eq(&Coordinate::new(0.005, 0.005), 1e-9));
    }

    #[test]
    fn test_identical_polylines_report_overlap_endpoints() {
        let power = line(&[(0.0, 0.0), (0.01, 0.01), (0.02, 0.015)]);
        let result = analyze(&power, &power.clone(), 300.0).unwrap();
        assert!(!result.intersections.is_empty());
        assert!(result
            .intersections
            .iter()
            .any(|p| p.approx_eq(&Coordinate::new(0.0, 0.0), 1e-9)));
        assert!(result
            .intersections
            .iter()
            .any(|p| p.approx_eq(&Coordinate::new(0.02, 0.015), 1e-9)));
    }

    #[test]
    fn test_idempotent_and_order_stable() {
        let power = line(&[(11.85, 45.41), (11.84, 45.40), (11.83, 45.39)]);
        let pipe = line(&[(11.86, 45.41), (11.84, 45.39), (11.83, 45.38)]);
        let first = analyze(&power, &pipe, 1_000.0).unwrap();
        let second = analyze(&power, &pipe, 1_000.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_monotonic_in_threshold() {
        let power = line(&[(0.0, 0.0), (0.01, 0.0), (0.02, 0.0)]);
        let pipe = line(&[(0.0, 0.002), (0.01, 0.002), (0.02, 0.004)]);
        let small = analyze(&power, &pipe, 150.0).unwrap();
        let large = analyze(&power, &pipe, 400.0).unwrap();
        for seg in &small.close_segments {
            assert!(large.close_segments.contains(seg));
        }
        assert!(large.close_segments.len() >= small.close_segments.len());
    }

    #[test]
    fn test_threshold_boundary() {
        let power = equator_parallel(0.0);
        // 290 m away: within a 300 m threshold
        let near = equator_parallel(290.0);
        assert_eq!(analyze(&power, &near, 300.0).unwrap().close_segments.len(), 1);
        // 310 m away: outside it
        let far = equator_parallel(310.0);
        assert!(analyze(&power, &far, 300.0).unwrap().close_segments.is_empty());
    }

    #[test]
    fn test_parallel_lines_500m_apart() {
        let power = equator_parallel(0.0);
        let pipe = equator_parallel(500.0);
        let result = analyze(&power, &pipe, 300.0).unwrap();
        assert!(result.close_segments.is_empty());
        assert!(result.intersections.is_empty());
    }

    #[test]
    fn test_parallel_lines_100m_apart() {
        let power = equator_parallel(0.0);
        let lat = 100.0 / METERS_PER_DEG_LAT;
        let pipe = line(&[(0.0, lat), (0.005, lat), (0.01, lat)]);
        let result = analyze(&power, &pipe, 300.0).unwrap();
        // Every pipeline segment is close, in original order
        assert_eq!(result.close_segments.len(), 2);
        assert!(result.close_segments[0].start.approx_eq(&Coordinate::new(0.0, lat), 1e-12));
        assert!(result.intersections.is_empty());
    }

    #[test]
    fn test_mid_segment_approach_detected() {
        // Powerline runs 100 m from the middle third of one long pipeline
        // segment while staying kilometers from both of its endpoints.
        // Endpoint-only checks miss this.
        let pipe = line(&[(0.0, 0.0), (0.1, 0.0)]);
        let near_lat = 100.0 / METERS_PER_DEG_LAT;
        let power = line(&[(0.03, near_lat), (0.07, near_lat)]);
        let result = analyze(&power, &pipe, 300.0).unwrap();
        assert_eq!(result.close_segments.len(), 1);
    }

    #[test]
    fn test_veneto_corridor_scenario() {
        // Two parallel diagonal segments near Padua, about 640 m apart
        // geodesically. Not close at 300 m, close at 700 m, no crossing.
        let power = line(&[(11.85, 45.41), (11.84, 45.40)]);
        let pipe = line(&[(11.86, 45.41), (11.83, 45.38)]);

        let strict = analyze(&power, &pipe, 300.0).unwrap();
        assert!(strict.close_segments.is_empty());
        assert!(strict.intersections.is_empty());

        let relaxed = analyze(&power, &pipe, 700.0).unwrap();
        assert_eq!(relaxed.close_segments.len(), 1);
        assert_eq!(
            relaxed.close_segments[0],
            Segment::new(Coordinate::new(11.86, 45.41), Coordinate::new(11.83, 45.38))
        );
    }

    #[test]
    fn test_rejects_degenerate_polyline() {
        let power = line(&[(0.0, 0.0)]);
        let pipe = line(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            analyze(&power, &pipe, 300.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let power = line(&[(0.0, 0.0), (1.0, 1.0)]);
        let pipe = line(&[(0.0, 1.0), (1.0, 0.0)]);
        assert!(matches!(
            analyze(&power, &pipe, 0.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            analyze(&power, &pipe, -5.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            analyze(&power, &pipe, f64::NAN),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let power = line(&[(0.0, 0.0), (0.01, 0.01)]);
        let pipe = line(&[(0.0, 0.01), (0.01, 0.0)]);
        let power_before = power.clone();
        let pipe_before = pipe.clone();
        analyze(&power, &pipe, 300.0).unwrap();
        assert_eq!(power, power_before);
        assert_eq!(pipe, pipe_before);
    }
}
