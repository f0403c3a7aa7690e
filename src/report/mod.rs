//! Result reporting
//!
//! Consumes an [`Analysis`] three ways: a textual report for humans
//! (decimal degrees or degree-minute-second), a CSV export of both
//! result sets, and a JSON plot bundle handed to an external plotting
//! tool. No rendering happens here.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::analysis::Analysis;
use crate::error::Result;
use crate::types::{Coordinate, Polyline};

/// How coordinates are rendered in the textual report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeFormat {
    /// Decimal degrees, e.g. `(11.854323, 45.410579)`
    Decimal,
    /// Degree-minute-second, e.g. `11°51'15.6"E 45°24'38.1"N`
    Dms,
}

/// Formats a coordinate per the requested degree notation
pub fn format_coordinate(c: Coordinate, format: DegreeFormat) -> String {
    match format {
        DegreeFormat::Decimal => format!("({:.6}, {:.6})", c.lon, c.lat),
        DegreeFormat::Dms => format!("{} {}", dms(c.lon, 'E', 'W'), dms(c.lat, 'N', 'S')),
    }
}

fn dms(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value < 0.0 { negative } else { positive };
    let value = value.abs();
    let degrees = value.trunc();
    let minutes = (value - degrees) * 60.0;
    let seconds = (minutes - minutes.trunc()) * 60.0;
    format!(
        "{}°{:02}'{:.1}\"{}",
        degrees as u32,
        minutes.trunc() as u32,
        seconds,
        hemisphere
    )
}

/// Writes the textual screening report
pub fn write_report(
    out: &mut impl Write,
    analysis: &Analysis,
    format: DegreeFormat,
) -> Result<()> {
    writeln!(out, "Close segments: {}", analysis.close_segments.len())?;
    for seg in &analysis.close_segments {
        writeln!(
            out,
            "  {} -> {}",
            format_coordinate(seg.start, format),
            format_coordinate(seg.end, format)
        )?;
    }

    writeln!(out, "Intersection points: {}", analysis.intersections.len())?;
    for point in &analysis.intersections {
        writeln!(out, "  {}", format_coordinate(*point, format))?;
    }
    Ok(())
}

/// Writes both result sets as CSV rows
///
/// Close segments fill all four coordinate columns; intersection points
/// only the first pair.
pub fn write_csv(out: impl Write, analysis: &Analysis) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    writer.write_record(["kind", "lon_a", "lat_a", "lon_b", "lat_b"])?;

    for seg in &analysis.close_segments {
        writer.write_record([
            "close_segment".to_string(),
            seg.start.lon.to_string(),
            seg.start.lat.to_string(),
            seg.end.lon.to_string(),
            seg.end.lat.to_string(),
        ])?;
    }
    for point in &analysis.intersections {
        writer.write_record([
            "intersection".to_string(),
            point.lon.to_string(),
            point.lat.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Everything an external plotting tool needs to draw one screening run
#[derive(Debug, Serialize)]
pub struct PlotBundle<'a> {
    pub powerline: &'a Polyline,
    pub pipeline: &'a Polyline,
    pub threshold_m: f64,
    pub close_segments: &'a [crate::types::Segment],
    pub intersections: &'a [Coordinate],
}

impl<'a> PlotBundle<'a> {
    pub fn new(
        powerline: &'a Polyline,
        pipeline: &'a Polyline,
        threshold_m: f64,
        analysis: &'a Analysis,
    ) -> Self {
        Self {
            powerline,
            pipeline,
            threshold_m,
            close_segments: &analysis.close_segments,
            intersections: &analysis.intersections,
        }
    }

    /// Serializes the bundle as JSON to the given path
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
