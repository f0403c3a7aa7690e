//! Coordinate ingestion
//!
//! Two line-oriented input formats feed the analyzer:
//!
//! * single-polyline files: one header line naming the geometry, then one
//!   comma-separated coordinate pair per line;
//! * survey dumps: a `POWERLINES` / `PIPELINES` sectioned file with
//!   `*name*` headers and whitespace-separated `lat lon` records, split
//!   into per-polyline CSV files.
//!
//! Column order is never assumed. Callers state it explicitly or ask for
//! [`CoordOrder::Auto`], and every polyline leaving this module is
//! normalized to (longitude, latitude). Malformed records are skipped
//! with a `warn` diagnostic; only a file without two usable vertices is
//! an error.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{Error, Result};
use crate::types::{Coordinate, Polyline};

/// Column order of a two-value coordinate record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordOrder {
    /// Longitude first
    LonLat,
    /// Latitude first
    LatLon,
    /// Resolve per file: a value outside [-90, 90] can only be a
    /// longitude; ambiguous files default to longitude first
    Auto,
}

/// Parses a single-polyline text block: a header line with the name,
/// then one coordinate pair per line
pub fn parse_polyline(text: &str, order: CoordOrder) -> Result<Polyline> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let name = lines
        .next()
        .ok_or_else(|| Error::InvalidInput("empty polyline input".to_string()))?;

    let mut pairs: Vec<(f64, f64)> = Vec::new();
    for line in lines {
        match parse_pair(line.split(',')) {
            Some(pair) => pairs.push(pair),
            None => warn!("{}: skipping malformed record {:?}", name, line),
        }
    }

    let order = resolve_order(order, &pairs);
    let mut vertices = Vec::with_capacity(pairs.len());
    for (a, b) in pairs {
        let coord = match order {
            CoordOrder::LatLon => Coordinate::new(b, a),
            _ => Coordinate::new(a, b),
        };
        if coord.is_valid() {
            vertices.push(coord);
        } else {
            warn!(
                "{}: skipping out-of-range coordinate ({}, {})",
                name, coord.lon, coord.lat
            );
        }
    }

    let polyline = Polyline::named(name, vertices);
    polyline.validate()?;
    Ok(polyline)
}

/// Reads a single-polyline file
pub fn read_polyline(path: impl AsRef<Path>, order: CoordOrder) -> Result<Polyline> {
    let text = fs::read_to_string(path)?;
    parse_polyline(&text, order)
}

/// Named polylines from a sectioned survey dump
#[derive(Debug, Default)]
pub struct SurveyDump {
    pub powerlines: Vec<Polyline>,
    pub pipelines: Vec<Polyline>,
}

/// Parses a survey dump: `POWERLINES` / `PIPELINES` section markers,
/// `*name*` polyline headers, whitespace-separated `lat lon` records
///
/// Records that fail to parse or fall out of range are skipped with a
/// diagnostic. Polylines keep their dump order within each section.
pub fn parse_survey_dump(text: &str) -> SurveyDump {
    enum Section {
        None,
        Powerlines,
        Pipelines,
    }

    let mut dump = SurveyDump::default();
    let mut section = Section::None;
    let mut name: Option<String> = None;
    let mut vertices: Vec<Coordinate> = Vec::new();

    let flush = |section: &Section,
                 name: &mut Option<String>,
                 vertices: &mut Vec<Coordinate>,
                 dump: &mut SurveyDump| {
        if let Some(n) = name.take() {
            let line = Polyline::named(n, std::mem::take(vertices));
            match section {
                Section::Powerlines => dump.powerlines.push(line),
                Section::Pipelines => dump.pipelines.push(line),
                Section::None => warn!("polyline {:?} outside any section, dropped", line.name),
            }
        } else {
            vertices.clear();
        }
    };

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "POWERLINES" {
            flush(&section, &mut name, &mut vertices, &mut dump);
            section = Section::Powerlines;
        } else if line == "PIPELINES" {
            flush(&section, &mut name, &mut vertices, &mut dump);
            section = Section::Pipelines;
        } else if line.starts_with('*') {
            flush(&section, &mut name, &mut vertices, &mut dump);
            name = Some(line.trim_matches('*').trim().to_string());
        } else {
            // Dump records are latitude first
            match parse_pair(line.split_whitespace()) {
                Some((lat, lon)) => {
                    let coord = Coordinate::new(lon, lat);
                    if coord.is_valid() {
                        vertices.push(coord);
                    } else {
                        warn!("skipping out-of-range record {:?}", line);
                    }
                }
                None => warn!("skipping malformed record {:?}", line),
            }
        }
    }
    flush(&section, &mut name, &mut vertices, &mut dump);

    dump
}

/// Writes one CSV file per polyline into `dir`: a header line with the
/// name, then `lon,lat` rows. Returns the paths written.
pub fn export_survey_csv(dir: impl AsRef<Path>, polylines: &[Polyline]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(polylines.len());
    for line in polylines {
        let name = line.name.as_deref().unwrap_or("unnamed");
        let path = dir.join(format!("{}.csv", sanitize_filename(name)));

        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
        writer.write_record([name])?;
        for vertex in line.vertices() {
            writer.write_record([vertex.lon.to_string(), vertex.lat.to_string()])?;
        }
        writer.flush()?;
        paths.push(path);
    }
    Ok(paths)
}

fn parse_pair<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<(f64, f64)> {
    let a: f64 = fields.next()?.trim().parse().ok()?;
    let b: f64 = fields.next()?.trim().parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((a, b))
}

fn resolve_order(order: CoordOrder, pairs: &[(f64, f64)]) -> CoordOrder {
    match order {
        CoordOrder::Auto => {
            // A value no latitude could take pins the column down
            if pairs.iter().any(|(a, _)| a.abs() > 90.0) {
                CoordOrder::LonLat
            } else if pairs.iter().any(|(_, b)| b.abs() > 90.0) {
                CoordOrder::LatLon
            } else {
                CoordOrder::LonLat
            }
        }
        other => other,
    }
}

fn sanitize_filename(name: &str) -> String {
    name.trim()
        .replace(['/', '\\'], "_")
        .replace(' ', "-")
}
