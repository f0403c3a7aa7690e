//! Core data types for linescreen

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default proximity threshold in meters
pub const DEFAULT_THRESHOLD_M: f64 = 300.0;

/// A WGS84 position in decimal degrees, longitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Creates a coordinate from longitude/latitude in degrees
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns true if both components are finite and within
    /// longitude [-180, 180], latitude [-90, 90]
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Component-wise equality within `eps` degrees
    pub fn approx_eq(&self, other: &Coordinate, eps: f64) -> bool {
        (self.lon - other.lon).abs() <= eps && (self.lat - other.lat).abs() <= eps
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lon, c.lat)
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord { x: c.lon, y: c.lat }
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self {
        Coordinate::new(c.x, c.y)
    }
}

/// An ordered pair of vertices from a polyline
///
/// Identity is structural: two segments are equal when their endpoint
/// coordinates are equal, regardless of which polyline they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Segment {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    pub(crate) fn to_line(self) -> geo::Line<f64> {
        geo::Line::new(geo::Coord::from(self.start), geo::Coord::from(self.end))
    }
}

/// An ordered sequence of vertices defining connected straight segments
///
/// Polylines are immutable inputs to the analyzer; construction is the
/// only place they are built up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub name: Option<String>,
    vertices: Vec<Coordinate>,
}

impl Polyline {
    /// Creates an unnamed polyline from its vertices
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { name: None, vertices }
    }

    /// Creates a named polyline from its vertices
    pub fn named(name: impl Into<String>, vertices: Vec<Coordinate>) -> Self {
        Self {
            name: Some(name.into()),
            vertices,
        }
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates the `n-1` segments between consecutive vertices
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.vertices.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Checks the analyzer preconditions: at least two vertices, all
    /// coordinates valid, and at least two distinct positions
    pub fn validate(&self) -> Result<()> {
        let label = self.name.as_deref().unwrap_or("polyline");

        if self.vertices.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "{}: needs at least 2 vertices, got {}",
                label,
                self.vertices.len()
            )));
        }
        if let Some(bad) = self.vertices.iter().find(|c| !c.is_valid()) {
            return Err(Error::InvalidInput(format!(
                "{}: coordinate ({}, {}) is non-finite or out of range",
                label, bad.lon, bad.lat
            )));
        }
        let first = self.vertices[0];
        if self.vertices.iter().all(|c| *c == first) {
            return Err(Error::InvalidInput(format!(
                "{}: all vertices coincide",
                label
            )));
        }
        Ok(())
    }
}
