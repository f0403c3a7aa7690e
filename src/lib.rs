//! linescreen - powerline/pipeline proximity screening
//!
//! linescreen analyzes two georeferenced polylines, a power transmission
//! line and a pipeline, and reports where they cross and which pipeline
//! segments pass within a distance threshold of the powerline. Distances
//! are geodesic on the WGS84 ellipsoid; crossing topology is planar on
//! the longitude/latitude pairs.
//!
//! # Examples
//!
//! ```
//! use linescreen::{analyze, Coordinate, Polyline, DEFAULT_THRESHOLD_M};
//!
//! let powerline = Polyline::new(vec![
//!     Coordinate::new(11.85, 45.41),
//!     Coordinate::new(11.84, 45.40),
//! ]);
//! let pipeline = Polyline::new(vec![
//!     Coordinate::new(11.86, 45.41),
//!     Coordinate::new(11.83, 45.38),
//! ]);
//!
//! let result = analyze(&powerline, &pipeline, DEFAULT_THRESHOLD_M)?;
//! for segment in &result.close_segments {
//!     println!("close: ({}, {}) -> ({}, {})",
//!         segment.start.lon, segment.start.lat,
//!         segment.end.lon, segment.end.lat);
//! }
//! for point in &result.intersections {
//!     println!("crossing at ({}, {})", point.lon, point.lat);
//! }
//! # Ok::<(), linescreen::Error>(())
//! ```

pub mod analysis;
pub mod error;
pub mod ingest;
pub mod report;
pub mod types;

pub use analysis::{analyze, Analysis, SAMPLES_PER_SEGMENT};
pub use error::{Error, Result};
pub use ingest::{parse_polyline, parse_survey_dump, read_polyline, CoordOrder, SurveyDump};
pub use report::{DegreeFormat, PlotBundle};
pub use types::{Coordinate, Polyline, Segment, DEFAULT_THRESHOLD_M};
