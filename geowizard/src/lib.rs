//! GeoWizard is the core of a survey coordinate toolkit. It keeps geometries entered in any of
//! the supported coordinate frames, measures them, and edits them with undo support.
//!
//! # Quick start
//!
//! ```
//! use geowizard::{
//!     Coordinate, Geometry, GeometryKind, Hemisphere, MeasurementEngine, MeasurementPolicy,
//!     UtmZone,
//! };
//!
//! let zone = UtmZone::new(18, Hemisphere::North).unwrap();
//! let square = Geometry::new(
//!     GeometryKind::Polygon,
//!     &[
//!         Coordinate::utm(zone, 500_000.0, 4_649_676.0),
//!         Coordinate::utm(zone, 500_100.0, 4_649_676.0),
//!         Coordinate::utm(zone, 500_100.0, 4_649_776.0),
//!         Coordinate::utm(zone, 500_000.0, 4_649_776.0),
//!     ],
//! )
//! .unwrap();
//!
//! let measurement = MeasurementEngine::default()
//!     .measure(&square, MeasurementPolicy::Planar { zone: None })
//!     .unwrap();
//! assert!((measurement.area.unwrap() - 10_000.0).abs() < 1e-3);
//! ```
//!
//! # Main components
//!
//! * [`Geometry`] is an immutable snapshot of a point, polyline or polygon. Vertices are stored
//!   in WGS84 decimal degrees whatever frame they were entered in, and are re-projected into
//!   any [`CoordinateFrame`] on request.
//! * [`MeasurementEngine`] computes area, perimeter and distance either in a UTM plane or on
//!   the ellipsoid, see [`MeasurementPolicy`]. Boundary segments may be circular curves, see
//!   [`measure::curve`].
//! * [`EditSession`] applies vertex edits to a geometry and keeps an undo history.
//! * [`Project`] groups identified features under one active display frame.
//!
//! Frames, conversions and validation live in the [`geowizard_types`] crate, which is
//! re-exported.

pub mod config;
mod edit;
pub mod error;
mod geometry;
pub mod measure;
mod project;

pub use config::Settings;
pub use edit::EditSession;
pub use error::{
    CurveError, EditError, GeoWizardError, GeometryError, MeasureError, ProjectError,
};
pub use geometry::{Geometry, GeometryKind, Vertex};
pub use measure::{Measurement, MeasurementEngine, MeasurementPolicy};
pub use project::{Feature, Project};

pub use geowizard_types::{
    convert, BoundingBox, ConversionError, Coordinate, CoordinateConverter, CoordinateFrame,
    FrameHint, GeoPoint2d, Hemisphere, UtmZone, ValidationError,
};

// Reexport geowizard_types
pub use geowizard_types;
