//! Error types used by the crate.

use geowizard_types::{ConversionError, ValidationError};
use thiserror::Error;

use crate::geometry::GeometryKind;

/// Failure to construct or derive a geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Fewer (distinct) vertices than the geometry kind requires.
    #[error("{kind} requires at least {required} distinct vertices, got {actual}")]
    InsufficientVertices {
        /// Kind of the geometry.
        kind: GeometryKind,
        /// Minimum number of vertices.
        required: usize,
        /// Number of (distinct) vertices supplied.
        actual: usize,
    },
    /// More vertices than the geometry kind allows.
    #[error("{kind} allows at most {allowed} vertices, got {actual}")]
    TooManyVertices {
        /// Kind of the geometry.
        kind: GeometryKind,
        /// Maximum number of vertices.
        allowed: usize,
        /// Number of vertices supplied.
        actual: usize,
    },
    /// Vertex index outside of the vertex list.
    #[error("vertex index {index} is out of bounds for {len} vertices")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of vertices.
        len: usize,
    },
    /// Input coordinate failed validation.
    #[error("vertex {index} is invalid: {source}")]
    InvalidVertex {
        /// Position of the vertex in the input.
        index: usize,
        /// Validation failure.
        source: ValidationError,
    },
    /// Input coordinate could not be converted into the canonical frame.
    #[error("vertex {index} could not be converted: {source}")]
    Conversion {
        /// Position of the vertex in the input.
        index: usize,
        /// Conversion failure.
        source: ConversionError,
    },
}

/// Invalid curve parameters or curve placement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Radius is not a positive number.
    #[error("curve radius must be positive, got {0}")]
    InvalidRadius(f64),
    /// Delta is not within `(0, 360)` degrees.
    #[error("curve delta must be within (0, 360) degrees, got {0}")]
    InvalidDelta(f64),
    /// Delta text is neither decimal degrees nor degrees, minutes, seconds.
    #[error("unrecognized curve delta '{0}'")]
    MalformedDelta(String),
    /// Start of the arc is not on the circle.
    #[error("arc start is {distance:.3} m from the center, radius is {radius:.3} m")]
    StartOffRadius {
        /// Distance of the start point from the center.
        distance: f64,
        /// Radius of the curve.
        radius: f64,
    },
    /// End of the arc is not on the circle.
    #[error("arc end is {distance:.3} m from the center, radius is {radius:.3} m")]
    EndOffRadius {
        /// Distance of the end point from the center.
        distance: f64,
        /// Radius of the curve.
        radius: f64,
    },
    /// An arc cannot be approximated with zero segments.
    #[error("densification requires at least one segment")]
    NoSegments,
    /// The geometry has no segment with the index.
    #[error("segment {segment} is out of bounds for {segments} segments")]
    SegmentOutOfBounds {
        /// Requested segment.
        segment: usize,
        /// Number of segments of the geometry.
        segments: usize,
    },
    /// More than one curve is attached to a segment.
    #[error("segment {0} has more than one curve")]
    DuplicateSegment(usize),
    /// The chord of the curve does not match the distance between the segment ends.
    #[error("curve chord {chord:.3} m does not match segment {segment} of {length:.3} m")]
    ChordMismatch {
        /// Index of the segment.
        segment: usize,
        /// Chord of the curve.
        chord: f64,
        /// Straight length of the segment.
        length: f64,
    },
}

/// Failure to measure a geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// Iterative geodesic distance did not converge (e.g. nearly antipodal points).
    #[error("geodesic distance did not converge")]
    GeodesicConvergenceFailure,
    /// Vertices could not be projected for planar measurement.
    #[error("failed to project vertices: {0}")]
    Conversion(#[from] ConversionError),
    /// Curves attached to the geometry are invalid.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// Failure to apply an edit operation. The edited geometry is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Operation would leave fewer vertices than the geometry kind requires.
    #[error("operation would leave {kind} with fewer than {required} distinct vertices")]
    WouldViolateMinimum {
        /// Kind of the edited geometry.
        kind: GeometryKind,
        /// Minimum number of vertices.
        required: usize,
    },
    /// Operation would add more vertices than the geometry kind allows.
    #[error("{kind} allows at most {allowed} vertices")]
    WouldExceedMaximum {
        /// Kind of the edited geometry.
        kind: GeometryKind,
        /// Maximum number of vertices.
        allowed: usize,
    },
    /// Vertex index outside of the vertex list.
    #[error("vertex index {index} is out of bounds for {len} vertices")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of vertices.
        len: usize,
    },
    /// The new coordinate failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The new coordinate could not be converted into the canonical frame.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl From<GeometryError> for EditError {
    fn from(value: GeometryError) -> Self {
        match value {
            GeometryError::InsufficientVertices { kind, required, .. } => {
                Self::WouldViolateMinimum { kind, required }
            }
            GeometryError::TooManyVertices { kind, allowed, .. } => {
                Self::WouldExceedMaximum { kind, allowed }
            }
            GeometryError::IndexOutOfBounds { index, len } => Self::IndexOutOfBounds { index, len },
            GeometryError::InvalidVertex { source, .. } => Self::Validation(source),
            GeometryError::Conversion { source, .. } => Self::Conversion(source),
        }
    }
}

/// Failure of a project level operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectError {
    /// A feature with the id already exists.
    #[error("feature {0} already exists")]
    DuplicateId(u32),
    /// Feature ids must be positive.
    #[error("feature id must be positive")]
    InvalidId,
    /// No feature with the id.
    #[error("feature {0} not found")]
    NotFound(u32),
}

/// GeoWizard error type.
#[derive(Debug, Error)]
pub enum GeoWizardError {
    /// Input validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Frame conversion error.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// Geometry construction error.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Measurement error.
    #[error(transparent)]
    Measure(#[from] MeasureError),
    /// Curve definition error.
    #[error(transparent)]
    Curve(#[from] CurveError),
    /// Edit session error.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// Project error.
    #[error(transparent)]
    Project(#[from] ProjectError),
    /// Settings could not be read or written.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
