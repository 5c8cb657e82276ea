//! Error types used by the crate.

use thiserror::Error;

use crate::frame::Component;

/// Failure to convert a coordinate from one frame into another.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// UTM coordinates were supplied without zone or hemisphere metadata.
    #[error("UTM zone and hemisphere must be given explicitly (zone: {zone:?}, hemisphere: {hemisphere})")]
    AmbiguousZone {
        /// Zone number, if one was known.
        zone: Option<u8>,
        /// Whether a hemisphere was known.
        hemisphere: bool,
    },
    /// UTM zone number outside of `1..=60`.
    #[error("invalid UTM zone {0}, expected 1..=60")]
    InvalidZone(u8),
    /// Hemisphere name that could not be recognized.
    #[error("invalid hemisphere {0:?}")]
    InvalidHemisphere(String),
    /// Latitude cannot be represented in Web Mercator.
    #[error("latitude {latitude} is outside of the Web Mercator range")]
    OutOfMercatorRange {
        /// Offending latitude in degrees.
        latitude: f64,
    },
    /// Projection produced a non-finite value.
    #[error("projection singularity at ({0}, {1})")]
    Singularity(f64, f64),
    /// Projection engine failed to evaluate the operation.
    #[error("projection error: {0}")]
    Projection(String),
    /// Converted value falls outside the valid range of the target frame.
    #[error("converted {component} is out of range: {reason}")]
    InvalidResult {
        /// Component that left the valid range.
        component: Component,
        /// Human readable description.
        reason: String,
    },
}

/// Failure to accept a coordinate value entered by the user or an importer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Text could not be parsed as a value of the expected component.
    #[error("{component} is malformed: {input:?}")]
    Malformed {
        /// Component being parsed.
        component: Component,
        /// Raw input text.
        input: String,
    },
    /// Value was parsed but lies outside the valid range.
    #[error("{component} is out of range: {reason}")]
    OutOfRange {
        /// Offending component.
        component: Component,
        /// Human readable description.
        reason: String,
    },
}

impl ValidationError {
    /// Component the error refers to.
    pub fn component(&self) -> Component {
        match self {
            Self::Malformed { component, .. } | Self::OutOfRange { component, .. } => *component,
        }
    }
}
