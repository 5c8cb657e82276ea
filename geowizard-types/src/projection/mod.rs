//! Map projections between canonical geographic points and planar coordinates.

mod utm;
mod web_mercator;

pub use utm::UtmProjection;
pub use web_mercator::{WebMercator, MAX_LATITUDE};

use crate::error::ConversionError;

/// Bidirectional projection between two point types.
pub trait Projection {
    /// Type of the input (unprojected) point.
    type InPoint;
    /// Type of the output (projected) point.
    type OutPoint;

    /// Projects a point.
    fn project(&self, input: &Self::InPoint) -> Result<Self::OutPoint, ConversionError>;
    /// Reverses the projection.
    fn unproject(&self, input: &Self::OutPoint) -> Result<Self::InPoint, ConversionError>;
}
