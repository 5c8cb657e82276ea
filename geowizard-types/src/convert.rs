//! Conversion of coordinates between frames.

use nalgebra::Point2;

use crate::coordinate::{Coordinate, GeoPoint2d};
use crate::datum::Datum;
use crate::dms::{Axis, Dms};
use crate::error::ConversionError;
use crate::frame::{CoordinateFrame, UtmZone};
use crate::projection::{Projection, UtmProjection, WebMercator};
use crate::validator::{validate, ValidationResult};

/// Stateless converter between any two [`CoordinateFrame`]s.
///
/// Every conversion passes through the canonical frame (WGS84 decimal degrees). The output is
/// validated against the range of the target frame, and out-of-range results are returned as
/// [`ConversionError::InvalidResult`] instead of being silently produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateConverter {
    datum: Datum,
}

impl CoordinateConverter {
    /// Creates a converter for the given datum.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }

    /// Datum of the canonical frame.
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Converts `coord` into the `target` frame.
    ///
    /// Converting into the frame the coordinate is already in returns it unchanged.
    pub fn convert(
        &self,
        coord: &Coordinate,
        target: CoordinateFrame,
    ) -> Result<Coordinate, ConversionError> {
        if coord.frame() == target {
            return Ok(*coord);
        }

        let canonical = self.to_canonical(coord)?;
        self.from_canonical(&canonical, target)
    }

    /// Converts a batch of coordinates. Each item is converted independently.
    pub fn convert_all(
        &self,
        coords: &[Coordinate],
        target: CoordinateFrame,
    ) -> Vec<Result<Coordinate, ConversionError>> {
        coords
            .iter()
            .map(|coord| self.convert(coord, target))
            .collect()
    }

    /// Converts a coordinate into the canonical WGS84 point.
    pub fn to_canonical(&self, coord: &Coordinate) -> Result<GeoPoint2d, ConversionError> {
        let point = match coord {
            Coordinate::Utm {
                zone,
                easting,
                northing,
            } => UtmProjection::new(*zone)?.unproject(&Point2::new(*easting, *northing))?,
            Coordinate::GeographicDecimal { lat, lon } => GeoPoint2d::latlon(*lat, *lon),
            Coordinate::GeographicDms { lat, lon } => {
                GeoPoint2d::latlon(lat.to_decimal(), lon.to_decimal())
            }
            Coordinate::WebMercator { x, y } => {
                WebMercator::new(self.datum).unproject(&Point2::new(*x, *y))?
            }
        };

        log::trace!("{coord} -> canonical ({}, {})", point.lat(), point.lon());
        Ok(point)
    }

    /// Expresses a canonical point in the `target` frame.
    pub fn from_canonical(
        &self,
        point: &GeoPoint2d,
        target: CoordinateFrame,
    ) -> Result<Coordinate, ConversionError> {
        let coord = match target {
            CoordinateFrame::Utm(zone) => {
                let projected = UtmProjection::new(zone)?.project(point)?;
                Coordinate::utm(zone, projected.x, projected.y)
            }
            CoordinateFrame::GeographicDecimal => Coordinate::latlon(point.lat(), point.lon()),
            CoordinateFrame::GeographicDms => Coordinate::dms(
                Dms::from_decimal(point.lat(), Axis::Latitude),
                Dms::from_decimal(point.lon(), Axis::Longitude),
            ),
            CoordinateFrame::WebMercator => {
                let projected = WebMercator::new(self.datum).project(point)?;
                Coordinate::web_mercator(projected.x, projected.y)
            }
        };

        match validate(&coord) {
            ValidationResult::Valid => Ok(coord),
            ValidationResult::Invalid { reason, component } => {
                log::debug!("Conversion into {target} left the valid range: {reason}");
                Err(ConversionError::InvalidResult { component, reason })
            }
        }
    }

    /// Projects canonical points of a single zone at once, reusing the projection.
    ///
    /// Unlike [`CoordinateConverter::from_canonical`] the output is not range checked, so points
    /// outside of the zone can still be used for planar computations.
    pub fn project_to_zone(
        &self,
        points: &[GeoPoint2d],
        zone: UtmZone,
    ) -> Result<Vec<Point2<f64>>, ConversionError> {
        let projection = UtmProjection::new(zone)?;
        points.iter().map(|p| projection.project(p)).collect()
    }
}

/// Converts `coord` into `target` using the WGS84 converter.
pub fn convert(coord: &Coordinate, target: CoordinateFrame) -> Result<Coordinate, ConversionError> {
    CoordinateConverter::default().convert(coord, target)
}
