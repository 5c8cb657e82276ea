use geodesy::prelude::*;
use nalgebra::Point2;

use crate::coordinate::GeoPoint2d;
use crate::error::ConversionError;
use crate::frame::UtmZone;
use crate::projection::Projection;

/// Ellipsoidal Transverse Mercator projection of a single UTM zone on WGS84.
///
/// The projection is evaluated by the `geodesy` crate's `tmerc` operator, parametrized with the
/// zone's central meridian, the UTM scale factor and false origin.
pub struct UtmProjection {
    zone: UtmZone,
    context: Minimal,
    op: OpHandle,
}

impl UtmProjection {
    /// Creates a projection for the given zone.
    pub fn new(zone: UtmZone) -> Result<Self, ConversionError> {
        if !zone.is_valid() {
            return Err(ConversionError::InvalidZone(zone.number()));
        }

        let mut context = Minimal::new();
        let op = context
            .op(&Self::definition(zone))
            .map_err(|err| ConversionError::Projection(err.to_string()))?;

        Ok(Self { zone, context, op })
    }

    /// Zone of the projection.
    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    fn definition(zone: UtmZone) -> String {
        format!(
            "tmerc ellps=WGS84 lat_0=0 lon_0={} k_0={} x_0={} y_0={}",
            zone.central_meridian(),
            UtmZone::SCALE_FACTOR,
            UtmZone::FALSE_EASTING,
            zone.hemisphere().false_northing(),
        )
    }
}

impl std::fmt::Debug for UtmProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UtmProjection")
            .field("zone", &self.zone)
            .finish()
    }
}

impl Projection for UtmProjection {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2<f64>;

    fn project(&self, input: &Self::InPoint) -> Result<Self::OutPoint, ConversionError> {
        let mut data = [Coor2D::geo(input.lat(), input.lon())];
        self.context
            .apply(self.op, Fwd, &mut data)
            .map_err(|err| ConversionError::Projection(err.to_string()))?;

        if !data[0].0[0].is_finite() || !data[0].0[1].is_finite() {
            return Err(ConversionError::Singularity(input.lat(), input.lon()));
        }

        Ok(Point2::new(data[0].0[0], data[0].0[1]))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Result<Self::InPoint, ConversionError> {
        let mut data = [Coor2D([input.x, input.y])];
        self.context
            .apply(self.op, Inv, &mut data)
            .map_err(|err| ConversionError::Projection(err.to_string()))?;

        let lat = data[0].0[1].to_degrees();
        let lon = data[0].0[0].to_degrees();
        if !lat.is_finite() || !lon.is_finite() {
            return Err(ConversionError::Singularity(input.x, input.y));
        }

        Ok(GeoPoint2d::latlon(lat, lon))
    }
}
