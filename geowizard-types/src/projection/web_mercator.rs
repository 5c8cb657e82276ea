use nalgebra::Point2;

use crate::coordinate::GeoPoint2d;
use crate::datum::Datum;
use crate::error::ConversionError;
use crate::projection::Projection;

/// Latitude limit of the square Web Mercator world, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

// Latitudes this close to the limit are clamped onto it instead of rejected.
const CLAMP_TOLERANCE: f64 = 1e-9;

/// Spherical Mercator projection as used by web map tiles (EPSG:3857).
///
/// The ellipsoid of the datum is ignored: points are projected onto a sphere with the
/// radius of the datum's semimajor axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WebMercator {
    datum: Datum,
}

impl WebMercator {
    /// Creates a projection using the semimajor axis of `datum` as the sphere radius.
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }

    /// Largest absolute x value (longitude 180°).
    pub fn max_x(&self) -> f64 {
        self.datum.semimajor() * std::f64::consts::PI
    }

    /// Largest absolute y value, reached at [`MAX_LATITUDE`].
    pub fn max_y(&self) -> f64 {
        self.mercator_y(MAX_LATITUDE.to_radians())
    }

    fn mercator_y(&self, lat_rad: f64) -> f64 {
        self.datum.semimajor() * lat_rad.sin().atanh()
    }

    fn clamp_latitude(lat: f64) -> Result<f64, ConversionError> {
        if !lat.is_finite() || lat.abs() > MAX_LATITUDE + CLAMP_TOLERANCE {
            return Err(ConversionError::OutOfMercatorRange { latitude: lat });
        }

        Ok(lat.clamp(-MAX_LATITUDE, MAX_LATITUDE))
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl Projection for WebMercator {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2<f64>;

    fn project(&self, input: &Self::InPoint) -> Result<Self::OutPoint, ConversionError> {
        let lat = Self::clamp_latitude(input.lat())?;
        let x = self.datum.semimajor() * input.lon_rad();
        let y = self.mercator_y(lat.to_radians());

        if x.is_finite() && y.is_finite() {
            Ok(Point2::new(x, y))
        } else {
            Err(ConversionError::Singularity(input.lat(), input.lon()))
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Result<Self::InPoint, ConversionError> {
        if !input.x.is_finite() || !input.y.is_finite() {
            return Err(ConversionError::Singularity(input.x, input.y));
        }

        let lat = (input.y / self.datum.semimajor()).sinh().atan().to_degrees();
        let lat = Self::clamp_latitude(lat)?;
        let lon = (input.x / self.datum.semimajor()).to_degrees();
        // x == ±max_x may come back a rounding error past the antimeridian
        let lon = if lon.abs() > 180.0 && lon.abs() <= 180.0 + CLAMP_TOLERANCE {
            lon.clamp(-180.0, 180.0)
        } else {
            lon
        };

        Ok(GeoPoint2d::latlon(lat, lon))
    }
}
