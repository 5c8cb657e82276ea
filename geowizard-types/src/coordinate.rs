use std::fmt::{Display, Formatter};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::dms::Dms;
use crate::frame::{CoordinateFrame, UtmZone};

/// Point on the WGS84 ellipsoid in decimal degrees. This is the canonical storage form.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint2d {
    /// Creates a point from latitude and longitude in degrees.
    pub fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a point from longitude and latitude in degrees.
    pub fn lonlat(lon: f64, lat: f64) -> Self {
        Self::latlon(lat, lon)
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    /// Longitude in radians.
    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }
}

impl AbsDiffEq for GeoPoint2d {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}

/// Creates a new [`GeoPoint2d`] from latitude and longitude values (in degrees).
///
/// ```
/// use geowizard_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        $crate::GeoPoint2d::latlon($lat, $lon)
    };
}

/// A pair of coordinate components together with the frame they are expressed in.
///
/// Components are only meaningful in combination with their frame, so the frame payload is a
/// part of every variant. Values of different variants must never be compared or combined
/// without converting them first (see [`CoordinateConverter`](crate::CoordinateConverter)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Coordinate {
    /// UTM easting and northing in meters.
    Utm {
        /// Zone the values refer to.
        zone: UtmZone,
        /// Easting in meters.
        easting: f64,
        /// Northing in meters.
        northing: f64,
    },
    /// WGS84 latitude and longitude in decimal degrees.
    GeographicDecimal {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// WGS84 latitude and longitude in degrees, minutes, seconds.
    GeographicDms {
        /// Latitude.
        lat: Dms,
        /// Longitude.
        lon: Dms,
    },
    /// Web Mercator x and y in meters.
    WebMercator {
        /// X in meters.
        x: f64,
        /// Y in meters.
        y: f64,
    },
}

impl Coordinate {
    /// UTM coordinate.
    pub fn utm(zone: UtmZone, easting: f64, northing: f64) -> Self {
        Self::Utm {
            zone,
            easting,
            northing,
        }
    }

    /// Geographic decimal coordinate.
    pub fn latlon(lat: f64, lon: f64) -> Self {
        Self::GeographicDecimal { lat, lon }
    }

    /// Geographic DMS coordinate.
    pub fn dms(lat: Dms, lon: Dms) -> Self {
        Self::GeographicDms { lat, lon }
    }

    /// Web Mercator coordinate.
    pub fn web_mercator(x: f64, y: f64) -> Self {
        Self::WebMercator { x, y }
    }

    /// Frame the coordinate is expressed in.
    pub fn frame(&self) -> CoordinateFrame {
        match self {
            Self::Utm { zone, .. } => CoordinateFrame::Utm(*zone),
            Self::GeographicDecimal { .. } => CoordinateFrame::GeographicDecimal,
            Self::GeographicDms { .. } => CoordinateFrame::GeographicDms,
            Self::WebMercator { .. } => CoordinateFrame::WebMercator,
        }
    }

    /// Numeric values of the two components in [`CoordinateFrame::components`] order.
    ///
    /// DMS components are reported as signed decimal degrees.
    pub fn values(&self) -> [f64; 2] {
        match self {
            Self::Utm {
                easting, northing, ..
            } => [*easting, *northing],
            Self::GeographicDecimal { lat, lon } => [*lat, *lon],
            Self::GeographicDms { lat, lon } => [lat.to_decimal(), lon.to_decimal()],
            Self::WebMercator { x, y } => [*x, *y],
        }
    }
}

impl From<GeoPoint2d> for Coordinate {
    fn from(point: GeoPoint2d) -> Self {
        Self::latlon(point.lat(), point.lon())
    }
}

/// Coordinates are approximately equal only if they share a frame. DMS angles are compared by
/// their decimal values.
impl AbsDiffEq for Coordinate {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        if self.frame() != other.frame() {
            return false;
        }

        let [a1, a2] = self.values();
        let [b1, b2] = other.values();
        a1.abs_diff_eq(&b1, epsilon) && a2.abs_diff_eq(&b2, epsilon)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utm {
                zone,
                easting,
                northing,
            } => write!(f, "{zone} {easting:.3}E {northing:.3}N"),
            Self::GeographicDecimal { lat, lon } => write!(f, "{lat:.8}, {lon:.8}"),
            Self::GeographicDms { lat, lon } => write!(f, "{lat} {lon}"),
            Self::WebMercator { x, y } => write!(f, "{x:.3}, {y:.3}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dms::Axis;
    use crate::frame::Hemisphere;

    #[test]
    fn frame_of_coordinate() {
        let zone = UtmZone::new(18, Hemisphere::South).unwrap();
        assert_eq!(
            Coordinate::utm(zone, 500_000.0, 8_000_000.0).frame(),
            CoordinateFrame::Utm(zone)
        );
        assert_eq!(
            Coordinate::latlon(1.0, 2.0).frame(),
            CoordinateFrame::GeographicDecimal
        );
        assert_eq!(
            Coordinate::web_mercator(1.0, 2.0).frame(),
            CoordinateFrame::WebMercator
        );
    }

    #[test]
    fn dms_values_are_signed() {
        let coord = Coordinate::dms(
            Dms::from_decimal(-12.5, Axis::Latitude),
            Dms::from_decimal(-77.25, Axis::Longitude),
        );
        assert_eq!(coord.values(), [-12.5, -77.25]);
    }

    #[test]
    fn approximate_equality_requires_same_frame() {
        let a = Coordinate::latlon(10.0, 20.0);
        let b = Coordinate::latlon(10.0 + 1e-9, 20.0);
        assert!(a.abs_diff_eq(&b, 1e-6));
        assert!(!a.abs_diff_eq(&Coordinate::web_mercator(10.0, 20.0), 1e-6));
    }

    #[test]
    fn serializes_with_frame_payload() {
        let zone = UtmZone::new(18, Hemisphere::North).unwrap();
        let coord = Coordinate::utm(zone, 500_000.0, 4_649_776.0);
        let json = serde_json::to_string(&coord).unwrap();
        let restored: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, coord);
    }
}
