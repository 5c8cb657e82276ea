//! Coordinate reference frames supported by the engine.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinate::GeoPoint2d;
use crate::error::ConversionError;

/// Hemisphere of a UTM zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    /// Northern hemisphere, false northing 0.
    North,
    /// Southern hemisphere, false northing 10 000 000 m.
    South,
}

impl Hemisphere {
    /// Hemisphere a latitude falls into. The equator belongs to the north.
    pub fn of_latitude(lat: f64) -> Self {
        if lat >= 0.0 {
            Self::North
        } else {
            Self::South
        }
    }

    /// False northing applied to projected coordinates in this hemisphere.
    pub fn false_northing(&self) -> f64 {
        match self {
            Self::North => 0.0,
            Self::South => 10_000_000.0,
        }
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::North => write!(f, "N"),
            Self::South => write!(f, "S"),
        }
    }
}

impl FromStr for Hemisphere {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" | "norte" => Ok(Self::North),
            "s" | "south" | "sur" => Ok(Self::South),
            _ => Err(ConversionError::InvalidHemisphere(s.to_string())),
        }
    }
}

/// UTM zone: a 6° wide longitudinal band together with its hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUtmZone")]
pub struct UtmZone {
    number: u8,
    hemisphere: Hemisphere,
}

#[derive(Deserialize)]
struct RawUtmZone {
    number: u8,
    hemisphere: Hemisphere,
}

impl TryFrom<RawUtmZone> for UtmZone {
    type Error = ConversionError;

    fn try_from(raw: RawUtmZone) -> Result<Self, Self::Error> {
        Self::new(raw.number, raw.hemisphere)
    }
}

impl UtmZone {
    /// Smallest zone number.
    pub const MIN: u8 = 1;
    /// Largest zone number.
    pub const MAX: u8 = 60;

    /// Scale factor on the central meridian.
    pub const SCALE_FACTOR: f64 = 0.9996;
    /// False easting of every zone.
    pub const FALSE_EASTING: f64 = 500_000.0;

    /// Creates a zone, rejecting numbers outside of `1..=60`.
    pub fn new(number: u8, hemisphere: Hemisphere) -> Result<Self, ConversionError> {
        if !(Self::MIN..=Self::MAX).contains(&number) {
            return Err(ConversionError::InvalidZone(number));
        }

        Ok(Self { number, hemisphere })
    }

    /// Same as [`UtmZone::new`], usable in constant expressions.
    pub const fn checked(number: u8, hemisphere: Hemisphere) -> Option<Self> {
        if number >= Self::MIN && number <= Self::MAX {
            Some(Self { number, hemisphere })
        } else {
            None
        }
    }

    /// Zone number.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Zone hemisphere.
    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Returns `true` if the zone number is within `1..=60`.
    ///
    /// Every constructor rejects invalid numbers, including deserialization.
    pub fn is_valid(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.number)
    }

    /// Longitude of the central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }

    /// Standard zone containing the given point.
    ///
    /// Norway and Svalbard exceptions are not applied.
    pub fn containing(point: &GeoPoint2d) -> Self {
        let lon = normalize_longitude(point.lon());
        let number = (((lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8;

        Self {
            number,
            hemisphere: Hemisphere::of_latitude(point.lat()),
        }
    }

    /// EPSG code of the WGS84 UTM projection for the zone.
    pub fn epsg(&self) -> u32 {
        let base = match self.hemisphere {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        };

        base + u32::from(self.number)
    }
}

impl Display for UtmZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number, self.hemisphere)
    }
}

fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Named component of a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// UTM zone metadata.
    Zone,
    /// UTM easting.
    Easting,
    /// UTM northing.
    Northing,
    /// Geographic latitude.
    Latitude,
    /// Geographic longitude.
    Longitude,
    /// Web Mercator x.
    X,
    /// Web Mercator y.
    Y,
}

impl Component {
    /// Display name of the component.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zone => "Zone",
            Self::Easting => "Easting",
            Self::Northing => "Northing",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
            Self::X => "X",
            Self::Y => "Y",
        }
    }
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference frame a coordinate is expressed in.
///
/// Frames are plain descriptors and never own coordinate data. Geographic frames are always
/// WGS84.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateFrame {
    /// Universal Transverse Mercator, easting and northing in meters.
    Utm(UtmZone),
    /// Latitude and longitude in decimal degrees.
    GeographicDecimal,
    /// Latitude and longitude as degrees, minutes and seconds.
    GeographicDms,
    /// Spherical Mercator (EPSG:3857), x and y in meters.
    WebMercator,
}

impl CoordinateFrame {
    /// The frame all vertices are stored in.
    pub const CANONICAL: CoordinateFrame = CoordinateFrame::GeographicDecimal;

    /// Components in the order they are entered and stored.
    pub fn components(&self) -> [Component; 2] {
        match self {
            Self::Utm(_) => [Component::Easting, Component::Northing],
            Self::GeographicDecimal | Self::GeographicDms => {
                [Component::Latitude, Component::Longitude]
            }
            Self::WebMercator => [Component::X, Component::Y],
        }
    }

    /// Column labels for the components of the frame.
    pub fn component_labels(&self) -> [&'static str; 2] {
        match self {
            Self::Utm(_) => ["Easting (X)", "Northing (Y)"],
            Self::GeographicDecimal => ["Latitude", "Longitude"],
            Self::GeographicDms => ["Latitude (DMS)", "Longitude (DMS)"],
            Self::WebMercator => ["X (meters)", "Y (meters)"],
        }
    }

    /// EPSG code of the frame.
    pub fn epsg(&self) -> u32 {
        match self {
            Self::Utm(zone) => zone.epsg(),
            Self::GeographicDecimal | Self::GeographicDms => 4326,
            Self::WebMercator => 3857,
        }
    }

    /// Returns `true` for frames with planar coordinates in meters.
    pub fn is_projected(&self) -> bool {
        matches!(self, Self::Utm(_) | Self::WebMercator)
    }

    /// UTM zone of the frame, if it is a UTM frame.
    pub fn utm_zone(&self) -> Option<UtmZone> {
        match self {
            Self::Utm(zone) => Some(*zone),
            _ => None,
        }
    }

    /// Human readable frame name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utm(_) => "UTM",
            Self::GeographicDecimal => "Geographic (Decimal Degrees)",
            Self::GeographicDms => "Geographic (DMS)",
            Self::WebMercator => "Web Mercator",
        }
    }
}

impl Display for CoordinateFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utm(zone) => write!(f, "UTM {zone}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Frame description as supplied by importers.
///
/// Unlike [`CoordinateFrame`], UTM zone metadata may be missing here. Resolving such a hint
/// fails instead of guessing the zone from coordinate magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameHint {
    /// UTM with possibly unknown zone or hemisphere.
    Utm {
        /// Zone number if present in the source metadata.
        zone: Option<u8>,
        /// Hemisphere if present in the source metadata.
        hemisphere: Option<Hemisphere>,
    },
    /// Geographic decimal degrees (e.g. KML).
    GeographicDecimal,
    /// Geographic degrees, minutes, seconds.
    GeographicDms,
    /// Web Mercator.
    WebMercator,
}

impl FrameHint {
    /// Turns the hint into a complete frame.
    pub fn resolve(&self) -> Result<CoordinateFrame, ConversionError> {
        match *self {
            Self::Utm {
                zone: Some(zone),
                hemisphere: Some(hemisphere),
            } => Ok(CoordinateFrame::Utm(UtmZone::new(zone, hemisphere)?)),
            Self::Utm { zone, hemisphere } => Err(ConversionError::AmbiguousZone {
                zone,
                hemisphere: hemisphere.is_some(),
            }),
            Self::GeographicDecimal => Ok(CoordinateFrame::GeographicDecimal),
            Self::GeographicDms => Ok(CoordinateFrame::GeographicDms),
            Self::WebMercator => Ok(CoordinateFrame::WebMercator),
        }
    }
}

impl From<CoordinateFrame> for FrameHint {
    fn from(frame: CoordinateFrame) -> Self {
        match frame {
            CoordinateFrame::Utm(zone) => Self::Utm {
                zone: Some(zone.number()),
                hemisphere: Some(zone.hemisphere()),
            },
            CoordinateFrame::GeographicDecimal => Self::GeographicDecimal,
            CoordinateFrame::GeographicDms => Self::GeographicDms,
            CoordinateFrame::WebMercator => Self::WebMercator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon;
    use assert_matches::assert_matches;

    #[test]
    fn zone_number_bounds() {
        assert!(UtmZone::new(1, Hemisphere::North).is_ok());
        assert!(UtmZone::new(60, Hemisphere::South).is_ok());
        assert_matches!(
            UtmZone::new(0, Hemisphere::North),
            Err(ConversionError::InvalidZone(0))
        );
        assert_matches!(
            UtmZone::new(61, Hemisphere::North),
            Err(ConversionError::InvalidZone(61))
        );
    }

    #[test]
    fn deserialization_checks_zone_number() {
        let zone: UtmZone =
            serde_json::from_str(r#"{"number":18,"hemisphere":"South"}"#).unwrap();
        assert_eq!(zone, UtmZone::new(18, Hemisphere::South).unwrap());

        assert!(serde_json::from_str::<UtmZone>(r#"{"number":0,"hemisphere":"North"}"#).is_err());
        assert!(serde_json::from_str::<UtmZone>(r#"{"number":61,"hemisphere":"North"}"#).is_err());
    }

    #[test]
    fn central_meridian() {
        let zone = UtmZone::new(18, Hemisphere::North).unwrap();
        assert_eq!(zone.central_meridian(), -75.0);
        let zone = UtmZone::new(31, Hemisphere::North).unwrap();
        assert_eq!(zone.central_meridian(), 3.0);
    }

    #[test]
    fn zone_containing_point() {
        let zone = UtmZone::containing(&latlon!(-12.05, -77.04));
        assert_eq!(zone, UtmZone::new(18, Hemisphere::South).unwrap());

        let zone = UtmZone::containing(&latlon!(52.0, 180.0));
        assert_eq!(zone.number(), 1);

        let zone = UtmZone::containing(&latlon!(0.0, 179.99));
        assert_eq!(zone, UtmZone::new(60, Hemisphere::North).unwrap());
    }

    #[test]
    fn epsg_codes() {
        let north = CoordinateFrame::Utm(UtmZone::new(18, Hemisphere::North).unwrap());
        let south = CoordinateFrame::Utm(UtmZone::new(18, Hemisphere::South).unwrap());
        assert_eq!(north.epsg(), 32618);
        assert_eq!(south.epsg(), 32718);
        assert_eq!(CoordinateFrame::GeographicDms.epsg(), 4326);
        assert_eq!(CoordinateFrame::WebMercator.epsg(), 3857);
    }

    #[test]
    fn hemisphere_names() {
        assert_eq!("Norte".parse::<Hemisphere>().unwrap(), Hemisphere::North);
        assert_eq!(" south ".parse::<Hemisphere>().unwrap(), Hemisphere::South);
        assert_matches!(
            "east".parse::<Hemisphere>(),
            Err(ConversionError::InvalidHemisphere(_))
        );
    }

    #[test]
    fn hint_without_zone_is_ambiguous() {
        let hint = FrameHint::Utm {
            zone: None,
            hemisphere: Some(Hemisphere::North),
        };
        assert_matches!(
            hint.resolve(),
            Err(ConversionError::AmbiguousZone {
                zone: None,
                hemisphere: true
            })
        );

        let hint = FrameHint::Utm {
            zone: Some(18),
            hemisphere: None,
        };
        assert_matches!(hint.resolve(), Err(ConversionError::AmbiguousZone { .. }));
    }

    #[test]
    fn hint_round_trip() {
        let frame = CoordinateFrame::Utm(UtmZone::new(33, Hemisphere::South).unwrap());
        assert_eq!(FrameHint::from(frame).resolve().unwrap(), frame);
        assert_eq!(
            FrameHint::GeographicDecimal.resolve().unwrap(),
            CoordinateFrame::GeographicDecimal
        );
    }
}
