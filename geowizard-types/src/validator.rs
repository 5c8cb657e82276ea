//! Range and format checks for coordinates in each frame.
//!
//! Validation is a pure predicate: it never converts or mutates a coordinate. It runs on raw
//! user entry before any conversion, and again on conversion output.

use lazy_static::lazy_static;
use regex::Regex;

use crate::coordinate::Coordinate;
use crate::dms::{Axis, Dms};
use crate::error::ValidationError;
use crate::frame::{Component, CoordinateFrame};
use crate::projection::WebMercator;

/// Inclusive range of UTM easting values.
pub const UTM_EASTING_RANGE: (f64, f64) = (0.0, 999_999.0);
/// Inclusive range of UTM northing values.
pub const UTM_NORTHING_RANGE: (f64, f64) = (0.0, 10_000_000.0);
/// Inclusive range of latitudes.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Inclusive range of longitudes.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
/// Slack in meters added to the Web Mercator bounds to absorb floating point rounding.
pub const WEB_MERCATOR_TOLERANCE: f64 = 1e-6;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"^-?\d+(\.\d+)?$").expect("valid regex");
}

/// Outcome of validating a single coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// All components are within range.
    Valid,
    /// A component is out of range or malformed.
    Invalid {
        /// Human readable description.
        reason: String,
        /// First offending component.
        component: Component,
    },
}

impl ValidationResult {
    /// Returns `true` for [`ValidationResult::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Converts the outcome into a `Result`.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid { reason, component } => {
                Err(ValidationError::OutOfRange { component, reason })
            }
        }
    }

    fn and_then(self, next: impl FnOnce() -> ValidationResult) -> ValidationResult {
        match self {
            Self::Valid => next(),
            invalid => invalid,
        }
    }

    fn invalid(component: Component, reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
            component,
        }
    }
}

/// Checks that every component of `coord` is within the valid range of its frame.
pub fn validate(coord: &Coordinate) -> ValidationResult {
    match coord {
        Coordinate::Utm {
            zone,
            easting,
            northing,
        } => {
            if !zone.is_valid() {
                return ValidationResult::invalid(
                    Component::Zone,
                    format!("zone {} is not within 1..=60", zone.number()),
                );
            }

            check_range(Component::Easting, *easting, UTM_EASTING_RANGE)
                .and_then(|| check_range(Component::Northing, *northing, UTM_NORTHING_RANGE))
        }
        Coordinate::GeographicDecimal { lat, lon } => {
            check_range(Component::Latitude, *lat, LATITUDE_RANGE)
                .and_then(|| check_range(Component::Longitude, *lon, LONGITUDE_RANGE))
        }
        Coordinate::GeographicDms { lat, lon } => check_dms(Component::Latitude, lat, Axis::Latitude)
            .and_then(|| check_dms(Component::Longitude, lon, Axis::Longitude)),
        Coordinate::WebMercator { x, y } => {
            let projection = WebMercator::default();
            let max_x = projection.max_x() + WEB_MERCATOR_TOLERANCE;
            let max_y = projection.max_y() + WEB_MERCATOR_TOLERANCE;
            check_range(Component::X, *x, (-max_x, max_x))
                .and_then(|| check_range(Component::Y, *y, (-max_y, max_y)))
        }
    }
}

fn check_range(component: Component, value: f64, (min, max): (f64, f64)) -> ValidationResult {
    if !value.is_finite() {
        return ValidationResult::invalid(component, format!("{value} is not a finite number"));
    }

    if value < min || value > max {
        return ValidationResult::invalid(
            component,
            format!("{value} is not within [{min}, {max}]"),
        );
    }

    ValidationResult::Valid
}

fn check_dms(component: Component, dms: &Dms, axis: Axis) -> ValidationResult {
    if dms.axis() != axis {
        return ValidationResult::invalid(
            component,
            format!(
                "direction {} does not belong to {}",
                dms.direction.letter(),
                component.name().to_lowercase()
            ),
        );
    }

    let max = axis.max_degrees();
    for (part, value, range) in [
        ("degrees", dms.degrees, (0.0, max)),
        ("minutes", dms.minutes, (0.0, 60.0)),
        ("seconds", dms.seconds, (0.0, 60.0)),
    ] {
        if !value.is_finite() {
            return ValidationResult::invalid(component, format!("{part} is not a finite number"));
        }

        let upper_ok = if part == "degrees" {
            value <= range.1
        } else {
            value < range.1
        };
        if value < range.0 || !upper_ok {
            return ValidationResult::invalid(
                component,
                format!("{part} {value} is out of range"),
            );
        }
    }

    let decimal = dms.to_decimal();
    if decimal.abs() > max {
        return ValidationResult::invalid(component, format!("{decimal} exceeds {max} degrees"));
    }

    ValidationResult::Valid
}

/// Parses a plain decimal number entered for `component`.
///
/// Only optionally signed decimals with `.` as the separator are accepted.
pub fn parse_number(text: &str, component: Component) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    let malformed = || ValidationError::Malformed {
        component,
        input: text.to_string(),
    };

    if !NUMBER.is_match(trimmed) {
        return Err(malformed());
    }

    trimmed.parse().map_err(|_| malformed())
}

/// Parses the text of the two table cells of a row into a validated coordinate.
///
/// `first` and `second` follow [`CoordinateFrame::components`] order: easting/northing for UTM,
/// latitude/longitude for geographic frames and x/y for Web Mercator. DMS cells accept the
/// formats supported by [`Dms`]'s `FromStr` implementation.
pub fn parse_coordinate(
    first: &str,
    second: &str,
    frame: CoordinateFrame,
) -> Result<Coordinate, ValidationError> {
    let [first_component, second_component] = frame.components();
    let coord = match frame {
        CoordinateFrame::Utm(zone) => Coordinate::utm(
            zone,
            parse_number(first, first_component)?,
            parse_number(second, second_component)?,
        ),
        CoordinateFrame::GeographicDecimal => Coordinate::latlon(
            parse_number(first, first_component)?,
            parse_number(second, second_component)?,
        ),
        CoordinateFrame::GeographicDms => Coordinate::dms(
            parse_dms(first, first_component)?,
            parse_dms(second, second_component)?,
        ),
        CoordinateFrame::WebMercator => Coordinate::web_mercator(
            parse_number(first, first_component)?,
            parse_number(second, second_component)?,
        ),
    };

    validate(&coord).into_result()?;
    Ok(coord)
}

fn parse_dms(text: &str, component: Component) -> Result<Dms, ValidationError> {
    text.parse().map_err(|_| ValidationError::Malformed {
        component,
        input: text.to_string(),
    })
}

/// Parses and validates every row independently.
///
/// A failing row never prevents the following rows from being processed.
pub fn validate_batch<'a>(
    rows: impl IntoIterator<Item = (&'a str, &'a str)>,
    frame: CoordinateFrame,
) -> Vec<Result<Coordinate, ValidationError>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, (first, second))| {
            let result = parse_coordinate(first, second, frame);
            if let Err(err) = &result {
                log::warn!("Row {index} rejected: {err}");
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dms::Direction;
    use crate::frame::{Hemisphere, UtmZone};
    use assert_matches::assert_matches;

    fn zone18() -> UtmZone {
        UtmZone::new(18, Hemisphere::North).unwrap()
    }

    #[test]
    fn latitude_boundary() {
        assert!(validate(&Coordinate::latlon(90.0, 0.0)).is_valid());
        assert!(validate(&Coordinate::latlon(-90.0, 0.0)).is_valid());
        assert_matches!(
            validate(&Coordinate::latlon(90.0000001, 0.0)),
            ValidationResult::Invalid {
                component: Component::Latitude,
                ..
            }
        );
    }

    #[test]
    fn longitude_boundary() {
        assert!(validate(&Coordinate::latlon(0.0, -180.0)).is_valid());
        assert!(validate(&Coordinate::latlon(0.0, 180.0)).is_valid());
        assert_matches!(
            validate(&Coordinate::latlon(0.0, -180.0000001)),
            ValidationResult::Invalid {
                component: Component::Longitude,
                ..
            }
        );
    }

    #[test]
    fn utm_ranges() {
        assert!(validate(&Coordinate::utm(zone18(), 0.0, 0.0)).is_valid());
        assert!(validate(&Coordinate::utm(zone18(), 999_999.0, 10_000_000.0)).is_valid());
        assert_matches!(
            validate(&Coordinate::utm(zone18(), -0.5, 10.0)),
            ValidationResult::Invalid {
                component: Component::Easting,
                ..
            }
        );
        assert_matches!(
            validate(&Coordinate::utm(zone18(), 500_000.0, 10_000_000.1)),
            ValidationResult::Invalid {
                component: Component::Northing,
                ..
            }
        );
    }

    #[test]
    fn non_finite_values_are_invalid() {
        assert!(!validate(&Coordinate::latlon(f64::NAN, 0.0)).is_valid());
        assert!(!validate(&Coordinate::web_mercator(0.0, f64::INFINITY)).is_valid());
    }

    #[test]
    fn web_mercator_ranges() {
        assert!(validate(&Coordinate::web_mercator(20_037_508.34, 0.0)).is_valid());
        assert!(validate(&Coordinate::web_mercator(-20_037_508.3428, 0.0)).is_valid());
        assert_matches!(
            validate(&Coordinate::web_mercator(20_037_508.35, 0.0)),
            ValidationResult::Invalid {
                component: Component::X,
                ..
            }
        );
        assert_matches!(
            validate(&Coordinate::web_mercator(0.0, -20_037_600.0)),
            ValidationResult::Invalid {
                component: Component::Y,
                ..
            }
        );
    }

    #[test]
    fn dms_parts() {
        let lon = Dms::new(77.0, 2.0, 33.0, Direction::West);
        let valid = Coordinate::dms(Dms::new(12.0, 59.0, 59.99, Direction::South), lon);
        assert!(validate(&valid).is_valid());

        let minutes = Coordinate::dms(Dms::new(12.0, 60.0, 0.0, Direction::South), lon);
        assert_matches!(
            validate(&minutes),
            ValidationResult::Invalid {
                component: Component::Latitude,
                ..
            }
        );

        let seconds = Coordinate::dms(Dms::new(12.0, 0.0, 60.0, Direction::South), lon);
        assert!(!validate(&seconds).is_valid());

        let overflow = Coordinate::dms(Dms::new(90.0, 0.0, 1.0, Direction::North), lon);
        assert!(!validate(&overflow).is_valid());
    }

    #[test]
    fn dms_direction_must_match_axis() {
        let coord = Coordinate::dms(
            Dms::new(12.0, 0.0, 0.0, Direction::East),
            Dms::new(77.0, 0.0, 0.0, Direction::West),
        );
        assert_matches!(
            validate(&coord),
            ValidationResult::Invalid {
                component: Component::Latitude,
                ..
            }
        );
    }

    #[test]
    fn parse_numbers() {
        assert_eq!(parse_number(" 12.5 ", Component::X).unwrap(), 12.5);
        assert_eq!(parse_number("-3", Component::X).unwrap(), -3.0);
        assert_matches!(
            parse_number("1e5", Component::X),
            Err(ValidationError::Malformed { .. })
        );
        assert_matches!(
            parse_number("12,5", Component::X),
            Err(ValidationError::Malformed { .. })
        );
        assert_matches!(
            parse_number("", Component::X),
            Err(ValidationError::Malformed { .. })
        );
    }

    #[test]
    fn parse_row_in_frame() {
        let coord = parse_coordinate("500000", "4649776", CoordinateFrame::Utm(zone18())).unwrap();
        assert_eq!(coord, Coordinate::utm(zone18(), 500_000.0, 4_649_776.0));

        let coord = parse_coordinate(
            "12°02'46.95\"S",
            "77 2 34.05 W",
            CoordinateFrame::GeographicDms,
        )
        .unwrap();
        assert_eq!(coord.frame(), CoordinateFrame::GeographicDms);

        assert_matches!(
            parse_coordinate("12;02;46 S", "77 2 34 W", CoordinateFrame::GeographicDms),
            Err(ValidationError::Malformed {
                component: Component::Latitude,
                ..
            })
        );
        assert_matches!(
            parse_coordinate("91", "0", CoordinateFrame::GeographicDecimal),
            Err(ValidationError::OutOfRange {
                component: Component::Latitude,
                ..
            })
        );
    }

    #[test]
    fn batch_continues_after_failures() {
        let rows = [("10", "20"), ("abc", "20"), ("95", "0"), ("-10", "-20")];
        let results = validate_batch(rows, CoordinateFrame::GeographicDecimal);

        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert_matches!(results[1], Err(ValidationError::Malformed { .. }));
        assert_matches!(results[2], Err(ValidationError::OutOfRange { .. }));
        assert_eq!(results[3], Ok(Coordinate::latlon(-10.0, -20.0)));
    }
}
