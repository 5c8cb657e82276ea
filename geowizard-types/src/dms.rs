//! Degrees, minutes and seconds representation of angular coordinates.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    // 19°25'57.36"N, 19d 25m 57.36s N
    static ref DMS_SYMBOLS: Regex = Regex::new(
        r#"^(\d+(?:\.\d+)?)\s*[°d]\s*(\d+(?:\.\d+)?)\s*['′m]\s*(\d+(?:\.\d+)?)\s*["″s]?\s*([NSEWnsew])$"#
    )
    .expect("valid regex");
    // 19 25 57.36 N
    static ref DMS_SPACES: Regex =
        Regex::new(r"^(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+([NSEWnsew])$")
            .expect("valid regex");
    // 19°25'N
    static ref DM_SYMBOLS: Regex =
        Regex::new(r"^(\d+(?:\.\d+)?)\s*[°d]\s*(\d+(?:\.\d+)?)\s*['′m]\s*([NSEWnsew])$")
            .expect("valid regex");
}

/// Geographic axis an angle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// North-south angle, `-90..=90`.
    Latitude,
    /// East-west angle, `-180..=180`.
    Longitude,
}

impl Axis {
    /// Largest absolute value of an angle on this axis.
    pub fn max_degrees(&self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }
}

/// Cardinal direction carrying the sign of a DMS angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Positive latitude.
    North,
    /// Negative latitude.
    South,
    /// Positive longitude.
    East,
    /// Negative longitude.
    West,
}

impl Direction {
    /// Direction of a signed decimal value on the given axis. Zero is positive.
    pub fn for_value(value: f64, axis: Axis) -> Self {
        match (axis, value.is_sign_negative() && value != 0.0) {
            (Axis::Latitude, false) => Self::North,
            (Axis::Latitude, true) => Self::South,
            (Axis::Longitude, false) => Self::East,
            (Axis::Longitude, true) => Self::West,
        }
    }

    /// Axis the direction belongs to.
    pub fn axis(&self) -> Axis {
        match self {
            Self::North | Self::South => Axis::Latitude,
            Self::East | Self::West => Axis::Longitude,
        }
    }

    /// Returns `true` for south and west.
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::South | Self::West)
    }

    /// Single letter abbreviation.
    pub fn letter(&self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }

    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "N" | "n" => Some(Self::North),
            "S" | "s" => Some(Self::South),
            "E" | "e" => Some(Self::East),
            "W" | "w" => Some(Self::West),
            _ => None,
        }
    }
}

/// Angle split into degrees, minutes and seconds.
///
/// All parts are non-negative, the sign is carried by [`Direction`]. Values are not
/// range checked on construction; see [`validate`](crate::validate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Whole degrees.
    pub degrees: f64,
    /// Whole minutes, `0..60`.
    pub minutes: f64,
    /// Seconds with fraction, `0..60`.
    pub seconds: f64,
    /// Hemisphere direction.
    pub direction: Direction,
}

impl Dms {
    /// Creates a new angle.
    pub fn new(degrees: f64, minutes: f64, seconds: f64, direction: Direction) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
            direction,
        }
    }

    /// Splits a decimal angle. Degrees and minutes are floored, seconds keep the remainder.
    pub fn from_decimal(value: f64, axis: Axis) -> Self {
        let direction = Direction::for_value(value, axis);
        let abs = value.abs();
        let degrees = abs.floor();
        let minutes_decimal = (abs - degrees) * 60.0;
        let minutes = minutes_decimal.floor();
        let seconds = (minutes_decimal - minutes) * 60.0;

        Self {
            degrees,
            minutes,
            seconds,
            direction,
        }
    }

    /// Signed decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        let value = self.degrees + self.minutes / 60.0 + self.seconds / 3600.0;
        if self.direction.is_negative() {
            -value
        } else {
            value
        }
    }

    /// Axis of the angle, derived from its direction.
    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }
}

impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}°{:02}'{:05.2}\"{}",
            self.degrees,
            self.minutes,
            self.seconds,
            self.direction.letter()
        )
    }
}

/// Text could not be parsed as a DMS angle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized DMS format {0:?}, expected e.g. 19°25'57.36\"N or 19 25 57.36 N")]
pub struct DmsParseError(pub String);

impl FromStr for Dms {
    type Err = DmsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let error = || DmsParseError(s.to_string());

        let (degrees, minutes, seconds, direction) = if let Some(caps) = DMS_SYMBOLS
            .captures(input)
            .or_else(|| DMS_SPACES.captures(input))
        {
            (
                caps[1].parse::<f64>(),
                caps[2].parse::<f64>(),
                caps[3].parse::<f64>(),
                caps[4].to_string(),
            )
        } else if let Some(caps) = DM_SYMBOLS.captures(input) {
            (
                caps[1].parse::<f64>(),
                caps[2].parse::<f64>(),
                Ok(0.0),
                caps[3].to_string(),
            )
        } else {
            return Err(error());
        };

        Ok(Self {
            degrees: degrees.map_err(|_| error())?,
            minutes: minutes.map_err(|_| error())?,
            seconds: seconds.map_err(|_| error())?,
            direction: Direction::from_letter(&direction).ok_or_else(error)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn half_degree_is_exact() {
        let dms = Dms::from_decimal(45.5, Axis::Latitude);
        assert_eq!(dms, Dms::new(45.0, 30.0, 0.0, Direction::North));
        assert_eq!(dms.to_decimal(), 45.5);
    }

    #[test]
    fn negative_values_get_direction() {
        let dms = Dms::from_decimal(-77.0425, Axis::Longitude);
        assert_eq!(dms.direction, Direction::West);
        assert_eq!(dms.degrees, 77.0);
        assert_eq!(dms.minutes, 2.0);
        assert_abs_diff_eq!(dms.seconds, 33.0, epsilon = 1e-9);
        assert_abs_diff_eq!(dms.to_decimal(), -77.0425, epsilon = 1e-12);
    }

    #[test]
    fn decimal_round_trip_precision() {
        for value in [0.1, 12.345678, -33.999999, 89.9999999, -179.1234567] {
            let dms = Dms::from_decimal(value, Axis::Longitude);
            assert!(dms.minutes < 60.0 && dms.seconds < 60.0);
            assert_abs_diff_eq!(dms.to_decimal(), value, epsilon = 1e-9);
        }
    }

    #[test]
    fn parse_symbols() {
        let dms: Dms = "19°25'57.36\"N".parse().unwrap();
        assert_eq!(dms, Dms::new(19.0, 25.0, 57.36, Direction::North));

        let dms: Dms = "19° 25' 57.36\" s".parse().unwrap();
        assert_eq!(dms.direction, Direction::South);

        let dms: Dms = "99d 10m 5.5s W".parse().unwrap();
        assert_eq!(dms, Dms::new(99.0, 10.0, 5.5, Direction::West));
    }

    #[test]
    fn parse_spaces_and_short_form() {
        let dms: Dms = "19 25 57.36 N".parse().unwrap();
        assert_eq!(dms, Dms::new(19.0, 25.0, 57.36, Direction::North));

        let dms: Dms = "19°25'E".parse().unwrap();
        assert_eq!(dms, Dms::new(19.0, 25.0, 0.0, Direction::East));
    }

    #[test]
    fn parse_rejects_wrong_separators() {
        assert_matches!("19;25;57 N".parse::<Dms>(), Err(DmsParseError(_)));
        assert_matches!("19°25'57\"".parse::<Dms>(), Err(DmsParseError(_)));
        assert_matches!("abc".parse::<Dms>(), Err(DmsParseError(_)));
    }

    #[test]
    fn display() {
        let dms = Dms::new(19.0, 5.0, 7.364, Direction::North);
        assert_eq!(dms.to_string(), "19°05'07.36\"N");
    }
}
