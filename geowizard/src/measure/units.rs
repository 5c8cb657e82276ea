//! Units of measurement and formatting of measured values.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Unit of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Meters.
    Meters,
    /// Kilometers.
    Kilometers,
    /// International feet.
    Feet,
    /// International miles.
    Miles,
}

impl LengthUnit {
    /// Length of one unit in meters.
    pub fn meters(&self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => 1_000.0,
            Self::Feet => 0.3048,
            Self::Miles => 1_609.344,
        }
    }

    /// Converts a length in meters into this unit.
    pub fn from_meters(&self, value: f64) -> f64 {
        value / self.meters()
    }

    /// Short unit symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Feet => "ft",
            Self::Miles => "mi",
        }
    }
}

impl Display for LengthUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unit of area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUnit {
    /// Square meters.
    SquareMeters,
    /// Hectares.
    Hectares,
    /// Square kilometers.
    SquareKilometers,
    /// Square international feet.
    SquareFeet,
    /// International acres.
    Acres,
    /// Square international miles.
    SquareMiles,
}

impl AreaUnit {
    /// Area of one unit in square meters.
    pub fn square_meters(&self) -> f64 {
        match self {
            Self::SquareMeters => 1.0,
            Self::Hectares => 10_000.0,
            Self::SquareKilometers => 1_000_000.0,
            Self::SquareFeet => 0.092_903_04,
            Self::Acres => 4_046.856_422_4,
            Self::SquareMiles => 2_589_988.110_336,
        }
    }

    /// Converts an area in square meters into this unit.
    pub fn from_square_meters(&self, value: f64) -> f64 {
        value / self.square_meters()
    }

    /// Short unit symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::SquareMeters => "m²",
            Self::Hectares => "ha",
            Self::SquareKilometers => "km²",
            Self::SquareFeet => "ft²",
            Self::Acres => "ac",
            Self::SquareMiles => "mi²",
        }
    }
}

impl Display for AreaUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Default units used to report measurements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Meters and square meters.
    #[default]
    Metric,
    /// Feet and acres.
    Imperial,
}

impl UnitSystem {
    /// Default length unit of the system.
    pub fn length_unit(&self) -> LengthUnit {
        match self {
            Self::Metric => LengthUnit::Meters,
            Self::Imperial => LengthUnit::Feet,
        }
    }

    /// Default area unit of the system.
    pub fn area_unit(&self) -> AreaUnit {
        match self {
            Self::Metric => AreaUnit::SquareMeters,
            Self::Imperial => AreaUnit::Acres,
        }
    }
}

/// Formats a length given in meters, e.g. `1,234.57 m`.
pub fn format_length(meters: f64, unit: LengthUnit, precision: usize) -> String {
    format!(
        "{} {}",
        format_number(unit.from_meters(meters), precision),
        unit.symbol()
    )
}

/// Formats an area given in square meters, e.g. `2.47 ac`.
pub fn format_area(square_meters: f64, unit: AreaUnit, precision: usize) -> String {
    format!(
        "{} {}",
        format_number(unit.from_square_meters(square_meters), precision),
        unit.symbol()
    )
}

/// Values below one get two extra decimals. Values from one thousand up are grouped by
/// thousands.
fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    if value.abs() < 1.0 {
        return format!("{:.1$}", value, precision + 2);
    }

    let formatted = format!("{:.1$}", value.abs(), precision);
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }

    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}
