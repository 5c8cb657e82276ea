//! Engine settings.

use geowizard_types::{CoordinateFrame, Hemisphere, UtmZone};
use serde::{Deserialize, Serialize};

use crate::error::GeoWizardError;
use crate::measure::{format_area, format_length, UnitSystem};

/// Settings shared by the measurement engine, edit sessions and new projects.
///
/// All fields have defaults, so a settings file may specify only the values it changes:
///
/// ```
/// use geowizard::Settings;
///
/// let settings = Settings::from_json(r#"{ "precision": 3 }"#).unwrap();
/// assert_eq!(settings.precision, 3);
/// assert_eq!(settings.max_undo_depth, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Zone used for new UTM frames.
    pub default_zone: UtmZone,
    /// Display frame of new projects.
    pub display_frame: CoordinateFrame,
    /// Number of decimals in formatted values.
    pub precision: usize,
    /// Default units for reported measurements.
    pub unit_system: UnitSystem,
    /// Maximum number of undoable operations kept by an edit session.
    pub max_undo_depth: usize,
}

const DEFAULT_ZONE: UtmZone = match UtmZone::checked(18, Hemisphere::North) {
    Some(zone) => zone,
    None => panic!("zone 18 is valid"),
};

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_zone: DEFAULT_ZONE,
            display_frame: CoordinateFrame::Utm(DEFAULT_ZONE),
            precision: 2,
            unit_system: UnitSystem::Metric,
            max_undo_depth: 100,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON document. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, GeoWizardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the settings into a JSON document.
    pub fn to_json(&self) -> Result<String, GeoWizardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the default UTM zone.
    pub fn with_default_zone(mut self, zone: UtmZone) -> Self {
        self.default_zone = zone;
        self
    }

    /// Sets the display frame of new projects.
    pub fn with_display_frame(mut self, frame: CoordinateFrame) -> Self {
        self.display_frame = frame;
        self
    }

    /// Sets the number of decimals in formatted values.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the default unit system.
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    /// Sets the undo history bound.
    pub fn with_max_undo_depth(mut self, depth: usize) -> Self {
        self.max_undo_depth = depth;
        self
    }

    /// UTM frame of the default zone, used to pre-fill new UTM entries.
    pub fn default_utm_frame(&self) -> CoordinateFrame {
        CoordinateFrame::Utm(self.default_zone)
    }

    /// Formats a length in meters in the default units with the configured precision.
    pub fn format_length(&self, meters: f64) -> String {
        format_length(meters, self.unit_system.length_unit(), self.precision)
    }

    /// Formats an area in square meters in the default units with the configured precision.
    pub fn format_area(&self, square_meters: f64) -> String {
        format_area(square_meters, self.unit_system.area_unit(), self.precision)
    }
}
