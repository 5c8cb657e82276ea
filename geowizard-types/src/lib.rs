//! Coordinate frames and conversion math for GeoWizard.
//!
//! This crate contains the leaf components of the engine:
//! * [`CoordinateFrame`] and [`Coordinate`], the tagged description of UTM, geographic decimal,
//!   geographic DMS and Web Mercator values;
//! * [`CoordinateConverter`], which converts between any two frames through the canonical
//!   WGS84 decimal frame;
//! * the [`validator`] with per-frame range rules and parsing of raw text entry.
//!
//! ```
//! use geowizard_types::{convert, Coordinate, CoordinateFrame, Hemisphere, UtmZone};
//!
//! let zone = UtmZone::new(18, Hemisphere::North).unwrap();
//! let coord = Coordinate::utm(zone, 500_000.0, 4_649_776.0);
//! let geographic = convert(&coord, CoordinateFrame::GeographicDecimal).unwrap();
//! assert_eq!(geographic.frame(), CoordinateFrame::GeographicDecimal);
//! ```

mod bounding_box;
pub mod cartesian;
mod convert;
mod coordinate;
mod datum;
pub mod dms;
pub mod error;
mod frame;
pub mod projection;
pub mod validator;

pub use bounding_box::BoundingBox;
pub use convert::{convert, CoordinateConverter};
pub use coordinate::{Coordinate, GeoPoint2d};
pub use datum::Datum;
pub use dms::{Axis, Direction, Dms};
pub use error::{ConversionError, ValidationError};
pub use frame::{Component, CoordinateFrame, FrameHint, Hemisphere, UtmZone};
pub use validator::{validate, ValidationResult};
