//! Area, perimeter and distance of geometries.
//!
//! All values are computed in SI units (meters and square meters). Conversion into other units
//! happens only at the boundary, see [`Measurement::in_units`] and the [`units`] module.

use geowizard_types::{CoordinateConverter, CoordinateFrame, GeoPoint2d, UtmZone};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, MeasureError};
use crate::geometry::{mean_position, Geometry, GeometryKind};

pub mod curve;
mod geodesic;
pub mod planar;
pub mod units;

pub use curve::{CurveDirection, CurveSegment, SegmentCurve};
pub use geodesic::{area as geodesic_area, distance as geodesic_distance};
pub use units::{format_area, format_length, AreaUnit, LengthUnit, UnitSystem};

/// Method of measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementPolicy {
    /// Euclidean measurement in a UTM plane.
    ///
    /// When the zone is not given, the UTM zone shared by all vertices is used if they were all
    /// entered in the same one, otherwise the zone containing the centroid of the geometry.
    Planar {
        /// Explicit zone of the plane.
        zone: Option<UtmZone>,
    },
    /// Measurement on the WGS84 ellipsoid.
    Geodesic,
}

impl MeasurementPolicy {
    /// Usual policy for a frame: planar for projected frames, geodesic for geographic ones.
    pub fn for_frame(frame: CoordinateFrame) -> Self {
        match frame {
            CoordinateFrame::Utm(zone) => Self::Planar { zone: Some(zone) },
            CoordinateFrame::WebMercator => Self::Planar { zone: None },
            CoordinateFrame::GeographicDecimal | CoordinateFrame::GeographicDms => Self::Geodesic,
        }
    }
}

/// Result of measuring a geometry. Values that do not apply to the geometry kind are `None`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Area of a polygon.
    pub area: Option<f64>,
    /// Length of the closed ring of a polygon.
    pub perimeter: Option<f64>,
    /// Path length of a polyline.
    pub distance: Option<f64>,
}

impl Measurement {
    /// Converts the values from SI into the given units.
    pub fn in_units(&self, length: LengthUnit, area: AreaUnit) -> Self {
        Self {
            area: self.area.map(|v| area.from_square_meters(v)),
            perimeter: self.perimeter.map(|v| length.from_meters(v)),
            distance: self.distance.map(|v| length.from_meters(v)),
        }
    }

    /// Converts the values into the default units of a unit system.
    pub fn in_system(&self, system: UnitSystem) -> Self {
        self.in_units(system.length_unit(), system.area_unit())
    }
}

/// Computes [`Measurement`]s of geometries.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeasurementEngine {
    converter: CoordinateConverter,
}

impl MeasurementEngine {
    /// Creates an engine projecting with the given converter.
    pub fn new(converter: CoordinateConverter) -> Self {
        Self { converter }
    }

    /// Measures a geometry.
    pub fn measure(
        &self,
        geometry: &Geometry,
        policy: MeasurementPolicy,
    ) -> Result<Measurement, MeasureError> {
        self.measure_with_curves(geometry, policy, &[])
    }

    /// Measures a geometry some segments of which are circular curves.
    ///
    /// In a planar policy the length of every curved segment is its arc length instead of the
    /// straight distance between its vertices. The chord of each curve must match that distance
    /// within [`CurveSegment::tolerance`]. Area is always computed from the straight segments.
    ///
    /// Curves are ignored by the geodesic policy and for points.
    pub fn measure_with_curves(
        &self,
        geometry: &Geometry,
        policy: MeasurementPolicy,
        curves: &[SegmentCurve],
    ) -> Result<Measurement, MeasureError> {
        if geometry.kind() == GeometryKind::Point {
            return Ok(Measurement::default());
        }

        let positions: Vec<GeoPoint2d> = geometry.positions().copied().collect();
        let closed = geometry.kind() == GeometryKind::Polygon;
        let measurement = match policy {
            MeasurementPolicy::Planar { zone } => {
                let zone = zone.unwrap_or_else(|| planar_zone(geometry));
                log::debug!("Measuring {} in UTM zone {zone}", geometry.kind());
                let projected = self.converter.project_to_zone(&positions, zone)?;
                let length = curved_length(&projected, closed, curves)?;

                if closed {
                    Measurement {
                        area: Some(planar::area(&projected)),
                        perimeter: Some(length),
                        distance: None,
                    }
                } else {
                    Measurement {
                        distance: Some(length),
                        ..Default::default()
                    }
                }
            }
            MeasurementPolicy::Geodesic => {
                if !curves.is_empty() {
                    log::debug!("Ignoring {} curves in geodesic measurement", curves.len());
                }

                if closed {
                    Measurement {
                        area: Some(geodesic::area(&positions)),
                        perimeter: Some(geodesic::ring_length(&positions)?),
                        distance: None,
                    }
                } else {
                    Measurement {
                        distance: Some(geodesic::path_length(&positions)?),
                        ..Default::default()
                    }
                }
            }
        };

        Ok(measurement)
    }

    /// Distance between two points in meters.
    ///
    /// A planar policy without an explicit zone uses the zone containing the midpoint.
    pub fn distance_between(
        &self,
        a: &GeoPoint2d,
        b: &GeoPoint2d,
        policy: MeasurementPolicy,
    ) -> Result<f64, MeasureError> {
        match policy {
            MeasurementPolicy::Planar { zone } => {
                let zone = zone.unwrap_or_else(|| UtmZone::containing(&mean_position([a, b])));
                let projected = self.converter.project_to_zone(&[*a, *b], zone)?;
                Ok(planar::path_length(&projected))
            }
            MeasurementPolicy::Geodesic => geodesic::distance(a, b),
        }
    }
}

fn curved_length(
    projected: &[Point2<f64>],
    closed: bool,
    curves: &[SegmentCurve],
) -> Result<f64, CurveError> {
    let chords = planar::segment_lengths(projected, closed);
    let mut lengths = chords.clone();
    let mut curved = vec![false; chords.len()];

    for SegmentCurve { segment, curve } in curves {
        let segment = *segment;
        let (Some(&length), Some(seen)) = (chords.get(segment), curved.get_mut(segment)) else {
            return Err(CurveError::SegmentOutOfBounds {
                segment,
                segments: chords.len(),
            });
        };

        if *seen {
            return Err(CurveError::DuplicateSegment(segment));
        }
        *seen = true;

        if (length - curve.chord()).abs() > curve.tolerance() {
            return Err(CurveError::ChordMismatch {
                segment,
                chord: curve.chord(),
                length,
            });
        }

        lengths[segment] = curve.arc_length();
    }

    Ok(lengths.iter().sum())
}

fn planar_zone(geometry: &Geometry) -> UtmZone {
    geometry
        .common_utm_frame()
        .and_then(|frame| frame.utm_zone())
        .unwrap_or_else(|| UtmZone::containing(&geometry.centroid()))
}
