use serde::{Deserialize, Serialize};

use crate::coordinate::GeoPoint2d;

/// Extent of a set of canonical points in latitude and longitude.
///
/// Used to frame a map viewport around a geometry. Antimeridian crossing is not handled: the
/// box spans the numeric min/max of longitudes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
}

impl BoundingBox {
    /// Creates a box from its corners.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Zero-sized box around a single point.
    pub fn from_point(point: &GeoPoint2d) -> Self {
        Self::new(point.lat(), point.lon(), point.lat(), point.lon())
    }

    /// Smallest box containing all points, `None` for an empty iterator.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a GeoPoint2d>) -> Option<Self> {
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |bbox, p| bbox.extend(p)))
    }

    /// Returns a box that also contains `point`.
    pub fn extend(&self, point: &GeoPoint2d) -> Self {
        self.merge(Self::from_point(point))
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            min_lat: self.min_lat.min(other.min_lat),
            min_lon: self.min_lon.min(other.min_lon),
            max_lat: self.max_lat.max(other.max_lat),
            max_lon: self.max_lon.max(other.max_lon),
        }
    }

    /// Southern edge.
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Western edge.
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    /// Northern edge.
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Eastern edge.
    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Extent in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Extent in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Middle of the box.
    pub fn center(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Returns `true` if the point is inside the box or on its edge.
    pub fn contains(&self, point: &GeoPoint2d) -> bool {
        self.min_lat <= point.lat()
            && self.max_lat >= point.lat()
            && self.min_lon <= point.lon()
            && self.max_lon >= point.lon()
    }

    /// Box grown around its center by `factor`. Useful to add padding around a viewport.
    pub fn magnify(&self, factor: f64) -> Self {
        let center = self.center();
        let half_height = self.height() / 2.0 * factor;
        let half_width = self.width() / 2.0 * factor;
        Self {
            min_lat: center.lat() - half_height,
            min_lon: center.lon() - half_width,
            max_lat: center.lat() + half_height,
            max_lon: center.lon() + half_width,
        }
    }
}
