//! Measurements on the WGS84 ellipsoid.
//!
//! Distances use Vincenty's inverse formulae and areas use Karney's polygon area, both from
//! `geo`. Vincenty fails to converge for nearly antipodal points, which surfaces as
//! [`MeasureError::GeodesicConvergenceFailure`].

use geo::{GeodesicArea, LineString, Point, Polygon, VincentyDistance, VincentyLength};
use geowizard_types::GeoPoint2d;

use crate::error::MeasureError;
use crate::geometry::wrap_degrees;

/// Ellipsoidal distance between two points in meters.
pub fn distance(from: &GeoPoint2d, to: &GeoPoint2d) -> Result<f64, MeasureError> {
    let to_lon = from.lon() + wrap_degrees(to.lon() - from.lon());
    Point::new(from.lon(), from.lat())
        .vincenty_distance(&Point::new(to_lon, to.lat()))
        .map_err(|_| {
            log::debug!("Geodesic distance between {from:?} and {to:?} did not converge");
            MeasureError::GeodesicConvergenceFailure
        })
}

/// Sum of geodesic lengths of the segments of an open path.
pub fn path_length(points: &[GeoPoint2d]) -> Result<f64, MeasureError> {
    if points.len() < 2 {
        return Ok(0.0);
    }

    unwrapped_line(points.iter())
        .vincenty_length()
        .map_err(|_| MeasureError::GeodesicConvergenceFailure)
}

/// Geodesic length of the implicitly closed ring through `points`.
pub fn ring_length(points: &[GeoPoint2d]) -> Result<f64, MeasureError> {
    match points.first() {
        Some(first) if points.len() > 1 => unwrapped_line(points.iter().chain([first]))
            .vincenty_length()
            .map_err(|_| MeasureError::GeodesicConvergenceFailure),
        _ => Ok(0.0),
    }
}

/// Ellipsoidal area of the implicitly closed ring through `points`, in square meters.
///
/// The value does not depend on the winding order of the ring.
pub fn area(points: &[GeoPoint2d]) -> f64 {
    let exterior = LineString::from(
        points
            .iter()
            .map(|p| (p.lon(), p.lat()))
            .collect::<Vec<_>>(),
    );
    Polygon::new(exterior, vec![]).geodesic_area_signed().abs()
}

/// Line string in which every longitude is within 180° of the previous one, so that no segment
/// goes the long way around the globe.
fn unwrapped_line<'a>(points: impl Iterator<Item = &'a GeoPoint2d>) -> LineString<f64> {
    let mut prev_lon: Option<f64> = None;
    let coords: Vec<(f64, f64)> = points
        .map(|p| {
            let lon = match prev_lon {
                Some(prev) => prev + wrap_degrees(p.lon() - prev),
                None => p.lon(),
            };
            prev_lon = Some(lon);
            (lon, p.lat())
        })
        .collect();

    LineString::from(coords)
}
