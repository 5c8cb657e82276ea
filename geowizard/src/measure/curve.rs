//! Circular arcs of survey boundaries.
//!
//! A boundary segment may be a circular curve defined by its radius and deflection angle (delta)
//! instead of a straight chord. The derived elements follow the usual route surveying formulas:
//!
//! | Element | Formula |
//! |---|---|
//! | Arc length | `R·Δ` |
//! | Subtangent | `R·tan(Δ/2)` |
//! | External | `R·(sec(Δ/2) − 1)` |
//! | Chord | `2R·sin(Δ/2)` |
//! | Middle ordinate | `R·(1 − cos(Δ/2))` |
//!
//! Curves are only meaningful in a projected plane, see
//! [`MeasurementEngine::measure_with_curves`](super::MeasurementEngine::measure_with_curves).

use std::f64::consts::TAU;

use lazy_static::lazy_static;
use nalgebra::Point2;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// Number of arc pieces produced by [`CurveSegment::densify`] when no other value is requested.
pub const DEFAULT_DENSIFY_SEGMENTS: usize = 15;

lazy_static! {
    static ref DECIMAL_DELTA: Regex =
        Regex::new(r"^(\d+(?:\.\d+)?)\s*°?$").expect("valid regex");
    static ref SYMBOL_DELTA: Regex =
        Regex::new(r#"^(\d+)\s*°\s*(\d+)\s*'\s*(\d+(?:\.\d+)?)\s*"$"#).expect("valid regex");
    static ref LETTER_DELTA: Regex =
        Regex::new(r"(?i)^(\d+)\s*d\s*(\d+)\s*m\s*(\d+(?:\.\d+)?)\s*s$").expect("valid regex");
}

/// Turning direction of a curve, looking along the boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveDirection {
    /// Curve to the right.
    #[default]
    Clockwise,
    /// Curve to the left.
    CounterClockwise,
}

impl CurveDirection {
    fn sign(&self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }
}

/// Circular curve given by its radius and deflection angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurveSegment")]
pub struct CurveSegment {
    radius: f64,
    delta: f64,
    direction: CurveDirection,
}

#[derive(Deserialize)]
struct RawCurveSegment {
    radius: f64,
    delta: f64,
    #[serde(default)]
    direction: CurveDirection,
}

impl TryFrom<RawCurveSegment> for CurveSegment {
    type Error = CurveError;

    fn try_from(raw: RawCurveSegment) -> Result<Self, Self::Error> {
        Self::new(raw.radius, raw.delta, raw.direction)
    }
}

impl CurveSegment {
    /// Creates a curve. The radius is in meters and must be positive, the delta is in decimal
    /// degrees and must be within `(0, 360)`.
    pub fn new(radius: f64, delta: f64, direction: CurveDirection) -> Result<Self, CurveError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CurveError::InvalidRadius(radius));
        }

        if !delta.is_finite() || delta <= 0.0 || delta >= 360.0 {
            return Err(CurveError::InvalidDelta(delta));
        }

        Ok(Self {
            radius,
            delta,
            direction,
        })
    }

    /// Creates a curve with the delta given as text, see [`parse_delta`].
    pub fn with_delta_text(
        radius: f64,
        delta: &str,
        direction: CurveDirection,
    ) -> Result<Self, CurveError> {
        Self::new(radius, parse_delta(delta)?, direction)
    }

    /// Radius in meters.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Deflection angle in decimal degrees.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Turning direction.
    pub fn direction(&self) -> CurveDirection {
        self.direction
    }

    fn half_delta(&self) -> f64 {
        (self.delta / 2.0).to_radians()
    }

    /// Length along the arc.
    pub fn arc_length(&self) -> f64 {
        self.radius * self.delta.to_radians()
    }

    /// Distance from a tangent point to the point of intersection of the tangents.
    pub fn subtangent(&self) -> f64 {
        self.radius * self.half_delta().tan()
    }

    /// Distance from the middle of the arc to the point of intersection of the tangents.
    pub fn external(&self) -> f64 {
        self.radius * (1.0 / self.half_delta().cos() - 1.0)
    }

    /// Straight distance between the ends of the arc.
    pub fn chord(&self) -> f64 {
        2.0 * self.radius * self.half_delta().sin()
    }

    /// Distance from the middle of the chord to the middle of the arc.
    pub fn middle_ordinate(&self) -> f64 {
        self.radius * (1.0 - self.half_delta().cos())
    }

    /// Largest accepted mismatch of lengths given in meters: 1 cm or 0.1% of the radius.
    pub fn tolerance(&self) -> f64 {
        (self.radius * 0.001).max(0.01)
    }

    /// Checks that the ends of the arc lie on the circle around `center`.
    pub fn validate(
        &self,
        center: &Point2<f64>,
        start: &Point2<f64>,
        end: Option<&Point2<f64>>,
    ) -> Result<(), CurveError> {
        let distance = nalgebra::distance(center, start);
        if (distance - self.radius).abs() > self.tolerance() {
            return Err(CurveError::StartOffRadius {
                distance,
                radius: self.radius,
            });
        }

        if let Some(end) = end {
            let distance = nalgebra::distance(center, end);
            if (distance - self.radius).abs() > self.tolerance() {
                return Err(CurveError::EndOffRadius {
                    distance,
                    radius: self.radius,
                });
            }
        }

        Ok(())
    }

    /// Approximates the arc starting at `start` with `segments` straight pieces.
    ///
    /// The returned points include both ends of the arc. When `end` is given it is used as the
    /// last point, and the turning direction is the one whose sweep from `start` to `end` is
    /// closer to the delta of the curve. Otherwise the curve's own direction is used.
    pub fn densify(
        &self,
        center: &Point2<f64>,
        start: &Point2<f64>,
        end: Option<&Point2<f64>>,
        segments: usize,
    ) -> Result<Vec<Point2<f64>>, CurveError> {
        if segments == 0 {
            return Err(CurveError::NoSegments);
        }

        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let delta = self.delta.to_radians();

        let sign = match end {
            Some(end) => {
                let end_angle = (end.y - center.y).atan2(end.x - center.x);
                let clockwise = (start_angle - end_angle).rem_euclid(TAU);
                let counter_clockwise = (end_angle - start_angle).rem_euclid(TAU);
                if (clockwise - delta).abs() < (counter_clockwise - delta).abs() {
                    CurveDirection::Clockwise.sign()
                } else {
                    CurveDirection::CounterClockwise.sign()
                }
            }
            None => self.direction.sign(),
        };

        let at = |fraction: f64| {
            let angle = start_angle + sign * delta * fraction;
            Point2::new(
                center.x + self.radius * angle.cos(),
                center.y + self.radius * angle.sin(),
            )
        };

        let mut points = Vec::with_capacity(segments + 1);
        points.push(*start);
        points.extend((1..segments).map(|i| at(i as f64 / segments as f64)));
        points.push(end.copied().unwrap_or_else(|| at(1.0)));

        Ok(points)
    }
}

/// Curve attached to one segment of a geometry.
///
/// Segment `i` joins vertex `i` and vertex `i + 1`. For polygons, the last segment joins the last
/// vertex back to the first one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentCurve {
    /// Index of the segment.
    pub segment: usize,
    /// Curve replacing the straight segment.
    pub curve: CurveSegment,
}

impl SegmentCurve {
    /// Attaches `curve` to a segment.
    pub fn new(segment: usize, curve: CurveSegment) -> Self {
        Self { segment, curve }
    }
}

/// Parses a deflection angle in decimal degrees.
///
/// Accepted formats are decimal degrees with an optional degree sign (`5.085`, `5.085°`) and
/// degrees, minutes, seconds written with symbols (`05°5'5.56"`) or letters (`05d05m05.56s`).
pub fn parse_delta(text: &str) -> Result<f64, CurveError> {
    let trimmed = text.trim();
    let malformed = || CurveError::MalformedDelta(text.to_string());

    if let Some(caps) = DECIMAL_DELTA.captures(trimmed) {
        return caps[1].parse().map_err(|_| malformed());
    }

    let caps = SYMBOL_DELTA
        .captures(trimmed)
        .or_else(|| LETTER_DELTA.captures(trimmed))
        .ok_or_else(malformed)?;

    let degrees: f64 = caps[1].parse().map_err(|_| malformed())?;
    let minutes: f64 = caps[2].parse().map_err(|_| malformed())?;
    let seconds: f64 = caps[3].parse().map_err(|_| malformed())?;
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(malformed());
    }

    Ok(degrees + minutes / 60.0 + seconds / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn quarter_circle() -> CurveSegment {
        CurveSegment::new(100.0, 90.0, CurveDirection::CounterClockwise).unwrap()
    }

    #[test]
    fn elements_of_a_quarter_circle() {
        let curve = quarter_circle();
        let sqrt_2 = std::f64::consts::SQRT_2;

        assert_abs_diff_eq!(curve.arc_length(), 50.0 * std::f64::consts::PI, epsilon = 1e-9);
        assert_abs_diff_eq!(curve.subtangent(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(curve.external(), 100.0 * (sqrt_2 - 1.0), epsilon = 1e-9);
        assert_abs_diff_eq!(curve.chord(), 100.0 * sqrt_2, epsilon = 1e-9);
        assert_abs_diff_eq!(
            curve.middle_ordinate(),
            100.0 * (1.0 - sqrt_2 / 2.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn invalid_parameters() {
        assert_matches!(
            CurveSegment::new(0.0, 10.0, CurveDirection::Clockwise),
            Err(CurveError::InvalidRadius(_))
        );
        assert_matches!(
            CurveSegment::new(-5.0, 10.0, CurveDirection::Clockwise),
            Err(CurveError::InvalidRadius(_))
        );
        assert_matches!(
            CurveSegment::new(10.0, 0.0, CurveDirection::Clockwise),
            Err(CurveError::InvalidDelta(_))
        );
        assert_matches!(
            CurveSegment::new(10.0, 360.0, CurveDirection::Clockwise),
            Err(CurveError::InvalidDelta(_))
        );
        assert_matches!(
            CurveSegment::new(10.0, f64::NAN, CurveDirection::Clockwise),
            Err(CurveError::InvalidDelta(_))
        );
    }

    #[test]
    fn delta_formats() {
        let dms = 5.0 + 5.0 / 60.0 + 5.56 / 3600.0;

        assert_eq!(parse_delta("5.085").unwrap(), 5.085);
        assert_eq!(parse_delta(" 5.085° ").unwrap(), 5.085);
        assert_eq!(parse_delta("12").unwrap(), 12.0);
        assert_abs_diff_eq!(parse_delta("05°5'5.56\"").unwrap(), dms, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_delta("05° 05' 05.56\"").unwrap(), dms, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_delta("05d05m05.56s").unwrap(), dms, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_delta("05D 05M 05.56S").unwrap(), dms, epsilon = 1e-12);
    }

    #[test]
    fn malformed_delta() {
        for text in ["", "abc", "5.0.1", "-5", "05°75'0\"", "05d05m", "1e3"] {
            assert_matches!(
                parse_delta(text),
                Err(CurveError::MalformedDelta(_)),
                "{text}"
            );
        }

        assert_matches!(
            CurveSegment::with_delta_text(10.0, "0", CurveDirection::Clockwise),
            Err(CurveError::InvalidDelta(_))
        );
    }

    #[test]
    fn densify_without_end_point() {
        let center = Point2::new(0.0, 0.0);
        let start = Point2::new(100.0, 0.0);
        let half = 100.0 / std::f64::consts::SQRT_2;

        let points = quarter_circle().densify(&center, &start, None, 2).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], start);
        assert_abs_diff_eq!(points[1], Point2::new(half, half), epsilon = 1e-9);
        assert_abs_diff_eq!(points[2], Point2::new(0.0, 100.0), epsilon = 1e-9);

        let clockwise = CurveSegment::new(100.0, 90.0, CurveDirection::Clockwise).unwrap();
        let points = clockwise.densify(&center, &start, None, 2).unwrap();
        assert_abs_diff_eq!(points[2], Point2::new(0.0, -100.0), epsilon = 1e-9);
    }

    #[test]
    fn densify_follows_end_point() {
        let center = Point2::new(0.0, 0.0);
        let start = Point2::new(100.0, 0.0);
        let end = Point2::new(0.0, -100.0);
        let half = 100.0 / std::f64::consts::SQRT_2;

        // The end point lies a quarter turn clockwise, so the declared direction is overridden
        let points = quarter_circle()
            .densify(&center, &start, Some(&end), DEFAULT_DENSIFY_SEGMENTS)
            .unwrap();
        assert_eq!(points.len(), DEFAULT_DENSIFY_SEGMENTS + 1);
        assert_eq!(points[0], start);
        assert_eq!(points[DEFAULT_DENSIFY_SEGMENTS], end);
        for point in &points {
            assert_abs_diff_eq!(nalgebra::distance(&center, point), 100.0, epsilon = 1e-9);
            assert!(point.y <= 1e-9);
        }

        let points = quarter_circle().densify(&center, &start, Some(&end), 2).unwrap();
        assert_abs_diff_eq!(points[1], Point2::new(half, -half), epsilon = 1e-9);
    }

    #[test]
    fn densify_requires_segments() {
        let center = Point2::new(0.0, 0.0);
        let start = Point2::new(100.0, 0.0);
        assert_matches!(
            quarter_circle().densify(&center, &start, None, 0),
            Err(CurveError::NoSegments)
        );
    }

    #[test]
    fn end_points_on_the_circle() {
        let curve = quarter_circle();
        let center = Point2::new(10.0, 10.0);

        assert!(curve
            .validate(&center, &Point2::new(110.0, 10.0), Some(&Point2::new(10.0, 110.05)))
            .is_ok());
        assert_matches!(
            curve.validate(&center, &Point2::new(110.5, 10.0), None),
            Err(CurveError::StartOffRadius { .. })
        );
        assert_matches!(
            curve.validate(&center, &Point2::new(110.0, 10.0), Some(&Point2::new(10.0, 109.0))),
            Err(CurveError::EndOffRadius { .. })
        );

        let small = CurveSegment::new(1.0, 45.0, CurveDirection::Clockwise).unwrap();
        assert_eq!(small.tolerance(), 0.01);
    }

    #[test]
    fn deserialization_checks_parameters() {
        let curve: CurveSegment = serde_json::from_str(r#"{"radius":50.0,"delta":30.0}"#).unwrap();
        assert_eq!(curve.direction(), CurveDirection::Clockwise);
        assert_eq!(curve.radius(), 50.0);

        assert!(serde_json::from_str::<CurveSegment>(r#"{"radius":-1.0,"delta":30.0}"#).is_err());
    }
}
