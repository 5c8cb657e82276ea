//! Measurements in a projected plane.

use geowizard_types::cartesian::CartesianPoint2d;
use num_traits::{Float, One, Zero};

/// Signed area of the implicitly closed ring through `points` (shoelace formula).
///
/// Positive for counter-clockwise rings.
pub fn area_signed<P: CartesianPoint2d>(points: &[P]) -> P::Num {
    let Some(last) = points.last() else {
        return P::Num::zero();
    };

    let mut prev = last;
    let mut aggr = P::Num::zero();
    for p in points {
        aggr = aggr + prev.x() * p.y() - p.x() * prev.y();
        prev = p;
    }

    aggr / (P::Num::one() + P::Num::one())
}

/// Unsigned area of the implicitly closed ring through `points`.
///
/// Self-intersecting rings are not detected: the lobes are summed with their signs.
pub fn area<P: CartesianPoint2d>(points: &[P]) -> P::Num {
    area_signed(points).abs()
}

/// Sum of segment lengths of an open path.
pub fn path_length<P: CartesianPoint2d>(points: &[P]) -> P::Num {
    points
        .windows(2)
        .fold(P::Num::zero(), |aggr, pair| aggr + pair[0].distance(&pair[1]))
}

/// Length of the implicitly closed ring through `points`.
pub fn ring_length<P: CartesianPoint2d>(points: &[P]) -> P::Num {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => path_length(points) + last.distance(first),
        _ => P::Num::zero(),
    }
}

/// Length of every segment of the path through `points`.
///
/// A closed path has one more segment, joining the last point back to the first one.
pub fn segment_lengths<P: CartesianPoint2d>(points: &[P], closed: bool) -> Vec<P::Num> {
    let mut lengths: Vec<P::Num> = points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .collect();

    if closed && points.len() > 1 {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            lengths.push(last.distance(first));
        }
    }

    lengths
}
