//! Shapes supported by the hierarchies.

pub use self::convex_hull::{point_in_convex_polygon, ConvexHull, ConvexHullError};
pub use self::triangle::Triangle;

use crate::math::{Point, Real};

mod convex_hull;
mod triangle;

/// The centroid of a non-empty set of points.
pub(crate) fn centroid(pts: &[Point<Real>]) -> Point<Real> {
    let sum = pts
        .iter()
        .fold(crate::math::Vector::zeros(), |acc, pt| acc + pt.coords);
    Point::from(sum / pts.len().max(1) as Real)
}
