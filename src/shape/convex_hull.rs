//! Planar convex polygons embedded in 3D.

use crate::math::{Point, Real, Vector};
use crate::utils::{BOUNDARY_EPSILON, COPLANARITY_EPSILON};

/// Error that can be raised while building a [`ConvexHull`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ConvexHullError {
    /// Less than three points were given.
    #[error("a convex hull needs at least 3 points, got {0}")]
    NotEnoughPoints(usize),
    /// All the points are collinear (or coincident), so they do not span a plane.
    #[error("the points of the convex hull do not span a plane")]
    Degenerate,
    /// One point lies too far away from the plane supporting the others.
    #[error("point {index} lies at distance {distance} from the supporting plane of the convex hull")]
    NotCoplanar {
        /// Index of the offending point.
        index: usize,
        /// Its distance to the supporting plane.
        distance: Real,
    },
}

/// A convex polygon lying on a plane in 3D space.
///
/// The vertices are stored in order (either orientation); the stored normal is the one given by
/// the right-hand rule applied to that order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConvexHull {
    points: Vec<Point<Real>>,
    normal: Vector<Real>,
}

impl ConvexHull {
    /// Builds a convex hull from ordered, coplanar points.
    ///
    /// The supporting plane is estimated with Newell's method so that the result does not depend
    /// on which three vertices are picked.
    pub fn try_new(points: Vec<Point<Real>>) -> Result<Self, ConvexHullError> {
        if points.len() < 3 {
            return Err(ConvexHullError::NotEnoughPoints(points.len()));
        }

        let normal = newell_normal(&points)
            .try_normalize(Real::EPSILON)
            .ok_or(ConvexHullError::Degenerate)?;

        let centroid = crate::shape::centroid(&points);
        let scale = points
            .iter()
            .map(|pt| (pt - centroid).norm())
            .fold(1.0, Real::max);

        for (index, pt) in points.iter().enumerate() {
            let distance = (pt - centroid).dot(&normal).abs();
            if distance > COPLANARITY_EPSILON * scale {
                return Err(ConvexHullError::NotCoplanar { index, distance });
            }
        }

        Ok(Self { points, normal })
    }

    /// The vertices of this polygon, in order.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The unit normal of the supporting plane.
    #[inline]
    pub fn normal(&self) -> Vector<Real> {
        self.normal
    }

    /// Does this polygon contain `pt` (up to a small relative tolerance)?
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        let scale = (pt - self.points[0]).norm().max(1.0);
        if (pt - self.points[0]).dot(&self.normal).abs() > COPLANARITY_EPSILON * scale {
            return false;
        }

        point_in_convex_polygon(&self.points, &self.normal, pt)
    }
}

/// Tests whether `pt`, assumed to lie on the supporting plane of `polygon`, is inside it.
///
/// The test checks that the cross products of every edge with the vector to `pt` all point to
/// the same side of `normal`. Points on the boundary are considered inside.
pub fn point_in_convex_polygon(
    polygon: &[Point<Real>],
    normal: &Vector<Real>,
    pt: &Point<Real>,
) -> bool {
    let mut has_pos = false;
    let mut has_neg = false;
    let normal_norm = normal.norm();

    for (i, a) in polygon.iter().enumerate() {
        let b = &polygon[(i + 1) % polygon.len()];
        let edge = b - a;
        let to_pt = pt - a;
        let side = edge.cross(&to_pt).dot(normal);
        let tolerance = BOUNDARY_EPSILON * edge.norm() * to_pt.norm() * normal_norm;

        if side > tolerance {
            has_pos = true;
        } else if side < -tolerance {
            has_neg = true;
        }

        if has_pos && has_neg {
            return false;
        }
    }

    true
}

fn newell_normal(points: &[Point<Real>]) -> Vector<Real> {
    let mut normal = Vector::zeros();

    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }

    normal
}
