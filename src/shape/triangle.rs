//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::point_in_convex_polygon;
use crate::utils::COPLANARITY_EPSILON;

/// A triangle shape.
///
/// Triangles are immutable once created. They are owned by the scene array and referenced
/// everywhere else by their index in that array.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl From<[Point<Real>; 3]> for Triangle {
    fn from(arr: [Point<Real>; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The barycenter (centroid) of this triangle.
    #[inline]
    pub fn barycenter(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// The normal of this triangle, scaled by twice its area.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() * 0.5
    }

    /// The tight axis-aligned box around this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices())
    }

    /// Tests whether `p` lies on this triangle.
    ///
    /// This is the same test as [`ConvexHull::contains_point`](crate::shape::ConvexHull::contains_point)
    /// applied to a three-vertex polygon. Degenerate triangles contain nothing.
    pub fn contains_point(&self, p: &Point<Real>) -> bool {
        let normal = self.scaled_normal();
        let norm = normal.norm();

        if norm <= Real::EPSILON {
            return false;
        }

        let scale = (p - self.a).norm().max(1.0);
        if ((p - self.a).dot(&normal) / norm).abs() > COPLANARITY_EPSILON * scale {
            return false;
        }

        point_in_convex_polygon(&self.vertices(), &normal, p)
    }
}

#[cfg(test)]
mod test {
    use super::Triangle;
    use crate::math::Point;

    #[test]
    fn barycenter_and_containment() {
        let tri = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 0.0),
            Point::new(0.0, 3.0, 0.0),
        );

        assert_eq!(tri.barycenter(), Point::new(1.0, 1.0, 0.0));
        assert_relative_eq!(tri.area(), 4.5);
        assert!(tri.contains_point(&tri.barycenter()));
        assert!(tri.contains_point(&Point::new(1.5, 1.5, 0.0)));
        assert!(!tri.contains_point(&Point::new(2.0, 2.0, 0.0)));
        assert!(!tri.contains_point(&Point::new(1.0, 1.0, 0.1)));
    }
}
