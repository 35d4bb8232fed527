use crate::bounding_volume::Aabb;
use crate::math::{Matrix4, Point, Point2, Real, Vector};
use crate::projection::look_at;
use crate::utils::{convex_hull2d, signed_area};

/// Parallel projection along a viewing direction.
///
/// Points are expressed in the view frame and their depth is dropped, so that lengths and areas
/// on the projection plane are in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct OrthographicProjection {
    view: Matrix4<Real>,
}

impl OrthographicProjection {
    /// A projection onto the plane going through `eye` and orthogonal to `direction`.
    pub fn new(eye: &Point<Real>, direction: &Vector<Real>, up: &Vector<Real>) -> Self {
        Self {
            view: look_at(eye, direction, up),
        }
    }

    /// The view matrix of this projection.
    #[inline]
    pub fn view(&self) -> &Matrix4<Real> {
        &self.view
    }

    /// Projects a point onto the projection plane.
    #[inline]
    pub fn project_point(&self, pt: &Point<Real>) -> Point2<Real> {
        let view_pt = self.view.transform_point(pt);
        Point2::new(view_pt.x, view_pt.y)
    }

    /// Projects the eight vertices of `aabb`.
    pub fn projected_vertices(&self, aabb: &Aabb) -> [Point2<Real>; 8] {
        aabb.vertices().map(|pt| self.project_point(&pt))
    }

    /// The area covered by the projection of `aabb`.
    ///
    /// The parallel projection of a box is the union of the projections of three of its faces
    /// sharing a vertex, so the area is the sum of the three parallelograms spanned by the
    /// projected edges leaving vertex `0`.
    pub fn projected_area(&self, aabb: &Aabb) -> Real {
        if !aabb.is_valid() {
            return 0.0;
        }

        let origin = self.project_point(&aabb.mins);
        let ex = self.project_point(&Point::new(aabb.maxs.x, aabb.mins.y, aabb.mins.z)) - origin;
        let ey = self.project_point(&Point::new(aabb.mins.x, aabb.maxs.y, aabb.mins.z)) - origin;
        let ez = self.project_point(&Point::new(aabb.mins.x, aabb.mins.y, aabb.maxs.z)) - origin;

        ex.perp(&ey).abs() + ey.perp(&ez).abs() + ez.perp(&ex).abs()
    }

    /// The counter-clockwise convex hull of the projection of `aabb`.
    pub fn projected_hull(&self, aabb: &Aabb) -> Vec<Point2<Real>> {
        if !aabb.is_valid() {
            return Vec::new();
        }

        convex_hull2d(&self.projected_vertices(aabb))
    }

    /// The area covered by the projection of `aabb`, computed from its projected hull.
    ///
    /// Gives the same result as [`Self::projected_area`] up to rounding errors.
    pub fn contour_area(&self, aabb: &Aabb) -> Real {
        let area = signed_area(&self.projected_hull(aabb));
        debug_assert!(area >= 0.0, "projected hull must be counter-clockwise");
        area
    }
}
