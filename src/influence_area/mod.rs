//! Ray sources whose distribution drives the Projected Area Heuristic.
//!
//! An influence area describes where rays come from and how they travel. A [`Bvh`] built for an
//! influence area weights each node by the area it covers on the projection plane of that source
//! instead of by its surface area.
//!
//! [`Bvh`]: crate::partitioning::Bvh

pub use self::plane::PlaneInfluenceArea;
pub use self::point::PointInfluenceArea;

use crate::bounding_volume::{Aabb, Region};
use crate::math::{Point2, Real, Vector};
use crate::query::{Ray, Unsupported};
use crate::utils::{convex_polygons_overlap_area, Axis};
use arrayvec::ArrayVec;

mod plane;
mod point;

/// A source of rays with a known distribution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum InfluenceArea {
    /// Parallel rays leaving a rectangle along its normal.
    Plane(PlaneInfluenceArea),
    /// Rays leaving a single point of view inside a frustum.
    Point(PointInfluenceArea),
}

impl InfluenceArea {
    /// The area covered by the projection of `aabb` on the projection plane.
    pub fn projected_area(&self, aabb: &Aabb) -> Real {
        match self {
            InfluenceArea::Plane(plane) => plane.projected_area(aabb),
            InfluenceArea::Point(point) => point.projected_area(aabb),
        }
    }

    /// The counter-clockwise convex hull of the projection of `aabb` on the projection plane.
    pub fn projected_hull(&self, aabb: &Aabb) -> Vec<Point2<Real>> {
        match self {
            InfluenceArea::Plane(plane) => plane.projected_hull(aabb),
            InfluenceArea::Point(point) => point.projected_hull(aabb),
        }
    }

    /// The area of the part of the projection of `aabb` that lies on the projection plane.
    ///
    /// Rays only leave the projection plane hull, so this is the relevant area for boxes that
    /// are partially outside of it.
    pub fn culled_projected_area(&self, aabb: &Aabb) -> Real {
        let hull = self.projected_hull(aabb);
        convex_polygons_overlap_area(&hull, &self.projection_plane_hull())
    }

    /// The density of rays per unit area of the projection plane.
    pub fn influence(&self) -> Real {
        match self {
            InfluenceArea::Plane(plane) => plane.influence(),
            InfluenceArea::Point(point) => point.influence(),
        }
    }

    /// An estimate of the direction of the rays reaching `aabb`.
    pub fn ray_direction(&self, aabb: &Aabb) -> Vector<Real> {
        match self {
            InfluenceArea::Plane(plane) => plane.ray_direction(aabb),
            InfluenceArea::Point(point) => point.ray_direction(aabb),
        }
    }

    /// The area of the projection plane.
    pub fn projection_plane_area(&self) -> Real {
        match self {
            InfluenceArea::Plane(plane) => plane.projection_plane_area(),
            InfluenceArea::Point(point) => point.projection_plane_area(),
        }
    }

    /// The counter-clockwise outline of the projection plane.
    pub fn projection_plane_hull(&self) -> [Point2<Real>; 4] {
        match self {
            InfluenceArea::Plane(plane) => plane.projection_plane_hull(),
            InfluenceArea::Point(point) => point.projection_plane_hull(),
        }
    }

    /// Could `ray` have been emitted by this influence area?
    pub fn is_direction_affine(&self, ray: &Ray) -> bool {
        match self {
            InfluenceArea::Plane(plane) => plane.is_direction_affine(ray),
            InfluenceArea::Point(point) => point.is_direction_affine(ray),
        }
    }

    /// The best splitting planes for `aabb`, ordered by decreasing quality.
    ///
    /// Always returns [`Unsupported`]: a [`Bvh`](crate::partitioning::Bvh) obtains splitting
    /// guidance from its [`SplitPlaneChooser`](crate::partitioning::SplitPlaneChooser).
    pub fn best_splitting_planes(
        &self,
        aabb: &Aabb,
    ) -> Result<ArrayVec<(Axis, Real), 3>, Unsupported> {
        log::debug!(
            "splitting planes requested from an influence area for {:?}",
            aabb
        );
        Err(Unsupported)
    }

    /// The region of space covered by this influence area.
    pub fn bvh_region(&self) -> &Region {
        match self {
            InfluenceArea::Plane(plane) => plane.region(),
            InfluenceArea::Point(point) => point.region(),
        }
    }
}

impl From<PlaneInfluenceArea> for InfluenceArea {
    fn from(plane: PlaneInfluenceArea) -> Self {
        InfluenceArea::Plane(plane)
    }
}

impl From<PointInfluenceArea> for InfluenceArea {
    fn from(point: PointInfluenceArea) -> Self {
        InfluenceArea::Point(point)
    }
}
