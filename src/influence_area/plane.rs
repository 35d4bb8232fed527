use crate::bounding_volume::{Aabb, AabbForObb, Obb, Region};
use crate::math::{Point, Point2, Real, Vector};
use crate::projection::{up_vector_for, OrthographicProjection};
use crate::query::Ray;
use crate::utils::{is_parallel, AFFINE_DIRECTION_THRESHOLD};

/// Parallel rays leaving a `width × height` rectangle along its normal.
///
/// The region of space reached by the rays is the rectangle extruded along its normal by
/// `depth`. Boxes are projected orthographically onto the rectangle plane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PlaneInfluenceArea {
    center: Point<Real>,
    normal: Vector<Real>,
    size: (Real, Real),
    depth: Real,
    affine_threshold: Real,
    projection: OrthographicProjection,
    region: Region,
}

impl PlaneInfluenceArea {
    /// Creates a plane influence area centered at `center` and emitting rays along `normal`.
    ///
    /// The in-plane axes of the rectangle are derived from `normal`: `width` is measured along
    /// `normal × up` and `height` along the remaining axis, where `up` is the world axis least
    /// parallel to `normal`.
    pub fn new(
        center: Point<Real>,
        normal: Vector<Real>,
        width: Real,
        height: Real,
        depth: Real,
    ) -> Self {
        let normal = normal.normalize();
        let up = up_vector_for(&normal);
        let right = normal.cross(&up).normalize();
        let plane_up = right.cross(&normal);

        let obb = Obb::from_axes(
            center + normal * (depth * 0.5),
            [right, plane_up, normal],
            Vector::new(width * 0.5, height * 0.5, depth * 0.5),
        );

        Self {
            center,
            normal,
            size: (width, height),
            depth,
            affine_threshold: AFFINE_DIRECTION_THRESHOLD,
            projection: OrthographicProjection::new(&center, &normal, &up),
            region: Region::AabbForObb(AabbForObb::new(obb)),
        }
    }

    /// Sets the tolerance of [`Self::is_direction_affine`].
    pub fn with_affine_threshold(mut self, threshold: Real) -> Self {
        self.affine_threshold = threshold;
        self
    }

    /// The center of the emitting rectangle.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The unit normal of the emitting rectangle, which is also the direction of every ray.
    #[inline]
    pub fn normal(&self) -> &Vector<Real> {
        &self.normal
    }

    /// The width and height of the emitting rectangle.
    #[inline]
    pub fn size(&self) -> (Real, Real) {
        self.size
    }

    /// How far the rays travel from the rectangle.
    #[inline]
    pub fn depth(&self) -> Real {
        self.depth
    }

    /// The orthographic projection onto the rectangle plane.
    #[inline]
    pub fn projection(&self) -> &OrthographicProjection {
        &self.projection
    }

    /// The extruded rectangle.
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// See [`InfluenceArea::projected_area`](super::InfluenceArea::projected_area).
    pub fn projected_area(&self, aabb: &Aabb) -> Real {
        self.projection.projected_area(aabb)
    }

    /// See [`InfluenceArea::projected_hull`](super::InfluenceArea::projected_hull).
    pub fn projected_hull(&self, aabb: &Aabb) -> Vec<Point2<Real>> {
        self.projection.projected_hull(aabb)
    }

    /// Rays are uniformly distributed on the rectangle.
    pub fn influence(&self) -> Real {
        1.0 / self.projection_plane_area()
    }

    /// Always the plane normal.
    pub fn ray_direction(&self, _aabb: &Aabb) -> Vector<Real> {
        self.normal
    }

    /// `width × height`.
    pub fn projection_plane_area(&self) -> Real {
        self.size.0 * self.size.1
    }

    /// The rectangle, in projection plane coordinates.
    pub fn projection_plane_hull(&self) -> [Point2<Real>; 4] {
        let (hw, hh) = (self.size.0 * 0.5, self.size.1 * 0.5);
        [
            Point2::new(-hw, -hh),
            Point2::new(hw, -hh),
            Point2::new(hw, hh),
            Point2::new(-hw, hh),
        ]
    }

    /// Is `ray` parallel to the plane normal?
    pub fn is_direction_affine(&self, ray: &Ray) -> bool {
        is_parallel(&ray.dir, &self.normal, self.affine_threshold)
    }
}

#[cfg(test)]
mod test {
    use super::PlaneInfluenceArea;
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Vector};
    use crate::query::Ray;

    fn plane() -> PlaneInfluenceArea {
        PlaneInfluenceArea::new(Point::new(0.0, 5.0, 0.0), -Vector::y(), 4.0, 2.0, 8.0)
    }

    #[test]
    fn region_is_the_extruded_rectangle() {
        let plane = plane();
        let region = plane.region();

        assert!(region.contains(&Point::new(0.0, 1.0, 0.0)));
        assert!(region.contains(&Point::new(0.0, -2.9, 0.0)));
        assert!(!region.contains(&Point::new(0.0, -3.1, 0.0)));
        assert!(!region.contains(&Point::new(0.0, 5.1, 0.0)));

        let aabb = region.enclosing_aabb();
        assert_relative_eq!(aabb.volume(), 4.0 * 2.0 * 8.0, epsilon = 1.0e-3);
    }

    #[test]
    fn projection_and_affinity() {
        let plane = plane();
        assert_relative_eq!(plane.projection_plane_area(), 8.0);
        assert_relative_eq!(plane.influence(), 0.125);

        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        assert_relative_eq!(plane.projected_area(&aabb), 4.0, epsilon = 1.0e-4);
        assert_eq!(plane.ray_direction(&aabb), -Vector::y());

        assert!(plane.is_direction_affine(&Ray::new(Point::origin(), -Vector::y())));
        assert!(plane.is_direction_affine(&Ray::new(Point::origin(), Vector::y() * 3.0)));
        assert!(!plane.is_direction_affine(&Ray::new(
            Point::origin(),
            Vector::new(0.1, -1.0, 0.0)
        )));
    }
}
