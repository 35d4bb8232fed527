use crate::bounding_volume::{Aabb, Frustum, Region};
use crate::math::{Point, Point2, Real, Vector};
use crate::projection::{up_vector_for, PerspectiveProjection};
use crate::query::Ray;
use crate::utils::{is_parallel, AFFINE_DIRECTION_THRESHOLD};

/// Rays leaving a point of view inside a frustum.
///
/// Boxes are projected in perspective; the projection plane is the square `[-1, 1]²` of
/// normalized device coordinates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointInfluenceArea {
    pov: Point<Real>,
    direction: Vector<Real>,
    affine_threshold: Real,
    projection: PerspectiveProjection,
    region: Region,
}

impl PointInfluenceArea {
    /// Creates a point influence area at `pov` looking along `direction`.
    ///
    /// `fov_x` and `fov_y` are the full horizontal and vertical angles of view, in radians.
    pub fn new(
        pov: Point<Real>,
        direction: Vector<Real>,
        fov_x: Real,
        fov_y: Real,
        near: Real,
        far: Real,
    ) -> Self {
        let direction = direction.normalize();
        let up = up_vector_for(&direction);

        Self {
            pov,
            direction,
            affine_threshold: AFFINE_DIRECTION_THRESHOLD,
            projection: PerspectiveProjection::new(pov, &direction, &up, fov_x, fov_y, near, far),
            region: Region::Frustum(Frustum::new(pov, direction, up, fov_x, fov_y, near, far)),
        }
    }

    /// Sets the tolerance of [`Self::is_direction_affine`].
    pub fn with_affine_threshold(mut self, threshold: Real) -> Self {
        self.affine_threshold = threshold;
        self
    }

    /// The point of view.
    #[inline]
    pub fn pov(&self) -> &Point<Real> {
        &self.pov
    }

    /// The unit viewing direction.
    #[inline]
    pub fn direction(&self) -> &Vector<Real> {
        &self.direction
    }

    /// The perspective projection from the point of view.
    #[inline]
    pub fn projection(&self) -> &PerspectiveProjection {
        &self.projection
    }

    /// The viewing frustum.
    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// See [`InfluenceArea::projected_area`](super::InfluenceArea::projected_area).
    ///
    /// Boxes containing the point of view, or partially behind it, cover the whole projection
    /// plane.
    pub fn projected_area(&self, aabb: &Aabb) -> Real {
        match self.projection.projected_area(aabb) {
            Some(area) => area,
            None => {
                log::debug!(
                    "{:?} surrounds or is behind the point of view {}",
                    aabb,
                    self.pov
                );
                self.projection_plane_area()
            }
        }
    }

    /// See [`InfluenceArea::projected_hull`](super::InfluenceArea::projected_hull).
    pub fn projected_hull(&self, aabb: &Aabb) -> Vec<Point2<Real>> {
        match self.projection.contour(aabb) {
            Some(contour) => contour.to_vec(),
            None => self.projection_plane_hull().to_vec(),
        }
    }

    /// Rays are uniformly distributed on the projection plane.
    pub fn influence(&self) -> Real {
        1.0 / self.projection_plane_area()
    }

    /// The direction from the point of view to the center of `aabb`.
    pub fn ray_direction(&self, aabb: &Aabb) -> Vector<Real> {
        aabb.center() - self.pov
    }

    /// The area of the normalized device coordinates square.
    pub fn projection_plane_area(&self) -> Real {
        4.0
    }

    /// The normalized device coordinates square.
    pub fn projection_plane_hull(&self) -> [Point2<Real>; 4] {
        [
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ]
    }

    /// Is `ray` aligned with the line joining the point of view to its origin?
    ///
    /// A ray starting exactly at the point of view is always affine.
    pub fn is_direction_affine(&self, ray: &Ray) -> bool {
        let offset = ray.origin - self.pov;

        if offset.norm_squared() <= Real::EPSILON * Real::EPSILON {
            return true;
        }

        is_parallel(&ray.dir, &offset, self.affine_threshold)
    }
}
