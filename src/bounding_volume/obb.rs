//! Oriented bounding boxes.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Matrix, Point, Real, Rotation, Vector, DIM};
use crate::query::sat;
use crate::utils::{approx_le, is_parallel, AXIS_ALIGNMENT_THRESHOLD};

/// An Oriented Bounding Box.
///
/// The box is centered at `center`, its local frame is given by the (orthonormal) columns of
/// `axes`, and `half_extents[i]` is its half-size along `axes.column(i)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Obb {
    /// The center of the box.
    pub center: Point<Real>,
    /// The local axes of the box, stored as the columns of a rotation matrix.
    pub axes: Matrix<Real>,
    /// The half-size of the box along each local axis.
    pub half_extents: Vector<Real>,
}

impl Obb {
    /// Creates an OBB from its center, orientation and half-extents.
    pub fn new(center: Point<Real>, rotation: Rotation<Real>, half_extents: Vector<Real>) -> Self {
        Self {
            center,
            axes: *rotation.matrix(),
            half_extents: half_extents.abs(),
        }
    }

    /// Creates an OBB from three local axes.
    ///
    /// The axes are normalized but not orthogonalized: the caller must give mutually orthogonal
    /// directions.
    pub fn from_axes(
        center: Point<Real>,
        axes: [Vector<Real>; 3],
        half_extents: Vector<Real>,
    ) -> Self {
        Self {
            center,
            axes: Matrix::from_columns(&[
                axes[0].normalize(),
                axes[1].normalize(),
                axes[2].normalize(),
            ]),
            half_extents: half_extents.abs(),
        }
    }

    /// The `i`-th local axis of this box.
    #[inline]
    pub fn axis(&self, i: usize) -> Vector<Real> {
        self.axes.column(i).into_owned()
    }

    /// The eight corners of this box, numbered like [`Aabb::vertices`] in the local frame.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        let local = Aabb::from_half_extents(Point::origin(), self.half_extents).vertices();
        local.map(|pt| self.center + self.axes * pt.coords)
    }

    /// The smallest AABB enclosing this box.
    pub fn enclosing_aabb(&self) -> Aabb {
        let ws_half_extents = self.axes.abs() * self.half_extents;
        Aabb::from_half_extents(self.center, ws_half_extents)
    }

    /// Does this box contain `pt` (boundary included)?
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        let local = self.axes.tr_mul(&(pt - self.center));
        (0..DIM).all(|i| approx_le(local[i].abs(), self.half_extents[i]))
    }

    /// Does this box fully contain `aabb`?
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        aabb.vertices().iter().all(|pt| self.contains_local_point(pt))
    }

    /// Are all the local axes of this box almost parallel to the world axes?
    pub fn is_almost_axis_aligned(&self) -> bool {
        (0..DIM).all(|i| {
            let axis = self.axis(i);
            [Vector::x(), Vector::y(), Vector::z()]
                .iter()
                .any(|world| is_parallel(&axis, world, AXIS_ALIGNMENT_THRESHOLD))
        })
    }

    /// Projects this box on an arbitrary axis.
    ///
    /// The axis does not need to be normalized, in which case the interval is scaled by its norm.
    pub fn project_on_axis(&self, axis: &Vector<Real>) -> (Real, Real) {
        let center = self.center.coords.dot(axis);
        let radius = (0..DIM)
            .map(|i| self.half_extents[i] * self.axis(i).dot(axis).abs())
            .sum::<Real>();
        (center - radius, center + radius)
    }

    /// Tests whether this box and `aabb` overlap.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let enclosing = self.enclosing_aabb();
        if !enclosing.intersects(aabb) {
            return false;
        }

        if self.is_almost_axis_aligned() {
            // The enclosing box is (almost) the box itself.
            return true;
        }

        sat::obb_aabb_intersection_test(self, aabb)
    }
}

/// An oriented box that caches its enclosing AABB.
///
/// The cache is computed once at construction, so the box is immutable afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct AabbForObb {
    obb: Obb,
    aabb: Aabb,
}

impl AabbForObb {
    /// Wraps `obb` and computes its enclosing AABB.
    pub fn new(obb: Obb) -> Self {
        Self {
            aabb: obb.enclosing_aabb(),
            obb,
        }
    }

    /// The wrapped oriented box.
    #[inline]
    pub fn obb(&self) -> &Obb {
        &self.obb
    }

    /// The cached enclosing AABB.
    #[inline]
    pub fn enclosing_aabb(&self) -> Aabb {
        self.aabb
    }

    /// Does this box contain `pt`?
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.aabb.contains_local_point(pt) && self.obb.contains_local_point(pt)
    }

    /// Does this box fully contain `aabb`?
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        self.aabb.contains(aabb) && self.obb.contains_aabb(aabb)
    }

    /// Tests whether this box and `aabb` overlap.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if !self.aabb.intersects(aabb) {
            return false;
        }

        self.obb.is_almost_axis_aligned() || sat::obb_aabb_intersection_test(&self.obb, aabb)
    }
}
