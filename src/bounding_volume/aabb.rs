//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};
use crate::utils::{approx_ge, approx_le, Axis};
use na;
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners. It is used as the bounding volume of
/// every BVH node, as the cell of every octree node, and as one of the [`Region`](super::Region)
/// variants.
///
/// # Structure
///
/// - **mins**: The point with the smallest coordinates on each axis
/// - **maxs**: The point with the largest coordinates on each axis
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y`, `mins.z ≤ maxs.z`, except for the
///   *invalid* AABB returned by [`Aabb::new_invalid`] which is the neutral element of
///   [`BoundingVolume::merge`].
///
/// # Example
///
/// ```rust
/// use pahbvh3d::bounding_volume::Aabb;
/// use pahbvh3d::na::Point3;
///
/// let aabb = Aabb::new(Point3::new(2.0, 2.0, -2.0), Point3::new(4.0, 4.0, -1.0));
/// assert_eq!(aabb.center(), Point3::new(3.0, 3.0, -1.5));
/// assert!(aabb.contains_local_point(&Point3::new(3.0, 3.0, -1.0)));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with inverted bounds.
    ///
    /// The resulting AABB has `mins` set to maximum values and `maxs` set to
    /// minimum values. This is useful as an initial value for AABB merging
    /// algorithms. No ray hits it and it contains no point.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new AABB that tightly encloses a set of points.
    ///
    /// Returns [`Aabb::new_invalid`] if the iterator is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();
        for pt in pts {
            result.take_point(pt);
        }
        result
    }

    /// Creates a new AABB that tightly encloses a set of points (references).
    pub fn from_points_ref<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        Self::from_points(pts.into_iter().copied())
    }

    /// Is this AABB well-formed, i.e., `mins <= maxs` on every axis?
    #[inline]
    pub fn is_valid(&self) -> bool {
        na::partial_le(&self.mins, &self.maxs)
    }

    /// Returns the center point of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// Returns the half-extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Returns the volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// The half area of this `Aabb`.
    pub fn half_area(&self) -> Real {
        let extents = self.extents();
        extents.x * (extents.y + extents.z) + extents.y * extents.z
    }

    /// The surface area of this `Aabb`.
    ///
    /// Invalid AABBs have a surface area of zero.
    pub fn surface_area(&self) -> Real {
        if self.is_valid() {
            self.half_area() * 2.0
        } else {
            0.0
        }
    }

    /// The axis along which this AABB is the longest.
    pub fn longest_axis(&self) -> Axis {
        Axis::of_largest(&self.extents())
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Does this AABB contains a point expressed in the same coordinate frame as `self`?
    ///
    /// Points on the boundary (up to a small relative tolerance) are contained.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if !approx_ge(point[i], self.mins[i]) || !approx_le(point[i], self.maxs[i]) {
                return false;
            }
        }

        true
    }

    /// Computes the vertices of this `Aabb`.
    ///
    /// The vertices are given in the following order, in a right-handed coordinate system:
    /// ```text
    ///    y             3 - 2
    ///    |           7 − 6 |
    ///    ___ x       |   | 1  (the zero is below 3 and on the left of 1,
    ///   /            4 - 5     hidden by the 4-5-6-7 face.)
    ///  z
    /// ```
    /// The silhouette table used by perspective projections relies on this numbering.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        [
            Point::new(self.mins.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
    }

    /// The index of the octant of `self` containing `pt`.
    ///
    /// Bit 0 is set if `pt.x >= center.x`, bit 1 for `y` and bit 2 for `z`. This matches the
    /// ordering of [`Aabb::split_at_center`].
    #[inline]
    pub fn octant_index(&self, pt: &Point<Real>) -> usize {
        let center = self.center();
        (pt.x >= center.x) as usize
            | ((pt.y >= center.y) as usize) << 1
            | ((pt.z >= center.z) as usize) << 2
    }

    /// Splits this `Aabb` at its center, into eight parts (as in an octree).
    ///
    /// The `i`-th octant lies on the upper half of the `x` (resp. `y`, `z`) axis if bit 0
    /// (resp. 1, 2) of `i` is set.
    #[inline]
    pub fn split_at_center(&self) -> [Aabb; 8] {
        let center = self.center();
        core::array::from_fn(|i| {
            let mut mins = self.mins;
            let mut maxs = center;

            for k in 0..DIM {
                if i & (1 << k) != 0 {
                    mins[k] = center[k];
                    maxs[k] = self.maxs[k];
                }
            }

            Aabb::new(mins, maxs)
        })
    }

    /// Projects every point of `Aabb` on an arbitrary axis.
    ///
    /// The axis does not need to be normalized, in which case the interval is scaled by its norm.
    pub fn project_on_axis(&self, axis: &Vector<Real>) -> (Real, Real) {
        let center = self.center().coords.dot(axis);
        let radius = self.half_extents().dot(&axis.abs());
        (center - radius, center + radius)
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }
}
