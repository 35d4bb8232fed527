//! Traits and structure needed to cast rays.

use crate::math::{Point, Real, Vector};

/// A ray for ray-casting queries.
///
/// A ray is a half-infinite line starting at an origin point and extending infinitely in a
/// direction. The component-wise inverse of the direction is computed once at construction
/// since every slab test needs it.
///
/// # Direction Vector
///
/// The direction does not need to be normalized, in which case hit parameters are scaled by
/// `dir.norm()`. Zero components are allowed: their inverse is a signed infinity, which the slab
/// test handles without special-casing.
///
/// # Example
///
/// ```rust
/// use pahbvh3d::bounding_volume::Aabb;
/// use pahbvh3d::query::{Ray, RayCast};
/// use pahbvh3d::na::{Point3, Vector3};
///
/// let aabb = Aabb::new(Point3::new(2.0, 2.0, -2.0), Point3::new(4.0, 4.0, -1.0));
/// let ray = Ray::new(Point3::new(3.0, 3.0, 1.0), Vector3::new(0.0, 0.0, -1.0));
///
/// assert_eq!(aabb.cast_ray(&ray), Some(2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction vector of the ray.
    pub dir: Vector<Real>,
    inv_dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray from an origin point and direction vector.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray {
            origin,
            dir,
            inv_dir: dir.map(|d| 1.0 / d),
        }
    }

    /// The component-wise inverse of the ray direction.
    #[inline]
    pub fn inv_dir(&self) -> &Vector<Real> {
        &self.inv_dir
    }

    /// Computes a point along the ray at parameter `t`.
    ///
    /// Returns `origin + dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// Traits of objects which can be tested for intersection with a ray.
pub trait RayCast {
    /// Computes the parameter `t >= 0` of the closest intersection between this shape and `ray`.
    ///
    /// Returns `None` if the ray misses, or if the shape lies entirely behind the ray origin.
    fn cast_ray(&self, ray: &Ray) -> Option<Real>;

    /// Tests whether a ray intersects this shape.
    #[inline]
    fn intersects_ray(&self, ray: &Ray) -> bool {
        self.cast_ray(ray).is_some()
    }
}
