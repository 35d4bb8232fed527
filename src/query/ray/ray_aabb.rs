use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::query::{Ray, RayCast};

impl RayCast for Aabb {
    /// Branchless slab test.
    ///
    /// The entry parameter is clipped to the ray start, so a ray starting inside the box hits it
    /// at `t = 0`.
    #[inline]
    fn cast_ray(&self, ray: &Ray) -> Option<Real> {
        if !self.is_valid() {
            return None;
        }

        let inv_dir = ray.inv_dir();
        let t1 = (self.mins - ray.origin).component_mul(inv_dir);
        let t2 = (self.maxs - ray.origin).component_mul(inv_dir);

        // `min`/`max` ignore the NaN produced by `0 * inf` when the origin lies on a slab
        // boundary of an axis the ray is parallel to.
        let tmin = t1.inf(&t2).max();
        let tmax = t1.sup(&t2).min();

        if tmax >= tmin.max(0.0) {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}
