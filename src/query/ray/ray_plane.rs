use crate::bounding_volume::FrustumPlane;
use crate::math::{Point, Real, Vector};
use crate::query::{Ray, RayCast};
use crate::utils::RAY_PLANE_PARALLEL_EPSILON;

/// Computes the parameter of the intersection between a ray and the plane going through `point`
/// with normal `normal`.
///
/// Returns `None` if the ray is (almost) parallel to the plane, or if the plane lies behind the
/// ray origin. The parallelism test is relative to the norms of `normal` and `ray.dir`, so a
/// zero normal never intersects anything.
#[inline]
pub fn ray_plane_intersection(
    ray: &Ray,
    point: &Point<Real>,
    normal: &Vector<Real>,
) -> Option<Real> {
    let dpos = point - ray.origin;
    let denom = normal.dot(&ray.dir);

    // Relative to both lengths: neither `normal` nor `ray.dir` needs to be normalized.
    if denom.abs() <= RAY_PLANE_PARALLEL_EPSILON * normal.norm() * ray.dir.norm() {
        return None;
    }

    let t = normal.dot(&dpos) / denom;

    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

impl RayCast for FrustumPlane {
    #[inline]
    fn cast_ray(&self, ray: &Ray) -> Option<Real> {
        ray_plane_intersection(ray, &self.point, &self.normal)
    }
}

#[cfg(test)]
mod test {
    use super::ray_plane_intersection;
    use crate::math::{Point, Vector};
    use crate::query::Ray;

    #[test]
    fn ray_plane_front_back_and_parallel() {
        let point = Point::new(0.0, 0.0, -3.0);
        let normal = Vector::z();

        let ray = Ray::new(Point::new(1.0, 2.0, 1.0), -Vector::z());
        assert_eq!(ray_plane_intersection(&ray, &point, &normal), Some(4.0));

        let ray = Ray::new(Point::new(1.0, 2.0, 1.0), Vector::z());
        assert_eq!(ray_plane_intersection(&ray, &point, &normal), None);

        let ray = Ray::new(Point::new(1.0, 2.0, 1.0), Vector::x());
        assert_eq!(ray_plane_intersection(&ray, &point, &normal), None);
    }

    #[test]
    fn ray_plane_parallelism_is_scale_invariant() {
        let point = Point::new(0.0, 0.0, -3.0);

        // Short normal and short direction.
        let normal = Vector::z() * 1.0e-8;
        let ray = Ray::new(Point::origin(), -Vector::z() * 1.0e-4);
        assert_relative_eq!(
            ray_plane_intersection(&ray, &point, &normal).unwrap(),
            3.0e4,
            max_relative = 1.0e-4
        );

        let ray = Ray::new(Point::origin(), Vector::new(1.0e-4, 0.0, 1.0e-12));
        assert_eq!(ray_plane_intersection(&ray, &point, &normal), None);
        assert_eq!(ray_plane_intersection(&ray, &point, &Vector::zeros()), None);
    }
}
