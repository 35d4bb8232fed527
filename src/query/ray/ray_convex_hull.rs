use crate::math::Real;
use crate::query::{ray_plane_intersection, Ray, RayCast};
use crate::shape::{point_in_convex_polygon, ConvexHull, Triangle};

impl RayCast for ConvexHull {
    fn cast_ray(&self, ray: &Ray) -> Option<Real> {
        let points = self.points();
        let normal = self.normal();
        let t = ray_plane_intersection(ray, &points[0], &normal)?;

        point_in_convex_polygon(points, &normal, &ray.point_at(t)).then_some(t)
    }
}

impl RayCast for Triangle {
    fn cast_ray(&self, ray: &Ray) -> Option<Real> {
        let normal = self.scaled_normal();
        let t = ray_plane_intersection(ray, &self.a, &normal)?;

        point_in_convex_polygon(&self.vertices(), &normal, &ray.point_at(t)).then_some(t)
    }
}
