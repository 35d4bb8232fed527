//! Ray-casting related definitions and implementations.

pub use self::ray::{Ray, RayCast};
pub use self::ray_plane::ray_plane_intersection;

mod ray;
mod ray_aabb;
mod ray_convex_hull;
mod ray_plane;
