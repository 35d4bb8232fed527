//! Non-persistent geometric queries.
//!
//! # General cases
//! The most general ray-casting entry point is the [`RayCast`] trait, implemented by every shape
//! a ray can hit: [`Aabb`](crate::bounding_volume::Aabb), [`Triangle`](crate::shape::Triangle),
//! [`ConvexHull`](crate::shape::ConvexHull) and [`FrustumPlane`](crate::bounding_volume::FrustumPlane).
//!
//! # Specific cases
//! The functions exported by the [`sat`] module are exact boolean overlap tests between the
//! oriented regions of influence areas and axis-aligned boxes.

pub use self::error::Unsupported;
pub use self::ray::{ray_plane_intersection, Ray, RayCast};

mod error;
mod ray;
pub mod sat;
