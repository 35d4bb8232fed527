//! Bounding volumes and the regions built from them.

pub use self::aabb::Aabb;
pub use self::bounding_volume::BoundingVolume;
pub use self::frustum::{Frustum, FrustumPlane};
pub use self::obb::{AabbForObb, Obb};
pub use self::region::Region;

#[doc(hidden)]
pub mod bounding_volume;

mod aabb;
mod frustum;
mod obb;
mod region;
