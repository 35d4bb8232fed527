//! The spatial extent of an influence area.

use crate::bounding_volume::{Aabb, AabbForObb, BoundingVolume, Frustum, Obb};
use crate::math::{Point, Real};

/// A convex region of space.
///
/// Regions are immutable values. Whatever the variant, [`Region::enclosing_aabb`] contains every
/// point the region contains.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Region {
    /// An axis-aligned box.
    Aabb(Aabb),
    /// An oriented box.
    Obb(Obb),
    /// An oriented box with a cached enclosing AABB.
    AabbForObb(AabbForObb),
    /// A viewing frustum.
    Frustum(Frustum),
}

impl Region {
    /// Does this region contain `pt`?
    pub fn contains(&self, pt: &Point<Real>) -> bool {
        match self {
            Region::Aabb(aabb) => aabb.contains_local_point(pt),
            Region::Obb(obb) => obb.contains_local_point(pt),
            Region::AabbForObb(obb) => obb.contains_local_point(pt),
            Region::Frustum(frustum) => frustum.contains_local_point(pt),
        }
    }

    /// The smallest AABB containing this region.
    pub fn enclosing_aabb(&self) -> Aabb {
        match self {
            Region::Aabb(aabb) => *aabb,
            Region::Obb(obb) => obb.enclosing_aabb(),
            Region::AabbForObb(obb) => obb.enclosing_aabb(),
            Region::Frustum(frustum) => frustum.enclosing_aabb(),
        }
    }

    /// Does this region overlap `aabb`?
    pub fn is_colliding_with(&self, aabb: &Aabb) -> bool {
        match self {
            Region::Aabb(region) => region.intersects(aabb),
            Region::Obb(obb) => obb.intersects_aabb(aabb),
            Region::AabbForObb(obb) => obb.intersects_aabb(aabb),
            Region::Frustum(frustum) => frustum.intersects_aabb(aabb),
        }
    }

    /// Does this region fully contain `aabb`?
    pub fn fully_contains(&self, aabb: &Aabb) -> bool {
        match self {
            Region::Aabb(region) => region.contains(aabb),
            Region::Obb(obb) => obb.contains_aabb(aabb),
            Region::AabbForObb(obb) => obb.contains_aabb(aabb),
            Region::Frustum(frustum) => frustum.contains_aabb(aabb),
        }
    }

    /// The corners of this region, for visualization.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        match self {
            Region::Aabb(aabb) => aabb.vertices(),
            Region::Obb(obb) => obb.vertices(),
            Region::AabbForObb(obb) => obb.obb().vertices(),
            Region::Frustum(frustum) => *frustum.vertices(),
        }
    }
}

impl From<Aabb> for Region {
    fn from(aabb: Aabb) -> Self {
        Region::Aabb(aabb)
    }
}

impl From<Obb> for Region {
    fn from(obb: Obb) -> Self {
        Region::Obb(obb)
    }
}

impl From<AabbForObb> for Region {
    fn from(obb: AabbForObb) -> Self {
        Region::AabbForObb(obb)
    }
}

impl From<Frustum> for Region {
    fn from(frustum: Frustum) -> Self {
        Region::Frustum(frustum)
    }
}
