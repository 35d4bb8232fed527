use crate::math::Real;

/// Relative tolerance used to make boundary comparisons inclusive.
pub const BOUNDARY_EPSILON: Real = 1.0e-5;

/// Relative tolerance used by [`is_parallel`](super::is_parallel) when deciding whether
/// an oriented box is "almost" axis-aligned.
pub const AXIS_ALIGNMENT_THRESHOLD: Real = 1.0e-4;

/// Threshold on the cosine between a ray direction and a plane normal below which the ray is
/// considered parallel to the plane.
pub const RAY_PLANE_PARALLEL_EPSILON: Real = 1.0e-7;

/// Tolerance on the distance of a point to the supporting plane of a convex hull.
pub const COPLANARITY_EPSILON: Real = 1.0e-4;

/// Returns `true` if `a <= b` up to a tolerance relative to the magnitude of the operands.
#[inline]
pub fn approx_le(a: Real, b: Real) -> bool {
    a <= b + BOUNDARY_EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Returns `true` if `a >= b` up to a tolerance relative to the magnitude of the operands.
#[inline]
pub fn approx_ge(a: Real, b: Real) -> bool {
    approx_le(b, a)
}

/// Default relative tolerance used to decide whether a ray direction is affine to the rays of an
/// influence area.
pub const AFFINE_DIRECTION_THRESHOLD: Real = 1.0e-3;
