//! Application of the Separating Axis Theorem (SAT) for collision detection.
//!
//! Two convex shapes do **not** intersect if and only if there exists an axis onto which their
//! projections do not overlap. For polyhedra the candidate axes are the face normals of both
//! shapes and the cross products of their edge directions.
//!
//! The tests here are boolean: they stop at the first separating axis found, and only compute
//! an edge cross product once every cheaper candidate failed to separate the shapes.

pub use self::sat_frustum_aabb::frustum_aabb_intersection_test;
pub use self::sat_obb_aabb::obb_aabb_intersection_test;

use crate::math::{Real, Vector};

mod sat_frustum_aabb;
mod sat_obb_aabb;

/// Cross products shorter than this (relative to the operands) are skipped as candidate axes.
const DEGENERATE_AXIS_EPSILON: Real = 1.0e-6;

/// Do the two projection intervals fail to overlap?
#[inline]
pub fn intervals_are_disjoint(a: (Real, Real), b: (Real, Real)) -> bool {
    a.1 < b.0 || b.1 < a.0
}

/// The cross product of `a` and `b`, or `None` if they are (almost) parallel.
#[inline]
pub(crate) fn edge_cross_axis(a: &Vector<Real>, b: &Vector<Real>) -> Option<Vector<Real>> {
    let axis = a.cross(b);
    (axis.norm_squared() > DEGENERATE_AXIS_EPSILON * a.norm_squared() * b.norm_squared())
        .then_some(axis)
}
