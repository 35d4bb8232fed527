use super::{edge_cross_axis, intervals_are_disjoint};
use crate::bounding_volume::{Aabb, Frustum};
use crate::math::{Real, Vector};

/// Exact intersection test between a frustum and an axis-aligned box.
///
/// Tests 27 candidate axes: the 3 world axes, the 6 face normals of the frustum, then the cross
/// products of its 6 edge directions with the 3 world axes. The frustum extents along an axis
/// are found by scanning its 8 vertices.
pub fn frustum_aabb_intersection_test(frustum: &Frustum, aabb: &Aabb) -> bool {
    let separates = |axis: &Vector<Real>| {
        intervals_are_disjoint(frustum.project_on_axis(axis), aabb.project_on_axis(axis))
    };

    let world_axes = [Vector::x(), Vector::y(), Vector::z()];

    if world_axes.iter().any(separates) {
        return false;
    }

    if frustum.face_normals().iter().any(separates) {
        return false;
    }

    for edge in &frustum.edge_directions() {
        for world in &world_axes {
            if let Some(axis) = edge_cross_axis(edge, world) {
                if separates(&axis) {
                    return false;
                }
            }
        }
    }

    true
}
