use super::{edge_cross_axis, intervals_are_disjoint};
use crate::bounding_volume::{Aabb, Obb};
use crate::math::Vector;

/// Exact intersection test between an oriented box and an axis-aligned box.
///
/// Tests the 15 candidate axes of two boxes: the 3 world axes, the 3 local axes of `obb`, then
/// the 9 cross products between them.
pub fn obb_aabb_intersection_test(obb: &Obb, aabb: &Aabb) -> bool {
    let separates = |axis: &Vector<_>| {
        intervals_are_disjoint(obb.project_on_axis(axis), aabb.project_on_axis(axis))
    };

    let world_axes = [Vector::x(), Vector::y(), Vector::z()];

    if world_axes.iter().any(separates) {
        return false;
    }

    let local_axes = [obb.axis(0), obb.axis(1), obb.axis(2)];

    if local_axes.iter().any(separates) {
        return false;
    }

    for local in &local_axes {
        for world in &world_axes {
            if let Some(axis) = edge_cross_axis(local, world) {
                if separates(&axis) {
                    return false;
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod test {
    use super::obb_aabb_intersection_test;
    use crate::bounding_volume::{Aabb, BoundingVolume, Obb};
    use crate::math::{Point, Rotation, Vector};
    use core::f32::consts::FRAC_PI_4;

    #[test]
    fn separated_along_obb_face_normal() {
        // A box rotated by 45° around z, whose enclosing AABB overlaps the corner of the
        // unit box but whose diagonal face separates them.
        let rot = Rotation::from_axis_angle(&Vector::z_axis(), FRAC_PI_4);
        let obb = Obb::new(Point::new(2.3, 2.3, 0.0), rot, Vector::new(1.0, 1.0, 1.0));
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));

        assert!(obb.enclosing_aabb().intersects(&aabb));
        assert!(!obb_aabb_intersection_test(&obb, &aabb));
        assert!(!obb.intersects_aabb(&aabb));
    }

    #[test]
    fn deep_interpenetration() {
        let rot = Rotation::from_euler_angles(0.4, 0.2, 1.3);
        let obb = Obb::new(Point::new(0.2, -0.1, 0.3), rot, Vector::new(1.0, 2.0, 0.5));
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));

        assert!(obb_aabb_intersection_test(&obb, &aabb));
        assert!(obb.intersects_aabb(&aabb));
    }
}
