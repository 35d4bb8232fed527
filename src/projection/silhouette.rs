use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// Number of entries of the silhouette table.
pub const SILHOUETTE_TABLE_LEN: usize = 43;

// Vertex count, then the silhouette vertices (numbered as `Aabb::vertices`).
// Indexed by the position code of the eye. Codes setting both bits of the same axis cannot
// happen and have empty entries.
#[rustfmt::skip]
const SILHOUETTES: [(u8, [u8; 6]); SILHOUETTE_TABLE_LEN] = [
    (0, [0, 0, 0, 0, 0, 0]), // 0: inside
    (4, [0, 4, 7, 3, 0, 0]), // 1: left
    (4, [1, 2, 6, 5, 0, 0]), // 2: right
    (0, [0, 0, 0, 0, 0, 0]), // 3
    (4, [0, 1, 5, 4, 0, 0]), // 4: bottom
    (6, [0, 1, 5, 4, 7, 3]), // 5: bottom, left
    (6, [0, 1, 2, 6, 5, 4]), // 6: bottom, right
    (0, [0, 0, 0, 0, 0, 0]), // 7
    (4, [2, 3, 7, 6, 0, 0]), // 8: top
    (6, [4, 7, 6, 2, 3, 0]), // 9: top, left
    (6, [2, 3, 7, 6, 5, 1]), // 10: top, right
    (0, [0, 0, 0, 0, 0, 0]), // 11
    (0, [0, 0, 0, 0, 0, 0]), // 12
    (0, [0, 0, 0, 0, 0, 0]), // 13
    (0, [0, 0, 0, 0, 0, 0]), // 14
    (0, [0, 0, 0, 0, 0, 0]), // 15
    (4, [0, 3, 2, 1, 0, 0]), // 16: front
    (6, [0, 4, 7, 3, 2, 1]), // 17: front, left
    (6, [0, 3, 2, 6, 5, 1]), // 18: front, right
    (0, [0, 0, 0, 0, 0, 0]), // 19
    (6, [0, 3, 2, 1, 5, 4]), // 20: front, bottom
    (6, [2, 1, 5, 4, 7, 3]), // 21: front, bottom, left
    (6, [0, 3, 2, 6, 5, 4]), // 22: front, bottom, right
    (0, [0, 0, 0, 0, 0, 0]), // 23
    (6, [0, 3, 7, 6, 2, 1]), // 24: front, top
    (6, [0, 4, 7, 6, 2, 1]), // 25: front, top, left
    (6, [0, 3, 7, 6, 5, 1]), // 26: front, top, right
    (0, [0, 0, 0, 0, 0, 0]), // 27
    (0, [0, 0, 0, 0, 0, 0]), // 28
    (0, [0, 0, 0, 0, 0, 0]), // 29
    (0, [0, 0, 0, 0, 0, 0]), // 30
    (0, [0, 0, 0, 0, 0, 0]), // 31
    (4, [4, 5, 6, 7, 0, 0]), // 32: back
    (6, [4, 5, 6, 7, 3, 0]), // 33: back, left
    (6, [1, 2, 6, 7, 4, 5]), // 34: back, right
    (0, [0, 0, 0, 0, 0, 0]), // 35
    (6, [0, 1, 5, 6, 7, 4]), // 36: back, bottom
    (6, [0, 1, 5, 6, 7, 3]), // 37: back, bottom, left
    (6, [0, 1, 2, 6, 7, 4]), // 38: back, bottom, right
    (0, [0, 0, 0, 0, 0, 0]), // 39
    (6, [2, 3, 7, 4, 5, 6]), // 40: back, top
    (6, [0, 4, 5, 6, 2, 3]), // 41: back, top, left
    (6, [1, 2, 3, 7, 4, 5]), // 42: back, top, right
];

/// Where a point lies relative to the slabs of an AABB, as used to index the silhouette table.
///
/// A point inside the box has an empty code. Both flags of the same axis are never set together.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct PositionCode(u8);

bitflags::bitflags! {
    impl PositionCode: u8 {
        /// Below the minimum `x` of the box.
        const LEFT = 1;
        /// Above the maximum `x` of the box.
        const RIGHT = 1 << 1;
        /// Below the minimum `y` of the box.
        const BOTTOM = 1 << 2;
        /// Above the maximum `y` of the box.
        const TOP = 1 << 3;
        /// Below the minimum `z` of the box.
        const FRONT = 1 << 4;
        /// Above the maximum `z` of the box.
        const BACK = 1 << 5;
    }
}

/// The position code of `eye` relative to `aabb`.
pub fn position_code(eye: &Point<Real>, aabb: &Aabb) -> PositionCode {
    const BELOW: [PositionCode; 3] = [
        PositionCode::LEFT,
        PositionCode::BOTTOM,
        PositionCode::FRONT,
    ];
    const ABOVE: [PositionCode; 3] = [
        PositionCode::RIGHT,
        PositionCode::TOP,
        PositionCode::BACK,
    ];
    let mut code = PositionCode::empty();

    for i in 0..3 {
        if eye[i] < aabb.mins[i] {
            code |= BELOW[i];
        } else if eye[i] > aabb.maxs[i] {
            code |= ABOVE[i];
        }
    }

    code
}

/// The indices (numbered as [`Aabb::vertices`]) of the vertices forming the silhouette of
/// `aabb` as seen from `eye`.
///
/// The silhouette has 4 vertices if a single face is visible, 6 otherwise. It is empty if `eye`
/// is inside the box.
pub fn silhouette(eye: &Point<Real>, aabb: &Aabb) -> &'static [u8] {
    let (len, vertices) = &SILHOUETTES[position_code(eye, aabb).bits() as usize];
    &vertices[..*len as usize]
}

#[cfg(test)]
mod test {
    use super::{position_code, silhouette, PositionCode, SILHOUETTES};
    use crate::bounding_volume::Aabb;
    use crate::math::Point;

    #[test]
    fn silhouette_entries_are_valid() {
        for (code, (len, vertices)) in SILHOUETTES.iter().enumerate() {
            let conflicting = (0..3).any(|i| (code >> (2 * i)) & 3 == 3);
            let visible_faces = (0..3).filter(|i| (code >> (2 * i)) & 3 != 0).count();

            match (conflicting, visible_faces) {
                (true, _) | (_, 0) => assert_eq!(*len, 0),
                (false, 1) => assert_eq!(*len, 4),
                _ => assert_eq!(*len, 6),
            }

            let used = &vertices[..*len as usize];
            for (i, v) in used.iter().enumerate() {
                assert!(*v < 8);
                assert!(!used[i + 1..].contains(v));
            }
        }
    }

    #[test]
    fn silhouette_from_corner() {
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let eye = Point::new(5.0, 5.0, 5.0);

        assert_eq!(
            position_code(&eye, &aabb),
            PositionCode::RIGHT | PositionCode::TOP | PositionCode::BACK
        );
        assert_eq!(
            position_code(&Point::new(0.0, -3.0, 0.0), &aabb),
            PositionCode::BOTTOM
        );
        // Only the corner closest to the eye (6) and the corner opposite (0) are hidden.
        let contour = silhouette(&eye, &aabb);
        assert_eq!(contour.len(), 6);
        assert!(!contour.contains(&6) && !contour.contains(&0));

        assert!(silhouette(&Point::origin(), &aabb).is_empty());
    }
}
