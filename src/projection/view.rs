use crate::math::{Matrix4, Point, Real, Vector};

/// The world axis that is the least parallel to `direction`.
///
/// Used as the `up` vector of view matrices so that it never degenerates with the viewing
/// direction.
pub fn up_vector_for(direction: &Vector<Real>) -> Vector<Real> {
    let abs = direction.abs();
    match abs.imin() {
        0 => Vector::x(),
        1 => Vector::y(),
        _ => Vector::z(),
    }
}

/// A right-handed view matrix placed at `eye` and looking along `direction`.
///
/// In view space, the camera looks toward `-z`, `x` points to the right and `y` points up.
#[inline]
pub fn look_at(eye: &Point<Real>, direction: &Vector<Real>, up: &Vector<Real>) -> Matrix4<Real> {
    Matrix4::look_at_rh(eye, &(eye + direction), up)
}

#[cfg(test)]
mod test {
    use super::{look_at, up_vector_for};
    use crate::math::{Point, Vector};

    #[test]
    fn look_at_maps_direction_to_minus_z() {
        let eye = Point::new(1.0, 2.0, 3.0);
        let dir = Vector::new(1.0, 1.0, 0.0).normalize();
        let up = up_vector_for(&dir);
        assert_eq!(up, Vector::z());

        let view = look_at(&eye, &dir, &up);
        let ahead = view.transform_point(&(eye + dir * 5.0));
        assert_relative_eq!(ahead, Point::new(0.0, 0.0, -5.0), epsilon = 1.0e-5);
    }
}
