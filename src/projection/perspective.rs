use crate::bounding_volume::Aabb;
use crate::math::{Matrix4, Point, Point2, Real, Vector};
use crate::projection::{look_at, silhouette};
use crate::utils::{make_ccw, signed_area};
use arrayvec::ArrayVec;

/// Points with a clip-space `w` below this value are considered behind the eye.
const CLIP_W_EPSILON: Real = 1.0e-6;

/// A symmetric OpenGL-style perspective projection matrix.
///
/// `fov_x` and `fov_y` are the full horizontal and vertical angles of view, in radians. The
/// clip volume is the cube `[-1, 1]³`.
pub fn perspective_matrix(fov_x: Real, fov_y: Real, near: Real, far: Real) -> Matrix4<Real> {
    let mut res = Matrix4::zeros();
    res[(0, 0)] = 1.0 / (fov_x * 0.5).tan();
    res[(1, 1)] = 1.0 / (fov_y * 0.5).tan();
    res[(2, 2)] = -(far + near) / (far - near);
    res[(2, 3)] = -2.0 * far * near / (far - near);
    res[(3, 2)] = -1.0;
    res
}

/// The parameters of a perspective projection, recovered from its matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PerspectiveParameters {
    /// Distance to the near plane.
    pub near: Real,
    /// Distance to the far plane.
    pub far: Real,
    /// Left bound of the near plane.
    pub left: Real,
    /// Right bound of the near plane.
    pub right: Real,
    /// Bottom bound of the near plane.
    pub bottom: Real,
    /// Top bound of the near plane.
    pub top: Real,
    /// Horizontal angle of view, in radians.
    pub fov_x: Real,
    /// Vertical angle of view, in radians.
    pub fov_y: Real,
    /// Width over height of the near plane.
    pub aspect: Real,
}

impl PerspectiveParameters {
    /// Recovers the parameters of an OpenGL-style perspective matrix.
    pub fn from_projection(proj: &Matrix4<Real>) -> Self {
        debug_assert!(
            relative_eq!(proj[(3, 2)], -1.0, epsilon = 1.0e-3),
            "not a perspective projection matrix"
        );
        let near = proj[(2, 3)] / (proj[(2, 2)] - 1.0);
        let far = proj[(2, 3)] / (proj[(2, 2)] + 1.0);

        Self {
            near,
            far,
            left: near * (proj[(0, 2)] - 1.0) / proj[(0, 0)],
            right: near * (proj[(0, 2)] + 1.0) / proj[(0, 0)],
            bottom: near * (proj[(1, 2)] - 1.0) / proj[(1, 1)],
            top: near * (proj[(1, 2)] + 1.0) / proj[(1, 1)],
            fov_x: 2.0 * (1.0 / proj[(0, 0)]).atan(),
            fov_y: 2.0 * (1.0 / proj[(1, 1)]).atan(),
            aspect: proj[(1, 1)] / proj[(0, 0)],
        }
    }

    /// Recovers the parameters of the perspective part of `view_proj = proj * view`.
    ///
    /// Returns `None` if `view` is not invertible.
    pub fn from_view_projection(view_proj: &Matrix4<Real>, view: &Matrix4<Real>) -> Option<Self> {
        let proj = view_proj * view.try_inverse()?;
        Some(Self::from_projection(&proj))
    }

    /// Rebuilds the (possibly off-center) perspective matrix with these parameters.
    pub fn to_projection(&self) -> Matrix4<Real> {
        let (l, r, b, t, n, f) = (
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        );
        let mut res = Matrix4::zeros();
        res[(0, 0)] = 2.0 * n / (r - l);
        res[(0, 2)] = (r + l) / (r - l);
        res[(1, 1)] = 2.0 * n / (t - b);
        res[(1, 2)] = (t + b) / (t - b);
        res[(2, 2)] = -(f + n) / (f - n);
        res[(2, 3)] = -2.0 * f * n / (f - n);
        res[(3, 2)] = -1.0;
        res
    }
}

/// Perspective projection from a point of view.
///
/// Projected points are in normalized device coordinates: the visible part of the projection
/// plane is the square `[-1, 1]²`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PerspectiveProjection {
    pov: Point<Real>,
    view: Matrix4<Real>,
    view_proj: Matrix4<Real>,
}

impl PerspectiveProjection {
    /// A projection from `pov`, looking along `direction`.
    pub fn new(
        pov: Point<Real>,
        direction: &Vector<Real>,
        up: &Vector<Real>,
        fov_x: Real,
        fov_y: Real,
        near: Real,
        far: Real,
    ) -> Self {
        let view = look_at(&pov, direction, up);
        Self {
            pov,
            view,
            view_proj: perspective_matrix(fov_x, fov_y, near, far) * view,
        }
    }

    /// The point of view.
    #[inline]
    pub fn pov(&self) -> &Point<Real> {
        &self.pov
    }

    /// The view matrix.
    #[inline]
    pub fn view(&self) -> &Matrix4<Real> {
        &self.view
    }

    /// The view-projection matrix.
    #[inline]
    pub fn view_projection(&self) -> &Matrix4<Real> {
        &self.view_proj
    }

    /// The parameters of this projection.
    pub fn parameters(&self) -> Option<PerspectiveParameters> {
        PerspectiveParameters::from_view_projection(&self.view_proj, &self.view)
    }

    /// Projects `pt` to normalized device coordinates.
    ///
    /// Returns `None` if `pt` is on or behind the plane of the eye.
    pub fn project_point(&self, pt: &Point<Real>) -> Option<Point2<Real>> {
        let clip = self.view_proj * pt.to_homogeneous();

        if clip.w <= CLIP_W_EPSILON {
            return None;
        }

        Some(Point2::new(clip.x / clip.w, clip.y / clip.w))
    }

    /// The projected silhouette of `aabb`, in counter-clockwise order.
    ///
    /// Returns `None` if the point of view is inside the box, or if part of the silhouette is
    /// behind the eye.
    pub fn contour(&self, aabb: &Aabb) -> Option<ArrayVec<Point2<Real>, 6>> {
        let indices = silhouette(&self.pov, aabb);

        if indices.is_empty() {
            return None;
        }

        let vertices = aabb.vertices();
        let mut contour = ArrayVec::new();

        for i in indices {
            contour.push(self.project_point(&vertices[*i as usize])?);
        }

        let _ = make_ccw(&mut contour);
        Some(contour)
    }

    /// The area covered by the projection of `aabb`, computed by contour integration.
    ///
    /// Returns `None` in the same cases as [`Self::contour`].
    pub fn projected_area(&self, aabb: &Aabb) -> Option<Real> {
        let area = signed_area(&self.contour(aabb)?);
        debug_assert!(area >= 0.0, "contour must be counter-clockwise");
        Some(area)
    }
}

#[cfg(test)]
mod test {
    use super::{perspective_matrix, PerspectiveParameters, PerspectiveProjection};
    use crate::bounding_volume::Aabb;
    use crate::math::{Matrix4, Point, Vector};
    use core::f32::consts::FRAC_PI_2;

    fn projection() -> PerspectiveProjection {
        PerspectiveProjection::new(
            Point::origin(),
            &-Vector::z(),
            &Vector::y(),
            FRAC_PI_2,
            FRAC_PI_2,
            1.0,
            100.0,
        )
    }

    #[test]
    fn symmetric_matrix_matches_nalgebra() {
        let ours = perspective_matrix(FRAC_PI_2, FRAC_PI_2, 1.0, 10.0);
        let theirs = Matrix4::new_perspective(1.0, FRAC_PI_2, 1.0, 10.0);
        assert_relative_eq!(ours, theirs, epsilon = 1.0e-5);
    }

    #[test]
    fn parameters_round_trip() {
        let proj = perspective_matrix(1.2, 0.8, 0.5, 50.0);
        let params = PerspectiveParameters::from_projection(&proj);

        assert_relative_eq!(params.near, 0.5, epsilon = 1.0e-4);
        assert_relative_eq!(params.far, 50.0, max_relative = 1.0e-3);
        assert_relative_eq!(params.fov_x, 1.2, epsilon = 1.0e-5);
        assert_relative_eq!(params.fov_y, 0.8, epsilon = 1.0e-5);
        assert_relative_eq!(params.left, -params.right, epsilon = 1.0e-6);
        assert_relative_eq!(
            params.aspect,
            (0.6f32).tan() / (0.4f32).tan(),
            epsilon = 1.0e-5
        );
        assert_relative_eq!(params.to_projection(), proj, max_relative = 1.0e-3);

        let from_vp = projection().parameters().unwrap();
        assert_relative_eq!(from_vp.fov_x, FRAC_PI_2, epsilon = 1.0e-5);
        assert_relative_eq!(from_vp.near, 1.0, epsilon = 1.0e-4);
    }

    #[test]
    fn face_on_box_area() {
        let aabb = Aabb::new(Point::new(-1.0, -1.0, -6.0), Point::new(1.0, 1.0, -4.0));
        let proj = projection();

        let contour = proj.contour(&aabb).unwrap();
        assert_eq!(contour.len(), 4);
        // The face at z = -4 spans [-1/4, 1/4]² in normalized device coordinates.
        assert_relative_eq!(proj.projected_area(&aabb).unwrap(), 0.25, epsilon = 1.0e-5);
    }

    #[test]
    fn degenerate_projections() {
        let proj = projection();
        let around_eye = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        assert!(proj.projected_area(&around_eye).is_none());

        let behind = Aabb::new(Point::new(2.0, -1.0, 1.0), Point::new(3.0, 1.0, 3.0));
        assert!(proj.projected_area(&behind).is_none());

        let corner = Aabb::new(Point::new(1.0, 1.0, -6.0), Point::new(2.0, 2.0, -4.0));
        let area = proj.projected_area(&corner).unwrap();
        assert!(area > 0.0 && area < 4.0);
        assert_eq!(proj.contour(&corner).unwrap().len(), 6);
    }
}
