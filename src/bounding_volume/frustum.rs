//! Viewing frustums.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Matrix4, Point, Real, Vector};
use crate::query::sat;
use crate::utils::BOUNDARY_EPSILON;

/// A plane given by a point and its outward normal.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FrustumPlane {
    /// A point on the plane.
    pub point: Point<Real>,
    /// The unit normal of the plane, pointing outside of the frustum.
    pub normal: Vector<Real>,
}

impl FrustumPlane {
    /// The signed distance from `pt` to this plane (positive outside).
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        (pt - self.point).dot(&self.normal)
    }
}

/// A truncated pyramid, as seen from a point of view.
///
/// The eight vertices follow the numbering of [`Aabb::vertices`] with the near plane playing the
/// role of the `z = min` face:
/// ```text
///   0: near-left-bottom  1: near-right-bottom  2: near-right-top  3: near-left-top
///   4: far-left-bottom   5: far-right-bottom   6: far-right-top   7: far-left-top
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Frustum {
    vertices: [Point<Real>; 8],
    planes: [FrustumPlane; 6],
    aabb: Aabb,
}

impl Frustum {
    /// Builds the frustum of a point of view.
    ///
    /// `fov_x` and `fov_y` are the full horizontal and vertical angles of view, in radians.
    /// `up` does not need to be orthogonal to `direction`, but must not be parallel to it.
    pub fn new(
        pov: Point<Real>,
        direction: Vector<Real>,
        up: Vector<Real>,
        fov_x: Real,
        fov_y: Real,
        near: Real,
        far: Real,
    ) -> Self {
        let forward = direction.normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward);

        let (tan_x, tan_y) = ((fov_x * 0.5).tan(), (fov_y * 0.5).tan());
        let corners = |dist: Real| {
            let center = pov + forward * dist;
            let half_w = right * (dist * tan_x);
            let half_h = up * (dist * tan_y);
            [
                center - half_w - half_h,
                center + half_w - half_h,
                center + half_w + half_h,
                center - half_w + half_h,
            ]
        };

        let [n0, n1, n2, n3] = corners(near);
        let [f0, f1, f2, f3] = corners(far);
        Self::from_vertices([n0, n1, n2, n3, f0, f1, f2, f3])
    }

    /// Builds the frustum corresponding to the clip volume of a view-projection matrix.
    ///
    /// The clip volume is the OpenGL cube `[-1, 1]³`. Returns `None` if `view_proj` is not
    /// invertible.
    pub fn from_view_projection(view_proj: &Matrix4<Real>) -> Option<Self> {
        let inv = view_proj.try_inverse()?;
        let ndc = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let vertices = ndc
            .vertices()
            .map(|pt| Point::from_homogeneous(inv * pt.to_homogeneous()));

        if vertices.iter().any(|v| v.is_none()) {
            return None;
        }

        Some(Self::from_vertices(vertices.map(|v| v.unwrap_or_else(Point::origin))))
    }

    /// Builds a frustum from its eight vertices, numbered as documented on [`Frustum`].
    pub fn from_vertices(vertices: [Point<Real>; 8]) -> Self {
        let centroid = crate::shape::centroid(&vertices);
        // Faces given as three vertex indices each.
        const FACES: [[usize; 3]; 6] = [
            [0, 1, 2], // near
            [4, 5, 6], // far
            [0, 3, 7], // left
            [1, 2, 6], // right
            [0, 1, 5], // bottom
            [3, 2, 6], // top
        ];

        let planes = FACES.map(|[a, b, c]| {
            let point = vertices[a];
            let mut normal = (vertices[b] - point)
                .cross(&(vertices[c] - point))
                .try_normalize(Real::EPSILON)
                .unwrap_or_else(Vector::zeros);

            if (centroid - point).dot(&normal) > 0.0 {
                normal = -normal;
            }

            FrustumPlane { point, normal }
        });

        Self {
            aabb: Aabb::from_points(vertices),
            vertices,
            planes,
        }
    }

    /// The eight vertices of this frustum.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>; 8] {
        &self.vertices
    }

    /// The six bounding planes of this frustum: near, far, left, right, bottom, top.
    #[inline]
    pub fn planes(&self) -> &[FrustumPlane; 6] {
        &self.planes
    }

    /// The outward normals of the six faces.
    pub fn face_normals(&self) -> [Vector<Real>; 6] {
        self.planes.map(|p| p.normal)
    }

    /// The six distinct edge directions of this frustum: the four lateral edges, then the
    /// horizontal and vertical edges shared by the near and far faces.
    pub fn edge_directions(&self) -> [Vector<Real>; 6] {
        let v = &self.vertices;
        [
            v[4] - v[0],
            v[5] - v[1],
            v[6] - v[2],
            v[7] - v[3],
            v[1] - v[0],
            v[3] - v[0],
        ]
    }

    /// The smallest AABB enclosing this frustum.
    #[inline]
    pub fn enclosing_aabb(&self) -> Aabb {
        self.aabb
    }

    /// Does this frustum contain `pt` (boundary included)?
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        let scale = self.aabb.extents().norm().max(1.0);
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(pt) <= BOUNDARY_EPSILON * scale)
    }

    /// Does this frustum fully contain `aabb`?
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        aabb.vertices().iter().all(|pt| self.contains_local_point(pt))
    }

    /// Projects this frustum on an arbitrary axis.
    pub fn project_on_axis(&self, axis: &Vector<Real>) -> (Real, Real) {
        self.vertices
            .iter()
            .map(|v| v.coords.dot(axis))
            .fold((Real::MAX, -Real::MAX), |(min, max), d| {
                (min.min(d), max.max(d))
            })
    }

    /// Tests whether this frustum and `aabb` overlap.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.aabb.intersects(aabb) && sat::frustum_aabb_intersection_test(self, aabb)
    }
}
