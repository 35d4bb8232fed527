use approx::assert_relative_eq;
use pahbvh3d::bounding_volume::Aabb;
use pahbvh3d::math::{Point, Real, Vector};
use pahbvh3d::projection::{
    up_vector_for, OrthographicProjection, PerspectiveParameters, PerspectiveProjection,
};
use pahbvh3d::utils::{convex_hull2d, signed_area};

#[test]
fn perspective_contour_matches_projected_hull() {
    let mut rng = oorandom::Rand32::new(3);
    let mut coord = |scale: Real| (rng.rand_float() - 0.5) * scale;
    let directions = [
        Vector::x(),
        -Vector::x(),
        Vector::y(),
        -Vector::y(),
        Vector::z(),
        -Vector::z(),
        Vector::new(1.0, 1.0, 1.0),
    ];

    for dir in directions {
        let eye = Point::new(1.0, -2.0, 0.5);
        let up = up_vector_for(&dir);
        let proj = PerspectiveProjection::new(eye, &dir, &up, 1.2, 0.9, 0.1, 100.0);

        for _ in 0..200 {
            let depth = 6.0 + coord(4.0);
            let offset = Vector::new(coord(6.0), coord(6.0), coord(6.0));
            let center = eye + dir.normalize() * depth + offset;
            let half_extents = Vector::new(coord(3.0).abs(), coord(3.0).abs(), coord(3.0).abs());
            let aabb = Aabb::from_half_extents(center, half_extents);

            let projected: Option<Vec<_>> = aabb
                .vertices()
                .iter()
                .map(|pt| proj.project_point(pt))
                .collect();

            let (Some(projected), Some(area)) = (projected, proj.projected_area(&aabb)) else {
                continue;
            };

            let expected = signed_area(&convex_hull2d(&projected));
            assert!(area >= 0.0);
            assert_relative_eq!(area, expected, max_relative = 1.0e-3, epsilon = 1.0e-5);
        }
    }
}

#[test]
fn orthographic_area_matches_contour_area() {
    let mut rng = oorandom::Rand32::new(4);
    let mut coord = |scale: Real| (rng.rand_float() - 0.5) * scale;

    for _ in 0..200 {
        let dir = Vector::new(coord(2.0), coord(2.0), coord(2.0));
        if dir.norm() < 1.0e-2 {
            continue;
        }

        let proj = OrthographicProjection::new(&Point::origin(), &dir, &up_vector_for(&dir));
        let center = Point::new(coord(10.0), coord(10.0), coord(10.0));
        let half_extents = Vector::new(coord(3.0).abs(), coord(3.0).abs(), coord(3.0).abs());
        let aabb = Aabb::from_half_extents(center, half_extents);

        let area = proj.projected_area(&aabb);
        assert_relative_eq!(
            area,
            proj.contour_area(&aabb),
            max_relative = 1.0e-3,
            epsilon = 1.0e-4
        );

        // Never larger than the projection of the bounding sphere, never smaller than a face.
        let radius = half_extents.norm();
        assert!(area <= core::f32::consts::PI * radius * radius * 1.001);
        let extents = aabb.extents();
        let smallest_face = (extents.x * extents.y)
            .min(extents.y * extents.z)
            .min(extents.z * extents.x);
        assert!(area >= smallest_face * 0.999);
    }
}

#[test]
fn perspective_parameters_round_trip() {
    let params = PerspectiveParameters {
        near: 0.5,
        far: 80.0,
        left: -0.4,
        right: 0.6,
        bottom: -0.3,
        top: 0.2,
        fov_x: 0.0,
        fov_y: 0.0,
        aspect: 0.0,
    };

    let recovered = PerspectiveParameters::from_projection(&params.to_projection());
    assert_relative_eq!(recovered.near, params.near, max_relative = 1.0e-3);
    assert_relative_eq!(recovered.far, params.far, max_relative = 1.0e-3);
    assert_relative_eq!(recovered.left, params.left, epsilon = 1.0e-4);
    assert_relative_eq!(recovered.right, params.right, epsilon = 1.0e-4);
    assert_relative_eq!(recovered.bottom, params.bottom, epsilon = 1.0e-4);
    assert_relative_eq!(recovered.top, params.top, epsilon = 1.0e-4);
    assert_relative_eq!(recovered.aspect, 2.0, epsilon = 1.0e-4);

    let eye = Point::new(3.0, 1.0, -2.0);
    let dir = Vector::new(-1.0, 0.2, 0.5);
    let proj = PerspectiveProjection::new(eye, &dir, &up_vector_for(&dir), 1.0, 0.7, 0.2, 50.0);
    let recovered = proj.parameters().unwrap();
    assert_relative_eq!(recovered.fov_x, 1.0, epsilon = 1.0e-4);
    assert_relative_eq!(recovered.fov_y, 0.7, epsilon = 1.0e-4);
    assert_relative_eq!(recovered.near, 0.2, max_relative = 1.0e-3);
    assert_relative_eq!(recovered.far, 50.0, max_relative = 1.0e-2);
}
