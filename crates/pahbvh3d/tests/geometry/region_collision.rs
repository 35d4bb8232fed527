use pahbvh3d::bounding_volume::{Aabb, AabbForObb, BoundingVolume, Frustum, Obb, Region};
use pahbvh3d::math::{Point, Real, Rotation, Vector};

fn regions() -> Vec<Region> {
    let obb = Obb::new(
        Point::new(1.0, -0.5, 0.3),
        Rotation::from_euler_angles(0.7, -0.4, 1.2),
        Vector::new(3.0, 1.0, 2.0),
    );

    vec![
        Aabb::new(Point::new(-2.0, -1.0, -3.0), Point::new(2.0, 3.0, 1.0)).into(),
        obb.into(),
        AabbForObb::new(obb).into(),
        Frustum::new(
            Point::new(0.0, 0.0, 6.0),
            Vector::new(0.2, 0.1, -1.0),
            Vector::y(),
            1.2,
            0.8,
            0.5,
            12.0,
        )
        .into(),
    ]
}

fn grid(aabb: &Aabb) -> impl Iterator<Item = Point<Real>> + '_ {
    (0..125).map(move |i| {
        let t = Vector::new((i % 5) as Real, ((i / 5) % 5) as Real, (i / 25) as Real) / 4.0;
        aabb.mins + aabb.extents().component_mul(&t)
    })
}

#[test]
fn region_collision_has_no_false_negative() {
    let mut rng = oorandom::Rand32::new(7);
    let mut coord = |scale: Real| (rng.rand_float() - 0.5) * scale;

    for region in regions() {
        let mut colliding = 0;

        for _ in 0..500 {
            let center = Point::new(coord(16.0), coord(16.0), coord(16.0));
            let half_extents = Vector::new(coord(4.0).abs(), coord(4.0).abs(), coord(4.0).abs());
            let aabb = Aabb::from_half_extents(center, half_extents);

            let sampled_inside = grid(&aabb).any(|pt| region.contains(&pt))
                || region.vertices().iter().any(|pt| aabb.contains_local_point(pt));

            if region.fully_contains(&aabb) {
                assert!(grid(&aabb).all(|pt| region.contains(&pt)));
                assert!(region.is_colliding_with(&aabb));
            }

            if region.is_colliding_with(&aabb) {
                colliding += 1;
                assert!(region.enclosing_aabb().intersects(&aabb));
            } else {
                assert!(!sampled_inside, "{:?} misses {:?}", region, aabb);
            }
        }

        assert!(colliding > 0);
    }
}

#[test]
fn region_enclosing_aabb_contains_samples() {
    for region in regions() {
        let enclosing = region.enclosing_aabb();
        let mut inside = 0;

        for pt in grid(&enclosing) {
            if region.contains(&pt) {
                inside += 1;
                assert!(enclosing.contains_local_point(&pt));
            }
        }

        assert!(inside > 0);

        let vertices = region.vertices();
        let center = Point::from(vertices.iter().map(|pt| pt.coords).sum::<Vector<Real>>() / 8.0);
        let tiny = Aabb::from_half_extents(center, Vector::repeat(1.0e-3));
        assert!(region.contains(&center));
        assert!(region.fully_contains(&tiny));
        assert!(region.is_colliding_with(&tiny));
    }
}
