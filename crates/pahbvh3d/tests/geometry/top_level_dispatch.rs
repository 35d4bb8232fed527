use pahbvh3d::influence_area::{InfluenceArea, PlaneInfluenceArea, PointInfluenceArea};
use pahbvh3d::math::{Point, Real, Vector};
use pahbvh3d::partitioning::{
    Bvh, BvhProperties, BvhStrategy, OctreeProperties, TopLevel, TopLevelOctree,
    TopLevelProperties, TopLevelStatistics, TopLevelStructure,
};
use pahbvh3d::query::{Ray, RayCast};
use pahbvh3d::shape::Triangle;

fn scene(seed: u64) -> Vec<Triangle> {
    let mut rng = oorandom::Rand32::new(seed);
    let mut coord = |scale: Real| (rng.rand_float() - 0.5) * scale;
    (0..800)
        .map(|_| {
            let center = Point::new(coord(40.0), coord(40.0), coord(40.0));
            let mut vertex = || center + Vector::new(coord(3.0), coord(3.0), coord(3.0));
            Triangle::new(vertex(), vertex(), vertex())
        })
        .collect()
}

fn areas() -> Vec<InfluenceArea> {
    vec![
        PlaneInfluenceArea::new(Point::new(-10.0, 25.0, 0.0), -Vector::y(), 16.0, 16.0, 50.0)
            .into(),
        PlaneInfluenceArea::new(Point::new(5.0, 25.0, 0.0), -Vector::y(), 16.0, 16.0, 50.0).into(),
        PointInfluenceArea::new(Point::new(0.0, 0.0, 30.0), -Vector::z(), 0.8, 0.8, 1.0, 60.0)
            .into(),
    ]
}

fn top_level(areas: &[InfluenceArea]) -> TopLevel<'_> {
    let fallback = Bvh::new(BvhProperties::default(), BvhStrategy::sah(), None).unwrap();
    let bvhs = areas
        .iter()
        .map(|area| Bvh::new(BvhProperties::default(), BvhStrategy::pah(), Some(area)).unwrap())
        .collect();
    TopLevel::new(fallback, bvhs, TopLevelProperties::default().with_seed(Some(9))).unwrap()
}

fn rays(seed: u64) -> Vec<Ray> {
    let mut rng = oorandom::Rand32::new(seed);
    let mut coord = |scale: Real| (rng.rand_float() - 0.5) * scale;
    (0..400)
        .map(|i| match i % 3 {
            0 | 1 => Ray::new(Point::new(coord(40.0), 24.0, coord(16.0)), -Vector::y()),
            _ => {
                let origin = Point::new(coord(4.0), coord(4.0), 25.0);
                Ray::new(origin, origin - Point::new(0.0, 0.0, 30.0))
            }
        })
        .collect()
}

fn closest(scene: &[Triangle], ray: &Ray) -> Option<Real> {
    scene
        .iter()
        .filter_map(|tri| tri.cast_ray(ray))
        .min_by(|a, b| a.total_cmp(b))
}

fn check_dispatch<'a>(
    structure: &impl TopLevelStructure<'a>,
    scene: &[Triangle],
) -> TopLevelStatistics {
    let mut stats = TopLevelStatistics::default();

    for ray in rays(1) {
        let results = structure.traverse(&ray);
        stats.add(&results);
        let expected = closest(scene, &ray);

        // Specialized hierarchies only see part of the scene, so they may report a farther
        // triangle, but a ray hitting something always gets an answer.
        assert_eq!(results.hit(), expected.is_some());
        if let (Some(hit), Some(expected)) = (results.closest_hit, expected) {
            assert!(hit.distance >= expected);
            assert_eq!(scene[hit.triangle as usize].cast_ray(&ray), Some(hit.distance));
        }

        if results.used_fallback() {
            assert_eq!(results.closest_hit.map(|hit| hit.distance), expected);
            assert!(results.candidates.iter().all(|c| !c.results.hit()));
        } else {
            assert!(results.hit_bvh().is_some());
        }

        let visited = results.candidates.iter().map(|c| c.bvh);
        assert!(visited.clone().zip(visited.skip(1)).all(|(a, b)| a < b));

        // Only the last visited candidate may have hit.
        if let Some(i) = results.candidates.iter().position(|c| c.results.hit()) {
            assert_eq!(i + 1, results.candidates.len());
            assert!(!results.used_fallback());
        }

        // Traversal does not mutate anything.
        assert_eq!(structure.traverse(&ray), results);
    }

    stats
}

#[test]
fn top_level_dispatch_answers_every_ray() {
    let scene = scene(0);
    let areas = areas();

    let mut linear = top_level(&areas);
    linear.build(&scene);
    let linear_stats = check_dispatch(&linear, &scene);
    assert!(linear_stats.direct_hits > 0);
    assert!(linear_stats.fallback_queries > 0);

    for conservative in [false, true] {
        let properties = OctreeProperties::default()
            .with_max_level(5)
            .with_conservative(conservative);
        let mut octree = TopLevelOctree::new(top_level(&areas), properties).unwrap();
        octree.build(&scene);

        assert!(!octree.root().is_leaf());
        assert!(octree.octree().depth() <= 5);
        let stats = check_dispatch(&octree, &scene);
        assert_eq!(stats.queries, linear_stats.queries);

        // A conservative octree only lists regions containing the origin, the other one may
        // also list neighbouring regions.
        if conservative {
            assert!(stats.direct_hits <= linear_stats.direct_hits);
        } else {
            assert!(stats.direct_hits >= linear_stats.direct_hits);
        }
    }
}

#[test]
fn top_level_octree_outside_root() {
    let areas = areas();
    let octree = TopLevelOctree::new(top_level(&areas), OctreeProperties::default()).unwrap();
    let root = octree.root().aabb;

    assert!(octree
        .contained_in(&(root.maxs + Vector::repeat(1.0)))
        .is_empty());
    assert!(octree
        .contained_in(&(root.mins - Vector::new(0.0, 0.0, 1.0)))
        .is_empty());
}

#[test]
fn top_level_overlapping_regions_are_tried_in_order() {
    let scene = scene(0);
    let areas = areas();
    let mut linear = top_level(&areas);
    linear.build(&scene);

    // Both plane areas cover x in [-3, -2].
    for i in 0..=60 {
        let z = -6.0 + i as Real * 0.2;
        let ray = Ray::new(Point::new(-2.5, 24.0, z), -Vector::y());
        assert_eq!(linear.contained_in(&ray.origin).as_slice(), &[0, 1]);

        let results = linear.traverse(&ray);
        assert_eq!(results.skipped_candidates, 0);
        assert_eq!(results.candidates[0].bvh, 0);

        if results.candidates[0].results.hit() {
            assert_eq!(results.candidates.len(), 1);
            assert_eq!(results.hit_bvh(), Some(0));
        } else {
            assert_eq!(results.candidates.len(), 2);
            assert_eq!(results.candidates[1].bvh, 1);
        }

        assert_eq!(results.hit(), closest(&scene, &ray).is_some());
        assert_eq!(linear.traverse(&ray), results);
    }
}

#[test]
fn top_level_traversal_is_repeatable() {
    let scene = scene(3);
    let areas = areas();
    let mut linear = top_level(&areas);
    linear.build(&scene);
    let mut octree = TopLevelOctree::new(top_level(&areas), OctreeProperties::default()).unwrap();
    octree.build(&scene);

    let rays = rays(5);
    let first: Vec<_> = rays.iter().map(|ray| linear.traverse(ray)).collect();
    let first_octree: Vec<_> = rays.iter().map(|ray| octree.traverse(ray)).collect();

    for _ in 0..2 {
        for (i, ray) in rays.iter().enumerate() {
            assert_eq!(linear.traverse(ray), first[i]);
            assert_eq!(octree.traverse(ray), first_octree[i]);
            assert_eq!(
                octree.traverse(ray).hit(),
                first[i].hit(),
                "both structures must agree on whether ray {i} hits"
            );
        }
    }
}
