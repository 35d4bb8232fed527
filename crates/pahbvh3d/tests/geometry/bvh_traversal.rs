use approx::assert_relative_eq;
use pahbvh3d::influence_area::{InfluenceArea, PlaneInfluenceArea, PointInfluenceArea};
use pahbvh3d::math::{Point, Real, Vector};
use pahbvh3d::metrics::RecordingMetrics;
use pahbvh3d::partitioning::{
    Bvh, BvhProperties, BvhStrategy, CostModel, SplitPlaneChooser, StopCriterion,
};
use pahbvh3d::query::{Ray, RayCast};
use pahbvh3d::shape::Triangle;

fn random_scene(rng: &mut oorandom::Rand32, len: usize) -> Vec<Triangle> {
    let mut coord = |scale: Real| (rng.rand_float() - 0.5) * scale;
    (0..len)
        .map(|_| {
            let center = Point::new(coord(30.0), coord(30.0), coord(30.0));
            let mut vertex = || center + Vector::new(coord(3.0), coord(3.0), coord(3.0));
            Triangle::new(vertex(), vertex(), vertex())
        })
        .collect()
}

fn closest_hit(scene: &[Triangle], ray: &Ray) -> Option<(Real, u32)> {
    scene
        .iter()
        .enumerate()
        .filter_map(|(i, tri)| tri.cast_ray(ray).map(|t| (t, i as u32)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
}

#[test]
fn bvh_pah_traversal_matches_brute_force() {
    let mut rng = oorandom::Rand32::new(11);
    let scene = random_scene(&mut rng, 1000);
    let plane: InfluenceArea =
        PlaneInfluenceArea::new(Point::new(0.0, 20.0, 0.0), -Vector::y(), 30.0, 30.0, 40.0).into();
    let point: InfluenceArea = PointInfluenceArea::new(
        Point::new(0.0, 0.0, 30.0),
        -Vector::z(),
        1.2,
        1.2,
        0.5,
        60.0,
    )
    .into();

    let configurations = [
        (BvhStrategy::sah(), None),
        (BvhStrategy::pah(), Some(&plane)),
        (BvhStrategy::pah(), Some(&point)),
        (
            BvhStrategy::pah()
                .with_cost(CostModel::PahCulled)
                .with_stop(StopCriterion::CostThreshold),
            Some(&point),
        ),
        (
            BvhStrategy::sah()
                .with_split_planes(SplitPlaneChooser::Random)
                .with_stop(StopCriterion::HitProbabilityThreshold),
            Some(&plane),
        ),
    ];

    for (strategy, influence_area) in configurations {
        let properties = BvhProperties::default().with_max_leaf_triangles(2);
        let mut bvh = Bvh::new(properties, strategy, influence_area).unwrap();
        let mut metrics = RecordingMetrics::default();
        bvh.build_with_metrics(&scene, Some(5), &mut metrics);
        bvh.assert_well_formed();

        assert_eq!(metrics.bvh_builds.len(), 1);
        assert_eq!(metrics.bvh_builds[0].bvh_id, bvh.id());
        assert_eq!(metrics.bvh_builds[0].node_count, bvh.node_count());
        assert_eq!(metrics.bvh_builds[0].triangle_count, scene.len());

        let mut hits = 0;
        for _ in 0..300 {
            // Rays from the plane along its normal, and from the point of view.
            let ray = if rng.rand_float() < 0.5 {
                let origin = Point::new(
                    (rng.rand_float() - 0.5) * 30.0,
                    19.0,
                    (rng.rand_float() - 0.5) * 30.0,
                );
                Ray::new(origin, -Vector::y())
            } else {
                let target = Point::new(
                    (rng.rand_float() - 0.5) * 20.0,
                    (rng.rand_float() - 0.5) * 20.0,
                    0.0,
                );
                let pov = Point::new(0.0, 0.0, 30.0);
                Ray::new(pov, target - pov)
            };

            let results = bvh.traverse_with_metrics(&ray, &mut metrics);
            let expected = closest_hit(&scene, &ray);
            assert_eq!(results.closest_hit_distance(), expected.map(|hit| hit.0));

            if let Some(hit) = results.closest_hit {
                hits += 1;
                assert_eq!(scene[hit.triangle as usize].cast_ray(&ray), Some(hit.distance));
            }
        }

        assert!(hits > 10);
        assert_eq!(metrics.traversals.len(), 300);
        assert!(metrics.traversals.iter().all(|event| event.bvh_id == bvh.id()));
    }
}

#[test]
fn bvh_plane_hit_probability_is_footprint_ratio() {
    let mut rng = oorandom::Rand32::new(12);
    let scene = random_scene(&mut rng, 2000);
    let plane: InfluenceArea =
        PlaneInfluenceArea::new(Point::new(0.0, 20.0, 0.0), -Vector::y(), 30.0, 30.0, 40.0).into();

    let mut sah = Bvh::new(BvhProperties::default(), BvhStrategy::sah(), None).unwrap();
    let mut pah = Bvh::new(BvhProperties::default(), BvhStrategy::pah(), Some(&plane)).unwrap();
    sah.build(&scene, Some(0));
    pah.build(&scene, Some(0));

    // Rays along -y only see the xz footprint of a box.
    let root = pah.root().unwrap().aabb.extents();
    for node in pah.nodes() {
        let extents = node.aabb.extents();
        let expected = (extents.x * extents.z) / (root.x * root.z);
        assert_relative_eq!(
            pah.hit_probability(&node.aabb),
            expected.min(1.0),
            epsilon = 1.0e-4,
            max_relative = 1.0e-3
        );
    }

    for _ in 0..500 {
        let origin = Point::new(
            (rng.rand_float() - 0.5) * 30.0,
            19.0,
            (rng.rand_float() - 0.5) * 30.0,
        );
        let ray = Ray::new(origin, -Vector::y());
        let (a, b) = (sah.traverse(&ray), pah.traverse(&ray));

        assert_eq!(a.closest_hit_distance(), b.closest_hit_distance());
        assert!(b.counts.nodes >= 1);
    }
}
