use pahbvh3d::bounding_volume::{Aabb, BoundingVolume};
use pahbvh3d::math::{Point, Vector};
use pahbvh3d::query::{Ray, RayCast};

#[test]
fn ray_aabb_face_on() {
    let aabb = Aabb::new(Point::new(2.0, 2.0, -2.0), Point::new(4.0, 4.0, -1.0));
    let ray = Ray::new(Point::new(3.0, 3.0, 1.0), Vector::new(0.0, 0.0, -1.0));
    assert_eq!(aabb.cast_ray(&ray), Some(2.0));

    // Zero direction components give infinite reciprocals.
    let grazing = Ray::new(Point::new(5.0, 3.0, 1.0), Vector::new(0.0, 0.0, -1.0));
    assert_eq!(aabb.cast_ray(&grazing), None);

    let behind = Ray::new(Point::new(3.0, 3.0, -5.0), Vector::new(0.0, 0.0, -1.0));
    assert_eq!(aabb.cast_ray(&behind), None);
}

#[test]
fn ray_aabb_random() {
    let mut rng = oorandom::Rand32::new(42);
    let mut coord = |scale: f32| (rng.rand_float() - 0.5) * scale;
    let mut hits = 0;

    for _ in 0..1000 {
        let center = Point::new(coord(10.0), coord(10.0), coord(10.0));
        let half_extents = Vector::new(coord(4.0).abs(), coord(4.0).abs(), coord(4.0).abs());
        let aabb = Aabb::from_half_extents(center, half_extents);
        let origin = Point::new(coord(20.0), coord(20.0), coord(20.0));
        let target = center + Vector::new(coord(6.0), coord(6.0), coord(6.0));
        let ray = Ray::new(origin, target - origin);

        match aabb.cast_ray(&ray) {
            Some(t) => {
                hits += 1;
                assert!(t >= 0.0);
                assert!(aabb.loosened(1.0e-3).contains_local_point(&ray.point_at(t)));

                if aabb.contains_local_point(&origin) {
                    assert_eq!(t, 0.0);
                }
            }
            None => {
                let margin = Vector::repeat(1.0e-3);
                let shrunk = Aabb::new(aabb.mins + margin, aabb.maxs - margin);
                assert!(!shrunk.contains_local_point(&origin));

                for i in 0..=1000 {
                    let pt = ray.point_at(i as f32 * 0.01);
                    assert!(!shrunk.contains_local_point(&pt));
                }
            }
        }
    }

    assert!(hits > 100);
}
