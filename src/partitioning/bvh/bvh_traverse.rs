use super::Bvh;
use crate::math::Real;
use crate::metrics::{MetricsSink, TraversalEvent};
use crate::query::{Ray, RayCast};
use std::collections::VecDeque;

/// The closest triangle hit by a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriangleHit {
    /// The ray parameter of the hit.
    pub distance: Real,
    /// The index of the triangle in the scene.
    pub triangle: u32,
}

/// The number of intersection tests performed by a traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct IntersectionCounts {
    /// Ray/box tests.
    pub nodes: usize,
    /// Ray/triangle tests.
    pub triangles: usize,
}

impl IntersectionCounts {
    /// The total number of tests.
    #[inline]
    pub fn total(&self) -> usize {
        self.nodes + self.triangles
    }
}

impl core::ops::AddAssign for IntersectionCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.triangles += rhs.triangles;
    }
}

/// The outcome of a ray traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TraversalResults {
    /// The closest hit, if any.
    pub closest_hit: Option<TriangleHit>,
    /// The tests performed.
    pub counts: IntersectionCounts,
    /// The traversal cost, in units of [`BvhProperties::node_cost`](super::BvhProperties::node_cost)
    /// and [`BvhProperties::triangle_cost`](super::BvhProperties::triangle_cost).
    pub cost: Real,
}

impl TraversalResults {
    /// Did the ray hit a triangle?
    #[inline]
    pub fn hit(&self) -> bool {
        self.closest_hit.is_some()
    }

    /// The ray parameter of the closest hit.
    #[inline]
    pub fn closest_hit_distance(&self) -> Option<Real> {
        self.closest_hit.map(|hit| hit.distance)
    }
}

impl Bvh<'_> {
    /// Finds the closest triangle hit by `ray`.
    ///
    /// Nodes are visited breadth-first. A node is only processed if the ray enters its box
    /// strictly closer than the closest hit found so far.
    pub fn traverse(&self, ray: &Ray) -> TraversalResults {
        let mut results = TraversalResults::default();

        if self.nodes.is_empty() {
            return results;
        }

        let mut closest = Real::MAX;
        let mut queue = VecDeque::new();
        queue.push_back(0u32);

        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id as usize];
            results.counts.nodes += 1;
            results.cost += self.properties.node_cost;

            match node.aabb.cast_ray(ray) {
                Some(t) if t < closest => {}
                _ => continue,
            }

            match node.children {
                Some([left, right]) => {
                    queue.push_back(left);
                    queue.push_back(right);
                }
                None => {
                    for tri in &node.triangles {
                        results.counts.triangles += 1;
                        results.cost += self.properties.triangle_cost;

                        if let Some(t) = self.scene[*tri as usize].cast_ray(ray) {
                            if t < closest {
                                closest = t;
                                results.closest_hit = Some(TriangleHit {
                                    distance: t,
                                    triangle: *tri,
                                });
                            }
                        }
                    }
                }
            }
        }

        results
    }

    /// Same as [`Self::traverse`], reporting to `metrics`.
    pub fn traverse_with_metrics(
        &self,
        ray: &Ray,
        metrics: &mut dyn MetricsSink,
    ) -> TraversalResults {
        let results = self.traverse(ray);
        metrics.traversal_finished(&TraversalEvent {
            bvh_id: self.id,
            hit: results.hit(),
            node_tests: results.counts.nodes,
            triangle_tests: results.counts.triangles,
        });
        results
    }
}
