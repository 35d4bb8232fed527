use super::{
    Bvh, BvhNode, BvhProperties, BvhStrategy, CostContext, SplitPlaneContext, StopContext,
};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::influence_area::InfluenceArea;
use crate::math::{Point, Real};
use crate::metrics::{BvhBuildEvent, MetricsSink, NoopMetrics};
use crate::shape::Triangle;
use crate::utils::Axis;
use rand::rngs::StdRng;
use rand::SeedableRng;
use core::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

impl<'a> Bvh<'a> {
    /// Builds this hierarchy over every triangle of `scene`, discarding the previous tree.
    ///
    /// Random decisions are seeded with `seed`, or from the OS entropy source if `None`.
    pub fn build(&mut self, scene: &'a [Triangle], seed: Option<u64>) {
        self.build_with_metrics(scene, seed, &mut NoopMetrics)
    }

    /// Same as [`Self::build`], reporting to `metrics`.
    pub fn build_with_metrics(
        &mut self,
        scene: &'a [Triangle],
        seed: Option<u64>,
        metrics: &mut dyn MetricsSink,
    ) {
        let indices = (0..scene.len() as u32).collect();
        self.build_subset_with_metrics(scene, indices, seed, metrics)
    }

    /// Builds this hierarchy over the triangles of `scene` at the given indices.
    pub fn build_subset(&mut self, scene: &'a [Triangle], indices: Vec<u32>, seed: Option<u64>) {
        self.build_subset_with_metrics(scene, indices, seed, &mut NoopMetrics)
    }

    /// Same as [`Self::build_subset`], reporting to `metrics`.
    pub fn build_subset_with_metrics(
        &mut self,
        scene: &'a [Triangle],
        indices: Vec<u32>,
        seed: Option<u64>,
        metrics: &mut dyn MetricsSink,
    ) {
        let start = Instant::now();
        self.id = next_id();
        self.rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.scene = scene;
        self.triangle_count = indices.len();
        self.nodes.clear();

        log::debug!(
            "building bvh {} over {} triangles with {:?}",
            self.id,
            indices.len(),
            self.strategy
        );

        let root_aabb = tight_aabb(scene, &indices);
        let root_metric = |strategy: &BvhStrategy| {
            strategy.cost.cost(&CostContext {
                aabb: &root_aabb,
                triangle_count: indices.len(),
                influence_area: self.influence_area,
                root_metric: -1.0,
                properties: &self.properties,
            })
        };
        let root_metrics = [root_metric(&self.strategy), root_metric(&self.fallback)];
        self.root_metric = root_metrics[0];

        let mut builder = Builder {
            scene,
            barycenters: scene.iter().map(Triangle::barycenter).collect(),
            influence_area: self.influence_area,
            properties: &self.properties,
            strategies: [&self.strategy, &self.fallback],
            root_metrics,
            rng: &mut self.rng,
            nodes: Vec::new(),
        };

        if indices.is_empty() {
            builder.nodes.push(BvhNode::leaf(root_aabb, indices));
        } else {
            let _ = builder.build_node(indices, root_aabb, 0, None);
        }

        self.nodes = builder.nodes;

        let event = BvhBuildEvent {
            bvh_id: self.id,
            triangle_count: self.triangle_count,
            node_count: self.node_count(),
            leaf_count: self.leaf_count(),
            depth: self.depth(),
            duration: start.elapsed(),
        };
        log::debug!(
            "built bvh {} with {} nodes, {} leaves, depth {} in {:?}",
            event.bvh_id,
            event.node_count,
            event.leaf_count,
            event.depth,
            event.duration
        );
        metrics.bvh_built(&event);
    }
}

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Identifiers come from the wall clock, but always increase across builds.
fn next_id() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let (Ok(last) | Err(last)) =
        LAST_ID.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        });
    now.max(last + 1)
}

fn tight_aabb(scene: &[Triangle], indices: &[u32]) -> Aabb {
    Aabb::from_points(
        indices
            .iter()
            .flat_map(|i| scene[*i as usize].vertices()),
    )
}

const STRATEGY: usize = 0;
const FALLBACK: usize = 1;

struct Builder<'s> {
    scene: &'s [Triangle],
    barycenters: Vec<Point<Real>>,
    influence_area: Option<&'s InfluenceArea>,
    properties: &'s BvhProperties,
    strategies: [&'s BvhStrategy; 2],
    root_metrics: [Real; 2],
    rng: &'s mut StdRng,
    nodes: Vec<BvhNode>,
}

/// The best partition found for a node.
struct Split {
    cost: Real,
    hit_probability_sum: Real,
    left: (Vec<u32>, Aabb),
    right: (Vec<u32>, Aabb),
    axis: Axis,
}

impl Builder<'_> {
    fn strategy_index(&self, level: u32) -> usize {
        if level >= self.properties.max_non_fallback_levels {
            FALLBACK
        } else {
            STRATEGY
        }
    }

    fn cost(&self, strategy: usize, aabb: &Aabb, triangle_count: usize) -> Real {
        self.strategies[strategy].cost.cost(&CostContext {
            aabb,
            triangle_count,
            influence_area: self.influence_area,
            root_metric: self.root_metrics[strategy],
            properties: self.properties,
        })
    }

    fn hit_probability(&self, cost: Real, triangle_count: usize) -> Real {
        cost / (triangle_count as Real * self.properties.triangle_cost)
    }

    /// Builds the subtree over `triangles` and returns the index of its root.
    fn build_node(
        &mut self,
        triangles: Vec<u32>,
        aabb: Aabb,
        level: u32,
        parent_axis: Option<Axis>,
    ) -> u32 {
        let id = self.nodes.len() as u32;
        let strategy = self.strategy_index(level);
        let cost = self.cost(strategy, &aabb, triangles.len());
        let hit_probability = self.hit_probability(cost, triangles.len());

        if level == self.properties.max_non_fallback_levels {
            log::trace!("bvh node at level {} switches to the fallback strategy", level);
        }

        let stop = self.strategies[strategy].stop.should_stop(&StopContext {
            aabb: &aabb,
            level,
            triangle_count: triangles.len(),
            cost,
            hit_probability,
            properties: self.properties,
        });

        let split = if stop || triangles.len() < 2 {
            None
        } else {
            self.best_split(&triangles, &aabb, level, parent_axis, hit_probability)
        };

        let Some(split) = split else {
            self.nodes.push(BvhNode::leaf(aabb, triangles));
            return id;
        };

        // Reserve the slot of this node so that parents come before their children.
        self.nodes.push(BvhNode::leaf(aabb, Vec::new()));

        let Split {
            left, right, axis, ..
        } = split;
        let left_id = self.build_node(left.0, left.1, level + 1, Some(axis));
        let right_id = self.build_node(right.0, right.1, level + 1, Some(axis));
        self.nodes[id as usize].children = Some([left_id, right_id]);
        id
    }

    /// Searches the best partition of `triangles` along the axes proposed by the strategy.
    fn best_split(
        &mut self,
        triangles: &[u32],
        aabb: &Aabb,
        level: u32,
        parent_axis: Option<Axis>,
        parent_hit_probability: Real,
    ) -> Option<Split> {
        let ctx = SplitPlaneContext {
            aabb,
            influence_area: self.influence_area,
            parent_axis,
        };
        let strategy = self.strategy_index(level);
        let planes = self.strategies[strategy]
            .split_planes
            .choose(&ctx, &mut *self.rng);

        let mut best: Option<Split> = None;

        for (axis, quality) in planes {
            let acceptable = best.as_ref().is_some_and(|split| {
                parent_hit_probability <= 0.0
                    || split.hit_probability_sum / parent_hit_probability
                        <= self.properties.max_children_father_hit_probability_ratio
            });

            if quality < self.properties.split_plane_quality_threshold && !acceptable {
                log::trace!(
                    "splitting axis {} of quality {} at level {}, switching to the fallback strategy",
                    axis,
                    quality,
                    level
                );

                let fallback_planes = self.strategies[FALLBACK]
                    .split_planes
                    .choose(&ctx, &mut *self.rng);
                best = fallback_planes
                    .iter()
                    .filter_map(|(axis, _)| self.binned_split(triangles, aabb, *axis, FALLBACK))
                    .min_by(|a, b| a.cost.total_cmp(&b.cost));
                break;
            }

            if let Some(candidate) = self.binned_split(triangles, aabb, axis, strategy) {
                if best.as_ref().map_or(true, |b| candidate.cost < b.cost) {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    /// Evaluates the `bins - 2` interior planes evenly spaced along `axis` and returns the
    /// cheapest partition with two non-empty sides.
    fn binned_split(
        &self,
        triangles: &[u32],
        aabb: &Aabb,
        axis: Axis,
        strategy: usize,
    ) -> Option<Split> {
        let k = axis.index();
        let (min, extent) = (aabb.mins[k], aabb.extents()[k]);

        if !(extent > 0.0) {
            return None;
        }

        // Plane `i` (1 <= i <= bins - 2) lies at `min + i * width`. A triangle is on the left of
        // plane `i` if its barycenter bin is below `i`.
        let num_bins = self.properties.bins as usize - 1;
        let width = extent / num_bins as Real;
        let bin_of = |tri: u32| {
            let c = self.barycenters[tri as usize][k];
            (((c - min) / width) as usize).min(num_bins - 1)
        };

        let mut bins = vec![Bin::default(); num_bins];
        for tri in triangles {
            let bin = &mut bins[bin_of(*tri)];
            bin.aabb.merge(&self.scene[*tri as usize].local_aabb());
            bin.count += 1;
        }

        // Right-hand accumulations, `right_acc[i]` covering bins `i..`.
        let mut right_acc = bins.clone();
        for i in (0..num_bins - 1).rev() {
            let next = right_acc[i + 1];
            right_acc[i].aabb.merge(&next.aabb);
            right_acc[i].count += next.count;
        }

        let mut left_acc = Bin::default();
        let mut best: Option<(usize, Real, Real)> = None;

        for plane in 1..num_bins {
            left_acc.aabb.merge(&bins[plane - 1].aabb);
            left_acc.count += bins[plane - 1].count;
            let right = &right_acc[plane];

            if left_acc.count == 0 || right.count == 0 {
                continue;
            }

            let left_cost = self.cost(strategy, &left_acc.aabb, left_acc.count);
            let right_cost = self.cost(strategy, &right.aabb, right.count);
            let cost = left_cost + right_cost;

            if best.map_or(true, |(_, best_cost, _)| cost < best_cost) {
                let hit_probability_sum = self.hit_probability(left_cost, left_acc.count)
                    + self.hit_probability(right_cost, right.count);
                best = Some((plane, cost, hit_probability_sum));
            }
        }

        let (plane, cost, hit_probability_sum) = best?;
        let (left, right): (Vec<u32>, Vec<u32>) =
            triangles.iter().copied().partition(|tri| bin_of(*tri) < plane);

        let left_aabb = tight_aabb(self.scene, &left);
        let right_aabb = tight_aabb(self.scene, &right);

        Some(Split {
            cost,
            hit_probability_sum,
            left: (left, left_aabb),
            right: (right, right_aabb),
            axis,
        })
    }
}

#[derive(Copy, Clone, Debug)]
struct Bin {
    aabb: Aabb,
    count: usize,
}

impl Default for Bin {
    fn default() -> Self {
        Self {
            aabb: Aabb::new_invalid(),
            count: 0,
        }
    }
}
