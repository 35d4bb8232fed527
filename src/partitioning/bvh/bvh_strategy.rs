//! The pluggable decisions of the construction: how much a node costs, along which axes to try
//! splitting it, and when to stop splitting.

use super::BvhProperties;
use crate::bounding_volume::Aabb;
use crate::influence_area::InfluenceArea;
use crate::math::Real;
use crate::utils::Axis;
use arrayvec::ArrayVec;
use core::fmt;
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Candidate splitting axes with their quality, best first.
pub type SplitPlanes = ArrayVec<(Axis, Real), 3>;

/// The hit probability of a node of metric `metric` in a hierarchy of root metric `root_metric`.
///
/// This is `min(metric / root_metric, 1)`. A hierarchy with a zero root metric gives every node
/// a hit probability of 1.
#[inline]
pub fn hit_probability(metric: Real, root_metric: Real) -> Real {
    if root_metric > 0.0 {
        (metric / root_metric).min(1.0)
    } else {
        1.0
    }
}

/// The inputs of a cost computation.
#[derive(Copy, Clone, Debug)]
pub struct CostContext<'b> {
    /// The box of the node.
    pub aabb: &'b Aabb,
    /// The number of triangles below the node.
    pub triangle_count: usize,
    /// The influence area of the hierarchy.
    pub influence_area: Option<&'b InfluenceArea>,
    /// The metric of the root, or a negative value to request the metric of `aabb` itself.
    pub root_metric: Real,
    /// The construction properties.
    pub properties: &'b BvhProperties,
}

/// The inputs of a splitting-axes choice.
#[derive(Copy, Clone, Debug)]
pub struct SplitPlaneContext<'b> {
    /// The box of the node to split.
    pub aabb: &'b Aabb,
    /// The influence area of the hierarchy.
    pub influence_area: Option<&'b InfluenceArea>,
    /// The axis the parent node was split along, if any.
    pub parent_axis: Option<Axis>,
}

/// The inputs of a stop decision.
#[derive(Copy, Clone, Debug)]
pub struct StopContext<'b> {
    /// The box of the node.
    pub aabb: &'b Aabb,
    /// The depth of the node (0 for the root).
    pub level: u32,
    /// The number of triangles below the node.
    pub triangle_count: usize,
    /// The cost of the node.
    pub cost: Real,
    /// The hit probability of the node.
    pub hit_probability: Real,
    /// The construction properties.
    pub properties: &'b BvhProperties,
}

/// How much a node is expected to cost to traverse.
#[derive(Clone)]
pub enum CostModel {
    /// Surface Area Heuristic: the metric is the surface area of the box.
    Sah,
    /// Projected Area Heuristic: the metric is the area the box projects on the projection
    /// plane of the influence area.
    Pah,
    /// Like [`CostModel::Pah`], but only counting the part of the projection that lies on the
    /// projection plane.
    PahCulled,
    /// A user-provided cost function, which must honor the negative `root_metric` convention.
    Custom(Arc<dyn Fn(&CostContext) -> Real + Send + Sync>),
}

impl CostModel {
    /// The absolute metric of `aabb`.
    ///
    /// The projected-area models fall back to the surface area when there is no influence area.
    pub fn metric(&self, aabb: &Aabb, influence_area: Option<&InfluenceArea>) -> Real {
        match (self, influence_area) {
            (CostModel::Pah, Some(area)) => area.projected_area(aabb),
            (CostModel::PahCulled, Some(area)) => area.culled_projected_area(aabb),
            _ => aabb.surface_area(),
        }
    }

    /// `hit_probability × triangle_count × triangle_cost`, or the absolute metric of the box if
    /// `ctx.root_metric` is negative.
    pub fn cost(&self, ctx: &CostContext) -> Real {
        if let CostModel::Custom(f) = self {
            return f(ctx);
        }

        let metric = self.metric(ctx.aabb, ctx.influence_area);

        if ctx.root_metric < 0.0 {
            return metric;
        }

        hit_probability(metric, ctx.root_metric)
            * ctx.triangle_count as Real
            * ctx.properties.triangle_cost
    }
}

impl fmt::Debug for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostModel::Sah => write!(f, "Sah"),
            CostModel::Pah => write!(f, "Pah"),
            CostModel::PahCulled => write!(f, "PahCulled"),
            CostModel::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Which axes to try splitting a node along, and in which order.
#[derive(Clone)]
pub enum SplitPlaneChooser {
    /// Only the longest axis of the node.
    LongestAxis,
    /// Every axis, the quality of each being its extent relative to the longest one.
    AllAxes,
    /// Every axis, favoring the ones orthogonal to the rays reaching the node: the quality of an
    /// axis is `1 - |axis · ray_direction|`.
    ProjectionAware,
    /// The axis following the one of the parent (the longest axis for the root).
    Alternating,
    /// Every axis, in random order.
    Random,
    /// A user-provided choice.
    Custom(Arc<dyn Fn(&SplitPlaneContext, &mut StdRng) -> SplitPlanes + Send + Sync>),
}

impl SplitPlaneChooser {
    /// The candidate splitting axes, best first.
    pub fn choose(&self, ctx: &SplitPlaneContext, rng: &mut StdRng) -> SplitPlanes {
        let mut planes = SplitPlanes::new();

        match self {
            SplitPlaneChooser::LongestAxis => planes.push((ctx.aabb.longest_axis(), 1.0)),
            SplitPlaneChooser::AllAxes => return by_extent(ctx.aabb),
            SplitPlaneChooser::ProjectionAware => {
                let dir = ctx
                    .influence_area
                    .and_then(|area| area.ray_direction(ctx.aabb).try_normalize(Real::EPSILON));

                let Some(dir) = dir else {
                    return by_extent(ctx.aabb);
                };

                planes.extend(Axis::ALL.map(|axis| (axis, 1.0 - dir[axis.index()].abs())));
                sort_by_quality(&mut planes);
            }
            SplitPlaneChooser::Alternating => {
                let axis = ctx
                    .parent_axis
                    .map(Axis::next)
                    .unwrap_or_else(|| ctx.aabb.longest_axis());
                planes.push((axis, 1.0));
            }
            SplitPlaneChooser::Random => {
                let mut axes = Axis::ALL;
                axes.shuffle(rng);
                planes.extend(axes.map(|axis| (axis, 1.0)));
            }
            SplitPlaneChooser::Custom(f) => return f(ctx, rng),
        }

        planes
    }
}

impl fmt::Debug for SplitPlaneChooser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitPlaneChooser::LongestAxis => write!(f, "LongestAxis"),
            SplitPlaneChooser::AllAxes => write!(f, "AllAxes"),
            SplitPlaneChooser::ProjectionAware => write!(f, "ProjectionAware"),
            SplitPlaneChooser::Alternating => write!(f, "Alternating"),
            SplitPlaneChooser::Random => write!(f, "Random"),
            SplitPlaneChooser::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn by_extent(aabb: &Aabb) -> SplitPlanes {
    let extents = aabb.extents();
    let longest = extents.max();
    let mut planes: SplitPlanes = Axis::ALL
        .iter()
        .map(|axis| {
            let quality = if longest > 0.0 {
                extents[axis.index()] / longest
            } else {
                0.0
            };
            (*axis, quality)
        })
        .collect();
    sort_by_quality(&mut planes);
    planes
}

fn sort_by_quality(planes: &mut SplitPlanes) {
    planes.sort_by_key(|(_, quality)| core::cmp::Reverse(OrderedFloat(*quality)));
}

/// When a node becomes a leaf.
///
/// Every criterion also stops at [`BvhProperties::max_level`] and at
/// [`BvhProperties::max_leaf_triangles`].
#[derive(Clone)]
pub enum StopCriterion {
    /// Only the depth and triangle count limits.
    LevelOrTriangleCount,
    /// Also stop when the cost of the node is below [`BvhProperties::cost_threshold`].
    CostThreshold,
    /// Also stop when the hit probability of the node is below
    /// [`BvhProperties::hit_probability_threshold`].
    HitProbabilityThreshold,
    /// A user-provided criterion, checked in addition to the depth and triangle count limits.
    Custom(Arc<dyn Fn(&StopContext) -> bool + Send + Sync>),
}

impl StopCriterion {
    /// Should the node described by `ctx` be a leaf?
    pub fn should_stop(&self, ctx: &StopContext) -> bool {
        if ctx.level >= ctx.properties.max_level
            || ctx.triangle_count <= ctx.properties.max_leaf_triangles
        {
            return true;
        }

        match self {
            StopCriterion::LevelOrTriangleCount => false,
            StopCriterion::CostThreshold => ctx.cost < ctx.properties.cost_threshold,
            StopCriterion::HitProbabilityThreshold => {
                ctx.hit_probability < ctx.properties.hit_probability_threshold
            }
            StopCriterion::Custom(f) => f(ctx),
        }
    }
}

impl fmt::Debug for StopCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCriterion::LevelOrTriangleCount => write!(f, "LevelOrTriangleCount"),
            StopCriterion::CostThreshold => write!(f, "CostThreshold"),
            StopCriterion::HitProbabilityThreshold => write!(f, "HitProbabilityThreshold"),
            StopCriterion::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// The three decisions driving a construction.
#[derive(Clone, Debug)]
pub struct BvhStrategy {
    /// The cost model.
    pub cost: CostModel,
    /// The choice of splitting axes.
    pub split_planes: SplitPlaneChooser,
    /// The stop criterion.
    pub stop: StopCriterion,
}

impl BvhStrategy {
    /// Classic SAH construction along the longest axis. This is also the fallback strategy.
    pub fn sah() -> Self {
        Self {
            cost: CostModel::Sah,
            split_planes: SplitPlaneChooser::LongestAxis,
            stop: StopCriterion::LevelOrTriangleCount,
        }
    }

    /// PAH construction with projection-aware splitting axes.
    pub fn pah() -> Self {
        Self {
            cost: CostModel::Pah,
            split_planes: SplitPlaneChooser::ProjectionAware,
            stop: StopCriterion::LevelOrTriangleCount,
        }
    }

    /// Replaces the cost model.
    pub fn with_cost(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }

    /// Replaces the choice of splitting axes.
    pub fn with_split_planes(mut self, split_planes: SplitPlaneChooser) -> Self {
        self.split_planes = split_planes;
        self
    }

    /// Replaces the stop criterion.
    pub fn with_stop(mut self, stop: StopCriterion) -> Self {
        self.stop = stop;
        self
    }
}

impl Default for BvhStrategy {
    fn default() -> Self {
        Self::sah()
    }
}
