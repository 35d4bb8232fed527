use super::{BvhProperties, BvhStrategy, CostContext, PropertiesError};
use crate::bounding_volume::Aabb;
use crate::influence_area::InfluenceArea;
use crate::math::Real;
use crate::shape::Triangle;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A node of a [`Bvh`].
///
/// A node is either a leaf holding the indices of its triangles in the scene, or an internal
/// node with exactly two children. Internal nodes hold no triangle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BvhNode {
    /// The tight box around every triangle below this node.
    pub aabb: Aabb,
    pub(super) children: Option<[u32; 2]>,
    pub(super) triangles: Vec<u32>,
}

impl BvhNode {
    pub(super) fn leaf(aabb: Aabb, triangles: Vec<u32>) -> Self {
        Self {
            aabb,
            children: None,
            triangles,
        }
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The indices of the two children of this node, if it is not a leaf.
    #[inline]
    pub fn children(&self) -> Option<[u32; 2]> {
        self.children
    }

    /// The index of the left child of this node, if it is not a leaf.
    #[inline]
    pub fn left(&self) -> Option<u32> {
        self.children.map(|c| c[0])
    }

    /// The index of the right child of this node, if it is not a leaf.
    #[inline]
    pub fn right(&self) -> Option<u32> {
        self.children.map(|c| c[1])
    }

    /// The scene indices of the triangles of this node (empty for internal nodes).
    #[inline]
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }
}

/// A Bounding Volume Hierarchy over the triangles of a scene, built for one influence area.
///
/// The nodes are stored in an arena, the root being at index 0 and every parent stored before
/// its children. Triangles are referenced by their index in the scene slice the hierarchy was
/// built with. The influence area is borrowed: it must outlive the hierarchy.
///
/// # Example
///
/// ```rust
/// use pahbvh3d::na::{Point3, Vector3};
/// use pahbvh3d::partitioning::{Bvh, BvhProperties, BvhStrategy};
/// use pahbvh3d::query::Ray;
/// use pahbvh3d::shape::Triangle;
///
/// let scene: Vec<Triangle> = (0..20)
///     .map(|i| {
///         let x = i as f32 * 2.0;
///         Triangle::new(
///             Point3::new(x, 0.0, -5.0),
///             Point3::new(x + 1.0, 0.0, -5.0),
///             Point3::new(x, 1.0, -5.0),
///         )
///     })
///     .collect();
///
/// let mut bvh = Bvh::new(BvhProperties::default(), BvhStrategy::sah(), None).unwrap();
/// bvh.build(&scene, Some(42));
///
/// let ray = Ray::new(Point3::new(4.2, 0.2, 0.0), -Vector3::z());
/// let hit = bvh.traverse(&ray).closest_hit.unwrap();
/// assert_eq!(hit.triangle, 2);
/// assert_eq!(hit.distance, 5.0);
/// ```
#[derive(Clone, Debug)]
pub struct Bvh<'a> {
    pub(super) nodes: Vec<BvhNode>,
    pub(super) scene: &'a [Triangle],
    pub(super) triangle_count: usize,
    pub(super) influence_area: Option<&'a InfluenceArea>,
    pub(super) properties: BvhProperties,
    pub(super) strategy: BvhStrategy,
    pub(super) fallback: BvhStrategy,
    pub(super) root_metric: Real,
    pub(super) id: u64,
    pub(super) rng: StdRng,
}

impl<'a> Bvh<'a> {
    /// Creates an empty hierarchy.
    ///
    /// Without influence area, the projected-area cost models behave like SAH.
    pub fn new(
        properties: BvhProperties,
        strategy: BvhStrategy,
        influence_area: Option<&'a InfluenceArea>,
    ) -> Result<Self, PropertiesError> {
        properties.validate()?;

        Ok(Self {
            nodes: Vec::new(),
            scene: &[],
            triangle_count: 0,
            influence_area,
            properties,
            strategy,
            fallback: BvhStrategy::sah(),
            root_metric: -1.0,
            id: 0,
            rng: StdRng::seed_from_u64(0),
        })
    }

    /// Replaces the strategy used at and beyond [`BvhProperties::max_non_fallback_levels`], and
    /// when splitting axes are of too low quality.
    pub fn with_fallback_strategy(mut self, fallback: BvhStrategy) -> Self {
        self.fallback = fallback;
        self
    }

    /// The root node, if the hierarchy was built.
    #[inline]
    pub fn root(&self) -> Option<&BvhNode> {
        self.nodes.first()
    }

    /// The node at index `id`.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn node(&self, id: u32) -> &BvhNode {
        &self.nodes[id as usize]
    }

    /// Every node, the root first.
    #[inline]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// The scene this hierarchy was built on.
    #[inline]
    pub fn scene(&self) -> &'a [Triangle] {
        self.scene
    }

    /// The influence area this hierarchy was built for.
    #[inline]
    pub fn influence_area(&self) -> Option<&'a InfluenceArea> {
        self.influence_area
    }

    /// The construction properties.
    #[inline]
    pub fn properties(&self) -> &BvhProperties {
        &self.properties
    }

    /// The construction strategy.
    #[inline]
    pub fn strategy(&self) -> &BvhStrategy {
        &self.strategy
    }

    /// The fallback construction strategy.
    #[inline]
    pub fn fallback_strategy(&self) -> &BvhStrategy {
        &self.fallback
    }

    /// The metric of the root node computed at the start of the last build, negative if the
    /// hierarchy was never built.
    #[inline]
    pub fn root_metric(&self) -> Real {
        self.root_metric
    }

    /// An identifier assigned at every build.
    ///
    /// Two hierarchies with the same identifier are the result of the same build. The identifier
    /// is derived from the wall-clock time, is unique within the process, and is not a hash of
    /// the content. It is zero until the first build.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The number of triangles this hierarchy was built on.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Is this hierarchy empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }

    /// The number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// The length of the longest path from the root to a leaf, in edges.
    pub fn depth(&self) -> u32 {
        self.subtree_depth(0)
    }

    /// The length of the longest path from the node `node_id` to a leaf, in edges.
    pub fn subtree_depth(&self, node_id: u32) -> u32 {
        let Some(node) = self.nodes.get(node_id as usize) else {
            return 0;
        };

        match node.children {
            None => 0,
            Some([left, right]) => 1 + self.subtree_depth(left).max(self.subtree_depth(right)),
        }
    }

    /// The hit probability of a node bounded by `aabb`, according to the cost model of the
    /// construction strategy and the root metric of the last build.
    pub fn hit_probability(&self, aabb: &Aabb) -> Real {
        let ctx = CostContext {
            aabb,
            triangle_count: 1,
            influence_area: self.influence_area,
            root_metric: self.root_metric,
            properties: &self.properties,
        };
        self.strategy.cost.cost(&ctx) / self.properties.triangle_cost
    }
}
