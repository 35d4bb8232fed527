use super::OctreeProperties;
use crate::bounding_volume::{Aabb, BoundingVolume, Region};
use crate::math::{Point, Real};

/// A node of an [`Octree`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct OctreeNode {
    /// The cell covered by this node.
    pub aabb: Aabb,
    children: Option<[u32; 8]>,
    bvhs: Vec<usize>,
    forced_leaf: bool,
}

impl OctreeNode {
    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.forced_leaf || self.children.is_none()
    }

    /// Was this node kept as a leaf only because the maximum depth was reached, while some
    /// regions still partially overlap it?
    #[inline]
    pub fn is_forced_leaf(&self) -> bool {
        self.forced_leaf
    }

    /// The indices of the eight children, ordered like [`Aabb::split_at_center`].
    #[inline]
    pub fn children(&self) -> Option<[u32; 8]> {
        self.children
    }

    /// The indices, in increasing order, of the hierarchies whose region is listed for this cell.
    #[inline]
    pub fn bvhs(&self) -> &[usize] {
        &self.bvhs
    }
}

/// An octree indexing which regions matter in each cell of space.
///
/// The root cell is the union of the enclosing AABBs of the regions. A region is listed on a
/// cell if it fully contains it or, unless the octree is conservative, if it overlaps it. Cells
/// are subdivided as long as some region partially overlaps them and the maximum depth is not
/// reached.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    properties: OctreeProperties,
}

impl Octree {
    /// Builds the octree of `regions`.
    pub fn new(regions: &[Region], properties: OctreeProperties) -> Self {
        let mut octree = Self {
            nodes: Vec::new(),
            properties,
        };

        let root_aabb = regions
            .iter()
            .fold(Aabb::new_invalid(), |aabb, region| {
                aabb.merged(&region.enclosing_aabb())
            });
        let candidates = (0..regions.len()).collect();
        let _ = octree.build_node(regions, root_aabb, 0, Vec::new(), candidates);

        log::debug!(
            "built octree over {} regions: {} nodes, depth {}",
            regions.len(),
            octree.nodes.len(),
            octree.depth()
        );
        octree
    }

    // `contained` lists regions known to contain `aabb`. `candidates` lists those that may
    // overlap it.
    fn build_node(
        &mut self,
        regions: &[Region],
        aabb: Aabb,
        level: u32,
        mut contained: Vec<usize>,
        candidates: Vec<usize>,
    ) -> u32 {
        let mut overlapping = Vec::new();
        for region in candidates {
            if regions[region].fully_contains(&aabb) {
                contained.push(region);
            } else if regions[region].is_colliding_with(&aabb) {
                overlapping.push(region);
            }
        }

        let mut listed = contained.clone();
        if !self.properties.conservative {
            listed.extend_from_slice(&overlapping);
        }
        listed.sort_unstable();

        let id = self.nodes.len() as u32;
        self.nodes.push(OctreeNode {
            aabb,
            children: None,
            bvhs: listed,
            forced_leaf: false,
        });

        if overlapping.is_empty() {
            return id;
        }

        if level >= self.properties.max_level {
            self.nodes[id as usize].forced_leaf = true;
            return id;
        }

        let octants = aabb.split_at_center();
        let mut children = [0; 8];
        for (child, octant) in children.iter_mut().zip(octants) {
            *child = self.build_node(
                regions,
                octant,
                level + 1,
                contained.clone(),
                overlapping.clone(),
            );
        }

        self.nodes[id as usize].children = Some(children);
        id
    }

    /// The properties this octree was built with.
    #[inline]
    pub fn properties(&self) -> &OctreeProperties {
        &self.properties
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &OctreeNode {
        &self.nodes[0]
    }

    /// The node with index `id`.
    #[inline]
    pub fn node(&self, id: u32) -> &OctreeNode {
        &self.nodes[id as usize]
    }

    /// All the nodes, each parent before its children.
    #[inline]
    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    /// The number of levels below the root.
    pub fn depth(&self) -> u32 {
        self.subtree_depth(0)
    }

    fn subtree_depth(&self, id: u32) -> u32 {
        match self.nodes[id as usize].children {
            Some(children) => {
                1 + children
                    .iter()
                    .map(|child| self.subtree_depth(*child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    /// The leaf whose cell contains `pt`, or `None` if `pt` is outside of the root cell.
    pub fn leaf_containing(&self, pt: &Point<Real>) -> Option<&OctreeNode> {
        let mut node = self.root();
        if !node.aabb.contains_local_point(pt) {
            return None;
        }

        while let Some(children) = node.children {
            node = &self.nodes[children[node.aabb.octant_index(pt)] as usize];
        }

        Some(node)
    }

    /// The regions listed for the cell containing `pt`, by index.
    pub fn contained_in(&self, pt: &Point<Real>) -> &[usize] {
        self.leaf_containing(pt)
            .map(OctreeNode::bvhs)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod test {
    use super::Octree;
    use crate::bounding_volume::{Aabb, Obb, Region};
    use crate::math::{Point, Rotation, Vector};
    use crate::partitioning::OctreeProperties;

    fn regions() -> Vec<Region> {
        vec![
            Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(4.0, 4.0, 4.0)).into(),
            Obb::new(
                Point::new(6.0, 2.0, 2.0),
                Rotation::from_euler_angles(0.4, 0.2, -0.3),
                Vector::new(2.0, 1.0, 1.5),
            )
            .into(),
        ]
    }

    #[test]
    fn octree_children_follow_their_parent() {
        let octree = Octree::new(&regions(), OctreeProperties::default().with_max_level(3));
        assert!(octree.depth() <= 3);

        for (id, node) in octree.nodes().iter().enumerate() {
            if let Some(children) = node.children() {
                assert!(!node.is_leaf());
                for (i, child) in children.iter().enumerate() {
                    assert!(*child as usize > id);
                    assert_eq!(octree.node(*child).aabb, node.aabb.split_at_center()[i]);
                }
            }
        }
    }

    #[test]
    fn octree_lists_containing_regions_at_every_depth() {
        let regions = regions();
        let inside = [
            (Point::new(1.3, 2.1, 0.7), 0),
            (Point::new(3.9, 3.9, 3.9), 0),
            (Point::new(6.0, 2.0, 2.0), 1),
        ];

        for max_level in 0..5 {
            let properties = OctreeProperties::default().with_max_level(max_level);
            let octree = Octree::new(&regions, properties);

            for (pt, region) in &inside {
                assert!(octree.contained_in(pt).contains(region));
            }
        }
    }

    #[test]
    fn conservative_octree_only_lists_containing_regions() {
        let regions = regions();
        let properties = OctreeProperties::default()
            .with_max_level(4)
            .with_conservative(true);
        let octree = Octree::new(&regions, properties);

        for node in octree.nodes() {
            for region in node.bvhs() {
                assert!(regions[*region].fully_contains(&node.aabb));
            }
        }

        // Deep inside the axis-aligned box, cells end up fully contained.
        assert_eq!(octree.contained_in(&Point::new(1.0, 1.0, 1.0)), &[0]);
    }

    #[test]
    fn octree_outside_root_is_empty() {
        let octree = Octree::new(&regions(), OctreeProperties::default());
        assert!(octree.contained_in(&Point::new(-5.0, 0.0, 0.0)).is_empty());

        let empty = Octree::new(&[], OctreeProperties::default());
        assert_eq!(empty.nodes().len(), 1);
        assert!(empty.contained_in(&Point::origin()).is_empty());
    }
}
