use super::Bvh;
use crate::bounding_volume::BoundingVolume;

impl Bvh<'_> {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if:
    /// - every internal node has two valid children, stored after it, and every node but the
    ///   root has exactly one parent;
    /// - every leaf holds at least one triangle, unless it is the root of an empty hierarchy;
    /// - every triangle the hierarchy was built on appears in exactly one leaf;
    /// - every node box contains the boxes of its children and the vertices of its triangles.
    pub fn assert_well_formed(&self) {
        if self.nodes.is_empty() {
            assert_eq!(self.triangle_count, 0);
            return;
        }

        let mut parent_count = vec![0u32; self.nodes.len()];
        let mut seen_triangles = vec![false; self.scene.len()];
        let mut leaf_triangles = 0;

        for (id, node) in self.nodes.iter().enumerate() {
            match node.children {
                Some(children) => {
                    assert!(node.triangles.is_empty(), "internal node {id} has triangles");

                    for child in children {
                        let child = child as usize;
                        assert!(child > id && child < self.nodes.len());
                        parent_count[child] += 1;
                        assert!(node.aabb.contains(&self.nodes[child].aabb));
                    }
                }
                None => {
                    assert!(
                        !node.triangles.is_empty() || (id == 0 && self.triangle_count == 0),
                        "leaf {id} is empty"
                    );

                    for tri in &node.triangles {
                        let seen = &mut seen_triangles[*tri as usize];
                        assert!(!*seen, "triangle {tri} is in more than one leaf");
                        *seen = true;
                        leaf_triangles += 1;

                        for pt in self.scene[*tri as usize].vertices() {
                            assert!(node.aabb.contains_local_point(&pt));
                        }
                    }
                }
            }
        }

        assert_eq!(parent_count[0], 0);
        assert!(parent_count[1..].iter().all(|c| *c == 1));
        assert_eq!(leaf_triangles, self.triangle_count);
    }
}
