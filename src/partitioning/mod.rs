//! Spatial partitioning tools.

pub use self::bvh::{
    hit_probability, Bvh, BvhNode, BvhProperties, BvhStrategy, CostContext, CostModel,
    IntersectionCounts, PropertiesError, SplitPlaneChooser, SplitPlaneContext, SplitPlanes,
    StopContext, StopCriterion, TraversalResults, TriangleHit,
};
pub use self::top_level::{
    AssignmentPolicy, CandidateTraversal, Octree, OctreeNode, OctreeProperties, TopLevel,
    TopLevelError, TopLevelOctree, TopLevelProperties, TopLevelStatistics, TopLevelStructure,
    TopLevelTraversalResults, MAX_OCTREE_LEVEL,
};

mod bvh;
mod top_level;
