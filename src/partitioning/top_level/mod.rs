//! Dispatch of rays between hierarchies specialized for influence areas.

pub use self::octree::{Octree, OctreeNode};
pub use self::top_level::TopLevel;
pub use self::top_level_octree::TopLevelOctree;
pub use self::top_level_properties::{
    AssignmentPolicy, OctreeProperties, TopLevelError, TopLevelProperties, TopLevelStatistics,
    MAX_OCTREE_LEVEL,
};
pub use self::top_level_traverse::{
    CandidateTraversal, TopLevelStructure, TopLevelTraversalResults,
};

mod octree;
mod top_level;
mod top_level_octree;
mod top_level_properties;
mod top_level_traverse;
