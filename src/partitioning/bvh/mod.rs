//! A strategy-driven binary Bounding Volume Hierarchy over triangles.

pub use self::bvh_properties::{BvhProperties, PropertiesError};
pub use self::bvh_strategy::{
    hit_probability, BvhStrategy, CostContext, CostModel, SplitPlaneChooser, SplitPlaneContext,
    SplitPlanes, StopContext, StopCriterion,
};
pub use self::bvh_traverse::{IntersectionCounts, TraversalResults, TriangleHit};
pub use self::bvh_tree::{Bvh, BvhNode};

mod bvh_build;
mod bvh_properties;
mod bvh_strategy;
mod bvh_traverse;
mod bvh_tree;
mod bvh_validation;
