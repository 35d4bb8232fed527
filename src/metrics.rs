//! Instrumentation hooks.
//!
//! Construction and traversal report what they did to a [`MetricsSink`]. The default sink,
//! [`NoopMetrics`], discards everything; [`RecordingMetrics`] keeps every event in memory.

use core::time::Duration;

/// Summary of one [`Bvh`](crate::partitioning::Bvh) construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BvhBuildEvent {
    /// Identifier of the hierarchy after the build.
    pub bvh_id: u64,
    /// Number of triangles the hierarchy was built on.
    pub triangle_count: usize,
    /// Total number of nodes.
    pub node_count: usize,
    /// Number of leaves.
    pub leaf_count: usize,
    /// Length of the longest root-to-leaf path, in edges.
    pub depth: u32,
    /// Wall-clock duration of the build.
    pub duration: Duration,
}

/// Summary of one top-level structure construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TopLevelBuildEvent {
    /// Number of specialized hierarchies.
    pub bvh_count: usize,
    /// Number of triangles of the scene.
    pub triangle_count: usize,
    /// Sum over every specialized hierarchy of the number of triangles assigned to it.
    pub assigned_triangle_count: usize,
    /// Wall-clock duration of the build, specialized hierarchies included.
    pub duration: Duration,
}

/// Summary of one ray traversal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraversalEvent {
    /// Identifier of the traversed hierarchy.
    pub bvh_id: u64,
    /// Did the ray hit a triangle?
    pub hit: bool,
    /// Number of ray/box tests.
    pub node_tests: usize,
    /// Number of ray/triangle tests.
    pub triangle_tests: usize,
}

/// Receiver of instrumentation events.
///
/// Every method has an empty default implementation, so sinks only override what they need.
pub trait MetricsSink {
    /// A hierarchy finished building.
    fn bvh_built(&mut self, _event: &BvhBuildEvent) {}
    /// A top-level structure finished building.
    fn top_level_built(&mut self, _event: &TopLevelBuildEvent) {}
    /// A ray finished traversing a hierarchy.
    fn traversal_finished(&mut self, _event: &TraversalEvent) {}
}

/// A sink that discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {}

/// A sink that records every event.
#[derive(Clone, Debug, Default)]
pub struct RecordingMetrics {
    /// The hierarchy builds, in order.
    pub bvh_builds: Vec<BvhBuildEvent>,
    /// The top-level builds, in order.
    pub top_level_builds: Vec<TopLevelBuildEvent>,
    /// The traversals, in order.
    pub traversals: Vec<TraversalEvent>,
}

impl MetricsSink for RecordingMetrics {
    fn bvh_built(&mut self, event: &BvhBuildEvent) {
        self.bvh_builds.push(*event);
    }

    fn top_level_built(&mut self, event: &TopLevelBuildEvent) {
        self.top_level_builds.push(*event);
    }

    fn traversal_finished(&mut self, event: &TraversalEvent) {
        self.traversals.push(*event);
    }
}
