use crate::math::Real;
use crate::partitioning::PropertiesError;

/// Which triangles of the scene a specialized hierarchy is built on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum AssignmentPolicy {
    /// Triangles with at least one vertex inside the region of the influence area.
    ///
    /// A triangle grazing a corner of the region is assigned even if most of it lies outside.
    #[default]
    AnyVertex,
    /// Triangles with their three vertices inside the region.
    AllVertices,
    /// Triangles with their barycenter inside the region.
    Barycenter,
}

/// Parameters of a top-level structure.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
pub struct TopLevelProperties {
    /// How triangles are assigned to the specialized hierarchies.
    pub assignment: AssignmentPolicy,
    /// Seed of every hierarchy build, or `None` to seed from the OS entropy source.
    pub seed: Option<u64>,
}

impl TopLevelProperties {
    /// Sets the triangle assignment policy.
    pub fn with_assignment(mut self, assignment: AssignmentPolicy) -> Self {
        self.assignment = assignment;
        self
    }

    /// Sets the seed of every hierarchy build.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// The largest supported octree depth.
pub const MAX_OCTREE_LEVEL: u32 = 10;

/// Parameters of the octree of a [`TopLevelOctree`](super::TopLevelOctree).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
pub struct OctreeProperties {
    /// Nodes at this depth are never subdivided.
    pub max_level: u32,
    /// If `true`, a cell only lists the regions fully containing it. Otherwise it also lists the
    /// regions merely overlapping it.
    pub conservative: bool,
}

impl Default for OctreeProperties {
    fn default() -> Self {
        Self {
            max_level: 5,
            conservative: false,
        }
    }
}

impl OctreeProperties {
    /// Sets the maximum depth.
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    /// Sets the containment mode.
    pub fn with_conservative(mut self, conservative: bool) -> Self {
        self.conservative = conservative;
        self
    }

    /// Checks that these properties can drive a construction.
    pub fn validate(&self) -> Result<(), PropertiesError> {
        if self.max_level > MAX_OCTREE_LEVEL {
            return Err(PropertiesError::OctreeTooDeep {
                depth: self.max_level,
                max: MAX_OCTREE_LEVEL,
            });
        }

        Ok(())
    }
}

/// Error raised while setting up a top-level structure.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum TopLevelError {
    /// Specialized hierarchies must be built for an influence area.
    #[error("the specialized bvh {0} has no influence area")]
    MissingInfluenceArea(usize),
    /// Invalid octree properties.
    #[error(transparent)]
    Properties(#[from] PropertiesError),
}

/// Aggregated statistics over many top-level traversals.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TopLevelStatistics {
    /// Number of traversals.
    pub queries: usize,
    /// Traversals that hit a triangle in a specialized hierarchy.
    pub direct_hits: usize,
    /// Traversals that had to use the fallback hierarchy.
    pub fallback_queries: usize,
    /// Fallback traversals that hit a triangle.
    pub fallback_hits: usize,
    /// Traversals that hit nothing.
    pub misses: usize,
    /// Candidate hierarchies skipped because the ray was not affine to their influence area.
    pub skipped_candidates: usize,
    /// Ray/box tests, over every traversal.
    pub node_tests: usize,
    /// Ray/triangle tests, over every traversal.
    pub triangle_tests: usize,
    /// Traversal cost, over every traversal.
    pub cost: Real,
}

impl TopLevelStatistics {
    /// Accounts for one traversal.
    pub fn add(&mut self, results: &super::TopLevelTraversalResults) {
        self.queries += 1;
        self.skipped_candidates += results.skipped_candidates;
        self.node_tests += results.counts.nodes;
        self.triangle_tests += results.counts.triangles;
        self.cost += results.cost;

        match (results.hit(), results.used_fallback()) {
            (true, false) => self.direct_hits += 1,
            (true, true) => {
                self.fallback_queries += 1;
                self.fallback_hits += 1;
            }
            (false, true) => {
                self.fallback_queries += 1;
                self.misses += 1;
            }
            (false, false) => self.misses += 1,
        }
    }

    /// The average traversal cost.
    pub fn mean_cost(&self) -> Real {
        if self.queries == 0 {
            0.0
        } else {
            self.cost / self.queries as Real
        }
    }
}
