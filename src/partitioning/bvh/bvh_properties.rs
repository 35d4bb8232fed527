use crate::math::Real;

/// Error raised when a set of properties cannot drive a construction.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum PropertiesError {
    /// Binned splitting needs at least one interior plane.
    #[error("at least 3 bins are needed to get one interior splitting plane, got {0}")]
    TooFewBins(u32),
    /// Traversal costs must be positive and finite.
    #[error("traversal costs must be positive and finite, got {node} per node and {triangle} per triangle")]
    InvalidCosts {
        /// The cost of a ray/box test.
        node: Real,
        /// The cost of a ray/triangle test.
        triangle: Real,
    },
    /// Leaves must be allowed to hold at least one triangle.
    #[error("the maximum number of triangles per leaf must be at least 1")]
    EmptyLeaves,
    /// A threshold is NaN or infinite.
    #[error("`{name}` must be finite, got {value}")]
    NonFinite {
        /// Name of the offending property.
        name: &'static str,
        /// Its value.
        value: Real,
    },
    /// The octree is too deep to be addressed.
    #[error("the octree depth must be at most {max}, got {depth}")]
    OctreeTooDeep {
        /// The requested depth.
        depth: u32,
        /// The largest supported depth.
        max: u32,
    },
}

/// Parameters of a [`Bvh`](super::Bvh) construction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
pub struct BvhProperties {
    /// Nodes at this depth are always leaves.
    pub max_level: u32,
    /// Nodes with at most this many triangles are leaves.
    pub max_leaf_triangles: usize,
    /// Number of bins of the binned split search. `bins - 2` interior planes are tried per axis.
    pub bins: u32,
    /// Nodes at this depth or deeper are built with the fallback strategy.
    pub max_non_fallback_levels: u32,
    /// Splitting axes below this quality trigger a switch to the fallback strategy, unless an
    /// acceptable split was already found.
    pub split_plane_quality_threshold: Real,
    /// A split is acceptable if the summed hit probability of the children is at most this
    /// many times the hit probability of their parent.
    pub max_children_father_hit_probability_ratio: Real,
    /// Cost of testing a ray against a node.
    pub node_cost: Real,
    /// Cost of testing a ray against a triangle. This is the unit cost of the cost models.
    pub triangle_cost: Real,
    /// Threshold of [`StopCriterion::CostThreshold`](super::StopCriterion::CostThreshold).
    pub cost_threshold: Real,
    /// Threshold of
    /// [`StopCriterion::HitProbabilityThreshold`](super::StopCriterion::HitProbabilityThreshold).
    pub hit_probability_threshold: Real,
}

impl Default for BvhProperties {
    fn default() -> Self {
        Self {
            max_level: 32,
            max_leaf_triangles: 4,
            bins: 16,
            max_non_fallback_levels: 12,
            split_plane_quality_threshold: 0.5,
            max_children_father_hit_probability_ratio: 1.3,
            node_cost: 1.0,
            triangle_cost: 1.2,
            cost_threshold: 1.0,
            hit_probability_threshold: 1.0e-3,
        }
    }
}

impl BvhProperties {
    /// Sets the depth at which nodes are always leaves.
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    /// Sets the number of triangles below which nodes are leaves.
    pub fn with_max_leaf_triangles(mut self, max_leaf_triangles: usize) -> Self {
        self.max_leaf_triangles = max_leaf_triangles;
        self
    }

    /// Sets the number of bins of the split search.
    pub fn with_bins(mut self, bins: u32) -> Self {
        self.bins = bins;
        self
    }

    /// Sets the depth from which the fallback strategy is used.
    pub fn with_max_non_fallback_levels(mut self, levels: u32) -> Self {
        self.max_non_fallback_levels = levels;
        self
    }

    /// Sets the splitting-axis quality below which the fallback strategy takes over.
    pub fn with_split_plane_quality_threshold(mut self, threshold: Real) -> Self {
        self.split_plane_quality_threshold = threshold;
        self
    }

    /// Sets the largest acceptable children-to-parent hit probability ratio.
    pub fn with_max_children_father_hit_probability_ratio(mut self, ratio: Real) -> Self {
        self.max_children_father_hit_probability_ratio = ratio;
        self
    }

    /// Sets the traversal costs of nodes and triangles.
    pub fn with_costs(mut self, node_cost: Real, triangle_cost: Real) -> Self {
        self.node_cost = node_cost;
        self.triangle_cost = triangle_cost;
        self
    }

    /// Sets the thresholds used by the threshold-based stop criteria.
    pub fn with_stop_thresholds(mut self, cost: Real, hit_probability: Real) -> Self {
        self.cost_threshold = cost;
        self.hit_probability_threshold = hit_probability;
        self
    }

    /// Checks that these properties can drive a construction.
    pub fn validate(&self) -> Result<(), PropertiesError> {
        if self.bins < 3 {
            return Err(PropertiesError::TooFewBins(self.bins));
        }

        if self.max_leaf_triangles == 0 {
            return Err(PropertiesError::EmptyLeaves);
        }

        let costs_ok = |c: Real| c.is_finite() && c > 0.0;
        if !costs_ok(self.node_cost) || !costs_ok(self.triangle_cost) {
            return Err(PropertiesError::InvalidCosts {
                node: self.node_cost,
                triangle: self.triangle_cost,
            });
        }

        for (name, value) in [
            (
                "split_plane_quality_threshold",
                self.split_plane_quality_threshold,
            ),
            (
                "max_children_father_hit_probability_ratio",
                self.max_children_father_hit_probability_ratio,
            ),
            ("cost_threshold", self.cost_threshold),
            ("hit_probability_threshold", self.hit_probability_threshold),
        ] {
            if !value.is_finite() {
                return Err(PropertiesError::NonFinite { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{BvhProperties, PropertiesError};

    #[test]
    fn validation() {
        assert_eq!(BvhProperties::default().validate(), Ok(()));
        assert_eq!(
            BvhProperties::default().with_bins(2).validate(),
            Err(PropertiesError::TooFewBins(2))
        );
        assert!(matches!(
            BvhProperties::default().with_costs(1.0, -1.0).validate(),
            Err(PropertiesError::InvalidCosts { .. })
        ));
        assert!(matches!(
            BvhProperties::default()
                .with_split_plane_quality_threshold(f32::NAN)
                .validate(),
            Err(PropertiesError::NonFinite {
                name: "split_plane_quality_threshold",
                ..
            })
        ));
    }
}
