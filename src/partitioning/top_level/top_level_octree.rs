use super::{Octree, OctreeNode, OctreeProperties, TopLevel, TopLevelError, TopLevelStructure};
use crate::math::{Point, Real};
use crate::metrics::{MetricsSink, NoopMetrics};
use crate::partitioning::Bvh;
use crate::shape::Triangle;
use smallvec::SmallVec;

/// A [`TopLevel`] whose regions are indexed by an [`Octree`].
///
/// The octree answers [`TopLevelStructure::contained_in`] without scanning every region, and
/// routes triangles to the specialized hierarchies at build time. A conservative octree may omit
/// a region near its boundary, in which case the fallback hierarchy answers the ray.
#[derive(Clone, Debug)]
pub struct TopLevelOctree<'a> {
    top_level: TopLevel<'a>,
    octree: Octree,
}

impl<'a> TopLevelOctree<'a> {
    /// Indexes the regions of `top_level`.
    pub fn new(
        top_level: TopLevel<'a>,
        properties: OctreeProperties,
    ) -> Result<Self, TopLevelError> {
        properties.validate()?;
        let octree = Octree::new(top_level.regions(), properties);
        Ok(Self { top_level, octree })
    }

    /// The indexed structure.
    #[inline]
    pub fn top_level(&self) -> &TopLevel<'a> {
        &self.top_level
    }

    /// The octree over the regions.
    #[inline]
    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    /// The root of the octree.
    #[inline]
    pub fn root(&self) -> &OctreeNode {
        self.octree.root()
    }

    /// Builds every hierarchy over `scene`.
    pub fn build(&mut self, scene: &'a [Triangle]) {
        self.build_with_metrics(scene, &mut NoopMetrics)
    }

    /// Same as [`Self::build`], reporting to `metrics`.
    pub fn build_with_metrics(&mut self, scene: &'a [Triangle], metrics: &mut dyn MetricsSink) {
        let octree = &self.octree;
        self.top_level
            .build_routed(scene, metrics, |pt| octree.contained_in(pt).into());
    }
}

impl<'a> TopLevelStructure<'a> for TopLevelOctree<'a> {
    fn bvhs(&self) -> &[Bvh<'a>] {
        self.top_level.bvhs()
    }

    fn fallback_bvh(&self) -> &Bvh<'a> {
        self.top_level.fallback_bvh()
    }

    fn contained_in(&self, pt: &Point<Real>) -> SmallVec<[usize; 4]> {
        self.octree.contained_in(pt).into()
    }
}
