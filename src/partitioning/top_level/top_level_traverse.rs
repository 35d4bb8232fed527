use crate::math::{Point, Real};
use crate::metrics::{MetricsSink, NoopMetrics};
use crate::partitioning::{Bvh, IntersectionCounts, TraversalResults, TriangleHit};
use crate::query::Ray;
use smallvec::SmallVec;

/// The traversal of one specialized hierarchy during a top-level traversal.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CandidateTraversal {
    /// Index of the hierarchy in [`TopLevelStructure::bvhs`].
    pub bvh: usize,
    /// What its traversal found.
    pub results: TraversalResults,
}

/// The outcome of a top-level traversal.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TopLevelTraversalResults {
    /// The specialized hierarchies traversed, in traversal order.
    pub candidates: SmallVec<[CandidateTraversal; 2]>,
    /// Candidates skipped because the ray direction was not affine to their influence area.
    pub skipped_candidates: usize,
    /// The traversal of the fallback hierarchy, if no specialized hierarchy produced a hit.
    pub fallback: Option<TraversalResults>,
    /// The hit reported to the caller.
    pub closest_hit: Option<TriangleHit>,
    /// Tests performed over every traversed hierarchy.
    pub counts: IntersectionCounts,
    /// Cost of every traversed hierarchy.
    pub cost: Real,
}

impl TopLevelTraversalResults {
    /// Did the ray hit a triangle?
    #[inline]
    pub fn hit(&self) -> bool {
        self.closest_hit.is_some()
    }

    /// Was the fallback hierarchy traversed?
    #[inline]
    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// The index of the specialized hierarchy that produced the hit.
    ///
    /// `None` on a miss or if the hit came from the fallback hierarchy.
    pub fn hit_bvh(&self) -> Option<usize> {
        self.candidates
            .iter()
            .find(|candidate| candidate.results.hit())
            .map(|candidate| candidate.bvh)
    }

    fn accumulate(&mut self, results: &TraversalResults) {
        self.counts += results.counts;
        self.cost += results.cost;
    }
}

/// A set of hierarchies specialized for influence areas, backed by a general-purpose one.
///
/// A ray is first traversed through the specialized hierarchies whose influence area contains
/// its origin and to which its direction is affine, in index order. The first hit ends the
/// query. If none of them hits, the fallback hierarchy answers.
///
/// The first hit of a specialized hierarchy is not necessarily the closest triangle of the
/// scene: hierarchies only cover the triangles assigned to them.
pub trait TopLevelStructure<'a> {
    /// The specialized hierarchies.
    fn bvhs(&self) -> &[Bvh<'a>];

    /// The hierarchy built over the whole scene.
    fn fallback_bvh(&self) -> &Bvh<'a>;

    /// The indices, in increasing order, of the specialized hierarchies relevant at `pt`.
    fn contained_in(&self, pt: &Point<Real>) -> SmallVec<[usize; 4]>;

    /// Finds the triangle hit by `ray`.
    fn traverse(&self, ray: &Ray) -> TopLevelTraversalResults {
        self.traverse_with_metrics(ray, &mut NoopMetrics)
    }

    /// Same as [`Self::traverse`], reporting every hierarchy traversal to `metrics`.
    fn traverse_with_metrics(
        &self,
        ray: &Ray,
        metrics: &mut dyn MetricsSink,
    ) -> TopLevelTraversalResults {
        let mut result = TopLevelTraversalResults::default();
        let bvhs = self.bvhs();

        for bvh in self.contained_in(&ray.origin) {
            let affine = bvhs[bvh]
                .influence_area()
                .is_some_and(|area| area.is_direction_affine(ray));

            if !affine {
                result.skipped_candidates += 1;
                continue;
            }

            let results = bvhs[bvh].traverse_with_metrics(ray, metrics);
            result.accumulate(&results);
            result.candidates.push(CandidateTraversal { bvh, results });

            if results.hit() {
                result.closest_hit = results.closest_hit;
                return result;
            }
        }

        let results = self.fallback_bvh().traverse_with_metrics(ray, metrics);
        result.accumulate(&results);
        result.closest_hit = results.closest_hit;
        result.fallback = Some(results);
        result
    }
}
