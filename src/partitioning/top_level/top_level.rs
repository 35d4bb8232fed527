use super::{AssignmentPolicy, TopLevelError, TopLevelProperties, TopLevelStructure};
use crate::bounding_volume::Region;
use crate::math::{Point, Real};
use crate::metrics::{MetricsSink, NoopMetrics, TopLevelBuildEvent};
use crate::partitioning::Bvh;
use crate::shape::Triangle;
use arrayvec::ArrayVec;
use smallvec::SmallVec;
use std::time::Instant;

/// Hierarchies specialized for influence areas, dispatched by a linear scan of their regions.
#[derive(Clone, Debug)]
pub struct TopLevel<'a> {
    fallback: Bvh<'a>,
    bvhs: Vec<Bvh<'a>>,
    regions: Vec<Region>,
    properties: TopLevelProperties,
}

impl<'a> TopLevel<'a> {
    /// Assembles a top-level structure from unbuilt hierarchies.
    ///
    /// Every hierarchy in `bvhs` must have an influence area. `fallback` usually has none.
    pub fn new(
        fallback: Bvh<'a>,
        bvhs: Vec<Bvh<'a>>,
        properties: TopLevelProperties,
    ) -> Result<Self, TopLevelError> {
        let regions = bvhs
            .iter()
            .enumerate()
            .map(|(i, bvh)| {
                bvh.influence_area()
                    .map(|area| *area.bvh_region())
                    .ok_or(TopLevelError::MissingInfluenceArea(i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fallback,
            bvhs,
            regions,
            properties,
        })
    }

    /// The regions of the specialized hierarchies, in the same order.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The properties this structure was created with.
    #[inline]
    pub fn properties(&self) -> &TopLevelProperties {
        &self.properties
    }

    /// Builds every hierarchy over `scene`.
    pub fn build(&mut self, scene: &'a [Triangle]) {
        self.build_with_metrics(scene, &mut NoopMetrics)
    }

    /// Same as [`Self::build`], reporting to `metrics`.
    pub fn build_with_metrics(&mut self, scene: &'a [Triangle], metrics: &mut dyn MetricsSink) {
        let all: SmallVec<[usize; 4]> = (0..self.bvhs.len()).collect();
        self.build_routed(scene, metrics, |_| all.clone());
    }

    /// Builds every hierarchy, asking `candidates` which regions may contain a point before
    /// testing them exactly.
    pub(super) fn build_routed(
        &mut self,
        scene: &'a [Triangle],
        metrics: &mut dyn MetricsSink,
        candidates: impl Fn(&Point<Real>) -> SmallVec<[usize; 4]>,
    ) {
        let start = Instant::now();
        let seed = self.properties.seed;
        self.fallback.build_with_metrics(scene, seed, metrics);

        let assigned = self.assign(scene, candidates);
        let assigned_triangle_count = assigned.iter().map(Vec::len).sum();

        for (bvh, indices) in self.bvhs.iter_mut().zip(assigned) {
            bvh.build_subset_with_metrics(scene, indices, seed, metrics);
        }

        log::debug!(
            "built top-level structure: {} specialized bvhs, {} of {} triangles assigned",
            self.bvhs.len(),
            assigned_triangle_count,
            scene.len()
        );

        metrics.top_level_built(&TopLevelBuildEvent {
            bvh_count: self.bvhs.len(),
            triangle_count: scene.len(),
            assigned_triangle_count,
            duration: start.elapsed(),
        });
    }

    fn assign(
        &self,
        scene: &[Triangle],
        candidates: impl Fn(&Point<Real>) -> SmallVec<[usize; 4]>,
    ) -> Vec<Vec<u32>> {
        let policy = self.properties.assignment;
        let mut assigned = vec![Vec::new(); self.bvhs.len()];

        for (id, tri) in scene.iter().enumerate() {
            let points: ArrayVec<Point<Real>, 3> = match policy {
                AssignmentPolicy::Barycenter => [tri.barycenter()].into_iter().collect(),
                AssignmentPolicy::AnyVertex | AssignmentPolicy::AllVertices => {
                    tri.vertices().into_iter().collect()
                }
            };

            // (bvh, number of points inside its region)
            let mut inside: SmallVec<[(usize, usize); 4]> = SmallVec::new();
            for pt in &points {
                for bvh in candidates(pt) {
                    if !self.regions[bvh].contains(pt) {
                        continue;
                    }

                    match inside.iter_mut().find(|(i, _)| *i == bvh) {
                        Some((_, count)) => *count += 1,
                        None => inside.push((bvh, 1)),
                    }
                }
            }

            for (bvh, count) in inside {
                let keep = match policy {
                    AssignmentPolicy::AllVertices => count == points.len(),
                    AssignmentPolicy::AnyVertex | AssignmentPolicy::Barycenter => count > 0,
                };

                if keep {
                    assigned[bvh].push(id as u32);
                }
            }
        }

        assigned
    }
}

impl<'a> TopLevelStructure<'a> for TopLevel<'a> {
    fn bvhs(&self) -> &[Bvh<'a>] {
        &self.bvhs
    }

    fn fallback_bvh(&self) -> &Bvh<'a> {
        &self.fallback
    }

    fn contained_in(&self, pt: &Point<Real>) -> SmallVec<[usize; 4]> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, region)| region.contains(pt))
            .map(|(i, _)| i)
            .collect()
    }
}
