use core::fmt;

/// Error indicating that an operation is not supported.
///
/// This is returned, for example, by
/// [`InfluenceArea::best_splitting_planes`](crate::influence_area::InfluenceArea::best_splitting_planes):
/// splitting guidance is obtained through the strategies configured on the
/// [`Bvh`](crate::partitioning::Bvh) instead.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Unsupported;

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("operation not supported")
    }
}

impl core::error::Error for Unsupported {}
