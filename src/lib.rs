/*!
pahbvh
========

**pahbvh** builds and evaluates bounding volume hierarchies for ray-tracing
acceleration. Every hierarchy can be driven either by the classic Surface
Area Heuristic (SAH) or by the Projected Area Heuristic (PAH), which weights
nodes by the area they cover as seen from a known ray source (an *influence
area*).

The crate is organized as follows:

- [`bounding_volume`]: axis-aligned and oriented boxes, frustums and the
  [`Region`](bounding_volume::Region) sum type used as influence-area extents.
- [`query`]: rays and the exact collision tests (slab method, SAT, ray/polygon).
- [`projection`]: orthographic and perspective projection of boxes to 2D.
- [`influence_area`]: plane (parallel rays) and point (conic rays) ray sources.
- [`partitioning`]: the strategy-driven [`Bvh`](partitioning::Bvh) and the
  top-level dispatch structures built on top of it.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)] // Complains about closures that are fairly simple.

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod influence_area;
pub mod metrics;
pub mod partitioning;
pub mod projection;
pub mod query;
pub mod shape;
pub mod utils;

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use na::{Matrix3, Matrix4, Point2, Point3, UnitVector3, Vector2, Vector3, Vector4};

    /// The scalar type used throughout this crate.
    pub use f32 as Real;

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The matrix type.
    pub use Matrix3 as Matrix;

    /// The rotation matrix type.
    pub type Rotation<N> = na::Rotation3<N>;
}
