//! Various unsorted geometrical and logical operators.

pub use self::axis::{Axis, AxisError};
pub use self::consts::*;
pub use self::parallel::is_parallel;
pub use self::polygon2d::{
    clip_convex_polygons, convex_hull2d, convex_polygons_overlap_area, make_ccw, signed_area,
};

mod axis;
mod consts;
mod parallel;
mod polygon2d;
