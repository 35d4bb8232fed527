//! Projection of boxes onto the 2D plane a ray source looks through.
//!
//! Plane influence areas use an [`OrthographicProjection`] (all rays are parallel), point
//! influence areas use a [`PerspectiveProjection`] (all rays start from the same point). Both
//! give the area a box covers on the projection plane, which is the hit-probability proxy of the
//! Projected Area Heuristic.

pub use self::orthographic::OrthographicProjection;
pub use self::perspective::{perspective_matrix, PerspectiveParameters, PerspectiveProjection};
pub use self::silhouette::{position_code, silhouette, PositionCode, SILHOUETTE_TABLE_LEN};
pub use self::view::{look_at, up_vector_for};

mod orthographic;
mod perspective;
mod silhouette;
mod view;
