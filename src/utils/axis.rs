use crate::math::{Point, Real, Vector};
use core::fmt;

/// One of the three axes of the world frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Axis {
    /// The `x` axis.
    X = 0,
    /// The `y` axis.
    Y = 1,
    /// The `z` axis.
    Z = 2,
}

/// Error returned when converting an out-of-range index into an [`Axis`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("invalid axis index {0}, expected 0, 1, or 2")]
pub struct AxisError(pub usize);

impl Axis {
    /// All the axes, in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The index of this axis (0 for `x`, 1 for `y`, 2 for `z`).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis following `self` in the cyclic order `x → y → z → x`.
    #[inline]
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// The unit vector along this axis.
    #[inline]
    pub fn unit(self) -> Vector<Real> {
        match self {
            Axis::X => Vector::x(),
            Axis::Y => Vector::y(),
            Axis::Z => Vector::z(),
        }
    }

    /// The component of `pt` along this axis.
    #[inline]
    pub fn component(self, pt: &Point<Real>) -> Real {
        pt[self.index()]
    }

    /// The axis with the largest component of `v`.
    pub fn of_largest(v: &Vector<Real>) -> Axis {
        match v.imax() {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = AxisError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            _ => Err(AxisError(index)),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.pad("x"),
            Axis::Y => f.pad("y"),
            Axis::Z => f.pad("z"),
        }
    }
}
