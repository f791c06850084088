use strum::VariantArray;

use crate::location::Location;

/// The four ways out of a square cell, in the order `+x`, `+y`, `-x`, `-y`.
///
/// The discriminant doubles as the index into a cell's exit flags.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// `+x`
    Right = 0,
    /// `+y`
    Down = 1,
    /// `-x`
    Left = 2,
    /// `-y`
    Up = 3,
}

impl SquareStep {
    /// Attempt the step from `location` in this direction and return the resultant [`Location`].
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, which no grid contains.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Right => location.offset_by((1, 0)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Up => location.offset_by((0, -1)),
        }
    }

    /// Forward directions lead to a location indexed higher in row-major order.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// The opposite direction.
    pub fn invert(&self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}
