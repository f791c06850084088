use strum::VariantArray;

use crate::puzzle::ColorId;
use crate::shape::SquareStep;

/// One cell of a [`ConnectivityGrid`](crate::grid::ConnectivityGrid): its color, if known, and which neighbours its
/// line runs into.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LinkedCell {
    /// `None` until a record colors this cell.
    pub color: Option<ColorId>,
    // indexed by SquareStep::index()
    pub(crate) exits: [bool; 4],
}

impl LinkedCell {
    /// Whether a line segment leaves this cell in `direction`.
    #[inline]
    pub fn has_exit(&self, direction: SquareStep) -> bool {
        self.exits[direction.index()]
    }

    pub(crate) fn open(&mut self, direction: SquareStep) {
        self.exits[direction.index()] = true;
    }

    /// Every direction with a line segment, in flag order.
    pub fn exits(&self) -> impl Iterator<Item = SquareStep> + '_ {
        SquareStep::VARIANTS.iter()
            .copied()
            .filter(|dir| self.has_exit(*dir))
    }

    /// Number of line segments leaving this cell.
    pub fn degree(&self) -> usize {
        self.exits.iter().filter(|open| **open).count()
    }

    /// A line ends here. On a solved grid these are exactly the puzzle's endpoints.
    #[inline]
    pub fn is_terminus(&self) -> bool {
        self.degree() == 1
    }

    /// The flags as `[+x, +y, -x, -y]`.
    pub fn flags(&self) -> [bool; 4] {
        self.exits
    }
}
