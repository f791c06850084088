use thiserror::Error;

use crate::grid::ConnectivityGrid;
use crate::location::Location;
use crate::puzzle::{ColorId, Puzzle};

/// Ways a [`ConnectivityGrid`] can fail to solve a [`Puzzle`].
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum SolutionDefect {
    /// The grid and the puzzle have different dimensions.
    #[error("grid and puzzle differ in size")]
    DimensionMismatch,
    /// A line leaves the grid.
    #[error("cell {0} has a link leading off the grid")]
    OffGrid(Location),
    /// A cell carries no color.
    #[error("cell {0} has no color")]
    Uncolored(Location),
    /// A cell has the wrong number of links for its role.
    #[error("cell {location} has {found} links, expected {expected}")]
    Degree {
        /// The offending cell.
        location: Location,
        /// Links present.
        found: usize,
        /// 1 for endpoints, 2 otherwise.
        expected: usize,
    },
    /// Two linked cells disagree on color.
    #[error("link between {0} and {1} joins different colors")]
    ColorMismatch(Location, Location),
    /// An endpoint does not carry its own color.
    #[error("endpoint {location} should have color {expected}")]
    EndpointColor {
        /// The endpoint.
        location: Location,
        /// Its color in the puzzle.
        expected: ColorId,
    },
    /// The line starting at one endpoint does not reach its partner.
    #[error("line from {from} ends at {reached} instead of {expected}")]
    BrokenPath {
        /// Where tracing started.
        from: Location,
        /// Where tracing stopped.
        reached: Location,
        /// The partner endpoint.
        expected: Location,
    },
}

/// Verify that `grid` solves `puzzle`.
///
/// Every cell must be colored and have exactly two links (one for endpoints), linked cells must share a color, every
/// endpoint must carry its own color, and the line traced from each endpoint must end at its partner.
/// Lines not touching any endpoint are not rejected; the encoding permits them.
pub fn check_solution(puzzle: &Puzzle, grid: &ConnectivityGrid) -> Result<(), SolutionDefect> {
    if grid.dims() != puzzle.dims() {
        return Err(SolutionDefect::DimensionMismatch);
    }

    for (location, cell) in grid.cells() {
        if cell.color.is_none() {
            return Err(SolutionDefect::Uncolored(location));
        }

        let expected = if puzzle.terminus_at(location).is_some() { 1 } else { 2 };
        if cell.degree() != expected {
            return Err(SolutionDefect::Degree { location, found: cell.degree(), expected });
        }
    }

    for (location, cell) in grid.cells() {
        for direction in cell.exits() {
            let neighbor = direction.attempt_from(location);
            let other = grid.get(neighbor).ok_or(SolutionDefect::OffGrid(location))?;
            if other.color != cell.color {
                return Err(SolutionDefect::ColorMismatch(location, neighbor));
            }
        }
    }

    for (color, (a, b)) in puzzle.termini() {
        for location in [a, b] {
            if grid.get(location).and_then(|cell| cell.color) != Some(color) {
                return Err(SolutionDefect::EndpointColor { location, expected: color });
            }
        }

        let path = grid.trace(a);
        let reached = *path.last().unwrap_or(&a);
        if reached != b {
            return Err(SolutionDefect::BrokenPath { from: a, reached, expected: b });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use itertools::Itertools;

    use crate::grid::decode;
    use crate::location::Location;
    use crate::puzzle::Puzzle;
    use crate::solver::Record;

    use super::{check_solution, SolutionDefect};

    fn two_by_two() -> Puzzle {
        Puzzle::new(
            (NonZero::new(2).unwrap(), NonZero::new(2).unwrap()),
            vec![Location(0, 0), Location(0, 1)],
        ).unwrap()
    }

    fn grid(lines: &[&str]) -> crate::grid::ConnectivityGrid {
        let records = lines.iter().map(|line| line.parse::<Record>().unwrap()).collect_vec();
        decode((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()), &records)
    }

    #[test]
    fn accepts_u_turn() {
        let solved = grid(&["c.0.0.1 -v.0.0 h.0.0", "c.0.1.1 h.0.1", "c.1.0.1 v.1.0", "c.1.1.1"]);
        assert_eq!(check_solution(&two_by_two(), &solved), Ok(()));
    }

    #[test]
    fn rejects_wrong_degree() {
        let loose = grid(&["c.0.0.1 v.0.0 h.0.0", "c.0.1.1 h.0.1", "c.1.0.1 v.1.0", "c.1.1.1"]);
        assert_eq!(check_solution(&two_by_two(), &loose), Err(SolutionDefect::Degree {
            location: Location(0, 0),
            found: 2,
            expected: 1,
        }));
    }

    #[test]
    fn rejects_mixed_colors() {
        let mixed = grid(&["c.0.0.1 -v.0.0 h.0.0", "c.0.1.1 h.0.1", "c.1.0.2 v.1.0", "c.1.1.1"]);
        assert_eq!(
            check_solution(&two_by_two(), &mixed),
            Err(SolutionDefect::ColorMismatch(Location(0, 0), Location(1, 0))),
        );
    }

    #[test]
    fn rejects_uncolored() {
        let blank = grid(&["c.0.0.1 -v.0.0 h.0.0", "c.0.1.1 h.0.1", "c.1.0.1 v.1.0"]);
        assert_eq!(check_solution(&two_by_two(), &blank), Err(SolutionDefect::Uncolored(Location(1, 1))));
    }
}
