use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::cell::LinkedCell;
use crate::location::{Dimension, Location};
use crate::shape::SquareStep;
use crate::solver::Record;
use crate::var::VarKey;

/// A solved grid as the presentation layer sees it: per cell, a color label and four exit flags.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectivityGrid {
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) cells: Array2<LinkedCell>,
}

/// Build the connectivity grid described by `records` on a grid of `dims`.
///
/// Each record labels its cell with its color. A true `h.x.y` opens `(x, y)` to the right and `(x + 1, y)` to the left;
/// a true `v.x.y` opens `(x, y)` downward and `(x, y + 1)` upward. False links are ignored, as are references outside
/// the grid.
pub fn decode(dims: (Dimension, Dimension), records: &[Record]) -> ConnectivityGrid {
    let mut grid = ConnectivityGrid::empty(dims);

    for record in records {
        if let VarKey::Color { location, color } = record.color {
            if let Some(cell) = grid.cells.get_mut(location.as_index()) {
                cell.color = Some(color);
            }
        }

        for link in record.links.iter().filter(|lit| lit.is_positive()) {
            let direction = match link.key {
                VarKey::Horizontal { .. } => SquareStep::Right,
                VarKey::Vertical { .. } => SquareStep::Down,
                VarKey::Color { .. } => continue,
            };
            let Some((near, far)) = link.key.link() else {
                continue;
            };
            grid.open(near, direction);
            grid.open(far, direction.invert());
        }
    }

    grid
}

impl ConnectivityGrid {
    /// A grid of `dims` with no colors and no links.
    pub fn empty(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), LinkedCell::default),
        }
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The cell at `location`, or `None` off the grid.
    pub fn get(&self, location: Location) -> Option<&LinkedCell> {
        self.cells.get(location.as_index())
    }

    fn open(&mut self, location: Location, direction: SquareStep) {
        if let Some(cell) = self.cells.get_mut(location.as_index()) {
            cell.open(direction);
        }
    }

    /// Every cell with its location, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Location, &LinkedCell)> + '_ {
        self.cells.indexed_iter().map(|(index, cell)| (Location::from(index), cell))
    }

    /// Every line segment between two cells, taken from the forward exits of each cell.
    pub fn links(&self) -> HashSet<UnorderedPair<Location>> {
        self.cells()
            .flat_map(|(location, cell)| SquareStep::FORWARD_VARIANTS.iter()
                .filter(move |dir| cell.has_exit(**dir))
                .map(move |dir| UnorderedPair(location, dir.attempt_from(location))))
            .collect()
    }

    /// The grid as an undirected graph with a node per cell and an edge per link.
    pub fn to_graph(&self) -> UnGraphMap<Location, ()> {
        let links = self.links();
        let mut graph = UnGraphMap::with_capacity(self.cells.len(), links.len());

        for (location, _) in self.cells() {
            graph.add_node(location);
        }
        for UnorderedPair(a, b) in links {
            graph.add_edge(a, b, ());
        }

        graph
    }

    /// Follow the line starting at `from` until it ends or closes on itself, returning every location visited.
    ///
    /// Starting from an endpoint on a solved grid this yields the path to its partner endpoint.
    pub fn trace(&self, from: Location) -> Vec<Location> {
        let mut path = vec![from];
        let mut previous = None;
        let mut current = from;

        while path.len() <= self.cells.len() {
            let Some(cell) = self.get(current) else {
                break;
            };
            let next = cell.exits()
                .map(|dir| dir.attempt_from(current))
                .find(|neighbor| Some(*neighbor) != previous);

            match next {
                Some(next) if next != from => {
                    path.push(next);
                    previous = Some(current);
                    current = next;
                }
                _ => break,
            }
        }

        path
    }
}

/// Endpoints print as upper case letters, the rest of a line in lower case, uncolored cells as `.`.
impl Display for ConnectivityGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                let display = match cell.color {
                    Some(color @ 1..=26) => {
                        let letter = char::from(b'a' + (color - 1) as u8);
                        if cell.is_terminus() { letter.to_ascii_uppercase() } else { letter }
                    }
                    Some(_) => '#',
                    None => '.',
                };
                write!(f, "{}", display)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use itertools::Itertools;
    use unordered_pair::UnorderedPair;

    use crate::location::Location;
    use crate::shape::SquareStep;
    use crate::solver::Record;

    use super::decode;

    fn records(lines: &[&str]) -> Vec<Record> {
        lines.iter().map(|line| line.parse().unwrap()).collect_vec()
    }

    #[test]
    fn decode_sets_both_ends() {
        // Aa
        // bA
        let grid = decode((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()), &records(&[
            "c.0.0.1 -v.0.0 h.0.0",
            "c.0.1.2 -h.0.1",
            "c.1.0.1 v.1.0",
            "c.1.1.1",
        ]));

        let origin = grid.get(Location(0, 0)).unwrap();
        assert_eq!(origin.flags(), [true, false, false, false]);
        assert_eq!(grid.get(Location(1, 0)).unwrap().flags(), [false, true, true, false]);
        assert_eq!(grid.get(Location(1, 1)).unwrap().flags(), [false, false, false, true]);
        assert_eq!(grid.get(Location(0, 1)).unwrap().degree(), 0);
        assert_eq!(grid.get(Location(0, 1)).unwrap().color, Some(2));

        assert_eq!(grid.links(), [
            UnorderedPair(Location(0, 0), Location(1, 0)),
            UnorderedPair(Location(1, 0), Location(1, 1)),
        ].into_iter().collect());
        assert_eq!(grid.trace(Location(0, 0)), vec![Location(0, 0), Location(1, 0), Location(1, 1)]);
        assert!(grid.get(Location(1, 0)).unwrap().has_exit(SquareStep::Left));
    }

    #[test]
    fn display_marks_termini() {
        let grid = decode((NonZero::new(3).unwrap(), NonZero::new(1).unwrap()), &records(&[
            "c.0.0.1 h.0.0",
            "c.1.0.1 h.1.0",
            "c.2.0.1",
        ]));
        assert_eq!(grid.to_string(), "AaA\n");
    }

    #[test]
    fn trace_stops_on_loop() {
        // a 2x2 ring with no endpoint
        let grid = decode((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()), &records(&[
            "c.0.0.1 v.0.0 h.0.0",
            "c.0.1.1 h.0.1",
            "c.1.0.1 v.1.0",
            "c.1.1.1",
        ]));
        assert_eq!(grid.trace(Location(0, 0)).len(), 4);
        assert_eq!(grid.to_graph().edge_count(), 4);
    }
}
