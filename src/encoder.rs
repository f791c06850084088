use std::collections::HashSet;

use itertools::Itertools;

use crate::location::Location;
use crate::logic::{exactly_one, exactly_two};
use crate::puzzle::Puzzle;
use crate::var::{Clause, Literal, VarKey};

/// Express `puzzle` as an ordered list of CNF clauses.
///
/// # Variables
/// - `h.x.y` holds iff `(x, y)` is linked to `(x + 1, y)`,
/// - `v.x.y` holds iff `(x, y)` is linked to `(x, y + 1)`,
/// - `c.x.y.k` holds iff `(x, y)` carries color `k`.
///
/// # Constraints
/// For every cell, visited column by column:
/// 1. An endpoint has exactly one incident link; any other cell has exactly two.
/// 2. The cell carries exactly one color.
/// 3. A link to the right or below forces both cells to carry the same color.
///
/// Then every endpoint is fixed to its own color.
///
/// Constraint 3 is written without auxiliary variables: for a link `e` it is the conjunction over every choice of one
/// literal from each pair `(c.x.y.k, c.x'.y'.k)` of `!e + choice`, which is `2^k` clauses per link for `k` colors.
/// The encoding is therefore only practical for puzzles with few colors.
///
/// Deterministic; calling this twice on the same puzzle yields the same list.
pub fn encode(puzzle: &Puzzle) -> Vec<Clause> {
    let termini: HashSet<Location> = puzzle.endpoints().iter().copied().collect();
    let mut clauses = Vec::new();

    for x in 0..puzzle.width() {
        for y in 0..puzzle.height() {
            let location = Location(x, y);

            let links = incident_links(puzzle, location)
                .into_iter()
                .map(VarKey::positive)
                .collect_vec();
            if termini.contains(&location) {
                clauses.extend(exactly_one(&links));
            } else {
                clauses.extend(exactly_two(&links));
            }

            let colors = color_vars(puzzle, location)
                .map(VarKey::positive)
                .collect_vec();
            clauses.extend(exactly_one(&colors));

            if x + 1 < puzzle.width() {
                clauses.extend(same_color_across(puzzle, VarKey::horizontal(x, y)));
            }
            if y + 1 < puzzle.height() {
                clauses.extend(same_color_across(puzzle, VarKey::vertical(x, y)));
            }
        }
    }

    for (color, (a, b)) in puzzle.termini() {
        for location in [a, b] {
            clauses.push(Clause(vec![VarKey::Color { location, color }.positive()]));
        }
    }

    clauses
}

/// The link variables touching `location`: right, down, left, up, skipping those that would leave the grid.
pub(crate) fn incident_links(puzzle: &Puzzle, location: Location) -> Vec<VarKey> {
    let Location(x, y) = location;
    let mut links = Vec::with_capacity(4);

    if x + 1 < puzzle.width() {
        links.push(VarKey::horizontal(x, y));
    }
    if y + 1 < puzzle.height() {
        links.push(VarKey::vertical(x, y));
    }
    if x > 0 {
        links.push(VarKey::horizontal(x - 1, y));
    }
    if y > 0 {
        links.push(VarKey::vertical(x, y - 1));
    }

    links
}

fn color_vars(puzzle: &Puzzle, location: Location) -> impl Iterator<Item = VarKey> {
    (1..=puzzle.color_count()).map(move |color| VarKey::Color { location, color })
}

/// `link => (both ends have color 1) + (both ends have color 2) + ...`, distributed into CNF.
///
/// Distributing the disjunction of conjunctions yields one clause per choice of end for each color.
fn same_color_across(puzzle: &Puzzle, link: VarKey) -> Vec<Clause> {
    let Some((near, far)) = link.link() else {
        return Vec::new();
    };

    color_vars(puzzle, near)
        .zip(color_vars(puzzle, far))
        .map(|(a, b)| [a.positive(), b.positive()])
        .multi_cartesian_product()
        .map(|choice| {
            let mut terms: Vec<Literal> = Vec::with_capacity(choice.len() + 1);
            terms.push(link.negative());
            terms.extend(choice);
            Clause(terms)
        })
        .collect_vec()
}
