use std::num::NonZero;

use itertools::Itertools;
use linkcnf::{check_solution, encode, solve_clauses, Location, Puzzle, SolverFailure, VarKey, VarisatBackend};
use proptest::prelude::{Just, Strategy};
use proptest::{prop_assert, prop_assert_eq, proptest};

const MAX_SIDE: usize = 4;
// the edge/color coupling costs 2^colors clauses per link
const MAX_COLORS: usize = 3;

fn puzzle_strategy() -> impl Strategy<Value = Puzzle> {
    (2..=MAX_SIDE, 2..=MAX_SIDE)
        .prop_flat_map(|(width, height)| {
            let colors = 1..=MAX_COLORS.min(width * height / 2);
            (Just((width, height)), colors)
        })
        .prop_flat_map(|((width, height), colors)| {
            let cells = (0..width).cartesian_product(0..height)
                .map(|(x, y)| Location(x, y))
                .collect_vec();
            (Just((width, height)), proptest::sample::subsequence(cells, 2 * colors).prop_shuffle())
        })
        .prop_map(|((width, height), endpoints)| {
            Puzzle::new((NonZero::new(width).unwrap(), NonZero::new(height).unwrap()), endpoints)
                .expect("endpoints are distinct, in bounds and few enough")
        })
}

proptest! {
    #[test]
    fn solutions_satisfy_invariants(puzzle in puzzle_strategy()) {
        match puzzle.solve() {
            Ok(solved) => {
                prop_assert_eq!(check_solution(&puzzle, &solved), Ok(()));
                for (location, cell) in solved.cells() {
                    let expected = if puzzle.terminus_at(location).is_some() { 1 } else { 2 };
                    prop_assert_eq!(cell.degree(), expected);
                }
            }
            Err(failure) => prop_assert_eq!(failure, SolverFailure::Unsatisfiable),
        }
    }

    #[test]
    fn every_cell_has_one_color(puzzle in puzzle_strategy()) {
        if let Ok(records) = solve_clauses(&encode(&puzzle), VarisatBackend::default()) {
            prop_assert_eq!(records.len(), puzzle.width() * puzzle.height());

            let colored = records.iter().map(|record| record.color.location()).sorted().collect_vec();
            let cells = (0..puzzle.width()).cartesian_product(0..puzzle.height())
                .map(|(x, y)| Location(x, y))
                .collect_vec();
            prop_assert_eq!(colored, cells);
        }
    }

    #[test]
    fn encoding_is_deterministic(puzzle in puzzle_strategy()) {
        prop_assert_eq!(encode(&puzzle), encode(&puzzle));
    }

    #[test]
    fn endpoints_are_fixed_to_their_color(puzzle in puzzle_strategy()) {
        let clauses = encode(&puzzle);
        for (color, (a, b)) in puzzle.termini() {
            for location in [a, b] {
                let unit = VarKey::Color { location, color }.positive();
                prop_assert!(clauses.iter().any(|clause| clause.literals() == [unit]));
            }
        }
    }
}
