use itertools::Itertools;

use crate::var::{Clause, Literal};

/// Exactly one of `lits` is true: pairwise exclusion plus one covering clause.
///
/// For a single literal this is just the unit clause.
pub(crate) fn exactly_one(lits: &[Literal]) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(lits.len() * lits.len().saturating_sub(1) / 2 + 1);

    // no two are true; (!A + !B) * (!A + !C) * ...
    clauses.extend(lits.iter()
        .tuple_combinations()
        .map(|(a, b)| Clause(vec![!*a, !*b]))
    );
    // at least one is true; A + B + C + ...
    clauses.push(Clause(lits.to_vec()));

    clauses
}

/// Exactly two of `lits` are true, using a fixed template per size.
///
/// Sizes 2 through 4 are the interesting ones; a single literal cannot hold two truths and yields a contradiction.
pub(crate) fn exactly_two(lits: &[Literal]) -> Vec<Clause> {
    match lits {
        // both forced
        [a, b] => vec![Clause(vec![*a]), Clause(vec![*b])],
        // any pair has a true member, and not all three
        [a, b, c] => {
            let mut clauses = lits.iter()
                .tuple_combinations()
                .map(|(p, q)| Clause(vec![*p, *q]))
                .collect_vec();
            clauses.push(Clause(vec![!*a, !*b, !*c]));
            clauses
        }
        // every triple has a true member (so at most one false) and a false member (so at most two true)
        [_, _, _, _] => lits.iter()
            .tuple_combinations()
            .flat_map(|(p, q, r)| [
                Clause(vec![*p, *q, *r]),
                Clause(vec![!*p, !*q, !*r]),
            ])
            .collect_vec(),
        [a] => vec![Clause(vec![*a]), Clause(vec![!*a])],
        _ => unreachable!("a grid cell has between one and four neighbours"),
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::var::{Clause, Literal, VarKey};

    use super::{exactly_one, exactly_two};

    fn lits(n: usize) -> Vec<Literal> {
        (0..n).map(|i| VarKey::horizontal(i, 0).positive()).collect_vec()
    }

    fn satisfied(clauses: &[Clause], lits: &[Literal], assignment: &[bool]) -> bool {
        clauses.iter().all(|clause| clause.literals().iter().any(|lit| {
            let i = lits.iter().position(|l| l.key == lit.key).unwrap();
            assignment[i] == lit.is_positive()
        }))
    }

    fn models(n: usize, clauses: &[Clause]) -> Vec<usize> {
        let vars = lits(n);
        (0..1usize << n)
            .filter(|bits| {
                let assignment = (0..n).map(|i| bits & (1 << i) != 0).collect_vec();
                satisfied(clauses, &vars, &assignment)
            })
            .map(|bits| bits.count_ones() as usize)
            .collect_vec()
    }

    #[test]
    fn exactly_one_admits_single_truths() {
        for n in 1..=4 {
            let found = models(n, &exactly_one(&lits(n)));
            assert_eq!(found.len(), n);
            assert!(found.iter().all(|count| *count == 1));
        }
    }

    #[test]
    fn exactly_two_admits_pairs() {
        for n in 2..=4 {
            let found = models(n, &exactly_two(&lits(n)));
            assert_eq!(found.len(), n * (n - 1) / 2, "size {n}");
            assert!(found.iter().all(|count| *count == 2));
        }
    }

    #[test]
    fn exactly_two_of_one_is_contradiction() {
        assert!(models(1, &exactly_two(&lits(1))).is_empty());
    }

    #[test]
    fn template_clause_counts() {
        // 1 + 1, C(3,2) + 1, C(4,2) + 1
        assert_eq!(exactly_one(&lits(2)).len(), 2);
        assert_eq!(exactly_one(&lits(3)).len(), 4);
        assert_eq!(exactly_one(&lits(4)).len(), 7);
        // 2 units, C(3,2) + 1, 2 * C(4,3)
        assert_eq!(exactly_two(&lits(2)).len(), 2);
        assert_eq!(exactly_two(&lits(3)).len(), 4);
        assert_eq!(exactly_two(&lits(4)).len(), 8);
    }
}
