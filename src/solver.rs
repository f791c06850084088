use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, info};
use thiserror::Error;

use crate::backend::{Backend, BackendStatus};
use crate::location::Location;
use crate::var::{Clause, Literal, ParseError, VarKey};

/// Reasons a solve may fail to produce a solution.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum SolverFailure {
    /// The SAT solver proved the clauses inconsistent, i.e. the puzzle as stated is unsolvable.
    #[error("puzzle is unsatisfiable")]
    Unsatisfiable,
    /// The SAT solver neither found a model nor proved there is none.
    #[error("solver could not decide the puzzle")]
    Indeterminate,
}

/// One satisfied color variable and the links leaving its cell to the right and downward.
///
/// `links` holds the signed value of `v.x.y` and then `h.x.y`, each only if that variable occurs in the clauses.
/// The text form is the color token followed by the link tokens, e.g. `c.0.0.1 -v.0.0 h.0.0`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// Always a [`VarKey::Color`].
    pub color: VarKey,
    /// Signed `v.x.y` and `h.x.y` for the same cell.
    pub links: Vec<Literal>,
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)?;
        for link in &self.links {
            write!(f, " {}", link)?;
        }
        Ok(())
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Clause(mut literals) = s.parse::<Clause>()?;
        let color = literals.remove(0);

        match color {
            Literal { key: key @ VarKey::Color { .. }, positive: true } => Ok(Self { color: key, links: literals }),
            _ => Err(ParseError::NotAColor(color.to_string())),
        }
    }
}

/// Solver-side bookkeeping: each distinct [`VarKey`] is bound to exactly one backend variable.
struct Model<B: Backend> {
    backend: B,
    vars: HashMap<VarKey, B::Var>,
}

impl<B: Backend> Model<B> {
    fn intern(&mut self, key: VarKey) -> B::Var {
        let backend = &mut self.backend;
        *self.vars.entry(key).or_insert_with(|| backend.new_var())
    }

    fn add_clause(&mut self, clause: &Clause) {
        let lits = clause.literals().iter()
            .map(|lit| (self.intern(lit.key), lit.positive))
            .collect_vec();
        self.backend.add_clause(&lits);
    }

    /// The signed value of `key`, or `None` if `key` never occurred.
    fn solved_lit(&self, key: VarKey) -> Option<Literal> {
        let var = self.vars.get(&key)?;
        self.backend.value(*var).map(|value| key.lit(value))
    }
}

/// Hand `clauses` to `backend` and read back one [`Record`] per satisfied color variable, sorted by [`VarKey`].
///
/// Returns [`SolverFailure::Unsatisfiable`] if the clauses have no model and [`SolverFailure::Indeterminate`] if the
/// backend could not decide.
pub fn solve_clauses<B: Backend>(clauses: &[Clause], backend: B) -> Result<Vec<Record>, SolverFailure> {
    let mut model = Model { backend, vars: HashMap::new() };
    clauses.iter().for_each(|clause| model.add_clause(clause));
    debug!("interned {} variables from {} clauses", model.vars.len(), clauses.len());

    let status = model.backend.solve();
    info!("solution is {:?}", status);
    match status {
        BackendStatus::Satisfiable => {}
        BackendStatus::Unsatisfiable => return Err(SolverFailure::Unsatisfiable),
        BackendStatus::Unknown => return Err(SolverFailure::Indeterminate),
    }

    let colors = model.vars.keys()
        .filter(|key| matches!(key, VarKey::Color { .. }))
        .map(|key| model.solved_lit(*key).ok_or(SolverFailure::Indeterminate))
        .filter_ok(|lit| lit.is_positive())
        .map_ok(|lit| lit.key)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    Ok(colors.into_iter()
        .map(|color| {
            let Location(x, y) = color.location();
            let links = [VarKey::vertical(x, y), VarKey::horizontal(x, y)].into_iter()
                .filter_map(|key| model.solved_lit(key))
                .collect_vec();
            Record { color, links }
        })
        .collect_vec())
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::backend::{Backend, BackendStatus, VarisatBackend};
    use crate::var::{Clause, VarKey};

    use super::{solve_clauses, Record, SolverFailure};

    fn clauses(lines: &[&str]) -> Vec<Clause> {
        lines.iter().map(|line| line.parse().unwrap()).collect_vec()
    }

    /// Counts variables and replays a fixed status; every variable reads as true.
    #[derive(Default)]
    struct Scripted {
        vars: usize,
        clauses: Vec<Vec<(usize, bool)>>,
        status: Option<BackendStatus>,
    }

    impl Backend for Scripted {
        type Var = usize;

        fn new_var(&mut self) -> usize {
            self.vars += 1;
            self.vars - 1
        }

        fn add_clause(&mut self, literals: &[(usize, bool)]) {
            self.clauses.push(literals.to_vec());
        }

        fn solve(&mut self) -> BackendStatus {
            self.status.unwrap_or(BackendStatus::Satisfiable)
        }

        fn value(&self, var: usize) -> Option<bool> {
            (var < self.vars).then_some(true)
        }
    }

    impl Backend for &mut Scripted {
        type Var = usize;

        fn new_var(&mut self) -> usize {
            (**self).new_var()
        }

        fn add_clause(&mut self, literals: &[(usize, bool)]) {
            (**self).add_clause(literals)
        }

        fn solve(&mut self) -> BackendStatus {
            (**self).solve()
        }

        fn value(&self, var: usize) -> Option<bool> {
            (**self).value(var)
        }
    }

    #[test]
    fn interns_each_key_once() {
        let mut backend = Scripted::default();
        solve_clauses(&clauses(&["h.0.0 c.0.0.1", "-h.0.0 -c.0.0.1", "c.0.0.1 c.1.0.1"]), &mut backend).unwrap();

        assert_eq!(backend.vars, 3);
        assert_eq!(backend.clauses, vec![
            vec![(0, true), (1, true)],
            vec![(0, false), (1, false)],
            vec![(1, true), (2, true)],
        ]);
    }

    #[test]
    fn records_sorted_with_links() {
        let records = solve_clauses(
            &clauses(&["c.1.0.1", "h.0.0", "c.0.0.1", "-v.0.0", "c.0.1.1", "-c.0.0.2"]),
            VarisatBackend::default(),
        ).unwrap();

        assert_eq!(records.iter().map(Record::to_string).collect_vec(), vec![
            "c.0.0.1 -v.0.0 h.0.0",
            "c.0.1.1",
            "c.1.0.1",
        ]);
    }

    #[test]
    fn unsatisfiable() {
        let result = solve_clauses(&clauses(&["c.0.0.1", "-c.0.0.1"]), VarisatBackend::default());
        assert_eq!(result, Err(SolverFailure::Unsatisfiable));
    }

    #[test]
    fn unknown_status_is_indeterminate() {
        let backend = Scripted { status: Some(BackendStatus::Unknown), ..Default::default() };
        assert_eq!(solve_clauses(&clauses(&["c.0.0.1"]), backend), Err(SolverFailure::Indeterminate));
    }

    #[test]
    fn record_text() {
        let record: Record = "c.2.1.3 v.2.1 -h.2.1".parse().unwrap();
        assert_eq!(record.color, VarKey::color(2, 1, 3));
        assert_eq!(record.links, vec![VarKey::vertical(2, 1).positive(), VarKey::horizontal(2, 1).negative()]);
        assert_eq!(record.to_string(), "c.2.1.3 v.2.1 -h.2.1");

        assert!("h.0.0 c.0.0.1".parse::<Record>().is_err());
        assert!("-c.0.0.1".parse::<Record>().is_err());
    }
}
