use log::warn;
use varisat::{ExtendFormula, Lit, Solver, Var};

/// What a [`Backend`] reports after a solve attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackendStatus {
    /// A model was found and [`Backend::value`] may be queried.
    Satisfiable,
    /// The clauses are contradictory.
    Unsatisfiable,
    /// The backend gave up or failed without deciding either way.
    Unknown,
}

/// The capability required of a SAT solver: fresh variables, disjunctive clauses, and a single solve.
///
/// Implementations need not deduplicate anything; [`solve_clauses`](crate::solver::solve_clauses) calls
/// [`new_var`](Self::new_var) exactly once per distinct variable.
pub trait Backend {
    /// Backend handle for one Boolean variable.
    type Var: Copy;

    /// Create a fresh variable.
    fn new_var(&mut self) -> Self::Var;
    /// Require at least one of `literals` to hold, where `(var, false)` is the negation of `var`.
    fn add_clause(&mut self, literals: &[(Self::Var, bool)]);
    /// Search for a model of every clause added so far. No time limit applies.
    fn solve(&mut self) -> BackendStatus;
    /// The value of `var` in the model, available after [`BackendStatus::Satisfiable`].
    fn value(&self, var: Self::Var) -> Option<bool>;
}

/// A [`Backend`] driving the [`varisat`] CDCL solver.
pub struct VarisatBackend<'a> {
    solver: Solver<'a>,
    // indexed by Var::index()
    model: Option<Vec<bool>>,
}

impl Default for VarisatBackend<'_> {
    fn default() -> Self {
        Self {
            solver: Solver::new(),
            model: None,
        }
    }
}

impl Backend for VarisatBackend<'_> {
    type Var = Var;

    fn new_var(&mut self) -> Var {
        self.solver.new_var()
    }

    fn add_clause(&mut self, literals: &[(Var, bool)]) {
        let lits = literals.iter()
            .map(|(var, positive)| var.lit(*positive))
            .collect::<Vec<Lit>>();
        self.solver.add_clause(&lits);
    }

    fn solve(&mut self) -> BackendStatus {
        self.model = None;

        match self.solver.solve() {
            Ok(true) => {
                let Some(lits) = self.solver.model() else {
                    warn!("varisat reported a model but returned none");
                    return BackendStatus::Unknown;
                };

                let mut values = vec![false; lits.iter().map(|lit| lit.index() + 1).max().unwrap_or(0)];
                for lit in lits {
                    values[lit.index()] = lit.is_positive();
                }
                self.model = Some(values);

                BackendStatus::Satisfiable
            }
            Ok(false) => BackendStatus::Unsatisfiable,
            Err(err) => {
                warn!("varisat failed: {err:?}");
                BackendStatus::Unknown
            }
        }
    }

    fn value(&self, var: Var) -> Option<bool> {
        self.model.as_ref()?.get(var.index()).copied()
    }
}
