use std::fmt::Display;

use fxhash::FxHashSet;

use super::{
    assignment::Assignment,
    clause::Clause,
    types::{Lit, Var},
};

/// A CNF formula: an ordered list of clauses. Order only matters for heuristic tie-breaking.
/// Formulas are treated as values; every simplification step builds a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// The formula with no clauses (trivially satisfiable).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn push(&mut self, c: Clause) {
        self.clauses.push(c);
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Every variable mentioned in the formula, in ascending order.
    pub fn vars(&self) -> Vec<Var> {
        let mut vars = self
            .clauses
            .iter()
            .flat_map(|c| c.iter().map(Lit::var))
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        vars.sort_unstable();
        vars
    }

    /// Drops every clause containing a literal and its negation. All solvers run this first, so
    /// they treat tautologies the same way.
    pub fn without_tautologies(&self) -> Formula {
        self.clauses
            .iter()
            .filter(|c| !c.is_tautology())
            .cloned()
            .collect()
    }

    /// Removes every clause satisfied by `assignment`, and from the rest every literal the
    /// assignment makes false. Clauses the assignment doesn't touch are shared, not copied.
    pub fn simplify(&self, assignment: &Assignment) -> Formula {
        let mut simplified: Vec<Clause> = Vec::with_capacity(self.clauses.len());
        for c in &self.clauses {
            if c.iter().any(|l| assignment.is_true(*l)) {
                continue;
            }
            if c.iter().any(|l| assignment.is_false(*l)) {
                simplified.push(c.iter().copied().filter(|l| !assignment.is_false(*l)).collect());
            } else {
                simplified.push(c.clone());
            }
        }
        Formula::new(simplified)
    }

    /// Whether every clause has at least one literal in `assignment`.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|c| c.iter().any(|l| assignment.is_true(*l)))
    }
}

/// See [`Formula::simplify`].
pub fn simplify(formula: &Formula, assignment: &Assignment) -> Formula {
    formula.simplify(assignment)
}

/// Checks that every clause of `formula` has at least one literal true under `assignment`.
pub fn verify(formula: &Formula, assignment: &Assignment) -> bool {
    formula.is_satisfied_by(assignment)
}

impl FromIterator<Clause> for Formula {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Formula::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Formula {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clause_str = self
            .clauses
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}]", clause_str)
    }
}
