use std::fmt::Debug;

use crate::solver::{
    clause::Clause,
    error::{Result, SolverError},
    formula::Formula,
    types::Lit,
};

/// A formula in raw signed-integer form, as handed over by callers that build instances by hand
/// or by another tool. Nothing is validated until it is turned into a [`Formula`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SATInstance {
    pub n_vars: usize,
    pub n_clauses: usize,
    pub clauses: Vec<Vec<Literal>>,
}

pub type Literal = i64;

impl SATInstance {
    pub fn new(clauses: Vec<Vec<Literal>>) -> Self {
        // Highest variable index, as in a DIMACS header
        let n_vars = clauses
            .iter()
            .flatten()
            .map(|l| l.unsigned_abs())
            .max()
            .unwrap_or(0);
        Self {
            n_vars: n_vars as usize,
            n_clauses: clauses.len(),
            clauses,
        }
    }

    /// Validates every literal and builds the formula. Fails on the first literal equal to 0 or
    /// too large to name a variable.
    pub fn to_formula(&self) -> Result<Formula> {
        let mut formula = Formula::empty();
        for (ci, c) in self.clauses.iter().enumerate() {
            let lits = c
                .iter()
                .enumerate()
                .map(|(li, l)| match Lit::try_from(*l) {
                    Err(SolverError::ZeroLiteral { .. }) => Err(SolverError::ZeroLiteral {
                        clause: ci,
                        position: li,
                    }),
                    other => other,
                })
                .collect::<Result<Vec<_>>>()?;
            formula.push(Clause::new(&lits));
        }
        Ok(formula)
    }
}

impl TryFrom<&SATInstance> for Formula {
    type Error = SolverError;

    fn try_from(instance: &SATInstance) -> Result<Formula> {
        instance.to_formula()
    }
}

impl From<&Formula> for SATInstance {
    fn from(formula: &Formula) -> Self {
        SATInstance::new(
            formula
                .iter()
                .map(|c| c.iter().map(Lit::to_i64).collect())
                .collect(),
        )
    }
}

impl Debug for SATInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "n_vars: {}\tn_clauses: {}", self.n_vars, self.n_clauses)?;
        for c in &self.clauses {
            write!(f, "Clause:")?;
            for l in c {
                write!(f, " {l}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
