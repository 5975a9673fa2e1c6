use std::fmt::Display;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Record total (i.e. monotonically increasing) number of:
    /// - solves: number of solve attempts.
    /// - decisions: number of DPLL branching decisions made.
    /// - propagations: number of literals forced by unit propagation.
    /// - conflicts: number of DPLL branches closed by an empty clause.
    /// - pure_literals: number of literals assigned by pure-literal elimination.
    /// - eliminations: number of variables eliminated by DP.
    /// - resolvents: number of non-tautological resolvents produced (DP, resolution).
    /// - iterations: number of resolution saturation rounds.
    pub solves: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
    pub pure_literals: u64,
    pub eliminations: u64,
    pub resolvents: u64,
    pub iterations: u64,

    /// Record peak values of:
    /// - max_clauses: largest clause set held at once.
    pub max_clauses: u64,
}

impl RuntimeStats {
    /// Updates the peak clause count.
    pub fn record_clauses(&mut self, n: usize) {
        self.max_clauses = self.max_clauses.max(n as u64);
    }
}

impl Display for RuntimeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "decisions: {}, propagations: {}, conflicts: {}, pure: {}, eliminations: {}, resolvents: {}, iterations: {}, max clauses: {}",
            self.decisions,
            self.propagations,
            self.conflicts,
            self.pure_literals,
            self.eliminations,
            self.resolvents,
            self.iterations,
            self.max_clauses
        )
    }
}
