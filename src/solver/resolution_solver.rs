use fxhash::FxHashSet;
use log::{debug, info, trace, warn};

use super::{
    clause::{resolve, Clause},
    config::{ResolutionConfig, SolverConfig},
    formula::Formula,
    sat_solver::Solver,
    stats::RuntimeStats,
    types::SolveStatus,
};

/// Saturation-based refutation: keep adding resolvents until the empty clause appears (UNSAT) or
/// a round adds nothing new (SAT).
///
/// Resolution is refutation-complete, but saturation can take more rounds than the configured
/// cap allows. Hitting the cap (or the clause limit) gives `Unknown`: the clauses seen so far
/// were consistent, which is weaker evidence than a DP or DPLL verdict.
pub struct ResolutionSolver {
    conf: ResolutionConfig,
    stats: RuntimeStats,
}

impl ResolutionSolver {
    pub fn new(c: SolverConfig) -> Self {
        Self {
            conf: c.resolution,
            stats: RuntimeStats::default(),
        }
    }

    pub fn solve(&mut self, formula: &Formula) -> SolveStatus {
        self.stats.solves += 1;

        // Ordered clause list for pairing, plus a set for membership
        let mut known = FxHashSet::default();
        let mut clauses = Vec::with_capacity(formula.len());
        for c in formula.without_tautologies() {
            if known.insert(c.clone()) {
                clauses.push(c);
            }
        }
        if clauses.is_empty() {
            return SolveStatus::SAT;
        }
        if known.contains(&Clause::empty()) {
            return SolveStatus::UNSAT;
        }

        // clauses[frontier..] were added in the previous round (all of them, initially). Pairs of
        // older clauses were already resolved, so each round only pairs the frontier with
        // everything before it.
        let mut frontier = 0;
        let mut previous = FxHashSet::default();
        for iteration in 1..=self.conf.max_iterations {
            self.stats.iterations += 1;
            self.stats.record_clauses(clauses.len());

            let mut additions = FxHashSet::default();
            let mut added = vec![];
            for j in frontier..clauses.len() {
                for i in 0..j {
                    for r in resolve(&clauses[i], &clauses[j]) {
                        if r.is_empty() {
                            debug!(
                                "Empty resolvent from {} and {} in round {}",
                                clauses[i], clauses[j], iteration
                            );
                            return SolveStatus::UNSAT;
                        }
                        if r.is_tautology() || known.contains(&r) {
                            continue;
                        }
                        if additions.insert(r.clone()) {
                            trace!("Resolvent {}", r);
                            added.push(r);
                        }
                    }
                }
            }

            debug!(
                "Round {}: {} clauses, {} new resolvents",
                iteration,
                clauses.len(),
                added.len()
            );
            if added.is_empty() {
                return SolveStatus::SAT;
            }
            // Same additions as last round: no progress
            if additions == previous {
                return SolveStatus::SAT;
            }

            self.stats.resolvents += added.len() as u64;
            frontier = clauses.len();
            known.extend(added.iter().cloned());
            clauses.extend(added);
            previous = additions;

            if let Some(max) = self.conf.max_clauses {
                if clauses.len() > max {
                    warn!(
                        "Resolution gave up with {} clauses (limit {})",
                        clauses.len(),
                        max
                    );
                    return SolveStatus::Unknown;
                }
            }
        }

        warn!(
            "Resolution hit the iteration cap ({}) without saturating",
            self.conf.max_iterations
        );
        SolveStatus::Unknown
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }
}

impl Default for ResolutionSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver for ResolutionSolver {
    fn name(&self) -> &'static str {
        "Resolution"
    }

    fn solve(&mut self, formula: &Formula) -> SolveStatus {
        ResolutionSolver::solve(self, formula)
    }

    fn stats(&self) -> &RuntimeStats {
        &self.stats
    }
}

/// Decides `formula` by resolution with the default configuration.
///
/// An inconclusive run (iteration cap reached) is reported as satisfiable. Use
/// [`ResolutionSolver`] directly to tell that case apart.
pub fn resolution(formula: &Formula) -> bool {
    let mut solver = ResolutionSolver::default();
    let status = solver.solve(formula);
    info!("Resolution: {} ({})", status, solver.stats());
    match status {
        SolveStatus::Unknown => {
            warn!("Resolution was inconclusive; reporting SAT");
            true
        }
        s => s.is_sat(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::types::Lit;

    fn formula(clauses: &[&[i64]]) -> Formula {
        clauses
            .iter()
            .map(|c| c.iter().map(|i| Lit::try_from(*i).unwrap()).collect::<Clause>())
            .collect()
    }

    fn with_conf(conf: ResolutionConfig) -> ResolutionSolver {
        let mut c = SolverConfig::default();
        c.resolution = conf;
        ResolutionSolver::new(c)
    }

    #[test]
    fn empty_formula_is_sat() {
        assert!(resolution(&Formula::empty()));
    }

    #[test]
    fn empty_clause_is_unsat() {
        assert!(!resolution(&formula(&[&[1], &[]])));
    }

    #[test]
    fn contradicting_units_are_unsat() {
        assert!(!resolution(&formula(&[&[1, 2], &[-1], &[-2]])));
    }

    #[test]
    fn tautology_is_sat() {
        assert!(resolution(&formula(&[&[1, -1]])));
    }

    #[test]
    fn small_sat_instance() {
        assert!(resolution(&formula(&[&[1, 2, 3], &[-1, 2], &[-2, -3], &[1, -3]])));
    }

    #[test]
    fn saturation_stops_when_nothing_is_new() {
        let mut solver = ResolutionSolver::default();
        let status = solver.solve(&formula(&[&[1, 2], &[-1, 3]]));
        assert_eq!(status, SolveStatus::SAT);
        // Round 1 adds {2, 3}, round 2 adds nothing
        assert_eq!(solver.stats().iterations, 2);
        assert_eq!(solver.stats().resolvents, 1);
    }

    #[test]
    fn refutation_needs_two_rounds() {
        let f = formula(&[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]]);
        let mut solver = ResolutionSolver::default();
        assert_eq!(solver.solve(&f), SolveStatus::UNSAT);
        assert_eq!(solver.stats().iterations, 2);
    }

    #[test]
    fn iteration_cap_is_inconclusive() {
        let f = formula(&[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]]);
        let mut solver = with_conf(ResolutionConfig {
            max_iterations: 1,
            max_clauses: None,
        });
        assert_eq!(solver.solve(&f), SolveStatus::Unknown);
    }

    #[test]
    fn clause_limit_is_inconclusive() {
        let f = formula(&[&[1, 2], &[-1, 3]]);
        let mut solver = with_conf(ResolutionConfig {
            max_iterations: 10,
            max_clauses: Some(2),
        });
        assert_eq!(solver.solve(&f), SolveStatus::Unknown);
    }

    #[test]
    fn duplicate_clauses_are_merged() {
        let mut solver = ResolutionSolver::default();
        let status = solver.solve(&formula(&[&[1, 2], &[2, 1], &[1, 2, 2]]));
        assert_eq!(status, SolveStatus::SAT);
        assert_eq!(solver.stats().max_clauses, 1);
    }
}
