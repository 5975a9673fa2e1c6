use fxhash::{FxHashMap, FxHashSet};
use log::{debug, info, trace, warn};

use super::{
    clause::{resolve_on, Clause},
    config::{DPConfig, SolverConfig},
    formula::Formula,
    sat_solver::Solver,
    stats::RuntimeStats,
    types::{Lit, SolveStatus, Var},
};

/// Davis-Putnam: eliminate variables one at a time by resolving every clause containing `v`
/// against every clause containing `-v`, until no variable is left or the empty clause shows up.
pub struct DPSolver {
    conf: DPConfig,
    stats: RuntimeStats,
}

impl DPSolver {
    pub fn new(c: SolverConfig) -> Self {
        Self {
            conf: c.dp,
            stats: RuntimeStats::default(),
        }
    }

    pub fn solve(&mut self, formula: &Formula) -> SolveStatus {
        self.stats.solves += 1;

        // Clause set semantics bound the redundant growth of resolvents
        let mut clauses = formula
            .without_tautologies()
            .into_iter()
            .collect::<FxHashSet<_>>();
        if clauses.contains(&Clause::empty()) {
            return SolveStatus::UNSAT;
        }

        loop {
            self.stats.record_clauses(clauses.len());
            if clauses.is_empty() {
                return SolveStatus::SAT;
            }
            if let Some(max) = self.conf.max_clauses {
                if clauses.len() > max {
                    warn!("DP gave up with {} clauses (limit {})", clauses.len(), max);
                    return SolveStatus::Unknown;
                }
            }

            let v = Self::choose_variable(&clauses);
            let (pos, neg): (Vec<Clause>, Vec<Clause>) = {
                let mentioning = clauses
                    .iter()
                    .filter(|c| c.contains(Lit::pos(v)) || c.contains(Lit::neg(v)));
                mentioning.cloned().partition(|c| c.contains(Lit::pos(v)))
            };
            clauses.retain(|c| !c.contains(Lit::pos(v)) && !c.contains(Lit::neg(v)));
            self.stats.eliminations += 1;

            // Pure variable: its clauses can all be satisfied at once, so just drop them.
            if pos.is_empty() || neg.is_empty() {
                debug!(
                    "Eliminating pure variable {} ({} clauses dropped)",
                    v,
                    pos.len() + neg.len()
                );
                continue;
            }

            debug!(
                "Eliminating variable {} ({} x {} resolvents)",
                v,
                pos.len(),
                neg.len()
            );
            for p in &pos {
                for n in &neg {
                    let r = resolve_on(p, n, Lit::pos(v));
                    if r.is_empty() {
                        debug!("Empty resolvent from {} and {}", p, n);
                        return SolveStatus::UNSAT;
                    }
                    if r.is_tautology() {
                        continue;
                    }
                    trace!("Resolvent {}", r);
                    self.stats.resolvents += 1;
                    clauses.insert(r);
                }
            }
        }
    }

    /// Variable with the fewest clauses mentioning it; ties go to the smallest variable.
    fn choose_variable(clauses: &FxHashSet<Clause>) -> Var {
        let mut counts: FxHashMap<Var, usize> = FxHashMap::default();
        for c in clauses {
            for l in c {
                *counts.entry(l.var()).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .min_by_key(|(v, n)| (*n, *v))
            .map(|(v, _)| v)
            // Only called on a non-empty set without empty clauses
            .unwrap_or_default()
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }
}

impl Default for DPSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver for DPSolver {
    fn name(&self) -> &'static str {
        "DP"
    }

    fn solve(&mut self, formula: &Formula) -> SolveStatus {
        DPSolver::solve(self, formula)
    }

    fn stats(&self) -> &RuntimeStats {
        &self.stats
    }
}

/// Decides `formula` by variable elimination with the default configuration.
pub fn dp(formula: &Formula) -> bool {
    let mut solver = DPSolver::default();
    let status = solver.solve(formula);
    info!("DP: {} ({})", status, solver.stats());
    status.is_sat()
}
