use std::cmp::Reverse;

use fxhash::{FxHashMap, FxHashSet};
use log::{debug, info, trace, warn};

use super::{
    assignment::Assignment,
    config::{DPLLConfig, SolverConfig},
    formula::Formula,
    sat_solver::Solver,
    stats::RuntimeStats,
    types::{Lit, SolveStatus, Var, F64},
};

/// One pending node of the search tree: the formula and assignment it starts from, plus the
/// decision literal to apply first (None for the root). Every frame owns its snapshots, so
/// nothing a failed branch propagated leaks into its sibling.
struct Frame {
    formula: Formula,
    assignment: Assignment,
    decision: Option<Lit>,
}

/// DPLL backtracking search with unit propagation, pure-literal elimination and a
/// clause-length weighted branching heuristic. The search tree is walked with an explicit stack
/// rather than recursion, so depth is only bounded by memory.
pub struct DPLLSolver {
    conf: DPLLConfig,
    stats: RuntimeStats,
    /// Satisfying assignment found by the last solve (empty otherwise).
    model: Assignment,
}

impl DPLLSolver {
    pub fn new(c: SolverConfig) -> Self {
        Self {
            conf: c.dpll,
            stats: RuntimeStats::default(),
            model: Assignment::new(),
        }
    }

    pub fn solve(&mut self, input: &Formula) -> SolveStatus {
        self.stats.solves += 1;
        self.model = Assignment::new();
        let mut n_decisions = 0;

        let mut stack = vec![Frame {
            formula: input.without_tautologies(),
            assignment: Assignment::new(),
            decision: None,
        }];

        while let Some(Frame {
            mut formula,
            mut assignment,
            decision,
        }) = stack.pop()
        {
            if let Some(l) = decision {
                debug!("Branching on {} (depth {})", l, stack.len());
                if !assignment.insert(l) {
                    self.stats.conflicts += 1;
                    continue;
                }
                formula = formula.simplify(&Assignment::from_iter([l]));
            }

            // A conflict closes this branch; the loop resumes with its sibling
            let Some(propagated) = self.propagate(formula, &mut assignment) else {
                trace!("Conflict under {}", assignment);
                self.stats.conflicts += 1;
                continue;
            };
            formula = propagated;
            if self.conf.pure_literals {
                formula = self.eliminate_pure_literals(formula, &mut assignment);
            }

            if formula.is_empty() {
                self.model = Self::complete_model(input.vars(), assignment);
                return SolveStatus::SAT;
            }
            if formula.has_empty_clause() {
                self.stats.conflicts += 1;
                continue;
            }

            if let Some(max) = self.conf.max_decisions {
                if n_decisions >= max {
                    warn!("DPLL gave up after {} decisions", n_decisions);
                    return SolveStatus::Unknown;
                }
            }
            let Some(l) = Self::choose_literal(&formula) else {
                continue;
            };
            n_decisions += 1;
            self.stats.decisions += 1;

            // Sibling goes below, so the branch on l is explored first
            stack.push(Frame {
                formula: formula.clone(),
                assignment: assignment.clone(),
                decision: Some(!l),
            });
            stack.push(Frame {
                formula,
                assignment,
                decision: Some(l),
            });
        }

        SolveStatus::UNSAT
    }

    /// Unit propagation. Repeatedly assigns the literals of all unit clauses and simplifies,
    /// until no unit clause is left. Returns None on conflict: an empty clause, or two unit
    /// clauses `{v}` and `{-v}` in the same batch.
    fn propagate(&mut self, mut formula: Formula, assignment: &mut Assignment) -> Option<Formula> {
        loop {
            if formula.has_empty_clause() {
                return None;
            }

            let mut units = Assignment::new();
            for c in formula.iter().filter(|c| c.is_unit()) {
                let l = c[0];
                if !units.insert(l) || !assignment.insert(l) {
                    trace!("Complementary units on variable {}", l.var());
                    return None;
                }
            }
            if units.is_empty() {
                return Some(formula);
            }

            self.stats.propagations += units.len() as u64;
            trace!("Propagating {}", units);
            formula = formula.simplify(&units);
        }
    }

    /// Assigns every literal whose negation never occurs, dropping the clauses it satisfies.
    fn eliminate_pure_literals(&mut self, formula: Formula, assignment: &mut Assignment) -> Formula {
        let lits = formula
            .iter()
            .flat_map(|c| c.iter().copied())
            .collect::<FxHashSet<_>>();
        let pure = lits
            .iter()
            .copied()
            .filter(|l| !lits.contains(&!*l))
            .collect::<Assignment>();
        if pure.is_empty() {
            return formula;
        }

        for l in pure.iter() {
            assignment.insert(*l);
        }
        self.stats.pure_literals += pure.len() as u64;
        trace!("Pure literals {}", pure);
        // No pure literal is falsified anywhere, so this only drops satisfied clauses
        formula.simplify(&pure)
    }

    /// Scores each literal by the sum of `2^-|c|` over the clauses `c` containing it and picks
    /// the best; ties go to the smallest literal.
    fn choose_literal(formula: &Formula) -> Option<Lit> {
        let mut scores: FxHashMap<Lit, f64> = FxHashMap::default();
        for c in formula {
            let w = 0.5_f64.powi(c.len() as i32);
            for l in c {
                *scores.entry(*l).or_insert(0.) += w;
            }
        }
        scores
            .into_iter()
            .filter_map(|(l, s)| F64::new(s).ok().map(|s| (s, Reverse(l))))
            .max()
            .map(|(_, Reverse(l))| l)
    }

    /// Extends the search result to every variable of the input. Variables the search never had
    /// to fix (including ones that only occurred in tautologies) are set positive.
    fn complete_model(vars: Vec<Var>, mut assignment: Assignment) -> Assignment {
        for v in vars {
            if !assignment.is_assigned(v) {
                assignment.insert(Lit::pos(v));
            }
        }
        assignment
    }

    /// Satisfying assignment of the last solve; empty unless it returned SAT.
    pub fn model(&self) -> &Assignment {
        &self.model
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }
}

impl Default for DPLLSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver for DPLLSolver {
    fn name(&self) -> &'static str {
        "DPLL"
    }

    fn solve(&mut self, formula: &Formula) -> SolveStatus {
        DPLLSolver::solve(self, formula)
    }

    fn stats(&self) -> &RuntimeStats {
        &self.stats
    }
}

/// Decides `formula` by DPLL search with the default configuration. On SAT, also returns an
/// assignment satisfying every clause; on UNSAT the assignment is empty.
pub fn dpll(formula: &Formula) -> (bool, Assignment) {
    let mut solver = DPLLSolver::default();
    let status = solver.solve(formula);
    info!("DPLL: {} ({})", status, solver.stats());
    (status.is_sat(), solver.model)
}
