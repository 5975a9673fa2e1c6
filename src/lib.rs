//! Three independent decision procedures for propositional satisfiability of CNF formulas:
//! Davis-Putnam variable elimination, DPLL backtracking search, and resolution saturation.

pub mod instance;
pub mod solver;

pub use solver::{
    assignment::Assignment,
    clause::{resolve, Clause},
    config::SolverConfig,
    dp_solver::{dp, DPSolver},
    dpll_solver::{dpll, DPLLSolver},
    error::{Result, SolverError},
    formula::{simplify, verify, Formula},
    resolution_solver::{resolution, ResolutionSolver},
    sat_solver::Solver,
    types::{Lit, SolveStatus, Var},
};
