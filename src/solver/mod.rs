/// Solver imports
pub mod dp_solver;
pub mod dpll_solver;
pub mod resolution_solver;
pub mod sat_solver;

/// Formula model: clauses, assignments, and the simplification they share
pub mod assignment;
pub mod clause;
pub mod formula;

/// Solver config
pub mod config;
pub mod error;

pub mod stats;
/// General util/definitions
pub mod types;
