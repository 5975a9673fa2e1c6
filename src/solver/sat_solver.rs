use super::{formula::Formula, stats::RuntimeStats, types::SolveStatus};

/// Common face of the decision procedures, so a harness can run them side by side.
pub trait Solver {
    fn name(&self) -> &'static str;

    fn solve(&mut self, formula: &Formula) -> SolveStatus;

    fn stats(&self) -> &RuntimeStats;
}
