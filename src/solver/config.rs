// Resolution saturation configs.
pub const RESOLUTION_MAX_ITERATIONS_DEFAULT: usize = 1000;

// Instance generation configs.
pub const CLAUSE_LEN_DEFAULT: usize = 3;

/// Per-solver configs. Log verbosity is global and set once by the binary.
#[derive(Default, Clone, Debug)]
pub struct SolverConfig {
    pub dp: DPConfig,
    pub dpll: DPLLConfig,
    pub resolution: ResolutionConfig,
}

// Config options for DP variable elimination.
#[derive(Default, Clone, Copy, Debug)]
pub struct DPConfig {
    /// Give up (Unknown) once elimination grows the clause set past this many clauses.
    /// None: run to completion.
    pub max_clauses: Option<usize>,
}

// Config options for DPLL search.
#[derive(Clone, Copy, Debug)]
pub struct DPLLConfig {
    /// Whether to assign pure literals before branching.
    pub pure_literals: bool,
    /// Give up (Unknown) after this many decisions. None: search exhaustively.
    pub max_decisions: Option<u64>,
}

impl Default for DPLLConfig {
    fn default() -> Self {
        Self {
            pure_literals: true,
            max_decisions: None,
        }
    }
}

// Config options for resolution saturation.
#[derive(Clone, Copy, Debug)]
pub struct ResolutionConfig {
    /// Saturation rounds before giving up. Hitting the cap is inconclusive, not a proof of SAT.
    pub max_iterations: usize,
    /// Give up (Unknown) once the clause set grows past this many clauses.
    pub max_clauses: Option<usize>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            max_iterations: RESOLUTION_MAX_ITERATIONS_DEFAULT,
            max_clauses: None,
        }
    }
}

// Random instance generation config.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorConfig {
    pub n_vars: usize,
    pub n_clauses: usize,
    /// Distinct literals per clause.
    pub clause_len: usize,
    /// None: seed from entropy.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(n_vars: usize, n_clauses: usize) -> Self {
        Self {
            n_vars,
            n_clauses,
            clause_len: CLAUSE_LEN_DEFAULT,
            seed: None,
        }
    }
}
