use fxhash::FxHashSet;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::solver::{
    clause::Clause,
    config::GeneratorConfig,
    error::{Result, SolverError},
    formula::Formula,
    types::{Lit, Var},
};

/// Builds the RNG for a config: seeded if a seed is given, from entropy otherwise.
pub fn rng_for(conf: &GeneratorConfig) -> StdRng {
    match conf.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Random CNF with `n_clauses` clauses of exactly `clause_len` distinct literals each. Variables
/// are drawn uniformly from `1..=n_vars`, polarity by a fair coin. A clause may end up a
/// tautology (both `v` and `-v` drawn).
pub fn random_cnf<R: Rng>(rng: &mut R, conf: &GeneratorConfig) -> Result<Formula> {
    // Only 2 * n_vars distinct literals exist
    if conf.n_vars == 0 || conf.clause_len == 0 || 2 * conf.n_vars < conf.clause_len {
        return Err(SolverError::InvalidGeneratorParams {
            n_vars: conf.n_vars,
            clause_len: conf.clause_len,
        });
    }
    let max_var = Var::try_from(conf.n_vars)
        .map_err(|_| SolverError::VariableOutOfRange(conf.n_vars as i64))?;

    let mut formula = Formula::empty();
    for _ in 0..conf.n_clauses {
        let mut lits = FxHashSet::default();
        while lits.len() < conf.clause_len {
            let var = rng.gen_range(1..=max_var);
            lits.insert(Lit::new(var, rng.gen_bool(0.5)));
        }
        formula.push(lits.into_iter().collect::<Clause>());
    }
    debug!(
        "Generated {} clauses over {} variables",
        formula.len(),
        conf.n_vars
    );
    Ok(formula)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clauses_have_requested_shape() {
        let mut conf = GeneratorConfig::new(5, 20);
        conf.seed = Some(7);
        let f = random_cnf(&mut rng_for(&conf), &conf).unwrap();
        assert_eq!(f.len(), 20);
        for c in &f {
            assert_eq!(c.len(), 3);
            assert!(c.iter().all(|l| (1..=5).contains(&l.var())));
        }
    }

    #[test]
    fn same_seed_same_formula() {
        let mut conf = GeneratorConfig::new(8, 30);
        conf.seed = Some(42);
        let a = random_cnf(&mut rng_for(&conf), &conf).unwrap();
        let b = random_cnf(&mut rng_for(&conf), &conf).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn two_variables_can_fill_three_literals() {
        let mut conf = GeneratorConfig::new(2, 5);
        conf.seed = Some(1);
        let f = random_cnf(&mut rng_for(&conf), &conf).unwrap();
        assert!(f.iter().all(|c| c.len() == 3 && c.is_tautology()));
    }

    #[test]
    fn impossible_params_are_rejected() {
        let conf = GeneratorConfig::new(1, 5);
        assert_eq!(
            random_cnf(&mut rng_for(&conf), &conf),
            Err(SolverError::InvalidGeneratorParams {
                n_vars: 1,
                clause_len: 3
            })
        );
        let conf = GeneratorConfig::new(0, 5);
        assert!(random_cnf(&mut rng_for(&conf), &conf).is_err());
    }
}
