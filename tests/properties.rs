use proptest::{collection::vec, prelude::*};
use sat_trio::{
    dp, dpll, instance::sat_instance::SATInstance, resolve, simplify, verify, Assignment, Clause,
    Formula, Lit, ResolutionSolver, SolveStatus,
};

const MAX_NUM_VARIABLES: i64 = 4;
const MAX_NUM_LITERALS: usize = 3;
const MAX_NUM_CLAUSES: usize = 7;

fn literal() -> impl Strategy<Value = i64> {
    (1..=MAX_NUM_VARIABLES, any::<bool>()).prop_map(|(v, neg)| if neg { -v } else { v })
}

fn clause() -> impl Strategy<Value = Clause> {
    vec(literal(), 0..=MAX_NUM_LITERALS).prop_map(|lits| {
        lits.into_iter()
            .map(|l| Lit::try_from(l).unwrap())
            .collect::<Clause>()
    })
}

fn formula() -> impl Strategy<Value = Formula> {
    vec(vec(literal(), 1..=MAX_NUM_LITERALS), 0..=MAX_NUM_CLAUSES)
        .prop_map(|clauses| SATInstance::new(clauses).to_formula().unwrap())
}

fn assignment() -> impl Strategy<Value = Assignment> {
    vec(literal(), 0..=MAX_NUM_VARIABLES as usize).prop_map(|lits| {
        lits.into_iter()
            .map(|l| Lit::try_from(l).unwrap())
            .collect::<Assignment>()
    })
}

proptest! {
    #[test]
    fn solvers_agree(f in formula()) {
        let (dpll_sat, _) = dpll(&f);
        prop_assert_eq!(dpll_sat, dp(&f));

        // Small formulas saturate well below the iteration cap
        let status = ResolutionSolver::default().solve(&f);
        prop_assert_ne!(status, SolveStatus::Unknown);
        prop_assert_eq!(dpll_sat, status.is_sat());
    }

    #[test]
    fn dpll_models_verify(f in formula()) {
        let (sat, model) = dpll(&f);
        if sat {
            prop_assert!(verify(&f, &model));
            let vars = f.vars();
            prop_assert!(vars.iter().all(|v| model.is_assigned(*v)));
        } else {
            prop_assert!(model.is_empty());
        }
    }

    #[test]
    fn dpll_models_are_consistent(f in formula()) {
        let (_, model) = dpll(&f);
        prop_assert!(model.iter().all(|l| !model.is_true(!*l)));
    }

    #[test]
    fn simplify_is_idempotent(f in formula(), a in assignment()) {
        let once = simplify(&f, &a);
        prop_assert_eq!(simplify(&once, &a), once);
    }

    #[test]
    fn simplify_leaves_no_assigned_literal(f in formula(), a in assignment()) {
        let s = simplify(&f, &a);
        prop_assert!(s.iter().all(|c| c.iter().all(|l| !a.is_true(*l) && !a.is_false(*l))));
    }

    #[test]
    fn resolve_is_commutative(a in clause(), b in clause()) {
        prop_assert_eq!(resolve(&a, &b), resolve(&b, &a));
    }

    #[test]
    fn resolvents_are_implied(a in clause(), b in clause(), m in assignment()) {
        // Any assignment satisfying both parents satisfies every resolvent. A tautological
        // parent loses both of its clashing literals, so it is excluded here.
        prop_assume!(!a.is_tautology() && !b.is_tautology());
        let parents = Formula::new(vec![a.clone(), b.clone()]);
        if verify(&parents, &m) {
            for r in resolve(&a, &b) {
                prop_assert!(verify(&Formula::new(vec![r]), &m));
            }
        }
    }
}
