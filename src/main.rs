use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::Rng;
use sat_trio::{
    instance::generator::{random_cnf, rng_for},
    solver::config::{GeneratorConfig, CLAUSE_LEN_DEFAULT, RESOLUTION_MAX_ITERATIONS_DEFAULT},
    verify, DPLLSolver, DPSolver, Formula, ResolutionSolver, SolveStatus, Solver, SolverConfig,
};

#[derive(Parser, Debug)]
#[command(version, about = "Cross-check DP, DPLL and resolution on random CNF instances", long_about = None)]
pub struct Args {
    /// Number of random instances to solve
    #[arg(short, long, default_value_t = 10)]
    pub tests: usize,

    /// Smallest number of variables per instance
    #[arg(long, default_value_t = 5)]
    pub min_vars: usize,

    /// Largest number of variables per instance
    #[arg(long, default_value_t = 12)]
    pub max_vars: usize,

    /// Clause count is drawn from [vars, vars * ratio]
    #[arg(short, long, default_value_t = 4)]
    pub clause_ratio: usize,

    /// Seed for reproducible instances
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Resolution saturation rounds before giving up
    #[arg(short = 'i', long, default_value_t = RESOLUTION_MAX_ITERATIONS_DEFAULT)]
    pub max_iterations: usize,

    /// Clause count at which DP and resolution give up
    #[arg(short = 'm', long, default_value_t = 100_000)]
    pub max_clauses: usize,

    /// Log more (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Per-solver totals across the run.
#[derive(Default)]
struct Totals {
    elapsed: Duration,
    unknown: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).init();

    ensure!(
        args.min_vars <= args.max_vars,
        "variable range {}..={} is empty",
        args.min_vars,
        args.max_vars
    );
    ensure!(
        2 * args.min_vars >= CLAUSE_LEN_DEFAULT,
        "need at least {} variables for {}-literal clauses",
        (CLAUSE_LEN_DEFAULT + 1) / 2,
        CLAUSE_LEN_DEFAULT
    );
    ensure!(args.clause_ratio > 0, "clause ratio must be positive");
    ensure!(
        max_clauses_for(args.max_vars, args.clause_ratio).is_some(),
        "{} variables with clause ratio {} overflows the clause count",
        args.max_vars,
        args.clause_ratio
    );
    ensure!(
        u32::try_from(args.tests).is_ok(),
        "at most {} tests per run",
        u32::MAX
    );

    let mut cfg = SolverConfig::default();
    cfg.resolution.max_iterations = args.max_iterations;
    cfg.resolution.max_clauses = Some(args.max_clauses);
    cfg.dp.max_clauses = Some(args.max_clauses);
    info!("Config: {:#?}", cfg);

    let mut rng = rng_for(&GeneratorConfig {
        seed: args.seed,
        ..GeneratorConfig::new(args.min_vars, 0)
    });

    println!("Testing all SAT solvers on random instances...");
    println!(
        "Running {} tests with {}-{} variables",
        args.tests, args.min_vars, args.max_vars
    );
    println!("{}", "-".repeat(50));

    let mut dpll = DPLLSolver::new(cfg.clone());
    let mut dp = DPSolver::new(cfg.clone());
    let mut res = ResolutionSolver::new(cfg.clone());
    let mut totals: [Totals; 3] = Default::default();
    let mut agreements = 0;

    for t in 0..args.tests {
        let n_vars = rng.gen_range(args.min_vars..=args.max_vars);
        let max_clauses = max_clauses_for(n_vars, args.clause_ratio)
            .context("clause count overflow")?;
        let n_clauses = rng.gen_range(n_vars..=max_clauses);
        println!("Test {}: {} variables, {} clauses", t + 1, n_vars, n_clauses);

        let conf = GeneratorConfig::new(n_vars, n_clauses);
        let formula = random_cnf(&mut rng, &conf)
            .with_context(|| format!("generating instance for test {}", t + 1))?;

        let mut verdicts = Vec::with_capacity(3);
        let solvers: [&mut dyn Solver; 3] = [&mut dpll, &mut dp, &mut res];
        for (solver, total) in solvers.into_iter().zip(totals.iter_mut()) {
            let (status, elapsed) = timed(solver, &formula);
            total.elapsed += elapsed;
            if status == SolveStatus::Unknown {
                total.unknown += 1;
            }
            println!("  {}: {} in {:.2?}", solver.name(), status, elapsed);
            verdicts.push(status);
        }

        if verdicts[0].is_sat() && !verify(&formula, dpll.model()) {
            warn!("DPLL returned an invalid assignment: {}", dpll.model());
            println!("  WARNING: DPLL returned invalid assignment!");
        }

        let agreement = agree(&verdicts);
        agreements += agreement as usize;
        println!("  Agreement: {}", if agreement { "Yes" } else { "No" });
        println!();
    }

    println!("Test Summary:");
    if args.tests > 0 {
        println!(
            "  Agreement rate: {}/{} ({:.1}%)",
            agreements,
            args.tests,
            agreements as f64 / args.tests as f64 * 100.
        );
        let names = ["DPLL", "DP", "Resolution"];
        for (name, total) in names.iter().zip(totals.iter()) {
            println!(
                "  {}: average {:.2?}, inconclusive {}",
                name,
                average(total.elapsed, args.tests)?,
                total.unknown
            );
        }
    }
    info!("DPLL stats: {}", dpll.stats());
    info!("DP stats: {}", dp.stats());
    info!("Resolution stats: {}", res.stats());

    Ok(())
}

/// Upper bound of the clause count drawn for an instance over `n_vars` variables.
fn max_clauses_for(n_vars: usize, ratio: usize) -> Option<usize> {
    n_vars.checked_mul(ratio)
}

fn average(total: Duration, runs: usize) -> Result<Duration> {
    let runs = u32::try_from(runs).context("too many runs to average")?;
    ensure!(runs > 0, "no runs to average");
    Ok(total / runs)
}

fn timed(solver: &mut dyn Solver, formula: &Formula) -> (SolveStatus, Duration) {
    let start = Instant::now();
    let status = solver.solve(formula);
    (status, start.elapsed())
}

/// Definite verdicts must all match; an inconclusive one doesn't count against agreement.
fn agree(verdicts: &[SolveStatus]) -> bool {
    let mut definite = verdicts.iter().filter(|s| **s != SolveStatus::Unknown);
    match definite.next() {
        Some(first) => definite.all(|s| s == first),
        None => true,
    }
}
