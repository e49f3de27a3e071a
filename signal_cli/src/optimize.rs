use std::{fs::File, io::BufWriter, path::PathBuf, time::Duration};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use jiff::{SignedDuration, Timestamp};
use signal_optimizer::{
    parsers::{hashcode::HashCodeParser, parser::DatasetParser, submission::write_submission},
    solver::{
        solver::Solver,
        solver_params::{
            CycleTimePolicy, MutationStrategy, SolverParams, SolverSelectorStrategy, Termination,
            Threads, TournamentSize,
        },
    },
};
use tracing::info;

use crate::{
    file_utils::{ensure_parent_dir, output_path_for},
    parsers,
    summary::print_summary,
};

#[derive(Args)]
pub struct OptimizeArgs {
    /// Input file in the Hash Code format
    #[arg(short, long)]
    input: PathBuf,

    /// Submission file, derived from the input path when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, default_value_t = 20)]
    population_size: usize,

    /// Number of generations (default: 100 when no timeout is given)
    #[arg(short, long)]
    generations: Option<usize>,

    /// Time budget for the search (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<SignedDuration>,

    #[arg(long, default_value_t = 1)]
    num_mutations: usize,

    #[arg(long, value_parser = parsers::parse_rate, default_value_t = 0.8)]
    mutation_rate: f64,

    #[arg(long, value_parser = parsers::parse_rate, default_value_t = 0.2)]
    inversion_rate: f64,

    /// Tournament selection instead of roulette selection
    #[arg(long)]
    tournament: bool,

    /// Fixed tournament size, random per draw when omitted
    #[arg(long, requires = "tournament")]
    tournament_size: Option<usize>,

    /// Mutate by exchanging the cycle times of two intersections
    #[arg(long)]
    exchange_cycles: bool,

    #[arg(long, requires = "max_cycle")]
    min_cycle: Option<u32>,

    #[arg(long, requires = "min_cycle")]
    max_cycle: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of threads (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Writes search statistics as JSON to this file
    #[arg(long)]
    statistics: Option<PathBuf>,
}

impl OptimizeArgs {
    fn solver_params(&self) -> SolverParams {
        let mut terminations = vec![];
        if let Some(generations) = self.generations {
            terminations.push(Termination::Generations(generations));
        }
        if let Some(timeout) = self.timeout {
            terminations.push(Termination::Duration(timeout));
        }

        let defaults = SolverParams::default();

        SolverParams {
            terminations: if terminations.is_empty() {
                defaults.terminations
            } else {
                terminations
            },
            selector: if self.tournament {
                SolverSelectorStrategy::Tournament(
                    self.tournament_size
                        .map_or(TournamentSize::Random, TournamentSize::Fixed),
                )
            } else {
                SolverSelectorStrategy::Roulette
            },
            population_size: self.population_size,
            num_mutations: self.num_mutations,
            mutation_rate: self.mutation_rate,
            inversion_rate: self.inversion_rate,
            mutation_strategy: if self.exchange_cycles {
                MutationStrategy::ExchangeCycles
            } else {
                MutationStrategy::SwapDurations
            },
            cycle_time: match (self.min_cycle, self.max_cycle) {
                (Some(min), Some(max)) => CycleTimePolicy::Bounded { min, max },
                _ => CycleTimePolicy::AnyDivisor,
            },
            evaluation_threads: self.threads.map_or(Threads::Auto, Threads::Multi),
            seed: self.seed,
        }
    }
}

fn create_progress_bar(generations: Option<usize>) -> Result<ProgressBar, anyhow::Error> {
    let bar = match generations {
        Some(generations) => {
            let bar = ProgressBar::new(generations as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{bar:40}] {pos}/{len} ({elapsed}) {msg}")?,
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner().template("{spinner} {pos} ({elapsed}) {msg}")?,
            );
            bar
        }
    };

    bar.enable_steady_tick(Duration::from_millis(200));
    Ok(bar)
}

pub fn run(args: OptimizeArgs) -> Result<(), anyhow::Error> {
    let problem = HashCodeParser.parse(&args.input)?;
    info!(
        "Loaded {:?}: {} intersections, {} streets, {} cars, duration {}s",
        args.input,
        problem.intersection_count(),
        problem.streets().len(),
        problem.cars().len(),
        problem.duration()
    );

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(&args.input));

    let params = args.solver_params();
    let generations = params
        .terminations
        .iter()
        .find_map(|termination| match termination {
            Termination::Generations(generations) => Some(*generations),
            Termination::Duration(_) => None,
        });

    let mut solver = Solver::new(problem, params);

    let bar = create_progress_bar(generations)?;
    let generation_bar = bar.clone();
    solver.on_generation(move |statistics| {
        generation_bar.inc(1);
        generation_bar.set_message(format!("best {}", statistics.best_score));
    });

    let start = Timestamp::now();
    let result = solver.solve();
    bar.finish_and_clear();
    result?;
    let elapsed = Timestamp::now().duration_since(start);

    let Some(best) = solver.current_best_solution() else {
        anyhow::bail!("No solution found");
    };

    ensure_parent_dir(&output)?;
    write_submission(
        solver.problem(),
        &best.solution,
        BufWriter::new(File::create(&output)?),
    )?;
    info!("Wrote submission to {:?}", output);

    if let Some(path) = &args.statistics {
        ensure_parent_dir(path)?;
        solver
            .statistics()
            .write_json(BufWriter::new(File::create(path)?))?;
        info!("Wrote statistics to {:?}", path);
    }

    print_summary(solver.problem(), &best.solution, Some(elapsed));

    Ok(())
}
