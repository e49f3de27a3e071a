use jiff::SignedDuration;

use crate::OptimizerError;

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub terminations: Vec<Termination>,
    pub selector: SolverSelectorStrategy,

    pub population_size: usize,

    pub num_mutations: usize,
    pub mutation_rate: f64,
    pub inversion_rate: f64,
    pub mutation_strategy: MutationStrategy,

    pub cycle_time: CycleTimePolicy,

    pub evaluation_threads: Threads,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Termination {
    Duration(SignedDuration),
    Generations(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SolverSelectorStrategy {
    Roulette,
    Tournament(TournamentSize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TournamentSize {
    /// A new size in `[1, population_size - 1]` for every draw.
    Random,
    Fixed(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MutationStrategy {
    /// Swap the durations of neighbouring streets.
    SwapDurations,
    /// Swap the cycle lengths of two intersections.
    ExchangeCycles,
}

/// Which divisors of the simulation duration may be used as cycle time when
/// building random schedules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CycleTimePolicy {
    AnyDivisor,
    Bounded { min: u32, max: u32 },
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            terminations: vec![Termination::Generations(100)],
            selector: SolverSelectorStrategy::Roulette,
            population_size: 20,
            num_mutations: 1,
            mutation_rate: 0.8,
            inversion_rate: 0.2,
            mutation_strategy: MutationStrategy::SwapDurations,
            cycle_time: CycleTimePolicy::AnyDivisor,
            evaluation_threads: Threads::Auto,
            seed: None,
        }
    }
}

impl SolverParams {
    pub fn validate(&self) -> Result<(), OptimizerError> {
        if self.population_size == 0 {
            return Err(OptimizerError::precondition(
                "population size must be at least 1",
            ));
        }

        if self.terminations.is_empty() {
            return Err(OptimizerError::precondition(
                "at least one termination condition is required",
            ));
        }

        for (name, rate) in [
            ("mutation rate", self.mutation_rate),
            ("inversion rate", self.inversion_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(OptimizerError::precondition(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }

        if let SolverSelectorStrategy::Tournament(TournamentSize::Fixed(size)) = self.selector {
            if !(1..=self.population_size).contains(&size) {
                return Err(OptimizerError::precondition(format!(
                    "tournament size must be within [1, {}], got {size}",
                    self.population_size
                )));
            }
        }

        if let CycleTimePolicy::Bounded { min, max } = self.cycle_time {
            if min == 0 || min > max {
                return Err(OptimizerError::precondition(format!(
                    "invalid cycle time band [{min}, {max}]"
                )));
            }
        }

        if let Threads::Multi(0) = self.evaluation_threads {
            return Err(OptimizerError::precondition(
                "thread count must be at least 1",
            ));
        }

        Ok(())
    }
}
