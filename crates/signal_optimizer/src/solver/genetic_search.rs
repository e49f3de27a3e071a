use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    OptimizerError,
    problem::traffic_signaling_problem::TrafficSignalingProblem,
    selector::solution_selector::SolutionSelector,
    timed,
};

use super::{
    construction::{cycle_times::CycleTimes, init_solution::init_solution},
    evaluation::{evaluate_solution, evaluate_solution_delta_many},
    operators::{crossover::crossover, inversion::inversion},
    population::Population,
    score::Score,
    scored_solution::ScoredSolution,
    solution::Solution,
    solver_params::{SolverParams, Termination},
    statistics::{GenerationStatistics, ScoreEvolutionRow, SearchStatistics},
};

type BestSolutionHandler = Arc<Mutex<dyn FnMut(&ScoredSolution) + Send + Sync + 'static>>;
type GenerationHandler = Arc<Mutex<dyn FnMut(&GenerationStatistics) + Send + Sync + 'static>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SearchPhase {
    Initializing,
    Evaluating,
    Selecting,
    Breeding,
    Replacing,
    Terminated,
}

struct Offspring {
    survivors: [ScoredSolution; 2],
    improved: usize,
}

/// Generational genetic search over traffic light schedules.
///
/// Every generation selects `population_size` parent pairs, breeds them in
/// parallel, keeps the better of each child and its parent, then truncates
/// the `2 * population_size` survivors back to the best `population_size`.
/// Termination is checked at the top of each generation only.
pub struct GeneticSearch {
    problem: Arc<TrafficSignalingProblem>,
    params: SolverParams,
    best_solution: RwLock<Option<ScoredSolution>>,
    phase: RwLock<SearchPhase>,
    on_best_solution_handler: Option<BestSolutionHandler>,
    on_generation_handler: Option<GenerationHandler>,
    is_stopped: AtomicBool,
    statistics: RwLock<SearchStatistics>,
}

impl GeneticSearch {
    pub fn new(params: SolverParams, problem: Arc<TrafficSignalingProblem>) -> Self {
        GeneticSearch {
            problem,
            params,
            best_solution: RwLock::new(None),
            phase: RwLock::new(SearchPhase::Initializing),
            on_best_solution_handler: None,
            on_generation_handler: None,
            is_stopped: AtomicBool::new(false),
            statistics: RwLock::new(SearchStatistics::default()),
        }
    }

    pub fn problem(&self) -> &TrafficSignalingProblem {
        &self.problem
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&ScoredSolution) + Send + Sync + 'static,
    {
        self.on_best_solution_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn on_generation<F>(&mut self, callback: F)
    where
        F: FnMut(&GenerationStatistics) + Send + Sync + 'static,
    {
        self.on_generation_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn best_solution(&self) -> Option<MappedRwLockReadGuard<'_, ScoredSolution>> {
        RwLockReadGuard::try_map(self.best_solution.read(), |best| best.as_ref()).ok()
    }

    pub fn phase(&self) -> SearchPhase {
        *self.phase.read()
    }

    pub fn statistics(&self) -> RwLockReadGuard<'_, SearchStatistics> {
        self.statistics.read()
    }

    pub fn stop(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    pub fn run(&self) -> Result<(), OptimizerError> {
        self.params.validate()?;

        self.is_stopped.store(false, Ordering::Relaxed);
        *self.best_solution.write() = None;
        *self.statistics.write() = SearchStatistics::default();

        let start = Timestamp::now();
        let mut rng = match self.params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let num_threads = self.params.evaluation_threads.number_of_threads();
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;
        let selector = SolutionSelector::from(&self.params.selector);

        info!(
            "Running genetic search: {} intersections, {} cars, population of {} on {} threads",
            self.problem.intersection_count(),
            self.problem.cars().len(),
            self.params.population_size,
            num_threads
        );

        self.set_phase(SearchPhase::Initializing);
        let mut population = timed!(
            "Initial population",
            self.initial_population(&thread_pool, &mut rng)
        );
        let mut generation = 0;

        loop {
            self.set_phase(SearchPhase::Evaluating);
            if let Some(best) = population.best() {
                self.update_best_solution(best, generation);
            }

            if self.should_terminate(generation, start) {
                break;
            }

            self.set_phase(SearchPhase::Selecting);
            let parents = (0..self.params.population_size)
                .map(|_| population.select_parents(&selector, &mut rng))
                .collect::<Result<Vec<_>, _>>()?;
            let pair_rngs = parents
                .iter()
                .map(|_| SmallRng::from_rng(&mut rng))
                .collect::<Vec<_>>();

            self.set_phase(SearchPhase::Breeding);
            let offspring = thread_pool.install(|| {
                parents
                    .into_par_iter()
                    .zip(pair_rngs)
                    .map(|((parent_a, parent_b), mut pair_rng)| {
                        self.breed_pair(parent_a, parent_b, &mut pair_rng)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })?;

            self.set_phase(SearchPhase::Replacing);
            let improved_children = offspring.iter().map(|pair| pair.improved).sum();
            let candidates = offspring
                .into_iter()
                .flat_map(|pair| pair.survivors)
                .collect();
            population = Population::from_candidates(candidates, self.params.population_size);

            generation += 1;
            self.record_generation(&population, generation, start, improved_children);
        }

        self.set_phase(SearchPhase::Terminated);

        if let Some(best) = self.best_solution() {
            info!(
                "Genetic search done after {} generations in {:#}, best score {}",
                generation,
                Timestamp::now().duration_since(start),
                best.score
            );
        }

        Ok(())
    }

    fn set_phase(&self, phase: SearchPhase) {
        *self.phase.write() = phase;
    }

    fn initial_population(
        &self,
        thread_pool: &rayon::ThreadPool,
        rng: &mut SmallRng,
    ) -> Population {
        let cycle_times = CycleTimes::new(self.problem.duration(), &self.params.cycle_time);
        let rngs = (0..self.params.population_size)
            .map(|_| SmallRng::from_rng(&mut *rng))
            .collect::<Vec<_>>();

        let solutions = thread_pool.install(|| {
            rngs.into_par_iter()
                .map(|mut rng| {
                    let solution = init_solution(&self.problem, &cycle_times, &mut rng);
                    let score = evaluate_solution(&self.problem, &solution);
                    ScoredSolution { solution, score }
                })
                .collect()
        });

        Population::from_candidates(solutions, self.params.population_size)
    }

    fn check_termination(
        &self,
        termination: &Termination,
        generation: usize,
        start: Timestamp,
    ) -> bool {
        match *termination {
            Termination::Generations(max_generations) => generation >= max_generations,
            Termination::Duration(max_duration) => {
                Timestamp::now().duration_since(start) > max_duration
            }
        }
    }

    fn should_terminate(&self, generation: usize, start: Timestamp) -> bool {
        self.is_stopped.load(Ordering::Relaxed)
            || self
                .params
                .terminations
                .iter()
                .any(|termination| self.check_termination(termination, generation, start))
    }

    fn breed_pair(
        &self,
        parent_a: &ScoredSolution,
        parent_b: &ScoredSolution,
        rng: &mut SmallRng,
    ) -> Result<Offspring, OptimizerError> {
        let (child_a, child_b) = crossover(&parent_a.solution, &parent_b.solution, rng)?;

        // One draw per pair, both children get the same treatment
        let mutate = rng.random_bool(self.params.mutation_rate);
        let invert = rng.random_bool(self.params.inversion_rate);

        let child_a = self.vary_child(child_a, mutate, invert, rng);
        let child_b = self.vary_child(child_b, mutate, invert, rng);

        let (survivor_a, improved_a) = keep_better(parent_a, child_a);
        let (survivor_b, improved_b) = keep_better(parent_b, child_b);

        Ok(Offspring {
            survivors: [survivor_a, survivor_b],
            improved: usize::from(improved_a) + usize::from(improved_b),
        })
    }

    fn vary_child(
        &self,
        mut child: Solution,
        mutate: bool,
        invert: bool,
        rng: &mut SmallRng,
    ) -> ScoredSolution {
        let problem = &self.problem;
        let strategy = self.params.mutation_strategy;

        let score = if invert {
            if mutate {
                strategy.apply(&mut child, self.params.num_mutations, rng);
            }
            // Inversion reorders every entry, rescore from scratch
            inversion(&mut child, rng);
            evaluate_solution(problem, &child)
        } else if mutate {
            let crossed = child.clone();
            let crossed_score = evaluate_solution(problem, &crossed);
            let touched = strategy.apply(&mut child, self.params.num_mutations, rng);
            evaluate_solution_delta_many(problem, &crossed, &child, crossed_score, &touched)
        } else {
            evaluate_solution(problem, &child)
        };

        ScoredSolution {
            solution: child,
            score,
        }
    }

    fn update_best_solution(&self, candidate: &ScoredSolution, generation: usize) {
        let is_better = self
            .best_solution
            .read()
            .as_ref()
            .is_none_or(|best| candidate.score > best.score);

        if !is_better {
            return;
        }

        *self.best_solution.write() = Some(candidate.clone());
        self.statistics.write().add_best_score(ScoreEvolutionRow {
            timestamp: Timestamp::now(),
            generation,
            score: candidate.score,
        });

        debug!("New best score {} at generation {}", candidate.score, generation);

        if let Some(callback) = &self.on_best_solution_handler {
            callback.lock()(candidate);
        }
    }

    fn record_generation(
        &self,
        population: &Population,
        generation: usize,
        start: Timestamp,
        improved_children: usize,
    ) {
        let now = Timestamp::now();
        let statistics = GenerationStatistics {
            generation,
            timestamp: now,
            elapsed: now.duration_since(start),
            best_score: population.best().map_or(Score::ZERO, |best| best.score),
            worst_score: population.worst().map_or(Score::ZERO, |worst| worst.score),
            mean_score: population.mean_score(),
            improved_children,
        };

        debug!(
            "Generation {}: best {}, mean {:.1}, {} improved children",
            generation, statistics.best_score, statistics.mean_score, improved_children
        );

        if let Some(callback) = &self.on_generation_handler {
            callback.lock()(&statistics);
        }

        self.statistics.write().add_generation(statistics);
    }
}

fn keep_better(parent: &ScoredSolution, child: ScoredSolution) -> (ScoredSolution, bool) {
    if child.score > parent.score {
        (child, true)
    } else {
        (parent.clone(), false)
    }
}
