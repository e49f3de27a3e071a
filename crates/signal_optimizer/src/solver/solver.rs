use std::sync::Arc;

use jiff::Timestamp;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use serde::Serialize;

use crate::{OptimizerError, problem::traffic_signaling_problem::TrafficSignalingProblem};

use super::{
    genetic_search::{GeneticSearch, SearchPhase},
    scored_solution::ScoredSolution,
    solver_params::SolverParams,
    statistics::{GenerationStatistics, SearchStatistics},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

pub struct Solver {
    search: GeneticSearch,
    status: RwLock<SolverStatus>,
    created_at: Timestamp,
}

impl Solver {
    pub fn new(problem: TrafficSignalingProblem, params: SolverParams) -> Self {
        Solver {
            search: GeneticSearch::new(params, Arc::new(problem)),
            status: RwLock::new(SolverStatus::Pending),
            created_at: Timestamp::now(),
        }
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&ScoredSolution) + Send + Sync + 'static,
    {
        self.search.on_best_solution(callback);
    }

    pub fn on_generation<F>(&mut self, callback: F)
    where
        F: FnMut(&GenerationStatistics) + Send + Sync + 'static,
    {
        self.search.on_generation(callback);
    }

    pub fn solve(&self) -> Result<(), OptimizerError> {
        *self.status.write() = SolverStatus::Running;
        let result = self.search.run();
        *self.status.write() = if result.is_ok() {
            SolverStatus::Completed
        } else {
            SolverStatus::Failed
        };

        result
    }

    /// Asks the search to stop at the next generation boundary.
    pub fn stop(&self) {
        self.search.stop();
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn phase(&self) -> SearchPhase {
        self.search.phase()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn problem(&self) -> &TrafficSignalingProblem {
        self.search.problem()
    }

    pub fn current_best_solution(&self) -> Option<MappedRwLockReadGuard<'_, ScoredSolution>> {
        self.search.best_solution()
    }

    pub fn statistics(&self) -> RwLockReadGuard<'_, SearchStatistics> {
        self.search.statistics()
    }
}
