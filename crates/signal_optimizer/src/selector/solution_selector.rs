use crate::solver::{
    scored_solution::ScoredSolution,
    solver_params::SolverSelectorStrategy,
};

use super::{
    select_roulette::RouletteSelector, select_solution::SelectSolution,
    select_tournament::TournamentSelector,
};

pub enum SolutionSelector {
    Roulette(RouletteSelector),
    Tournament(TournamentSelector),
}

impl From<&SolverSelectorStrategy> for SolutionSelector {
    fn from(strategy: &SolverSelectorStrategy) -> Self {
        match strategy {
            SolverSelectorStrategy::Roulette => SolutionSelector::Roulette(RouletteSelector),
            SolverSelectorStrategy::Tournament(size) => {
                SolutionSelector::Tournament(TournamentSelector::new(*size))
            }
        }
    }
}

impl SelectSolution for SolutionSelector {
    fn select_solution<'a>(
        &self,
        solutions: &'a [ScoredSolution],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a ScoredSolution> {
        match self {
            SolutionSelector::Roulette(selector) => selector.select_solution(solutions, rng),
            SolutionSelector::Tournament(selector) => selector.select_solution(solutions, rng),
        }
    }
}
