use rand::seq::index;

use crate::solver::{scored_solution::ScoredSolution, solver_params::TournamentSize};

use super::select_solution::SelectSolution;

/// Samples individuals without replacement and keeps the best one.
pub struct TournamentSelector {
    size: TournamentSize,
}

impl TournamentSelector {
    pub fn new(size: TournamentSize) -> Self {
        TournamentSelector { size }
    }

    fn tournament_size(&self, population_size: usize, rng: &mut impl rand::Rng) -> usize {
        match self.size {
            TournamentSize::Fixed(size) => size.clamp(1, population_size),
            TournamentSize::Random => {
                rng.random_range(1..=population_size.saturating_sub(1).max(1))
            }
        }
    }
}

impl SelectSolution for TournamentSelector {
    fn select_solution<'a>(
        &self,
        solutions: &'a [ScoredSolution],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a ScoredSolution> {
        if solutions.is_empty() {
            return None;
        }

        let size = self.tournament_size(solutions.len(), rng);
        index::sample(rng, solutions.len(), size)
            .into_iter()
            .map(|index| &solutions[index])
            .max_by_key(|solution| solution.score)
    }
}
