use crate::{
    OptimizerError,
    selector::select_solution::SelectSolution,
    solver::{score::Score, scored_solution::ScoredSolution},
};

/// Fixed-size population, best first.
#[derive(Clone, Debug)]
pub struct Population {
    solutions: Vec<ScoredSolution>,
}

impl Population {
    /// Keeps the `population_size` best candidates. Ties keep their candidate
    /// order.
    pub fn from_candidates(mut candidates: Vec<ScoredSolution>, population_size: usize) -> Self {
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(population_size);

        Population {
            solutions: candidates,
        }
    }

    pub fn solutions(&self) -> &[ScoredSolution] {
        &self.solutions
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn best(&self) -> Option<&ScoredSolution> {
        self.solutions.first()
    }

    pub fn worst(&self) -> Option<&ScoredSolution> {
        self.solutions.last()
    }

    pub fn mean_score(&self) -> f64 {
        if self.solutions.is_empty() {
            return 0.0;
        }

        let total: Score = self.solutions.iter().map(|solution| solution.score).sum();
        total.value() as f64 / self.solutions.len() as f64
    }

    pub fn select_parents(
        &self,
        selector: &impl SelectSolution,
        rng: &mut impl rand::Rng,
    ) -> Result<(&ScoredSolution, &ScoredSolution), OptimizerError> {
        selector
            .select_parents(&self.solutions, rng)
            .ok_or_else(|| {
                OptimizerError::precondition("cannot select parents from an empty population")
            })
    }
}
