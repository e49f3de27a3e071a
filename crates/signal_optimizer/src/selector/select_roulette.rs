use rand::seq::IndexedRandom;
use tracing::debug;

use crate::solver::scored_solution::ScoredSolution;

use super::select_solution::SelectSolution;

/// Fitness-proportionate selection with replacement.
///
/// Draws an integer in `[1, total]` and returns the first individual whose
/// cumulative score reaches it, so zero-score individuals are never picked.
/// When every score is zero the draw is uniform instead.
pub struct RouletteSelector;

impl SelectSolution for RouletteSelector {
    fn select_solution<'a>(
        &self,
        solutions: &'a [ScoredSolution],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a ScoredSolution> {
        let total = solutions
            .iter()
            .map(|solution| solution.score.value())
            .sum::<u64>();

        if total == 0 {
            debug!("Every score is zero, selecting uniformly");
            return solutions.choose(rng);
        }

        let draw = rng.random_range(1..=total);
        let mut cumulative = 0;
        for solution in solutions {
            cumulative += solution.score.value();
            if cumulative >= draw {
                return Some(solution);
            }
        }

        solutions.last()
    }
}
