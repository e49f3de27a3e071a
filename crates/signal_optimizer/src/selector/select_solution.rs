use crate::solver::scored_solution::ScoredSolution;

pub trait SelectSolution {
    fn select_solution<'a>(
        &self,
        solutions: &'a [ScoredSolution],
        rng: &mut impl rand::Rng,
    ) -> Option<&'a ScoredSolution>;

    /// Two independent draws. The same individual may be picked twice.
    fn select_parents<'a>(
        &self,
        solutions: &'a [ScoredSolution],
        rng: &mut impl rand::Rng,
    ) -> Option<(&'a ScoredSolution, &'a ScoredSolution)> {
        let first = self.select_solution(solutions, rng)?;
        let second = self.select_solution(solutions, rng)?;
        Some((first, second))
    }
}
