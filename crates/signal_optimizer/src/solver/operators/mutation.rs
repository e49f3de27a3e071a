use rand::Rng;

use crate::{
    problem::intersection::IntersectionIdx,
    solver::{solution::Solution, solver_params::MutationStrategy},
};

impl MutationStrategy {
    /// Applies `num_mutations` operations of this kind and returns the
    /// intersections whose entry changed, without duplicates.
    pub fn apply(
        &self,
        solution: &mut Solution,
        num_mutations: usize,
        rng: &mut impl Rng,
    ) -> Vec<IntersectionIdx> {
        let mut touched = Vec::new();
        for _ in 0..num_mutations {
            let changed: Vec<IntersectionIdx> = match self {
                MutationStrategy::SwapDurations => {
                    swap_durations(solution, rng).into_iter().collect()
                }
                MutationStrategy::ExchangeCycles => exchange_cycle_times(solution, rng),
            };

            for intersection in changed {
                if !touched.contains(&intersection) {
                    touched.push(intersection);
                }
            }
        }

        touched
    }
}

/// Duration-swap mutation, repeated `num_mutations` times.
pub fn mutate(
    solution: &mut Solution,
    num_mutations: usize,
    rng: &mut impl Rng,
) -> Vec<IntersectionIdx> {
    MutationStrategy::SwapDurations.apply(solution, num_mutations, rng)
}

/// Picks a random intersection and, as many times as it has streets minus
/// one, swaps the duration at a random position `>= 1` with the one before
/// it. The cycle time is preserved.
pub fn swap_durations(solution: &mut Solution, rng: &mut impl Rng) -> Option<IntersectionIdx> {
    if solution.intersection_count() == 0 {
        return None;
    }

    let intersection = IntersectionIdx::new(rng.random_range(0..solution.intersection_count()));
    let items = solution.entry_mut(intersection).items_mut();
    if items.len() < 2 {
        return None;
    }

    for _ in 0..items.len() - 1 {
        let position = rng.random_range(1..items.len());
        let previous = items[position - 1].duration;
        items[position - 1].duration = items[position].duration;
        items[position].duration = previous;
    }

    Some(intersection)
}

/// Swaps the cycle times of two distinct random intersections. Each new cycle
/// is spread evenly over the intersection's streets, leftover seconds going
/// one by one to the first streets of the rotation.
///
/// Needs two intersections with at least one street, otherwise nothing
/// changes.
pub fn exchange_cycle_times(solution: &mut Solution, rng: &mut impl Rng) -> Vec<IntersectionIdx> {
    let candidates = solution
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| !entry.is_empty())
        .map(|(index, _)| IntersectionIdx::new(index))
        .collect::<Vec<_>>();

    if candidates.len() < 2 {
        return vec![];
    }

    let picked = rand::seq::index::sample(rng, candidates.len(), 2);
    let first = candidates[picked.index(0)];
    let second = candidates[picked.index(1)];

    let first_cycle = solution.entry(first).cycle_time();
    let second_cycle = solution.entry(second).cycle_time();

    spread_cycle_time(solution, first, second_cycle);
    spread_cycle_time(solution, second, first_cycle);

    vec![first, second]
}

fn spread_cycle_time(solution: &mut Solution, intersection: IntersectionIdx, cycle_time: u32) {
    let items = solution.entry_mut(intersection).items_mut();
    let street_count = items.len() as u32;
    let share = cycle_time / street_count;

    let leftover = (cycle_time % street_count) as usize;
    for (position, item) in items.iter_mut().enumerate() {
        item.duration = share + u32::from(position < leftover);
    }
}
