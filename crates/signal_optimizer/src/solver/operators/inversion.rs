use rand::Rng;

use crate::solver::solution::Solution;

/// Reverses a random slot range `start..=end` (`start < end`) in every entry
/// with more than one street. Cycle times are unchanged, the rotation order
/// is not.
pub fn inversion(solution: &mut Solution, rng: &mut impl Rng) {
    for entry in solution.entries_mut() {
        let len = entry.len();
        if len < 2 {
            continue;
        }

        let start = rng.random_range(0..len - 1);
        let end = rng.random_range(start + 1..len);
        entry.reverse_range(start, end);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    #[test]
    fn test_inversion_twice_with_same_draws_restores_solution() {
        let problem = test_utils::create_hashcode_example_problem();
        // Intersection 1 is the only one with two streets
        let original = test_utils::create_uniform_solution(&problem, 1);

        let rng = test_utils::seeded_rng(17);
        let mut solution = original.clone();

        inversion(&mut solution, &mut rng.clone());
        assert_ne!(solution, original);

        inversion(&mut solution, &mut rng.clone());
        assert_eq!(solution, original);
    }

    #[test]
    fn test_inversion_keeps_streets_and_cycle_times() {
        let problem = test_utils::create_hashcode_example_problem();
        let mut solution = test_utils::create_uniform_solution(&problem, 3);
        let mut rng = test_utils::seeded_rng(3);

        for _ in 0..20 {
            inversion(&mut solution, &mut rng);
            assert!(solution.validate(&problem).is_ok());
            for entry in solution.entries() {
                assert_eq!(entry.cycle_time(), 3 * entry.len() as u32);
            }
        }
    }
}
