use fxhash::FxHashSet;
use rand::Rng;

use crate::{
    OptimizerError,
    solver::{
        schedule::{ScheduleEntry, ScheduleItem},
        solution::Solution,
    },
};

/// Uniform crossover at the granularity of a schedule slot.
///
/// Both children walk every (intersection, position) pair and take the slot
/// of one parent or the other with a fair coin, drawn independently for each
/// child. Parents must have the same shape.
///
/// Parents whose entries list the same streets in a different order can
/// produce an entry scheduling a street twice. Such duplicates are handed to
/// the streets that went missing, keeping the inherited duration.
pub fn crossover(
    parent_a: &Solution,
    parent_b: &Solution,
    rng: &mut impl Rng,
) -> Result<(Solution, Solution), OptimizerError> {
    if !parent_a.has_same_shape(parent_b) {
        return Err(OptimizerError::precondition(
            "crossover parents have different shapes",
        ));
    }

    Ok((
        uniform_child(parent_a, parent_b, rng),
        uniform_child(parent_b, parent_a, rng),
    ))
}

fn uniform_child(first: &Solution, second: &Solution, rng: &mut impl Rng) -> Solution {
    let entries = first
        .entries()
        .iter()
        .zip(second.entries())
        .map(|(lhs, rhs)| {
            let items = lhs
                .items()
                .iter()
                .zip(rhs.items())
                .map(|(&lhs_item, &rhs_item)| {
                    if rng.random_bool(0.5) {
                        lhs_item
                    } else {
                        rhs_item
                    }
                })
                .collect::<Vec<_>>();

            let mut entry = ScheduleEntry::new(items);
            repair_duplicates(&mut entry, lhs);
            entry
        })
        .collect();

    Solution::new(entries)
}

fn repair_duplicates(entry: &mut ScheduleEntry, reference: &ScheduleEntry) {
    let mut seen = FxHashSet::default();
    let mut duplicates: Vec<usize> = vec![];

    for (position, item) in entry.items().iter().enumerate() {
        if !seen.insert(item.street) {
            duplicates.push(position);
        }
    }

    if duplicates.is_empty() {
        return;
    }

    let mut missing = reference
        .items()
        .iter()
        .map(|item| item.street)
        .filter(|street| !seen.contains(street));

    let items = entry.items_mut();
    for position in duplicates {
        if let Some(street) = missing.next() {
            items[position] = ScheduleItem::new(street, items[position].duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{problem::intersection::IntersectionIdx, test_utils};

    use super::*;

    #[test]
    fn test_crossover_with_itself_is_identity() {
        let problem = test_utils::create_hashcode_example_problem();
        let parent = test_utils::create_uniform_solution(&problem, 2);
        let mut rng = test_utils::seeded_rng(11);

        for _ in 0..10 {
            let (child_a, child_b) = crossover(&parent, &parent, &mut rng).unwrap();
            assert_eq!(child_a, parent);
            assert_eq!(child_b, parent);
        }
    }

    #[test]
    fn test_crossover_mixes_parent_slots() {
        let problem = test_utils::create_hashcode_example_problem();
        let parent_a = test_utils::create_uniform_solution(&problem, 1);
        let parent_b = test_utils::create_uniform_solution(&problem, 5);
        let mut rng = test_utils::seeded_rng(5);

        for _ in 0..20 {
            let (child_a, child_b) = crossover(&parent_a, &parent_b, &mut rng).unwrap();
            for child in [&child_a, &child_b] {
                assert!(child.has_same_shape(&parent_a));
                assert!(child.validate(&problem).is_ok());
                for entry in child.entries() {
                    assert!(
                        entry
                            .items()
                            .iter()
                            .all(|item| item.duration == 1 || item.duration == 5)
                    );
                }
            }
        }
    }

    #[test]
    fn test_crossover_repairs_duplicated_streets() {
        let problem = test_utils::create_hashcode_example_problem();
        let parent_a = test_utils::create_uniform_solution(&problem, 1);
        let mut parent_b = parent_a.clone();

        // Intersection 1 has two incoming streets, list them the other way round
        parent_b
            .entry_mut(IntersectionIdx::new(1))
            .reverse_range(0, 1);

        let mut rng = test_utils::seeded_rng(8);
        for _ in 0..50 {
            let (child_a, child_b) = crossover(&parent_a, &parent_b, &mut rng).unwrap();
            assert!(child_a.validate(&problem).is_ok());
            assert!(child_b.validate(&problem).is_ok());
        }
    }

    #[test]
    fn test_crossover_rejects_different_shapes() {
        let problem = test_utils::create_hashcode_example_problem();
        let parent = test_utils::create_uniform_solution(&problem, 1);
        let mut rng = test_utils::seeded_rng(0);

        assert!(matches!(
            crossover(&parent, &Solution::empty(4), &mut rng),
            Err(OptimizerError::PreconditionViolation(_))
        ));
    }
}
