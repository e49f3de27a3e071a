use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    problem::{
        intersection::IntersectionIdx,
        traffic_signaling_problem::{TrafficSignalingProblem, TrafficSignalingProblemBuilder},
    },
    solver::{
        schedule::{ScheduleEntry, ScheduleItem},
        solution::Solution,
    },
};

pub struct TestStreet {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub length: u32,
}

pub fn create_test_problem(
    duration: u32,
    bonus: u32,
    intersection_count: usize,
    streets: &[TestStreet],
    cars: &[&[&str]],
) -> TrafficSignalingProblem {
    let mut builder = TrafficSignalingProblemBuilder::default();
    builder
        .set_duration(duration)
        .set_bonus(bonus)
        .set_intersection_count(intersection_count);

    for street in streets {
        builder.add_street(street.name, street.start, street.end, street.length);
    }

    for path in cars {
        builder.add_car(path.iter().copied());
    }

    builder.build().unwrap()
}

/// Two intersections joined by `A` (0 -> 1, length 2) and `B` (1 -> 0,
/// length 3), one car driving `A` then `B`.
pub fn create_loop_problem(duration: u32, bonus: u32) -> TrafficSignalingProblem {
    create_test_problem(
        duration,
        bonus,
        2,
        &[
            TestStreet {
                name: "A",
                start: 0,
                end: 1,
                length: 2,
            },
            TestStreet {
                name: "B",
                start: 1,
                end: 0,
                length: 3,
            },
        ],
        &[&["A", "B"]],
    )
}

/// The Hash Code 2021 qualification example network.
pub fn create_hashcode_example_problem() -> TrafficSignalingProblem {
    create_test_problem(
        6,
        1000,
        4,
        &[
            TestStreet {
                name: "rue-de-londres",
                start: 2,
                end: 0,
                length: 1,
            },
            TestStreet {
                name: "rue-d-amsterdam",
                start: 0,
                end: 1,
                length: 1,
            },
            TestStreet {
                name: "rue-d-athenes",
                start: 3,
                end: 1,
                length: 1,
            },
            TestStreet {
                name: "rue-de-rome",
                start: 2,
                end: 3,
                length: 2,
            },
            TestStreet {
                name: "rue-de-moscou",
                start: 1,
                end: 2,
                length: 3,
            },
        ],
        &[
            &["rue-de-londres", "rue-d-amsterdam", "rue-de-moscou", "rue-de-rome"],
            &["rue-d-athenes", "rue-de-moscou", "rue-de-londres"],
        ],
    )
}

/// The schedule published with the Hash Code example, scoring 1002.
pub fn create_hashcode_example_solution(problem: &TrafficSignalingProblem) -> Solution {
    let street = |name: &str| problem.street_id(name).unwrap();

    let mut solution = Solution::empty(problem.intersection_count());
    solution
        .entry_mut(IntersectionIdx::new(1))
        .push(ScheduleItem::new(street("rue-d-athenes"), 2));
    solution
        .entry_mut(IntersectionIdx::new(1))
        .push(ScheduleItem::new(street("rue-d-amsterdam"), 1));
    solution
        .entry_mut(IntersectionIdx::new(0))
        .push(ScheduleItem::new(street("rue-de-londres"), 2));
    solution
        .entry_mut(IntersectionIdx::new(2))
        .push(ScheduleItem::new(street("rue-de-moscou"), 1));

    solution
}

/// A schedule where every incoming street gets `duration`, in declaration
/// order.
pub fn create_uniform_solution(problem: &TrafficSignalingProblem, duration: u32) -> Solution {
    Solution::new(
        problem
            .intersections()
            .iter()
            .map(|intersection| {
                ScheduleEntry::new(
                    intersection
                        .incoming_streets()
                        .iter()
                        .map(|&street| ScheduleItem::new(street, duration))
                        .collect(),
                )
            })
            .collect(),
    )
}

pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
