use rand::Rng;
use tracing::warn;

use crate::{
    problem::traffic_signaling_problem::TrafficSignalingProblem,
    solver::{
        construction::cycle_times::CycleTimes,
        schedule::{ScheduleEntry, ScheduleItem},
        solution::Solution,
    },
};

/// Builds a random schedule.
///
/// Every intersection draws its own cycle time, then its incoming streets are
/// visited in declaration order: each one gets a uniform share of what is
/// left of the cycle and the last one gets the remainder, so every entry sums
/// to its cycle time.
pub fn init_solution(
    problem: &TrafficSignalingProblem,
    cycle_times: &CycleTimes,
    rng: &mut impl Rng,
) -> Solution {
    let entries = problem
        .intersections_iter()
        .map(|(intersection_id, intersection)| {
            let incoming_streets = intersection.incoming_streets();
            let Some((&last_street, other_streets)) = incoming_streets.split_last() else {
                warn!("Intersection {intersection_id} has no incoming street");
                return ScheduleEntry::default();
            };

            let cycle_time = cycle_times.choose(rng);
            let mut entry = ScheduleEntry::new(Vec::with_capacity(incoming_streets.len()));
            let mut assigned = 0;

            for &street in other_streets {
                let duration = rng.random_range(0..=cycle_time - assigned);
                assigned += duration;
                entry.push(ScheduleItem::new(street, duration));
            }

            entry.push(ScheduleItem::new(
                last_street,
                cycle_time.saturating_sub(assigned),
            ));

            entry
        })
        .collect();

    Solution::new(entries)
}
