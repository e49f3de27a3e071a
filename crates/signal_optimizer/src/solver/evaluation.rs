use fxhash::FxHashSet;
use serde::Serialize;

use crate::{
    problem::{
        car::{Car, CarIdx},
        intersection::IntersectionIdx,
        traffic_signaling_problem::TrafficSignalingProblem,
    },
    solver::{score::Score, solution::Solution},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarOutcome {
    /// Reached the end of its final street at `arrival`.
    Finished { arrival: u32 },
    /// Ran out of time, or got stuck behind a light that never turns green.
    Unfinished,
}

/// Replays the trip of a single car under `solution`.
///
/// The car starts at time 0 queued at the end of its first street. Cars do
/// not interact, so a green light lets the car through immediately and it
/// then needs the full length of the next street to reach its end.
pub fn simulate_car(
    problem: &TrafficSignalingProblem,
    solution: &Solution,
    car: &Car,
) -> CarOutcome {
    let duration = problem.duration();
    let path = car.path();
    let last = path.len() - 1;

    let mut time = 0u32;
    let mut index = 0;

    while index < last {
        if time >= duration {
            return CarOutcome::Unfinished;
        }

        let street_id = path[index];
        let entry = solution.entry(problem.street(street_id).end());
        if !entry.schedules(street_id) {
            return CarOutcome::Unfinished;
        }

        match entry.green_light(time) {
            None => return CarOutcome::Unfinished,
            Some(window) if window.street == street_id => {
                index += 1;
                time = time.saturating_add(problem.street(path[index]).length());
            }
            Some(window) => {
                time = time.saturating_add(window.remaining);
            }
        }
    }

    let final_street = car.final_street();
    let destination = solution.entry(problem.street(final_street).end());
    if !destination.schedules(final_street) || time > duration {
        return CarOutcome::Unfinished;
    }

    CarOutcome::Finished { arrival: time }
}

pub fn car_score(problem: &TrafficSignalingProblem, outcome: CarOutcome) -> Score {
    match outcome {
        CarOutcome::Finished { arrival } => {
            Score::new(problem.bonus() as u64 + (problem.duration() - arrival) as u64)
        }
        CarOutcome::Unfinished => Score::ZERO,
    }
}

fn score_car(problem: &TrafficSignalingProblem, solution: &Solution, car_id: CarIdx) -> Score {
    car_score(problem, simulate_car(problem, solution, problem.car(car_id)))
}

/// Full evaluation: the sum of every car's contribution.
///
/// `solution` must have one entry per intersection of `problem`.
pub fn evaluate_solution(problem: &TrafficSignalingProblem, solution: &Solution) -> Score {
    problem
        .cars()
        .iter()
        .map(|car| car_score(problem, simulate_car(problem, solution, car)))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvaluationSummary {
    pub score: Score,
    pub finished_cars: usize,
    pub earliest_arrival: Option<u32>,
    pub latest_arrival: Option<u32>,
}

pub fn evaluate_solution_summary(
    problem: &TrafficSignalingProblem,
    solution: &Solution,
) -> EvaluationSummary {
    let mut summary = EvaluationSummary {
        score: Score::ZERO,
        finished_cars: 0,
        earliest_arrival: None,
        latest_arrival: None,
    };

    for car in problem.cars() {
        let outcome = simulate_car(problem, solution, car);
        if let CarOutcome::Finished { arrival } = outcome {
            summary.finished_cars += 1;
            summary.earliest_arrival = Some(
                summary
                    .earliest_arrival
                    .map_or(arrival, |earliest| earliest.min(arrival)),
            );
            summary.latest_arrival = Some(
                summary
                    .latest_arrival
                    .map_or(arrival, |latest| latest.max(arrival)),
            );
        }
        summary.score += car_score(problem, outcome);
    }

    summary
}

/// Re-scores `new_solution`, which differs from `old_solution` only at
/// `mutated_intersection`, by replaying the cars crossing that intersection.
///
/// Equals `evaluate_solution(problem, new_solution)` whenever `old_score` is
/// the full score of `old_solution` and no other entry differs.
pub fn evaluate_solution_delta(
    problem: &TrafficSignalingProblem,
    old_solution: &Solution,
    new_solution: &Solution,
    old_score: Score,
    mutated_intersection: IntersectionIdx,
) -> Score {
    let cars = problem.intersection(mutated_intersection).cars();
    rescore_cars(
        problem,
        old_solution,
        new_solution,
        old_score,
        cars.iter().copied(),
    )
}

/// Same as [`evaluate_solution_delta`] when several intersections changed.
/// Cars crossing more than one of them are replayed once.
pub fn evaluate_solution_delta_many(
    problem: &TrafficSignalingProblem,
    old_solution: &Solution,
    new_solution: &Solution,
    old_score: Score,
    mutated_intersections: &[IntersectionIdx],
) -> Score {
    match mutated_intersections {
        [] => old_score,
        [intersection] => {
            evaluate_solution_delta(problem, old_solution, new_solution, old_score, *intersection)
        }
        intersections => {
            let cars = intersections
                .iter()
                .flat_map(|&intersection| problem.intersection(intersection).cars())
                .copied()
                .collect::<FxHashSet<_>>();
            rescore_cars(problem, old_solution, new_solution, old_score, cars.into_iter())
        }
    }
}

fn rescore_cars(
    problem: &TrafficSignalingProblem,
    old_solution: &Solution,
    new_solution: &Solution,
    old_score: Score,
    cars: impl Iterator<Item = CarIdx>,
) -> Score {
    let mut removed = Score::ZERO;
    let mut added = Score::ZERO;

    for car_id in cars {
        removed += score_car(problem, old_solution, car_id);
        added += score_car(problem, new_solution, car_id);
    }

    // Add before subtracting, `removed` is part of `old_score`.
    (old_score + added) - removed
}
