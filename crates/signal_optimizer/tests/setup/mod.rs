#![allow(dead_code)]

use rand::{SeedableRng, rngs::SmallRng};
use signal_optimizer::{
    parsers::hashcode,
    problem::traffic_signaling_problem::{TrafficSignalingProblem, TrafficSignalingProblemBuilder},
    solver::solver_params::{SolverParams, Termination, Threads},
};

pub const HASHCODE_EXAMPLE: &str = "6 4 5 2 1000
2 0 rue-de-londres 1
0 1 rue-d-amsterdam 1
3 1 rue-d-athenes 1
2 3 rue-de-rome 2
1 2 rue-de-moscou 3
4 rue-de-londres rue-d-amsterdam rue-de-moscou rue-de-rome
3 rue-d-athenes rue-de-moscou rue-de-londres
";

pub fn create_hashcode_example_problem() -> TrafficSignalingProblem {
    hashcode::parse(HASHCODE_EXAMPLE).unwrap()
}

/// Two intersections joined by `A` (0 -> 1, length 2) and `B` (1 -> 0,
/// length 3), one car driving `A` then `B`.
pub fn create_loop_problem(duration: u32, bonus: u32) -> TrafficSignalingProblem {
    let mut builder = TrafficSignalingProblemBuilder::default();
    builder
        .set_duration(duration)
        .set_bonus(bonus)
        .set_intersection_count(2)
        .add_street("A", 0, 1, 2)
        .add_street("B", 1, 0, 3)
        .add_car(["A", "B"]);

    builder.build().unwrap()
}

/// A `size` x `size` grid with streets in both directions between
/// neighbours and cars driving pseudo-random walks.
pub fn create_grid_problem(size: usize, car_count: usize, seed: u64) -> TrafficSignalingProblem {
    use rand::Rng;

    let mut builder = TrafficSignalingProblemBuilder::default();
    builder
        .set_duration(200)
        .set_bonus(100)
        .set_intersection_count(size * size);

    let mut outgoing = vec![Vec::new(); size * size];
    let mut add = |builder: &mut TrafficSignalingProblemBuilder, from: usize, to: usize| {
        let name = format!("s{from}-{to}");
        builder.add_street(name.clone(), from, to, 1 + ((from + to) % 4) as u32);
        outgoing[from].push(name);
    };

    for row in 0..size {
        for column in 0..size {
            let node = row * size + column;
            if column + 1 < size {
                add(&mut builder, node, node + 1);
                add(&mut builder, node + 1, node);
            }
            if row + 1 < size {
                add(&mut builder, node, node + size);
                add(&mut builder, node + size, node);
            }
        }
    }

    let mut rng = seeded_rng(seed);
    for _ in 0..car_count {
        let mut node = rng.random_range(0..size * size);
        let mut path = Vec::new();
        for _ in 0..rng.random_range(2..8) {
            let streets = &outgoing[node];
            let street = &streets[rng.random_range(0..streets.len())];
            node = street
                .rsplit_once('-')
                .and_then(|(_, to)| to.parse().ok())
                .unwrap();
            path.push(street.clone());
        }
        builder.add_car(path);
    }

    builder.build().unwrap()
}

pub fn create_test_params(generations: usize, seed: u64) -> SolverParams {
    SolverParams {
        terminations: vec![Termination::Generations(generations)],
        population_size: 10,
        evaluation_threads: Threads::Multi(2),
        seed: Some(seed),
        ..SolverParams::default()
    }
}

pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
