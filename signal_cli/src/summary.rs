use comfy_table::{Cell, Table, presets::UTF8_FULL};
use jiff::SignedDuration;
use signal_optimizer::{
    problem::traffic_signaling_problem::TrafficSignalingProblem,
    solver::{evaluation::evaluate_solution_summary, solution::Solution},
};

pub fn print_summary(
    problem: &TrafficSignalingProblem,
    solution: &Solution,
    elapsed: Option<SignedDuration>,
) {
    let summary = evaluate_solution_summary(problem, solution);
    let arrival =
        |arrival: Option<u32>| arrival.map_or_else(|| String::from("-"), |t| format!("{t}s"));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Score"), Cell::new(summary.score)]);
    table.add_row(vec![Cell::new("Upper bound"), Cell::new(problem.max_score())]);
    table.add_row(vec![
        Cell::new("Finished cars"),
        Cell::new(format!("{} / {}", summary.finished_cars, problem.cars().len())),
    ]);
    table.add_row(vec![
        Cell::new("Scheduled intersections"),
        Cell::new(format!(
            "{} / {}",
            solution.scheduled_intersection_count(),
            problem.intersection_count()
        )),
    ]);
    table.add_row(vec![
        Cell::new("Earliest arrival"),
        Cell::new(arrival(summary.earliest_arrival)),
    ]);
    table.add_row(vec![
        Cell::new("Latest arrival"),
        Cell::new(arrival(summary.latest_arrival)),
    ]);

    if let Some(elapsed) = elapsed {
        table.add_row(vec![Cell::new("Elapsed"), Cell::new(format!("{elapsed:#}"))]);
    }

    println!("{table}");
}
