pub mod construction;
pub mod evaluation;
pub mod genetic_search;
pub mod operators;
pub mod population;
pub mod schedule;
pub mod score;
pub mod scored_solution;
pub mod solution;
pub mod solver;
pub mod solver_params;
pub mod statistics;
