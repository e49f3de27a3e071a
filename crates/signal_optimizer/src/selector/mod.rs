pub mod select_roulette;
pub mod select_solution;
pub mod select_tournament;
pub mod solution_selector;
