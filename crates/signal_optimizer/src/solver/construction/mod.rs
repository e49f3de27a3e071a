pub mod cycle_times;
pub mod init_solution;
