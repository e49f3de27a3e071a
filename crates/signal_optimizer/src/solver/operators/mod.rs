pub mod crossover;
pub mod inversion;
pub mod mutation;
