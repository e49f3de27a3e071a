mod error;
pub mod parsers;
pub mod problem;
pub mod selector;
pub mod solver;
mod utils;

pub use error::OptimizerError;

#[cfg(test)]
pub(crate) mod test_utils;
