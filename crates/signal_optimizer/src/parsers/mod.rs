pub mod hashcode;
pub mod parser;
pub mod submission;
