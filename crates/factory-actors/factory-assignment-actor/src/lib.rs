pub mod algorithm;
pub mod assert_functions;

pub use algorithm::AssignmentAlgorithm;
