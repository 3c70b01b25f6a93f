pub mod algorithm;
pub mod traits;
