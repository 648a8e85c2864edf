pub mod rolling_average;
pub mod traits;
