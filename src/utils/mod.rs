pub mod a1;
pub mod precision;
