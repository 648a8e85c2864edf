#[cfg(test)]
pub mod memory;
pub mod messages;
pub mod sheets;
pub mod traits;
