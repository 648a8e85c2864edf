// src/strategies/traits.rs
use crate::error::DataError;
use crate::types::{ForecastEntry, ITEM_COUNT};

/// Recent sales per item column, oldest first. Headings are not included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesHistory {
    pub columns: [Vec<i64>; ITEM_COUNT],
}

pub trait StockStrategy: Send + Sync {
    fn name(&self) -> String;

    /// How many of the most recent sales rows the strategy looks at.
    fn window(&self) -> usize;

    /// Turns recent sales into next market's stock levels.
    fn recommend(&self, history: &SalesHistory) -> Result<ForecastEntry, DataError>;
}
