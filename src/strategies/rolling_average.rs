use crate::config::ForecastConfig;
use crate::error::DataError;
use crate::strategies::traits::{SalesHistory, StockStrategy};
use crate::types::{ForecastEntry, ITEM_COUNT};
use crate::utils::precision::{mean, pad_and_round};
use rust_decimal::Decimal;

pub struct PaddedRollingAverage {
    window: usize,
    margin: Decimal,
    sheet: String,
}

impl PaddedRollingAverage {
    /// Creates the strategy.
    ///
    /// # Arguments
    /// * `window` - How many recent sales rows to average (e.g. 5).
    /// * `margin` - Multiplier applied to the average (e.g. 1.1 for +10%).
    /// * `sheet` - Name of the sales worksheet, used in error messages.
    pub fn new(window: usize, margin: Decimal, sheet: impl Into<String>) -> Self {
        Self {
            window: window.max(1),
            margin,
            sheet: sheet.into(),
        }
    }

    pub fn from_config(config: &ForecastConfig, sheet: impl Into<String>) -> Self {
        Self::new(config.window, config.margin, sheet)
    }
}

impl StockStrategy for PaddedRollingAverage {
    fn name(&self) -> String {
        format!("padded rolling average (last {}, x{})", self.window, self.margin)
    }

    fn window(&self) -> usize {
        self.window
    }

    fn recommend(&self, history: &SalesHistory) -> Result<ForecastEntry, DataError> {
        let mut forecast = [0i64; ITEM_COUNT];

        for (i, (slot, column)) in forecast.iter_mut().zip(&history.columns).enumerate() {
            // Shorter histories average over whatever rows exist.
            let start = column.len().saturating_sub(self.window);
            let average = mean(&column[start..]).ok_or_else(|| DataError::InsufficientHistory {
                sheet: self.sheet.clone(),
                column: i + 1,
            })?;
            *slot = pad_and_round(average, self.margin).ok_or(DataError::Overflow(i + 1))?;
        }

        Ok(ForecastEntry(forecast))
    }
}
