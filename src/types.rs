// src/types.rs
use crate::error::DataError;
use std::fmt;

/// Number of sandwich types tracked per market cycle, one column each.
pub const ITEM_COUNT: usize = 6;

pub type Row = [i64; ITEM_COUNT];

/// Sales figures from one market, as entered by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesEntry(pub Row);

/// Last known stock per item, taken from the bottom of the stock sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockRow(pub Row);

/// Stock minus sales. Positive means waste, negative means the item sold out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurplusEntry(pub Row);

/// Recommended stock for the next market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastEntry(pub Row);

/// Anything that can be written to a worksheet as one row.
pub trait SheetRow {
    fn values(&self) -> &Row;
}

macro_rules! impl_sheet_row {
    ($($ty:ty),*) => {
        $(
            impl SheetRow for $ty {
                fn values(&self) -> &Row {
                    &self.0
                }
            }
        )*
    };
}

impl_sheet_row!(SalesEntry, SurplusEntry, ForecastEntry);

impl StockRow {
    /// Parses a raw worksheet row. Every cell must hold an integer and the
    /// row must be exactly `ITEM_COUNT` wide.
    pub fn from_cells(sheet: &str, cells: &[String]) -> Result<Self, DataError> {
        if cells.len() != ITEM_COUNT {
            return Err(DataError::DataShape {
                sheet: sheet.to_string(),
                expected: ITEM_COUNT,
                found: cells.len(),
            });
        }

        let mut row = [0i64; ITEM_COUNT];
        for (slot, cell) in row.iter_mut().zip(cells) {
            *slot = parse_cell(sheet, cell)?;
        }
        Ok(Self(row))
    }
}

/// Reads a single integer cell as returned by the spreadsheet service.
pub fn parse_cell(sheet: &str, cell: &str) -> Result<i64, DataError> {
    cell.trim()
        .parse::<i64>()
        .map_err(|_| DataError::NotAnInteger {
            sheet: sheet.to_string(),
            value: cell.to_string(),
        })
}

/// Forecast values paired with the item headings of the stock sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRecommendation {
    pub items: Vec<(String, i64)>,
}

impl StockRecommendation {
    pub fn new(headings: &[String], forecast: &ForecastEntry) -> Self {
        let items = forecast
            .0
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let heading = headings
                    .get(i)
                    .map(|h| h.trim())
                    .filter(|h| !h.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("item {}", i + 1));
                (heading, *value)
            })
            .collect();
        Self { items }
    }
}

impl fmt::Display for StockRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Make the following numbers of sandwiches for the next market:"
        )?;
        for (heading, value) in &self.items {
            writeln!(f, "  {}: {}", heading, value)?;
        }
        Ok(())
    }
}
