use crate::error::DataError;
use crate::types::{SalesEntry, StockRow, SurplusEntry, ITEM_COUNT};

/// Stock minus sales for every item. Positive values are waste, negative
/// values are extra made after an item sold out.
pub fn calculate_surplus(stock: &StockRow, sales: &SalesEntry) -> Result<SurplusEntry, DataError> {
    let mut surplus = [0i64; ITEM_COUNT];
    for (i, ((slot, stock), sales)) in surplus
        .iter_mut()
        .zip(&stock.0)
        .zip(&sales.0)
        .enumerate()
    {
        *slot = stock
            .checked_sub(*sales)
            .ok_or(DataError::SurplusOverflow(i + 1))?;
    }
    Ok(SurplusEntry(surplus))
}
