// src/utils/precision.rs
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Arithmetic mean of the given values. `None` for an empty slice.
pub fn mean(values: &[i64]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().copied().map(Decimal::from).sum();
    Some(sum / Decimal::from(values.len()))
}

/// Rounds to the nearest whole number, ties away from zero.
/// Example: 15.4 -> 15, 16.5 -> 17, -2.5 -> -3
pub fn round_to_units(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Pads an average by `margin` and rounds it to a whole stock count.
/// Example: average=14, margin=1.1 -> 15
pub fn pad_and_round(average: Decimal, margin: Decimal) -> Option<i64> {
    round_to_units(average.checked_mul(margin)?)
}
