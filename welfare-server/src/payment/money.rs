//! Currency unit conversion using rust_decimal

use rust_decimal::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("amount {0} does not fit in minor units")]
pub struct MinorUnitsError(pub Decimal);

/// Convert a currency amount to integer minor units (cents).
///
/// Sub-cent remainders round half away from zero, so 10.005 becomes 1001.
pub fn to_minor_units(amount: Decimal) -> Result<i64, MinorUnitsError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .ok_or(MinorUnitsError(amount))
}
