//! Gas pricing policy.
//!
//! Local networks always pay a fixed nominal price. Live networks take the
//! observed network price bumped by 10% so the transaction does not sit
//! pending through price volatility; if the price query fails, the fixed
//! nominal price is used instead.

use alloy_core::primitives::U256;

use crate::units;

/// Nominal gas price in gwei, used on local networks and as the fallback
/// when the live price query fails.
pub const NOMINAL_GAS_PRICE_GWEI: u64 = 10;

/// Numerator of the bump applied to an observed live gas price.
const BUMP_NUMERATOR: u64 = 110;
/// Denominator of the bump applied to an observed live gas price.
const BUMP_DENOMINATOR: u64 = 100;

/// The fixed nominal gas price in wei.
pub fn nominal_gas_price() -> U256 {
    units::gwei(NOMINAL_GAS_PRICE_GWEI)
}

/// Bump an observed gas price by 10%, in integer wei arithmetic.
pub fn bump_observed(observed: U256) -> U256 {
    observed * U256::from(BUMP_NUMERATOR) / U256::from(BUMP_DENOMINATOR)
}
