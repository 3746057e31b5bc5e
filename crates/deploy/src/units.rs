//! Native-currency unit helpers.
//!
//! All on-chain amounts are [`U256`] wei; conversion to and from
//! human-readable units happens only at the boundary.

use alloy_core::primitives::U256;

/// Number of decimals of the native currency (wei per whole unit).
pub const NATIVE_DECIMALS: u32 = 18;

/// Convert a whole number of gwei to wei.
pub fn gwei(amount: u64) -> U256 {
    U256::from(amount) * U256::from(1_000_000_000u64)
}

/// Convert a whole number of native units (ether/BNB/POL) to wei.
pub fn ether(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(NATIVE_DECIMALS))
}

/// Format a fixed-point amount with the given number of decimals.
///
/// Trailing zeros in the fractional part are trimmed; whole values render
/// without a fractional part at all (`"1"`, not `"1.000000000000000000"`).
pub fn format_units(value: U256, decimals: u32) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / scale;
    let frac = value % scale;

    if frac.is_zero() {
        return whole.to_string();
    }

    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let frac = frac.trim_end_matches('0');
    format!("{whole}.{frac}")
}

/// Parse a hex quantity string (`0x`-prefixed) into a [`U256`].
pub fn parse_hex_quantity(s: &str) -> Result<U256, crate::DeployError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    U256::from_str_radix(digits, 16)
        .map_err(|e| crate::DeployError::network(format!("invalid hex quantity '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gwei_and_ether() {
        assert_eq!(gwei(1), U256::from(1_000_000_000u64));
        assert_eq!(gwei(10), U256::from(10_000_000_000u64));
        assert_eq!(ether(1), U256::from(10u64).pow(U256::from(18)));
        assert_eq!(ether(1) / U256::from(10), gwei(100_000_000));
    }

    #[test]
    fn test_format_units_whole() {
        assert_eq!(format_units(ether(1), 18), "1");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(ether(42), 18), "42");
    }

    #[test]
    fn test_format_units_fractional() {
        // 0.1 native units
        assert_eq!(format_units(ether(1) / U256::from(10), 18), "0.1");
        // 2M gas at 10 gwei is 0.02 native units
        assert_eq!(
            format_units(U256::from(2_000_000u64) * gwei(10), 18),
            "0.02"
        );
        // sub-gwei dust keeps its full precision
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn test_format_units_gwei_scale() {
        assert_eq!(format_units(gwei(10), 9), "10");
        assert_eq!(format_units(gwei(11), 9), "11");
        assert_eq!(format_units(U256::from(1_500_000_000u64), 9), "1.5");
    }

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(parse_hex_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_hex_quantity("0x1e8480").unwrap(), U256::from(2_000_000u64));
        assert!(parse_hex_quantity("0xzz").is_err());
    }
}
