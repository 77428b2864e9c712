use anchor_lang::require;
use uint::construct_uint;

use crate::{ErrorCode, MAX_BPS};

construct_uint! {
    /// 256-bit unsigned integer for intermediate products of `u128` amounts.
    pub struct U256(4);
}

/// Narrow a 256-bit intermediate back to an amount, rejecting anything wider.
pub fn to_u128(value: U256) -> Option<u128> {
    if value.bits() > 128 {
        return None;
    }
    Some(value.low_u128())
}

/// floor(a * b / denominator), computed without intermediate truncation.
///
/// Returns `None` if `denominator` is zero or the result does not fit in `u128`.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let numerator = U256::from(a).checked_mul(U256::from(b))?;
    to_u128(numerator.checked_div(U256::from(denominator))?)
}

/// Minimum acceptable output for a quoted amount under a slippage tolerance.
///
/// The bound is floored so that a settlement matching the quote exactly is
/// always accepted.
pub fn min_output_with_slippage(
    quoted_output: u128,
    slippage_bps: u16,
) -> anchor_lang::Result<u128> {
    require!(slippage_bps <= MAX_BPS, ErrorCode::InvalidSlippage);
    let kept_bps = u128::from(MAX_BPS - slippage_bps);
    let bound =
        mul_div_floor(quoted_output, kept_bps, u128::from(MAX_BPS)).ok_or(ErrorCode::QuoteOverflow)?;
    Ok(bound)
}
