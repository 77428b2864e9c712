//! Swap operations for DEX
//!
//! Constant-product pricing with the fee taken off the input before it is
//! applied to the curve, so the fee stays in the pool.

use anchor_lang::prelude::*;
use log::debug;

use crate::{
    state::{AmmConfig, FeeRate, ReserveSnapshot, SwapDirection, SwapQuote},
    utils::{to_u128, U256},
    ErrorCode,
};

/// Calculate the output amount for a given input amount
///
/// # Arguments
/// * `input_amount` - The amount of input tokens
/// * `input_reserve` - The reserve of input tokens in the pool
/// * `output_reserve` - The reserve of output tokens in the pool
/// * `fee` - Fee retained by the pool
///
/// # Returns
/// `floor(e * output_reserve / (input_reserve * den + e))` where
/// `e = input_amount * (den - num)`. Zero input quotes zero.
pub fn quote(
    input_amount: u128,
    input_reserve: u128,
    output_reserve: u128,
    fee: &FeeRate,
) -> Result<u128> {
    if input_reserve == 0 || output_reserve == 0 {
        return err!(ErrorCode::InvalidReserve);
    }
    fee.validate()?;

    if input_amount == 0 {
        return Ok(0);
    }

    let fee_complement = fee
        .denominator
        .checked_sub(fee.numerator)
        .ok_or(ErrorCode::InvalidFeeRate)?;

    let effective_input = U256::from(input_amount)
        .checked_mul(U256::from(fee_complement))
        .ok_or(ErrorCode::QuoteOverflow)?;
    let numerator = effective_input
        .checked_mul(U256::from(output_reserve))
        .ok_or(ErrorCode::QuoteOverflow)?;
    let denominator = U256::from(input_reserve)
        .checked_mul(U256::from(fee.denominator))
        .and_then(|scaled_reserve| scaled_reserve.checked_add(effective_input))
        .ok_or(ErrorCode::QuoteOverflow)?;

    // denominator > 0: input_reserve > 0 and fee.denominator > 0
    let output_amount = to_u128(numerator / denominator).ok_or(ErrorCode::QuoteOverflow)?;

    // dev: e / (r * den + e) < 1, so the pool can never be drained
    if output_amount >= output_reserve {
        return err!(ErrorCode::QuoteOverflow);
    }

    debug!(
        "quote: in={} reserves=({}, {}) fee={}/{} out={}",
        input_amount, input_reserve, output_reserve, fee.numerator, fee.denominator, output_amount
    );

    Ok(output_amount)
}

/// Quote a swap against a reserve snapshot in the given direction.
pub fn quote_swap(
    snapshot: &ReserveSnapshot,
    direction: SwapDirection,
    input_amount: u128,
    amm_config: &AmmConfig,
) -> Result<SwapQuote> {
    let (input_reserve, output_reserve) = snapshot.reserves(direction);
    let output_amount = quote(input_amount, input_reserve, output_reserve, &amm_config.fee)?;

    Ok(SwapQuote {
        direction,
        input_amount,
        output_amount,
        fee: amm_config.fee,
    })
}
