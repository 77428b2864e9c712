//! Liquidity operations for DEX
//!
//! This module provides mathematical functions for liquidity pool operations
//! including deposits and withdrawals. All divisions floor, so rounding dust
//! stays with the pool.

use anchor_lang::prelude::*;
use log::debug;

use crate::{
    state::{DepositKind, LiquidityDeposit, LiquidityWithdrawal, ReserveSnapshot},
    utils::mul_div_floor,
    ErrorCode,
};

/// Calculate the counterpart deposit and the LP shares minted for a deposit
///
/// # Arguments
/// * `desired_a` - Amount of token A the provider wants to deposit
/// * `seed_b` - Amount of token B for the first deposit; ignored once the
///   pool has shares, since the reserve ratio then fixes it
/// * `snapshot` - Current pool reserves and share supply
///
/// # Returns
/// A `Seed` deposit minting `desired_a` shares when the pool is empty,
/// otherwise a `Proportional` deposit with
/// `deposit_b = floor(desired_a * reserve_b / reserve_a)` and
/// `minted_shares = floor(desired_a * total_shares / reserve_a)`.
pub fn deposit_lp(
    desired_a: u128,
    seed_b: u128,
    snapshot: &ReserveSnapshot,
) -> Result<LiquidityDeposit> {
    require!(desired_a > 0, ErrorCode::ZeroDeposit);

    if snapshot.is_empty() {
        // Initial liquidity provision sets the price; shares are 1:1 with token A
        require!(seed_b > 0, ErrorCode::ZeroDeposit);
        debug!("deposit_lp: seeding pool with a={} b={}", desired_a, seed_b);
        return Ok(LiquidityDeposit {
            kind: DepositKind::Seed,
            deposit_a: desired_a,
            deposit_b: seed_b,
            minted_shares: desired_a,
        });
    }

    if snapshot.reserve_a == 0 || snapshot.reserve_b == 0 {
        return err!(ErrorCode::EmptyReserve);
    }

    let deposit_b = mul_div_floor(desired_a, snapshot.reserve_b, snapshot.reserve_a)
        .ok_or(ErrorCode::QuoteOverflow)?;
    let minted_shares = mul_div_floor(desired_a, snapshot.total_shares, snapshot.reserve_a)
        .ok_or(ErrorCode::QuoteOverflow)?;

    debug!(
        "deposit_lp: a={} requires b={} mints {} of {} shares",
        desired_a, deposit_b, minted_shares, snapshot.total_shares
    );

    Ok(LiquidityDeposit {
        kind: DepositKind::Proportional,
        deposit_a: desired_a,
        deposit_b,
        minted_shares,
    })
}

/// Calculate the amount of tokens to return for a withdrawal
///
/// # Arguments
/// * `burned_shares` - Amount of LP tokens being burned
/// * `snapshot` - Current pool reserves and share supply
///
/// # Returns
/// `floor(reserve * burned_shares / total_shares)` of each token
pub fn withdraw_lp(burned_shares: u128, snapshot: &ReserveSnapshot) -> Result<LiquidityWithdrawal> {
    if snapshot.total_shares == 0 || burned_shares > snapshot.total_shares {
        return err!(ErrorCode::InsufficientShares);
    }
    require!(burned_shares > 0, ErrorCode::ZeroInput);

    let returned_a = mul_div_floor(snapshot.reserve_a, burned_shares, snapshot.total_shares)
        .ok_or(ErrorCode::QuoteOverflow)?;
    let returned_b = mul_div_floor(snapshot.reserve_b, burned_shares, snapshot.total_shares)
        .ok_or(ErrorCode::QuoteOverflow)?;

    debug!(
        "withdraw_lp: burn {} of {} shares returns a={} b={}",
        burned_shares, snapshot.total_shares, returned_a, returned_b
    );

    Ok(LiquidityWithdrawal {
        burned_shares,
        returned_a,
        returned_b,
    })
}
