//! Boundary with the ledger that owns the real pool state.
//!
//! The math in this crate never talks to a ledger. Callers read a
//! [`ReserveSnapshot`] through [`ReserveSource`], quote against it, and hand
//! the quote (as a slippage bound) to [`Settlement`]. [`MemoryLedger`] is an
//! in-process ledger that settles through the same math.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anchor_lang::prelude::*;
use log::{info, warn};

use crate::{
    liquidity::{deposit_lp, withdraw_lp},
    state::{AmmConfig, DepositKind, LiquidityDeposit, LiquidityWithdrawal, ReserveSnapshot, SwapDirection},
    swap::quote_swap,
    ErrorCode,
};

pub trait ReserveSource {
    /// Point-in-time reserves and share supply of `pool`
    fn get_reserves(&self, pool: &Pubkey) -> Result<ReserveSnapshot>;
}

pub trait Settlement {
    /// Swap `input_amount` in `direction`, failing if the pool would pay out
    /// less than `min_output_amount`. Returns the amount paid out.
    fn swap(
        &self,
        pool: &Pubkey,
        direction: SwapDirection,
        input_amount: u128,
        min_output_amount: u128,
    ) -> Result<u128>;

    /// Deposit `amount_a` of token A and at most `amount_b` of token B.
    fn provide_liquidity(
        &self,
        pool: &Pubkey,
        amount_a: u128,
        amount_b: u128,
    ) -> Result<LiquidityDeposit>;

    fn withdraw_liquidity(&self, pool: &Pubkey, shares: u128) -> Result<LiquidityWithdrawal>;
}

struct PoolEntry {
    config: AmmConfig,
    snapshot: ReserveSnapshot,
}

/// Ledger kept in memory. Every settlement holds the lock for the whole
/// read-quote-apply sequence, so operations on a pool are serialized.
#[derive(Default)]
pub struct MemoryLedger {
    pools: Mutex<HashMap<Pubkey, PoolEntry>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty pool and return its id.
    pub fn create_pool(&self, config: AmmConfig) -> Result<Pubkey> {
        config.fee.validate()?;
        let pool = Pubkey::new_unique();
        self.pools().insert(
            pool,
            PoolEntry {
                config,
                snapshot: ReserveSnapshot::default(),
            },
        );
        info!(
            "created pool {} with fee {}/{}",
            pool, config.fee.numerator, config.fee.denominator
        );
        Ok(pool)
    }

    pub fn config(&self, pool: &Pubkey) -> Result<AmmConfig> {
        self.pools()
            .get(pool)
            .map(|entry| entry.config)
            .ok_or_else(|| error!(ErrorCode::UnknownPool))
    }

    fn pools(&self) -> MutexGuard<'_, HashMap<Pubkey, PoolEntry>> {
        // pool entries are only replaced after every check passed, so a
        // poisoned lock still guards consistent state
        self.pools.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReserveSource for MemoryLedger {
    fn get_reserves(&self, pool: &Pubkey) -> Result<ReserveSnapshot> {
        self.pools()
            .get(pool)
            .map(|entry| entry.snapshot)
            .ok_or_else(|| error!(ErrorCode::UnknownPool))
    }
}

impl Settlement for MemoryLedger {
    fn swap(
        &self,
        pool: &Pubkey,
        direction: SwapDirection,
        input_amount: u128,
        min_output_amount: u128,
    ) -> Result<u128> {
        require!(input_amount > 0, ErrorCode::ZeroInput);

        let mut pools = self.pools();
        let entry = pools.get_mut(pool).ok_or(ErrorCode::UnknownPool)?;

        let quote = quote_swap(&entry.snapshot, direction, input_amount, &entry.config)?;
        if quote.output_amount < min_output_amount {
            warn!(
                "swap on {} rejected: output {} below minimum {}",
                pool, quote.output_amount, min_output_amount
            );
            return err!(ErrorCode::SlippageExceeded);
        }

        entry.snapshot = entry.snapshot.after_swap(&quote)?;
        info!(
            "swap on {}: {} in, {} out ({:?})",
            pool, input_amount, quote.output_amount, direction
        );
        Ok(quote.output_amount)
    }

    fn provide_liquidity(
        &self,
        pool: &Pubkey,
        amount_a: u128,
        amount_b: u128,
    ) -> Result<LiquidityDeposit> {
        let mut pools = self.pools();
        let entry = pools.get_mut(pool).ok_or(ErrorCode::UnknownPool)?;

        let deposit = deposit_lp(amount_a, amount_b, &entry.snapshot)?;
        if deposit.kind == DepositKind::Proportional && deposit.deposit_b > amount_b {
            warn!(
                "deposit on {} rejected: requires {} of token B, {} supplied",
                pool, deposit.deposit_b, amount_b
            );
            return err!(ErrorCode::TooFewTokensSupplied);
        }

        entry.snapshot = entry.snapshot.after_deposit(&deposit)?;
        info!(
            "deposit on {}: a={} b={} minted {} shares",
            pool, deposit.deposit_a, deposit.deposit_b, deposit.minted_shares
        );
        Ok(deposit)
    }

    fn withdraw_liquidity(&self, pool: &Pubkey, shares: u128) -> Result<LiquidityWithdrawal> {
        let mut pools = self.pools();
        let entry = pools.get_mut(pool).ok_or(ErrorCode::UnknownPool)?;

        let withdrawal = withdraw_lp(shares, &entry.snapshot)?;
        entry.snapshot = entry.snapshot.after_withdrawal(&withdrawal)?;
        info!(
            "withdraw on {}: burned {} shares for a={} b={}",
            pool, withdrawal.burned_shares, withdrawal.returned_a, withdrawal.returned_b
        );
        Ok(withdrawal)
    }
}
