use anchor_lang::prelude::Result;
use anchor_lang::require;
use borsh::{BorshDeserialize, BorshSerialize};

use crate::{ErrorCode, DEFAULT_FEE_DENOMINATOR, DEFAULT_FEE_NUMERATOR};

/// Swap fee as an exact rational: `numerator / denominator` of every input
/// is retained by the pool.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeRate {
    pub numerator: u128,
    pub denominator: u128,
}

impl FeeRate {
    pub const ZERO: FeeRate = FeeRate { numerator: 0, denominator: 1 };
    pub const THIRTY_BPS: FeeRate = FeeRate { numerator: 3, denominator: 1_000 };
    pub const ONE_PERCENT: FeeRate = FeeRate { numerator: 1, denominator: 100 };

    pub fn new(numerator: u128, denominator: u128) -> Result<Self> {
        let fee = FeeRate { numerator, denominator };
        fee.validate()?;
        Ok(fee)
    }

    /// A fee of 100% or more would make every quote zero.
    pub fn validate(&self) -> Result<()> {
        require!(
            self.denominator > 0 && self.numerator < self.denominator,
            ErrorCode::InvalidFeeRate
        );
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        FeeRate {
            numerator: DEFAULT_FEE_NUMERATOR,
            denominator: DEFAULT_FEE_DENOMINATOR,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AmmConfig {
    pub fee: FeeRate,
}

impl AmmConfig {
    pub fn new(fee: FeeRate) -> Result<Self> {
        fee.validate()?;
        Ok(AmmConfig { fee })
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    /// Sell asset A, receive asset B
    AToB,
    /// Sell asset B, receive asset A
    BToA,
}

/// Point-in-time view of a pool, as reported by the ledger. May already be
/// stale when a quote computed from it is settled.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReserveSnapshot {
    pub reserve_a: u128,
    pub reserve_b: u128,
    pub total_shares: u128,
}

impl ReserveSnapshot {
    pub fn new(reserve_a: u128, reserve_b: u128, total_shares: u128) -> Self {
        ReserveSnapshot {
            reserve_a,
            reserve_b,
            total_shares,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_shares == 0
    }

    /// Both reserves are zero exactly when no shares are outstanding.
    pub fn is_consistent(&self) -> bool {
        (self.reserve_a == 0 && self.reserve_b == 0) == (self.total_shares == 0)
    }

    /// `(input_reserve, output_reserve)` for a swap in `direction`
    pub fn reserves(&self, direction: SwapDirection) -> (u128, u128) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    pub fn after_swap(&self, quote: &SwapQuote) -> Result<Self> {
        let (input_reserve, output_reserve) = self.reserves(quote.direction);
        let new_input = input_reserve
            .checked_add(quote.input_amount)
            .ok_or(ErrorCode::QuoteOverflow)?;
        let new_output = output_reserve
            .checked_sub(quote.output_amount)
            .ok_or(ErrorCode::InvalidReserve)?;
        let (reserve_a, reserve_b) = match quote.direction {
            SwapDirection::AToB => (new_input, new_output),
            SwapDirection::BToA => (new_output, new_input),
        };
        Ok(ReserveSnapshot::new(reserve_a, reserve_b, self.total_shares))
    }

    pub fn after_deposit(&self, deposit: &LiquidityDeposit) -> Result<Self> {
        Ok(ReserveSnapshot::new(
            self.reserve_a
                .checked_add(deposit.deposit_a)
                .ok_or(ErrorCode::QuoteOverflow)?,
            self.reserve_b
                .checked_add(deposit.deposit_b)
                .ok_or(ErrorCode::QuoteOverflow)?,
            self.total_shares
                .checked_add(deposit.minted_shares)
                .ok_or(ErrorCode::QuoteOverflow)?,
        ))
    }

    pub fn after_withdrawal(&self, withdrawal: &LiquidityWithdrawal) -> Result<Self> {
        Ok(ReserveSnapshot::new(
            self.reserve_a
                .checked_sub(withdrawal.returned_a)
                .ok_or(ErrorCode::EmptyReserve)?,
            self.reserve_b
                .checked_sub(withdrawal.returned_b)
                .ok_or(ErrorCode::EmptyReserve)?,
            self.total_shares
                .checked_sub(withdrawal.burned_shares)
                .ok_or(ErrorCode::InsufficientShares)?,
        ))
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    pub input_amount: u128,
    pub output_amount: u128,
    pub fee: FeeRate,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepositKind {
    /// First deposit into an empty pool; sets the initial price
    Seed,
    /// Matches the existing reserve ratio
    Proportional,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityDeposit {
    pub kind: DepositKind,
    pub deposit_a: u128,
    pub deposit_b: u128,
    pub minted_shares: u128,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityWithdrawal {
    pub burned_shares: u128,
    pub returned_a: u128,
    pub returned_b: u128,
}
