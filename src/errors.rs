use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Pool reserve is zero, pool is not seeded")]
    InvalidReserve,
    #[msg("Pool has outstanding shares but an empty reserve")]
    EmptyReserve,
    #[msg("Deposit amount is zero")]
    ZeroDeposit,
    #[msg("Input amount is zero")]
    ZeroInput,
    #[msg("Not enough pool shares to burn")]
    InsufficientShares,
    #[msg("Quote overflow")]
    QuoteOverflow,
    #[msg("Invalid fee rate")]
    InvalidFeeRate,
    #[msg("Invalid slippage tolerance")]
    InvalidSlippage,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Invalid deposit, too few tokens")]
    TooFewTokensSupplied,
    #[msg("Unknown pool")]
    UnknownPool,
}

impl ErrorCode {
    /// Fatal errors mean the pool state or the implementation is broken; the
    /// dependent action must be blocked. Everything else is a caller input
    /// problem that can be fixed by asking for a different amount.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorCode::InvalidReserve
                | ErrorCode::EmptyReserve
                | ErrorCode::QuoteOverflow
                | ErrorCode::InvalidFeeRate
        )
    }
}
