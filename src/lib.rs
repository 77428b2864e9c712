//! Constant-product AMM math
//!
//! This library provides the integer pricing and accounting for a two-asset
//! constant-product pool: swap quotes, liquidity deposits and withdrawals.
//! Every function is pure over a caller-supplied [`ReserveSnapshot`]; state
//! changes happen in the ledger behind [`ledger::Settlement`].

pub mod swap;
pub mod liquidity;
pub mod state;
pub mod errors;
pub mod utils;
pub mod constants;
pub mod ledger;
// Re-export functions for convenience
pub use swap::{quote, quote_swap};
pub use liquidity::{deposit_lp, withdraw_lp};
pub use state::{
    AmmConfig, DepositKind, FeeRate, LiquidityDeposit, LiquidityWithdrawal, ReserveSnapshot,
    SwapDirection, SwapQuote,
};
pub use errors::ErrorCode;
pub use utils::*;
pub use constants::*;
pub use ledger::{MemoryLedger, ReserveSource, Settlement};
