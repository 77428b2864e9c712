/// Basis-point scale used for slippage tolerances (10_000 = 100%)
pub const MAX_BPS: u16 = 10_000;

/// Fee retained by the pool on every swap input, as `numerator / denominator`.
/// Same 1% the exchange contract charges (`input * 99 / 100`).
pub const DEFAULT_FEE_NUMERATOR: u128 = 1;
pub const DEFAULT_FEE_DENOMINATOR: u128 = 100;

/// Slippage tolerance applied by the CLI when none is given (0.5%)
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;
