//! Command-line quoting front-end
//!
//! Quotes swaps, deposits and withdrawals against reserves given on the
//! command line. Amounts go in and come out as smallest-unit integers; the
//! decimal rendering next to them is display only.

use clap::{Parser, Subcommand};
use cpmm_math::{
    deposit_lp, min_output_with_slippage, quote, withdraw_lp, AmmConfig, DepositKind, FeeRate,
    MemoryLedger, ReserveSnapshot, ReserveSource, Settlement, SwapDirection, DEFAULT_FEE_DENOMINATOR,
    DEFAULT_FEE_NUMERATOR, DEFAULT_SLIPPAGE_BPS,
};
use log::{debug, error};

#[derive(Parser)]
#[command(name = "cpmm-math")]
#[command(about = "Quote constant-product AMM swaps and liquidity operations", long_about = None)]
#[command(version)]
struct Cli {
    /// Fee numerator (fee = numerator / denominator of each swap input)
    #[arg(long, default_value_t = DEFAULT_FEE_NUMERATOR)]
    fee_numerator: u128,

    /// Fee denominator
    #[arg(long, default_value_t = DEFAULT_FEE_DENOMINATOR)]
    fee_denominator: u128,

    /// Token decimals used when displaying amounts
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u8).range(0..=38))]
    decimals: u8,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the output of a swap
    Swap {
        /// Amount sold into the pool
        #[arg(long)]
        input: u128,

        /// Pool reserve of the token sold
        #[arg(long)]
        reserve_in: u128,

        /// Pool reserve of the token bought
        #[arg(long)]
        reserve_out: u128,

        /// Slippage tolerance for the minimum output (basis points)
        #[arg(long, default_value_t = DEFAULT_SLIPPAGE_BPS)]
        slippage_bps: u16,
    },

    /// Quote the token B and shares for a token A deposit
    Deposit {
        #[arg(long)]
        amount_a: u128,

        /// Token B for the first deposit into an empty pool
        #[arg(long, default_value_t = 0)]
        seed_b: u128,

        #[arg(long)]
        reserve_a: u128,

        #[arg(long)]
        reserve_b: u128,

        #[arg(long)]
        total_shares: u128,
    },

    /// Quote the tokens returned for burning pool shares
    Withdraw {
        #[arg(long)]
        shares: u128,

        #[arg(long)]
        reserve_a: u128,

        #[arg(long)]
        reserve_b: u128,

        #[arg(long)]
        total_shares: u128,
    },

    /// Seed, trade and drain an in-memory pool
    Demo,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(cli) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anchor_lang::Result<()> {
    let config = AmmConfig::new(FeeRate::new(cli.fee_numerator, cli.fee_denominator)?)?;
    let decimals = cli.decimals;
    debug!("fee {}/{}", config.fee.numerator, config.fee.denominator);

    match cli.command {
        Commands::Swap {
            input,
            reserve_in,
            reserve_out,
            slippage_bps,
        } => {
            let output = quote(input, reserve_in, reserve_out, &config.fee)?;
            let min_output = min_output_with_slippage(output, slippage_bps)?;
            println!("You will get {} ({})", output, format_units(output, decimals));
            println!(
                "Minimum output at {} bps slippage: {} ({})",
                slippage_bps,
                min_output,
                format_units(min_output, decimals)
            );
        }
        Commands::Deposit {
            amount_a,
            seed_b,
            reserve_a,
            reserve_b,
            total_shares,
        } => {
            let snapshot = ReserveSnapshot::new(reserve_a, reserve_b, total_shares);
            let deposit = deposit_lp(amount_a, seed_b, &snapshot)?;
            if deposit.kind == DepositKind::Seed {
                println!("Pool is empty: this deposit sets the initial price");
            }
            println!(
                "You will need {} ({}) of token B",
                deposit.deposit_b,
                format_units(deposit.deposit_b, decimals)
            );
            println!(
                "You will receive {} ({}) pool shares",
                deposit.minted_shares,
                format_units(deposit.minted_shares, decimals)
            );
        }
        Commands::Withdraw {
            shares,
            reserve_a,
            reserve_b,
            total_shares,
        } => {
            let snapshot = ReserveSnapshot::new(reserve_a, reserve_b, total_shares);
            let withdrawal = withdraw_lp(shares, &snapshot)?;
            println!(
                "You will get {} ({}) of token A and {} ({}) of token B",
                withdrawal.returned_a,
                format_units(withdrawal.returned_a, decimals),
                withdrawal.returned_b,
                format_units(withdrawal.returned_b, decimals)
            );
        }
        Commands::Demo => demo(config)?,
    }

    Ok(())
}

fn demo(config: AmmConfig) -> anchor_lang::Result<()> {
    let ledger = MemoryLedger::new();
    let pool = ledger.create_pool(config)?;

    let seed = ledger.provide_liquidity(&pool, 1000, 2000)?;
    println!("Seeded pool with 1000 A / 2000 B, minted {} shares", seed.minted_shares);

    let snapshot = ledger.get_reserves(&pool)?;
    let (reserve_in, reserve_out) = snapshot.reserves(SwapDirection::AToB);
    let quoted = quote(100, reserve_in, reserve_out, &config.fee)?;
    let min_output = min_output_with_slippage(quoted, DEFAULT_SLIPPAGE_BPS)?;
    let received = ledger.swap(&pool, SwapDirection::AToB, 100, min_output)?;
    println!("Swapped 100 A for {} B (quoted {})", received, quoted);

    let deposit = ledger.provide_liquidity(&pool, 110, u128::MAX)?;
    println!(
        "Deposited {} A / {} B for {} shares",
        deposit.deposit_a, deposit.deposit_b, deposit.minted_shares
    );

    let total_shares = ledger.get_reserves(&pool)?.total_shares;
    let withdrawal = ledger.withdraw_liquidity(&pool, total_shares)?;
    println!(
        "Burned all {} shares for {} A / {} B",
        withdrawal.burned_shares, withdrawal.returned_a, withdrawal.returned_b
    );
    Ok(())
}

/// Render a smallest-unit amount as a decimal string, trailing zeros trimmed.
fn format_units(amount: u128, decimals: u8) -> String {
    let Some(scale) = 10u128.checked_pow(u32::from(decimals)) else {
        return amount.to_string();
    };
    let whole = amount / scale;
    let fraction = amount % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", fraction, width = usize::from(decimals));
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(1_500_000_000_000_000_000, 18), "1.5");
        assert_eq!(format_units(1, 18), "0.000000000000000001");
        assert_eq!(format_units(2_000_000, 6), "2");
        assert_eq!(format_units(181, 0), "181");
    }

    #[test]
    fn test_cli_parses_swap() {
        let cli = Cli::try_parse_from([
            "cpmm-math",
            "--fee-numerator",
            "3",
            "--fee-denominator",
            "1000",
            "swap",
            "--input",
            "100",
            "--reserve-in",
            "1000",
            "--reserve-out",
            "2000",
        ])
        .unwrap();
        assert_eq!(cli.fee_numerator, 3);
        assert!(matches!(cli.command, Commands::Swap { input: 100, slippage_bps: 50, .. }));
    }

    #[test]
    fn test_demo_runs() {
        assert!(demo(AmmConfig::default()).is_ok());
    }
}
