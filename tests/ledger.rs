use std::sync::Arc;
use std::thread;

use anchor_lang::prelude::Pubkey;
use cpmm_math::{
    min_output_with_slippage, quote_swap, AmmConfig, ErrorCode, FeeRate, MemoryLedger,
    ReserveSnapshot, ReserveSource, Settlement, SwapDirection,
};
use spl_math::uint::U256;

fn seeded(fee: FeeRate) -> (MemoryLedger, Pubkey) {
    let ledger = MemoryLedger::new();
    let pool = ledger.create_pool(AmmConfig::new(fee).unwrap()).unwrap();
    ledger
        .provide_liquidity(&pool, 1_000_000_000, 3_000_000_000)
        .unwrap();
    (ledger, pool)
}

fn k(snapshot: &ReserveSnapshot) -> U256 {
    U256::from(snapshot.reserve_a) * U256::from(snapshot.reserve_b)
}

#[test]
fn quote_then_settle_with_slippage_bound() {
    let (ledger, pool) = seeded(FeeRate::THIRTY_BPS);
    let snapshot = ledger.get_reserves(&pool).unwrap();
    let config = ledger.config(&pool).unwrap();

    let quote = quote_swap(&snapshot, SwapDirection::BToA, 25_000_000, &config).unwrap();
    let min_output = min_output_with_slippage(quote.output_amount, 50).unwrap();
    let received = ledger
        .swap(&pool, SwapDirection::BToA, 25_000_000, min_output)
        .unwrap();

    // nothing moved in between, so settlement matches the quote exactly
    assert_eq!(received, quote.output_amount);
    assert_eq!(
        ledger.get_reserves(&pool).unwrap(),
        snapshot.after_swap(&quote).unwrap()
    );
}

#[test]
fn concurrent_swaps_are_serialized() {
    let (ledger, pool) = seeded(FeeRate::THIRTY_BPS);
    let ledger = Arc::new(ledger);
    let k0 = k(&ledger.get_reserves(&pool).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                let direction = if i % 2 == 0 {
                    SwapDirection::AToB
                } else {
                    SwapDirection::BToA
                };
                for _ in 0..50 {
                    ledger.swap(&pool, direction, 10_000 + i, 0).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let after = ledger.get_reserves(&pool).unwrap();
    assert!(k(&after) > k0);
    assert_eq!(after.total_shares, 1_000_000_000);
}

#[test]
fn providers_share_fees_proportionally() {
    let (ledger, pool) = seeded(FeeRate::ONE_PERCENT);
    let second = ledger.provide_liquidity(&pool, 500_000_000, u128::MAX).unwrap();
    assert_eq!(second.deposit_b, 1_500_000_000);
    assert_eq!(second.minted_shares, 500_000_000);

    for _ in 0..20 {
        ledger.swap(&pool, SwapDirection::AToB, 7_000_000, 0).unwrap();
        ledger.swap(&pool, SwapDirection::BToA, 21_000_000, 0).unwrap();
    }

    let out_second = ledger.withdraw_liquidity(&pool, 500_000_000).unwrap();
    let out_first = ledger.withdraw_liquidity(&pool, 1_000_000_000).unwrap();

    // first provider holds twice the shares and gets twice the assets, give or take dust
    assert!(out_first.returned_a.abs_diff(2 * out_second.returned_a) <= 2);
    assert!(out_first.returned_b.abs_diff(2 * out_second.returned_b) <= 2);
    assert_eq!(ledger.get_reserves(&pool).unwrap(), ReserveSnapshot::default());
}

#[test]
fn over_withdrawal_is_rejected() {
    let (ledger, pool) = seeded(FeeRate::THIRTY_BPS);
    assert_eq!(
        ledger.withdraw_liquidity(&pool, 1_000_000_001).unwrap_err(),
        ErrorCode::InsufficientShares.into()
    );
    assert!(!ErrorCode::InsufficientShares.is_fatal());
}

#[test]
fn snapshot_decodes_from_ledger_bytes() {
    use borsh::{BorshDeserialize, BorshSerialize};

    let (ledger, pool) = seeded(FeeRate::THIRTY_BPS);
    let bytes = ledger.get_reserves(&pool).unwrap().try_to_vec().unwrap();
    let decoded = ReserveSnapshot::try_from_slice(&bytes).unwrap();
    assert_eq!(decoded, ReserveSnapshot::new(1_000_000_000, 3_000_000_000, 1_000_000_000));
}
