//! Platform fee pool: concurrent credits and atomic claims

use bank_sim_core_rs::models::currency::USD;
use bank_sim_core_rs::models::transaction::TxKind;
use bank_sim_core_rs::store::{MemoryStore, StoreError, PLATFORM_ACCOUNT_ID};
use chrono::NaiveDate;
use std::sync::Arc;
use std::thread;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_concurrent_credits_all_land() {
    let store = Arc::new(MemoryStore::new());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                store.credit_fee_pool(5, "transfer fee").unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.fee_pool(), 8 * 100 * 5);
}

#[test]
fn test_claim_drains_pool_into_balance() {
    let store = MemoryStore::new();
    store.write_clock(date(1900, 3, 1));
    store.credit_fee_pool(12_345, "tuition").unwrap();

    let before = store.read_account(PLATFORM_ACCOUNT_ID).unwrap().balance(USD);
    let claimed = store.claim_fee_pool().unwrap();
    assert_eq!(claimed, 12_345);

    let platform = store.read_account(PLATFORM_ACCOUNT_ID).unwrap();
    assert_eq!(platform.fees_collected, 0);
    assert_eq!(platform.balance(USD), before + 12_345);

    let claim_tx = platform.transactions.last().unwrap();
    assert_eq!(claim_tx.kind(), TxKind::RevenueClaim);
    assert_eq!(claim_tx.amount(), 12_345);
    assert_eq!(claim_tx.effective_date(), date(1900, 3, 1));
}

#[test]
fn test_empty_pool_cannot_be_claimed() {
    let store = MemoryStore::new();
    assert_eq!(store.claim_fee_pool(), Err(StoreError::NothingToClaim));
}

#[test]
fn test_concurrent_claims_never_double_pay() {
    let store = Arc::new(MemoryStore::new());
    store.credit_fee_pool(10_000, "tuition").unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || store.claim_fee_pool().ok()));
    }
    let claims: Vec<_> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();

    // exactly one claimant saw the money
    assert_eq!(claims, vec![10_000]);
    let platform = store.read_account(PLATFORM_ACCOUNT_ID).unwrap();
    assert_eq!(platform.fees_collected, 0);
}
