//! Ledger recording, log cap and budget aggregation

use bank_sim_core_rs::ledger::{self, TxSpec, MAX_LOG_ENTRIES};
use bank_sim_core_rs::models::account::{Account, CardDetails};
use bank_sim_core_rs::models::currency::USD;
use bank_sim_core_rs::models::transaction::{BudgetCategory, TxKind};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_account() -> Account {
    Account::new(
        "u1".to_string(),
        "alice".to_string(),
        "alice@bank.sim".to_string(),
        "1234567890".to_string(),
        CardDetails {
            number: "4242 4242 4242 4242".to_string(),
            expiry: "12/28".to_string(),
            cvv: "123".to_string(),
        },
        date(1900, 1, 1),
    )
}

#[test]
fn test_log_evicts_oldest_past_cap() {
    let mut acct = test_account();
    for i in 0..(MAX_LOG_ENTRIES + 1) {
        let spec = TxSpec::new(TxKind::Deposit, 100, USD, format!("deposit {i}"));
        ledger::record(&mut acct, spec, date(1900, 1, 1));
    }
    assert_eq!(acct.transactions.len(), MAX_LOG_ENTRIES);
    // entry 0 was evicted; entry 1 is now the oldest
    assert_eq!(acct.transactions[0].description(), "deposit 1");
    assert_eq!(
        acct.transactions.last().unwrap().description(),
        format!("deposit {MAX_LOG_ENTRIES}")
    );
}

#[test]
fn test_spending_accumulates_per_category_and_month() {
    let mut acct = test_account();
    let groceries = TxSpec::new(TxKind::Expense, 3_000, USD, "Groceries".to_string())
        .with_category(BudgetCategory::Food);
    ledger::record(&mut acct, groceries, date(1900, 1, 5));
    let takeout = TxSpec::new(TxKind::Expense, 2_000, USD, "Takeout".to_string())
        .with_category(BudgetCategory::Food);
    ledger::record(&mut acct, takeout, date(1900, 1, 20));
    let february = TxSpec::new(TxKind::Expense, 1_000, USD, "Groceries".to_string())
        .with_category(BudgetCategory::Food);
    ledger::record(&mut acct, february, date(1900, 2, 2));

    let january = ledger::month_budgets(&acct, "1900-01");
    let food = january.iter().find(|b| b.category == BudgetCategory::Food).unwrap();
    assert_eq!(food.spent, 5_000);

    let february = ledger::month_budgets(&acct, "1900-02");
    let food = february.iter().find(|b| b.category == BudgetCategory::Food).unwrap();
    assert_eq!(food.spent, 1_000);
}

#[test]
fn test_cap_and_spending_share_a_row() {
    let mut acct = test_account();
    ledger::set_budget_cap(&mut acct, BudgetCategory::Food, "1900-01", 4_000);
    let spec = TxSpec::new(TxKind::Expense, 5_000, USD, "Groceries".to_string())
        .with_category(BudgetCategory::Food);
    ledger::record(&mut acct, spec, date(1900, 1, 10));

    assert_eq!(acct.budgets.len(), 1);
    assert!(acct.budgets[0].is_over());
}

#[test]
fn test_uncategorized_entry_skips_budgets() {
    let mut acct = test_account();
    let spec = TxSpec::new(TxKind::Withdrawal, 5_000, USD, "ATM".to_string());
    ledger::record(&mut acct, spec, date(1900, 1, 10));
    assert!(acct.budgets.is_empty());
}
