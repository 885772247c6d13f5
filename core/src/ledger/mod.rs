//! Ledger primitives
//!
//! Appending a transaction to an account's log and keeping the monthly
//! budget aggregate consistent is one logical step: every categorized
//! outgoing entry bumps the `spent` total of its (month, category) row,
//! creating the row lazily. The log is bounded to the most recent
//! [`MAX_LOG_ENTRIES`] entries, oldest evicted first.
//!
//! This is a single-process in-memory mutation; the caller persists the
//! whole account document afterwards.

use crate::models::account::Account;
use crate::models::budget::{month_key, Budget};
use crate::models::currency::{Cents, Currency};
use crate::models::transaction::{BudgetCategory, Direction, Transaction, TxKind};
use chrono::NaiveDate;

/// Transaction log size cap per account
pub const MAX_LOG_ENTRIES: usize = 200;

/// Everything needed to record one ledger entry
///
/// `direction` may be left `None` for every kind except `Transfer`,
/// whose direction depends on which side of the transfer this account
/// is on.
#[derive(Debug, Clone)]
pub struct TxSpec {
    pub kind: TxKind,
    pub direction: Option<Direction>,
    pub amount: Cents,
    pub currency: Currency,
    pub description: String,
    pub category: Option<BudgetCategory>,
}

impl TxSpec {
    /// Spec for a kind with a fixed direction
    pub fn new(kind: TxKind, amount: Cents, currency: Currency, description: String) -> Self {
        Self {
            kind,
            direction: None,
            amount,
            currency,
            description,
            category: None,
        }
    }

    pub fn with_category(mut self, category: BudgetCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    fn resolved_direction(&self) -> Direction {
        self.direction
            .or_else(|| self.kind.fixed_direction())
            .expect("transfer entries require an explicit direction")
    }
}

/// Append an entry to `account`'s log, evicting the oldest entry past
/// the cap, and update the monthly budget aggregate when the entry is a
/// categorized outgoing one. Returns a clone of the recorded entry.
///
/// # Example
/// ```
/// use bank_sim_core_rs::ledger::{self, TxSpec};
/// use bank_sim_core_rs::models::account::{Account, CardDetails};
/// use bank_sim_core_rs::models::currency::USD;
/// use bank_sim_core_rs::models::transaction::{BudgetCategory, TxKind};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
/// let card = CardDetails {
///     number: "4242 4242 4242 4242".to_string(),
///     expiry: "12/28".to_string(),
///     cvv: "123".to_string(),
/// };
/// let mut acct = Account::new(
///     "u1".to_string(),
///     "alice".to_string(),
///     "alice@bank.sim".to_string(),
///     "1234567890".to_string(),
///     card,
///     day,
/// );
///
/// let spec = TxSpec::new(TxKind::Expense, 3_000, USD, "Groceries".to_string())
///     .with_category(BudgetCategory::Food);
/// ledger::record(&mut acct, spec, day);
///
/// assert_eq!(acct.transactions.len(), 1);
/// assert_eq!(acct.budgets[0].spent, 3_000);
/// ```
pub fn record(account: &mut Account, spec: TxSpec, effective_date: NaiveDate) -> Transaction {
    let direction = spec.resolved_direction();
    let tx = Transaction::new(
        spec.kind,
        direction,
        spec.amount,
        spec.currency,
        effective_date,
        spec.description,
        spec.category,
    );

    account.transactions.push(tx.clone());
    if account.transactions.len() > MAX_LOG_ENTRIES {
        account.transactions.remove(0);
    }

    if let Some(category) = spec.category {
        if direction == Direction::Outgoing {
            let month = month_key(effective_date);
            let row = find_or_create_budget(account, category, month);
            row.spent += spec.amount;
        }
    }

    tx
}

fn find_or_create_budget(
    account: &mut Account,
    category: BudgetCategory,
    month: String,
) -> &mut Budget {
    let pos = account
        .budgets
        .iter()
        .position(|b| b.month == month && b.category == category);
    match pos {
        Some(i) => &mut account.budgets[i],
        None => {
            account.budgets.push(Budget::new(category, month));
            account.budgets.last_mut().expect("just pushed")
        }
    }
}

/// The account's budget rows for `month`, padded with zero rows for
/// every fixed category that has no activity yet
pub fn month_budgets(account: &Account, month: &str) -> Vec<Budget> {
    let mut rows: Vec<Budget> = account
        .budgets
        .iter()
        .filter(|b| b.month == month)
        .cloned()
        .collect();
    for category in BudgetCategory::ALL {
        if !rows.iter().any(|b| b.category == category) {
            rows.push(Budget::new(category, month.to_string()));
        }
    }
    rows
}

/// Set the user-configured cap on a (month, category) row, creating the
/// row when absent
pub fn set_budget_cap(account: &mut Account, category: BudgetCategory, month: &str, cap: Cents) {
    let row = find_or_create_budget(account, category, month.to_string());
    row.cap = cap;
}
