//! Transaction model
//!
//! An immutable ledger entry on one account. Each entry has:
//! - Kind (deposit, transfer, fee, salary, ...)
//! - Explicit direction (incoming or outgoing)
//! - Amount as a non-negative magnitude (i64 minor units)
//! - Effective date on the simulated calendar
//! - Optional budget category for spending analysis
//!
//! Entries are never mutated after creation; an account's log only
//! evicts its oldest entry when the size cap is reached.

use crate::models::currency::{Cents, Currency};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Deposit,
    Withdrawal,
    Transfer,
    CryptoBuy,
    CryptoSell,
    StakingReward,
    StakingLock,
    Fee,
    Expense,
    LoanRepayment,
    LoanDisbursement,
    Salary,
    RevenueClaim,
}

/// Whether an entry moves value into or out of the account
///
/// Stored explicitly at creation time. `Transfer` is the only kind that
/// can go either way, so its direction must always be supplied by the
/// caller; every other kind has a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl TxKind {
    /// The fixed direction for this kind, or `None` for `Transfer`
    pub fn fixed_direction(&self) -> Option<Direction> {
        match self {
            TxKind::Withdrawal
            | TxKind::CryptoSell
            | TxKind::StakingLock
            | TxKind::Fee
            | TxKind::Expense
            | TxKind::LoanRepayment => Some(Direction::Outgoing),
            TxKind::Deposit
            | TxKind::CryptoBuy
            | TxKind::StakingReward
            | TxKind::LoanDisbursement
            | TxKind::Salary
            | TxKind::RevenueClaim => Some(Direction::Incoming),
            TxKind::Transfer => None,
        }
    }
}

/// Monthly spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetCategory {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Housing,
    Utilities,
    Loans,
    Other,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 8] = [
        BudgetCategory::Food,
        BudgetCategory::Transport,
        BudgetCategory::Shopping,
        BudgetCategory::Entertainment,
        BudgetCategory::Housing,
        BudgetCategory::Utilities,
        BudgetCategory::Loans,
        BudgetCategory::Other,
    ];
}

/// One immutable ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique entry identifier (UUID)
    id: String,

    kind: TxKind,

    direction: Direction,

    /// Non-negative magnitude in minor units; sign is carried by `direction`
    amount: Cents,

    currency: Currency,

    /// Date on the simulated calendar the entry took effect
    effective_date: NaiveDate,

    description: String,

    /// Budget category, when the entry should count against monthly spending
    category: Option<BudgetCategory>,
}

impl Transaction {
    /// Create a new ledger entry with a fresh id
    ///
    /// # Panics
    /// Panics if `amount` is negative.
    pub fn new(
        kind: TxKind,
        direction: Direction,
        amount: Cents,
        currency: Currency,
        effective_date: NaiveDate,
        description: String,
        category: Option<BudgetCategory>,
    ) -> Self {
        assert!(amount >= 0, "amount must be a non-negative magnitude");

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            direction,
            amount,
            currency,
            effective_date,
            description,
            category,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn amount(&self) -> Cents {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Option<BudgetCategory> {
        self.category
    }

    /// true when this entry moves value out of the account
    pub fn is_outgoing(&self) -> bool {
        self.direction == Direction::Outgoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::currency::USD;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_directions() {
        assert_eq!(TxKind::Fee.fixed_direction(), Some(Direction::Outgoing));
        assert_eq!(TxKind::Salary.fixed_direction(), Some(Direction::Incoming));
        assert_eq!(TxKind::Transfer.fixed_direction(), None);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&TxKind::RevenueClaim).unwrap();
        assert_eq!(json, "\"revenue_claim\"");
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_amount_panics() {
        Transaction::new(
            TxKind::Fee,
            Direction::Outgoing,
            -1,
            USD,
            date(1900, 1, 1),
            "bad".to_string(),
            None,
        );
    }
}
