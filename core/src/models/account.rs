//! Account model
//!
//! The complete financial state of one registered user, persisted as a
//! whole document keyed by account id. The distinguished platform
//! account has the same shape plus a meaningful `fees_collected` pool.
//!
//! # Invariants
//!
//! 1. All balances are i64 minor units, so they are always finite
//! 2. Watermarks (`last_login`, `last_salary_date`, `last_misc_fee_date`)
//!    never move backwards
//! 3. The transaction log holds at most [`crate::ledger::MAX_LOG_ENTRIES`]
//!    entries, oldest evicted first

use crate::catalog::Catalog;
use crate::models::budget::Budget;
use crate::models::currency::{Cents, CryptoCoin, Currency, FiatCurrency};
use crate::models::loan::{Loan, LoanStatus};
use crate::models::recurring::RecurringExpense;
use crate::models::transaction::Transaction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by balance mutations
#[derive(Debug, Error, PartialEq)]
pub enum BalanceError {
    #[error("insufficient {currency} balance: required {required}, available {available}")]
    Insufficient {
        currency: &'static str,
        required: Cents,
        available: Cents,
    },
}

/// Virtual payment card issued at registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

/// A locked stake earning a fixed reward fraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stake {
    pub id: String,
    pub plan_id: String,
    pub amount: Cents,
    pub currency: Currency,
    /// Simulated date the lock began
    pub start_date: NaiveDate,
    /// Simulated date the stake becomes claimable
    pub end_date: NaiveDate,
}

/// How a property is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    Bought,
    Rented,
}

/// A property the account owns or rents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProperty {
    pub property_id: String,
    pub ownership: Ownership,
    pub acquired_on: NaiveDate,
}

/// Course enrollment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    InProgress,
    /// Terminal; no further transitions
    Completed,
}

/// One course enrollment on an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub course_id: String,
    pub enrolled_on: NaiveDate,
    pub status: EnrollmentStatus,
}

/// A registered user's complete financial state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier
    pub id: String,

    pub username: String,

    pub email: String,

    /// 10-digit external account number used to address transfers
    pub account_number: String,

    pub card: CardDetails,

    /// Fiat balances in cents, keyed by currency
    pub fiat: BTreeMap<FiatCurrency, Cents>,

    /// Crypto balances in 1e-8 units, keyed by coin
    pub crypto: BTreeMap<CryptoCoin, Cents>,

    /// Ordered ledger, oldest first, capped at 200 entries
    pub transactions: Vec<Transaction>,

    pub budgets: Vec<Budget>,

    pub recurring_expenses: Vec<RecurringExpense>,

    pub loans: Vec<Loan>,

    pub stakes: Vec<Stake>,

    pub properties: Vec<UserProperty>,

    pub education: Vec<Enrollment>,

    /// Current job from the job catalog, if any
    pub job_id: Option<String>,

    /// Watermark: last simulated date settlement ran for this account
    pub last_login: NaiveDate,

    /// Watermark: last salary cycle applied
    pub last_salary_date: NaiveDate,

    /// Watermark: last periodic platform fee applied (None until first set)
    pub last_misc_fee_date: Option<NaiveDate>,

    /// Platform fee pool; stays 0 on ordinary accounts
    pub fees_collected: Cents,
}

impl Account {
    /// Create an empty account opened on `opened_on`
    ///
    /// All balances start at zero; registration seeds the opening bonus.
    /// Watermarks start at `opened_on` so a fresh account never replays
    /// cycles from before it existed.
    pub fn new(
        id: String,
        username: String,
        email: String,
        account_number: String,
        card: CardDetails,
        opened_on: NaiveDate,
    ) -> Self {
        let fiat = FiatCurrency::ALL.iter().map(|c| (*c, 0)).collect();
        let crypto = CryptoCoin::ALL.iter().map(|c| (*c, 0)).collect();
        Self {
            id,
            username,
            email,
            account_number,
            card,
            fiat,
            crypto,
            transactions: Vec::new(),
            budgets: Vec::new(),
            recurring_expenses: Vec::new(),
            loans: Vec::new(),
            stakes: Vec::new(),
            properties: Vec::new(),
            education: Vec::new(),
            job_id: None,
            last_login: opened_on,
            last_salary_date: opened_on,
            last_misc_fee_date: Some(opened_on),
            fees_collected: 0,
        }
    }

    /// Current balance in `currency` (minor units; missing entries read 0)
    pub fn balance(&self, currency: Currency) -> Cents {
        match currency {
            Currency::Fiat(f) => self.fiat.get(&f).copied().unwrap_or(0),
            Currency::Crypto(c) => self.crypto.get(&c).copied().unwrap_or(0),
        }
    }

    fn balance_mut(&mut self, currency: Currency) -> &mut Cents {
        match currency {
            Currency::Fiat(f) => self.fiat.entry(f).or_insert(0),
            Currency::Crypto(c) => self.crypto.entry(c).or_insert(0),
        }
    }

    /// Credit (increase) a balance
    ///
    /// # Panics
    /// Panics if `amount` is negative.
    pub fn credit(&mut self, currency: Currency, amount: Cents) {
        assert!(amount >= 0, "amount must be non-negative");
        *self.balance_mut(currency) += amount;
    }

    /// Debit a balance, refusing to go below zero
    ///
    /// # Example
    /// ```
    /// use bank_sim_core_rs::models::account::{Account, CardDetails};
    /// use bank_sim_core_rs::models::currency::USD;
    /// use chrono::NaiveDate;
    ///
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
    ///     NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
    /// );
    /// acct.credit(USD, 100_000);
    /// assert!(acct.try_debit(USD, 30_000).is_ok());
    /// assert_eq!(acct.balance(USD), 70_000);
    /// assert!(acct.try_debit(USD, 70_001).is_err());
    /// ```
    pub fn try_debit(&mut self, currency: Currency, amount: Cents) -> Result<(), BalanceError> {
        assert!(amount >= 0, "amount must be non-negative");
        let balance = self.balance_mut(currency);
        if *balance < amount {
            return Err(BalanceError::Insufficient {
                currency: currency.code(),
                required: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        Ok(())
    }

    /// Debit a balance unconditionally, possibly driving it negative
    ///
    /// Only for mandatory platform fees, which are charged regardless of
    /// affordability.
    pub fn force_debit(&mut self, currency: Currency, amount: Cents) {
        assert!(amount >= 0, "amount must be non-negative");
        *self.balance_mut(currency) -= amount;
    }

    /// Net worth in USD cents at the catalog's static rates:
    /// fiat + crypto holdings, plus owned properties at buy price,
    /// minus outstanding loan balances.
    pub fn net_worth(&self, catalog: &Catalog) -> Cents {
        let mut total: Cents = 0;
        for (fiat, amount) in &self.fiat {
            total += catalog.to_usd_cents(*amount, Currency::Fiat(*fiat));
        }
        for (coin, amount) in &self.crypto {
            total += catalog.to_usd_cents(*amount, Currency::Crypto(*coin));
        }
        for held in &self.properties {
            if held.ownership == Ownership::Bought {
                if let Some(listing) = catalog.property(&held.property_id) {
                    total += listing.buy_price;
                }
            }
        }
        for loan in &self.loans {
            if loan.status == LoanStatus::Active {
                total -= loan.remaining_balance;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::currency::USD;

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
            NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_new_account_balances_zero() {
        let acct = test_account();
        assert_eq!(acct.balance(USD), 0);
        assert_eq!(acct.balance(Currency::Crypto(CryptoCoin::Btc)), 0);
        assert_eq!(acct.fees_collected, 0);
    }

    #[test]
    fn test_try_debit_reports_shortfall() {
        let mut acct = test_account();
        acct.credit(USD, 100);
        let err = acct.try_debit(USD, 250).unwrap_err();
        assert_eq!(
            err,
            BalanceError::Insufficient {
                currency: "USD",
                required: 250,
                available: 100,
            }
        );
        // failed debit leaves the balance untouched
        assert_eq!(acct.balance(USD), 100);
    }

    #[test]
    fn test_force_debit_goes_negative() {
        let mut acct = test_account();
        acct.credit(USD, 500);
        acct.force_debit(USD, 1_000);
        assert_eq!(acct.balance(USD), -500);
    }

    #[test]
    fn test_net_worth_counts_loans_as_liabilities() {
        let catalog = Catalog::builtin();
        let mut acct = test_account();
        acct.credit(USD, 100_000);
        acct.loans.push(Loan::originate(
            "Personal Loan".to_string(),
            500_000,
            0.1,
            12,
            NaiveDate::from_ymd_opt(1900, 2, 1).unwrap(),
        ));
        assert_eq!(acct.net_worth(&catalog), 100_000 - 550_000);
    }
}
