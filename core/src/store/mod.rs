//! Shared in-memory store
//!
//! All mutable simulation state behind one `parking_lot::RwLock`:
//! account documents, the shared clock, pending transfer notifications
//! and the timekeeper lease. Taking the whole state under a single
//! write lock makes every compound mutation (two-account transfer, fee
//! pool claim, clock write) a serializable transaction without any
//! finer-grained locking protocol.
//!
//! The store is process-local and non-durable. Accounts are read and
//! written as whole documents; callers settle or mutate a snapshot and
//! write it back.

use crate::core::clock;
use crate::ledger::{self, TxSpec};
use crate::models::account::{Account, CardDetails};
use crate::models::currency::{Cents, CryptoCoin, FiatCurrency, USD};
use crate::models::transaction::TxKind;
use crate::settlement::FeeSink;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

/// Id of the distinguished platform account holding the fee pool
pub const PLATFORM_ACCOUNT_ID: &str = "platform";

/// USD reserve seeded on the platform account (one trillion dollars)
const PLATFORM_USD_RESERVE: Cents = 100_000_000_000_000;

/// Crypto reserve seeded per coin (ten million whole coins)
const PLATFORM_COIN_RESERVE: Cents = 10_000_000 * 100_000_000;

/// Errors raised by store operations
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no account with id {0}")]
    AccountNotFound(String),

    #[error("fee pool is empty")]
    NothingToClaim,
}

/// An in-app message queued for a user, e.g. "you received a transfer"
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipient_id: String,
    pub title: String,
    pub message: String,
    /// Structured payload for the client, e.g. amount and currency
    pub payload: serde_json::Value,
}

#[derive(Debug, Default)]
struct StoreInner {
    accounts: HashMap<String, Account>,
    /// Shared simulated date; `None` until the first timekeeper writes it
    clock: Option<NaiveDate>,
    notifications: Vec<Notification>,
    /// Session currently holding the timekeeper lease
    timekeeper: Option<String>,
}

/// The process-wide state container
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store with the platform account seeded
    pub fn new() -> Self {
        let mut inner = StoreInner::default();
        inner
            .accounts
            .insert(PLATFORM_ACCOUNT_ID.to_string(), platform_account());
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Snapshot of one account
    pub fn read_account(&self, id: &str) -> Result<Account, StoreError> {
        self.inner
            .read()
            .accounts
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::AccountNotFound(id.to_string()))
    }

    /// Replace one account document
    pub fn write_account(&self, account: Account) {
        self.inner.write().accounts.insert(account.id.clone(), account);
    }

    pub fn find_by_username(&self, username: &str) -> Option<Account> {
        self.inner
            .read()
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned()
    }

    pub fn find_by_account_number(&self, number: &str) -> Option<Account> {
        self.inner
            .read()
            .accounts
            .values()
            .find(|a| a.account_number == number)
            .cloned()
    }

    /// All non-platform accounts, for admin listings
    pub fn all_user_accounts(&self) -> Vec<Account> {
        self.inner
            .read()
            .accounts
            .values()
            .filter(|a| a.id != PLATFORM_ACCOUNT_ID)
            .cloned()
            .collect()
    }

    /// The shared simulated date, falling back to the epoch before the
    /// first timekeeper write
    pub fn read_clock(&self) -> NaiveDate {
        match self.inner.read().clock {
            Some(date) => date,
            None => {
                tracing::debug!("clock unset, reading epoch");
                clock::epoch()
            }
        }
    }

    /// Advance the shared clock; regressions are ignored so the clock
    /// never moves backwards
    pub fn write_clock(&self, date: NaiveDate) {
        let mut inner = self.inner.write();
        match inner.clock {
            Some(current) if date < current => {
                tracing::warn!(%date, %current, "ignoring clock regression");
            }
            _ => inner.clock = Some(date),
        }
    }

    /// First-writer-wins timekeeper election; re-acquiring one's own
    /// lease succeeds
    pub fn try_acquire_timekeeper(&self, session_id: &str) -> bool {
        let mut inner = self.inner.write();
        match &inner.timekeeper {
            Some(holder) => holder == session_id,
            None => {
                inner.timekeeper = Some(session_id.to_string());
                true
            }
        }
    }

    pub fn is_timekeeper(&self, session_id: &str) -> bool {
        self.inner.read().timekeeper.as_deref() == Some(session_id)
    }

    /// Release the lease if `session_id` holds it
    pub fn release_timekeeper(&self, session_id: &str) {
        let mut inner = self.inner.write();
        if inner.timekeeper.as_deref() == Some(session_id) {
            inner.timekeeper = None;
        }
    }

    /// Credit USD cents to the platform fee pool
    pub fn credit_fee_pool(&self, amount: Cents, memo: &str) -> Result<(), StoreError> {
        assert!(amount >= 0, "amount must be non-negative");
        let mut inner = self.inner.write();
        let date = inner.clock.unwrap_or_else(clock::epoch);
        let platform = inner
            .accounts
            .get_mut(PLATFORM_ACCOUNT_ID)
            .ok_or_else(|| StoreError::AccountNotFound(PLATFORM_ACCOUNT_ID.to_string()))?;
        platform.fees_collected += amount;
        tracing::debug!(amount, memo, date = %date, "fee pool credited");
        Ok(())
    }

    /// Drain the fee pool into the platform's USD balance, recording a
    /// revenue claim. One atomic step: concurrent claims cannot both
    /// observe the same pool.
    pub fn claim_fee_pool(&self) -> Result<Cents, StoreError> {
        let mut inner = self.inner.write();
        let date = inner.clock.unwrap_or_else(clock::epoch);
        let platform = inner
            .accounts
            .get_mut(PLATFORM_ACCOUNT_ID)
            .ok_or_else(|| StoreError::AccountNotFound(PLATFORM_ACCOUNT_ID.to_string()))?;
        let claimed = platform.fees_collected;
        if claimed == 0 {
            return Err(StoreError::NothingToClaim);
        }
        platform.fees_collected = 0;
        platform.credit(USD, claimed);
        let spec = TxSpec::new(
            TxKind::RevenueClaim,
            claimed,
            USD,
            "Platform revenue claim".to_string(),
        );
        ledger::record(platform, spec, date);
        Ok(claimed)
    }

    /// Current fee pool balance
    pub fn fee_pool(&self) -> Cents {
        self.inner
            .read()
            .accounts
            .get(PLATFORM_ACCOUNT_ID)
            .map(|a| a.fees_collected)
            .unwrap_or(0)
    }

    pub fn enqueue_notification(&self, notification: Notification) {
        self.inner.write().notifications.push(notification);
    }

    /// Remove and return all notifications queued for `recipient_id`
    pub fn take_notifications(&self, recipient_id: &str) -> Vec<Notification> {
        let mut inner = self.inner.write();
        let (taken, kept): (Vec<_>, Vec<_>) = inner
            .notifications
            .drain(..)
            .partition(|n| n.recipient_id == recipient_id);
        inner.notifications = kept;
        taken
    }

    /// Mutate two accounts under one write lock
    ///
    /// The closure sees both documents at once, so a transfer debits
    /// and credits atomically: either both sides commit or, when the
    /// closure errors, neither is visible to any reader.
    pub fn with_accounts_mut<T, E>(
        &self,
        id_a: &str,
        id_b: &str,
        f: impl FnOnce(&mut Account, &mut Account) -> Result<T, E>,
    ) -> Result<Result<T, E>, StoreError> {
        assert!(id_a != id_b, "distinct accounts required");
        let mut inner = self.inner.write();
        if !inner.accounts.contains_key(id_b) {
            return Err(StoreError::AccountNotFound(id_b.to_string()));
        }
        let mut a = inner
            .accounts
            .remove(id_a)
            .ok_or_else(|| StoreError::AccountNotFound(id_a.to_string()))?;
        let b = inner.accounts.get_mut(id_b).expect("presence checked");

        let mut a_copy = a.clone();
        let b_copy = b.clone();
        let result = f(&mut a_copy, b);
        if result.is_ok() {
            a = a_copy;
        } else {
            *b = b_copy;
        }
        inner.accounts.insert(a.id.clone(), a);
        Ok(result)
    }
}

impl FeeSink for MemoryStore {
    fn credit_fees(&self, amount: Cents, memo: &str) -> Result<(), StoreError> {
        self.credit_fee_pool(amount, memo)
    }
}

/// The seeded platform account: effectively unlimited reserves so admin
/// deposits and exchange legs never bounce
fn platform_account() -> Account {
    let mut account = Account::new(
        PLATFORM_ACCOUNT_ID.to_string(),
        "platform".to_string(),
        "treasury@bank.sim".to_string(),
        "0000000000".to_string(),
        CardDetails {
            number: "0000 0000 0000 0000".to_string(),
            expiry: "01/99".to_string(),
            cvv: "000".to_string(),
        },
        clock::epoch(),
    );
    for fiat in FiatCurrency::ALL {
        account.fiat.insert(fiat, PLATFORM_USD_RESERVE);
    }
    for coin in CryptoCoin::ALL {
        account.crypto.insert(coin, PLATFORM_COIN_RESERVE);
    }
    account
}
