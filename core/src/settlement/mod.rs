//! Settlement
//!
//! Replays every cycle an account missed while its user was offline:
//! course completions, recurring expenses, loan installments, monthly
//! salary and the periodic platform fee. Settlement is a pure function
//! over a snapshot of the account plus the current simulated date; it
//! returns a new account and never touches the store itself, so callers
//! decide whether and how to persist.
//!
//! # Invariants
//!
//! 1. Deterministic: same account + same date = same outcome
//! 2. Idempotent: running settlement twice at the same date changes
//!    nothing the second time
//! 3. Watermarks only move forward; an unaffordable obligation freezes
//!    its own due date and is retried on the next run

mod engine;

pub use engine::{advance_to, SettlementOutcome, MISC_FEE_AMOUNT, MISC_FEE_INTERVAL_YEARS};

use crate::models::currency::Cents;
use crate::store::StoreError;

/// Destination for platform revenue produced during settlement
///
/// Implemented by the store (crediting the platform account's fee pool)
/// and by test doubles that count or fail credits.
pub trait FeeSink {
    fn credit_fees(&self, amount: Cents, memo: &str) -> Result<(), StoreError>;
}
