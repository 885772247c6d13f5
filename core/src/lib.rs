//! # Bank Simulator Core
//!
//! Deterministic core of a multiplayer banking simulation: accounts
//! with fiat and crypto balances, a shared simulated calendar, and a
//! settlement engine that replays everything an account missed while
//! its user was offline.
//!
//! ## Architecture
//!
//! - [`models`]: domain types (accounts, ledger entries, budgets,
//!   loans, recurring expenses, currencies)
//! - [`catalog`]: static reference tables (jobs, courses, properties,
//!   staking plans, loan offers, conversion rates)
//! - [`core`]: the shared simulated clock and calendar arithmetic
//! - [`ledger`]: transaction recording with budget aggregation
//! - [`settlement`]: the offline-catch-up engine
//! - [`store`]: the process-wide state container
//! - [`ops`]: user-facing operations over the store
//!
//! ## Key invariants
//!
//! 1. All money values are i64 minor units; no floating-point balances
//! 2. Settlement is deterministic and idempotent over (account, date)
//! 3. Compound mutations commit under one store write lock
//! 4. The shared clock and all watermarks only move forward
//!
//! ## Quick example
//!
//! ```
//! use bank_sim_core_rs::catalog::Catalog;
//! use bank_sim_core_rs::models::currency::USD;
//! use bank_sim_core_rs::ops::{register, sync};
//! use bank_sim_core_rs::store::MemoryStore;
//! use chrono::NaiveDate;
//!
//! let store = MemoryStore::new();
//! let catalog = Catalog::builtin();
//! store.write_clock(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
//!
//! let account = register::register(&store, "alice", "alice@bank.sim").unwrap();
//! assert_eq!(account.balance(USD), register::OPENING_BONUS);
//!
//! // settlement with nothing due is a no-op
//! let synced = sync::sync_account(&store, &catalog, &account.id).unwrap();
//! assert_eq!(synced.balance(USD), account.balance(USD));
//! ```

pub mod catalog;
pub mod core;
pub mod ledger;
pub mod models;
pub mod ops;
pub mod settlement;
pub mod store;

pub use catalog::Catalog;
pub use models::account::Account;
pub use models::currency::Cents;
pub use ops::OpError;
pub use settlement::{advance_to, FeeSink, SettlementOutcome};
pub use store::{MemoryStore, StoreError, PLATFORM_ACCOUNT_ID};
