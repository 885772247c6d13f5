//! User-facing operations
//!
//! Every action a session can take against the shared store: account
//! registration and settlement, money movement, currency exchange,
//! staking, loans, property, education, jobs and the admin surface.
//! Each operation validates against a snapshot, applies the mutation
//! and persists the affected documents; anything touching two accounts
//! commits under one store write lock.

pub mod admin;
pub mod education;
pub mod exchange;
pub mod jobs;
pub mod loans;
pub mod property;
pub mod register;
pub mod staking;
pub mod sync;
pub mod transfer;

use crate::models::account::BalanceError;
use crate::store::StoreError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by user-facing operations
#[derive(Debug, Error, PartialEq)]
pub enum OpError {
    #[error(transparent)]
    Balance(#[from] BalanceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no account with id {0}")]
    AccountNotFound(String),

    #[error("no account with number {0}")]
    RecipientNotFound(String),

    #[error("cannot transfer to own account")]
    SelfTransfer,

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("username {0} is already taken")]
    UsernameTaken(String),

    #[error("unknown {kind} id {id}")]
    UnknownCatalogEntry { kind: &'static str, id: String },

    #[error("already enrolled in course {0}")]
    AlreadyEnrolled(String),

    #[error("job {job} requires completing course {course}")]
    QualificationRequired { job: String, course: String },

    #[error("property {0} already held")]
    AlreadyAcquired(String),

    #[error("property {0} is not held by this account")]
    PropertyNotHeld(String),

    #[error("loan {0} is already active")]
    DuplicateLoan(String),

    #[error("no stake with id {0}")]
    StakeNotFound(String),

    #[error("stake is locked until {unlocks_on}")]
    StakeLocked { unlocks_on: NaiveDate },
}
