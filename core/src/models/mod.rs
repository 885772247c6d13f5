//! Domain types: accounts, ledger entries, budgets, loans, recurring
//! expenses and the currencies they are denominated in.

pub mod account;
pub mod budget;
pub mod currency;
pub mod loan;
pub mod recurring;
pub mod transaction;
