//! Staking
//!
//! Locking funds into a plan moves them out of the spendable balance
//! for a fixed number of simulated days; claiming after the unlock
//! date returns the principal plus the plan's reward fraction.

use crate::catalog::Catalog;
use crate::core::clock::days_after;
use crate::ledger::{self, TxSpec};
use crate::models::account::Stake;
use crate::models::currency::{Cents, Currency};
use crate::models::transaction::TxKind;
use crate::ops::OpError;
use crate::store::MemoryStore;

/// Lock `amount` of `currency` into `plan_id`, returning the new stake
pub fn stake(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
    plan_id: &str,
    amount: Cents,
    currency: Currency,
) -> Result<Stake, OpError> {
    if amount <= 0 {
        return Err(OpError::NonPositiveAmount);
    }
    let plan = catalog
        .staking_plan(plan_id)
        .ok_or_else(|| OpError::UnknownCatalogEntry {
            kind: "staking plan",
            id: plan_id.to_string(),
        })?;
    let mut account = store.read_account(account_id)?;
    let now = store.read_clock();

    account.try_debit(currency, amount)?;
    let stake = Stake {
        id: uuid::Uuid::new_v4().to_string(),
        plan_id: plan.id.to_string(),
        amount,
        currency,
        start_date: now,
        end_date: days_after(now, plan.duration_days as u64),
    };
    let spec = TxSpec::new(
        TxKind::StakingLock,
        amount,
        currency,
        format!("Staked: {}", plan.name),
    );
    ledger::record(&mut account, spec, now);
    account.stakes.push(stake.clone());

    store.write_account(account);
    Ok(stake)
}

/// Claim a matured stake: principal plus reward back into the balance
///
/// Claiming before `end_date` fails with the unlock date; the stake
/// stays locked.
pub fn claim_stake(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
    stake_id: &str,
) -> Result<Cents, OpError> {
    let mut account = store.read_account(account_id)?;
    let now = store.read_clock();

    let pos = account
        .stakes
        .iter()
        .position(|s| s.id == stake_id)
        .ok_or_else(|| OpError::StakeNotFound(stake_id.to_string()))?;
    let stake = account.stakes[pos].clone();
    if now < stake.end_date {
        return Err(OpError::StakeLocked {
            unlocks_on: stake.end_date,
        });
    }
    let plan = catalog
        .staking_plan(&stake.plan_id)
        .ok_or_else(|| OpError::UnknownCatalogEntry {
            kind: "staking plan",
            id: stake.plan_id.clone(),
        })?;

    let reward = (stake.amount as f64 * plan.reward).round() as Cents;
    let payout = stake.amount + reward;
    account.credit(stake.currency, payout);
    let spec = TxSpec::new(
        TxKind::StakingReward,
        payout,
        stake.currency,
        format!("Stake matured: {}", plan.name),
    );
    ledger::record(&mut account, spec, now);
    account.stakes.remove(pos);

    store.write_account(account);
    Ok(payout)
}
