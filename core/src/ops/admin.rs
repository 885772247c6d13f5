//! Admin surface
//!
//! Operations on the platform account: funding user accounts from the
//! platform reserves and claiming accumulated fee revenue.

use crate::ledger::{self, TxSpec};
use crate::models::currency::{Cents, Currency};
use crate::models::transaction::TxKind;
use crate::ops::OpError;
use crate::store::{MemoryStore, StoreError, PLATFORM_ACCOUNT_ID};

/// Move `amount` of `currency` from the platform reserves into a user
/// account
pub fn admin_deposit(
    store: &MemoryStore,
    account_id: &str,
    amount: Cents,
    currency: Currency,
) -> Result<(), OpError> {
    if amount <= 0 {
        return Err(OpError::NonPositiveAmount);
    }
    let now = store.read_clock();
    let committed = store
        .with_accounts_mut(PLATFORM_ACCOUNT_ID, account_id, |platform, user| {
            platform.try_debit(currency, amount)?;
            user.credit(currency, amount);
            let spec = TxSpec::new(
                TxKind::Deposit,
                amount,
                currency,
                "Admin deposit".to_string(),
            );
            ledger::record(user, spec, now);
            Ok::<(), OpError>(())
        })
        .map_err(|err| match err {
            StoreError::AccountNotFound(id) if id == account_id => OpError::AccountNotFound(id),
            other => OpError::Store(other),
        })?;
    committed
}

/// Claim the accumulated fee pool into the platform's USD balance
pub fn claim_revenue(store: &MemoryStore) -> Result<Cents, OpError> {
    let claimed = store.claim_fee_pool()?;
    tracing::info!(claimed, "platform revenue claimed");
    Ok(claimed)
}
