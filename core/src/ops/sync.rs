//! Account settlement against the shared clock

use crate::catalog::Catalog;
use crate::models::account::Account;
use crate::ops::OpError;
use crate::settlement;
use crate::store::MemoryStore;

/// Settle `account_id` up to the current simulated date
///
/// Runs the settlement engine over a snapshot, with the store as the
/// revenue sink, and persists the result only when something changed.
/// Safe to call on every page load or clock tick; a no-change run does
/// not write.
pub fn sync_account(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
) -> Result<Account, OpError> {
    let account = store.read_account(account_id)?;
    let now = store.read_clock();
    let outcome = settlement::advance_to(&account, now, catalog, store);
    if outcome.modified {
        store.write_account(outcome.account.clone());
    }
    Ok(outcome.account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::currency::USD;
    use crate::ops::register::register;
    use chrono::NaiveDate;

    #[test]
    fn test_sync_without_changes_does_not_write() {
        let store = MemoryStore::new();
        let catalog = Catalog::builtin();
        store.write_clock(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
        let account = register(&store, "alice", "alice@bank.sim").unwrap();

        let synced = sync_account(&store, &catalog, &account.id).unwrap();
        assert_eq!(synced.balance(USD), account.balance(USD));
        // stored document untouched, watermark included
        let stored = store.read_account(&account.id).unwrap();
        assert_eq!(stored.last_login, account.last_login);
    }
}
