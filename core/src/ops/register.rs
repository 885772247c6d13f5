//! Account registration

use crate::models::account::{Account, CardDetails};
use crate::models::currency::{Cents, USD};
use crate::models::transaction::TxKind;
use crate::ledger::{self, TxSpec};
use crate::ops::OpError;
use crate::store::MemoryStore;
use rand::Rng;

/// Opening bonus credited to every new account, in USD cents
pub const OPENING_BONUS: Cents = 100_000;

/// Register a new user account
///
/// Usernames are unique. The account is opened on the current simulated
/// date with all watermarks set to it, receives a random 10-digit
/// account number and virtual card, and is seeded with the opening
/// bonus as its first ledger entry.
pub fn register(
    store: &MemoryStore,
    username: &str,
    email: &str,
) -> Result<Account, OpError> {
    if store.find_by_username(username).is_some() {
        return Err(OpError::UsernameTaken(username.to_string()));
    }

    let now = store.read_clock();
    let mut rng = rand::thread_rng();
    let mut account = Account::new(
        uuid::Uuid::new_v4().to_string(),
        username.to_string(),
        email.to_string(),
        random_account_number(&mut rng),
        random_card(&mut rng),
        now,
    );

    account.credit(USD, OPENING_BONUS);
    let spec = TxSpec::new(
        TxKind::Deposit,
        OPENING_BONUS,
        USD,
        "Welcome bonus".to_string(),
    );
    ledger::record(&mut account, spec, now);

    store.write_account(account.clone());
    tracing::info!(account = %account.id, username, "account registered");
    Ok(account)
}

fn random_account_number(rng: &mut impl Rng) -> String {
    (0..10).map(|_| rng.gen_range(0..10).to_string()).collect()
}

fn random_card(rng: &mut impl Rng) -> CardDetails {
    let number = (0..4)
        .map(|_| format!("{:04}", rng.gen_range(0..10_000)))
        .collect::<Vec<_>>()
        .join(" ");
    CardDetails {
        number,
        expiry: format!("{:02}/{:02}", rng.gen_range(1..=12), rng.gen_range(27..=32)),
        cvv: format!("{:03}", rng.gen_range(0..1_000)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_seeds_opening_bonus() {
        let store = MemoryStore::new();
        let account = register(&store, "alice", "alice@bank.sim").unwrap();
        assert_eq!(account.balance(USD), OPENING_BONUS);
        assert_eq!(account.transactions.len(), 1);
        assert_eq!(account.transactions[0].kind(), TxKind::Deposit);
        assert_eq!(account.account_number.len(), 10);
    }

    #[test]
    fn test_register_rejects_duplicate_username() {
        let store = MemoryStore::new();
        register(&store, "alice", "alice@bank.sim").unwrap();
        let err = register(&store, "alice", "other@bank.sim").unwrap_err();
        assert_eq!(err, OpError::UsernameTaken("alice".to_string()));
    }
}
