//! Currency exchange
//!
//! Converts between any two supported currencies at the catalog's
//! static rate table. The exchange is a single-account operation: the
//! platform is the implicit counterparty and its reserves are treated
//! as unlimited.

use crate::catalog::Catalog;
use crate::ledger::{self, TxSpec};
use crate::models::currency::{Cents, Currency};
use crate::models::transaction::TxKind;
use crate::ops::OpError;
use crate::store::MemoryStore;

/// Exchange `amount` of `from` into `to` on `account_id`
///
/// Returns the credited amount in `to` minor units.
pub fn exchange(
    store: &MemoryStore,
    catalog: &Catalog,
    account_id: &str,
    amount: Cents,
    from: Currency,
    to: Currency,
) -> Result<Cents, OpError> {
    if amount <= 0 {
        return Err(OpError::NonPositiveAmount);
    }
    let mut account = store.read_account(account_id)?;
    let now = store.read_clock();

    account.try_debit(from, amount)?;
    let credited = catalog.convert(amount, from, to);
    account.credit(to, credited);

    // crypto_buy when acquiring crypto, crypto_sell when leaving it,
    // plain withdrawal/deposit for fiat-to-fiat
    let (out_kind, in_kind) = match (from, to) {
        (_, Currency::Crypto(_)) => (TxKind::Withdrawal, TxKind::CryptoBuy),
        (Currency::Crypto(_), _) => (TxKind::CryptoSell, TxKind::Deposit),
        _ => (TxKind::Withdrawal, TxKind::Deposit),
    };
    let debit = TxSpec::new(out_kind, amount, from, format!("Exchange {} to {}", from, to));
    ledger::record(&mut account, debit, now);
    let credit = TxSpec::new(in_kind, credited, to, format!("Exchange {} to {}", from, to));
    ledger::record(&mut account, credit, now);

    store.write_account(account);
    Ok(credited)
}
