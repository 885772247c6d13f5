//! Peer-to-peer transfers

use crate::catalog::Catalog;
use crate::ledger::{self, TxSpec};
use crate::models::currency::{Cents, Currency};
use crate::models::transaction::{Direction, TxKind};
use crate::ops::OpError;
use crate::store::{MemoryStore, Notification, StoreError};

/// Transfer fee, percent of the amount sent
pub const TRANSFER_FEE_PERCENT: Cents = 5;

/// Send `amount` of `currency` from `sender_id` to the account addressed
/// by `recipient_number`
///
/// The sender pays the amount plus a 5% fee in the transfer currency;
/// the recipient receives the full amount. Both ledger entries and both
/// balance changes commit under one store lock, so no reader can see a
/// half-applied transfer. The fee's USD value is credited to the
/// platform pool and the recipient gets a notification.
pub fn transfer(
    store: &MemoryStore,
    catalog: &Catalog,
    sender_id: &str,
    recipient_number: &str,
    amount: Cents,
    currency: Currency,
) -> Result<(), OpError> {
    if amount <= 0 {
        return Err(OpError::NonPositiveAmount);
    }
    let recipient = store
        .find_by_account_number(recipient_number)
        .ok_or_else(|| OpError::RecipientNotFound(recipient_number.to_string()))?;
    if recipient.id == sender_id {
        return Err(OpError::SelfTransfer);
    }

    let now = store.read_clock();
    let fee = amount * TRANSFER_FEE_PERCENT / 100;
    let recipient_username = recipient.username.clone();

    let committed = store
        .with_accounts_mut(sender_id, &recipient.id, |sender, recipient| {
            sender.try_debit(currency, amount + fee)?;
            recipient.credit(currency, amount);

            let outgoing = TxSpec::new(
                TxKind::Transfer,
                amount,
                currency,
                format!("Transfer to {}", recipient.username),
            )
            .with_direction(Direction::Outgoing);
            ledger::record(sender, outgoing, now);

            let fee_spec = TxSpec::new(TxKind::Fee, fee, currency, "Transfer fee (5%)".to_string());
            ledger::record(sender, fee_spec, now);

            let incoming = TxSpec::new(
                TxKind::Transfer,
                amount,
                currency,
                format!("Transfer from {}", sender.username),
            )
            .with_direction(Direction::Incoming);
            ledger::record(recipient, incoming, now);
            Ok::<(), OpError>(())
        })
        .map_err(|err| match err {
            StoreError::AccountNotFound(id) if id == sender_id => OpError::AccountNotFound(id),
            other => OpError::Store(other),
        })?;
    committed?;

    if let Err(err) = store.credit_fee_pool(catalog.to_usd_cents(fee, currency), "transfer fee") {
        tracing::warn!(%err, "transfer fee not pooled");
    }
    store.enqueue_notification(Notification {
        recipient_id: recipient.id,
        title: "Transfer received".to_string(),
        message: format!("You received {} from a transfer", currency.format(amount)),
        payload: serde_json::json!({
            "amount": amount,
            "currency": currency.code(),
        }),
    });
    tracing::info!(sender = sender_id, recipient = %recipient_username, amount, "transfer settled");
    Ok(())
}
