//! Peer-to-peer transfers: fee, atomicity, notifications

use bank_sim_core_rs::catalog::Catalog;
use bank_sim_core_rs::models::account::Account;
use bank_sim_core_rs::models::currency::USD;
use bank_sim_core_rs::models::transaction::{Direction, TxKind};
use bank_sim_core_rs::ops::register::{register, OPENING_BONUS};
use bank_sim_core_rs::ops::transfer::transfer;
use bank_sim_core_rs::ops::OpError;
use bank_sim_core_rs::store::MemoryStore;
use chrono::NaiveDate;

fn setup() -> (MemoryStore, Catalog, Account, Account) {
    let store = MemoryStore::new();
    let catalog = Catalog::builtin();
    store.write_clock(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
    let alice = register(&store, "alice", "alice@bank.sim").unwrap();
    let bob = register(&store, "bob", "bob@bank.sim").unwrap();
    (store, catalog, alice, bob)
}

#[test]
fn test_transfer_moves_amount_and_charges_fee() {
    let (store, catalog, alice, bob) = setup();

    // $100 from a $1,000 balance costs $105 with the 5% fee
    transfer(&store, &catalog, &alice.id, &bob.account_number, 10_000, USD).unwrap();

    let sender = store.read_account(&alice.id).unwrap();
    let recipient = store.read_account(&bob.id).unwrap();
    assert_eq!(sender.balance(USD), OPENING_BONUS - 10_500);
    assert_eq!(recipient.balance(USD), OPENING_BONUS + 10_000);
    assert_eq!(store.fee_pool(), 500);
}

#[test]
fn test_transfer_records_both_sides() {
    let (store, catalog, alice, bob) = setup();
    transfer(&store, &catalog, &alice.id, &bob.account_number, 10_000, USD).unwrap();

    let sender = store.read_account(&alice.id).unwrap();
    let out: Vec<_> = sender
        .transactions
        .iter()
        .filter(|t| t.kind() == TxKind::Transfer)
        .collect();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].direction(), Direction::Outgoing);
    assert!(sender.transactions.iter().any(|t| t.kind() == TxKind::Fee));

    let recipient = store.read_account(&bob.id).unwrap();
    let incoming = recipient
        .transactions
        .iter()
        .find(|t| t.kind() == TxKind::Transfer)
        .unwrap();
    assert_eq!(incoming.direction(), Direction::Incoming);
    assert_eq!(incoming.amount(), 10_000);
    assert_eq!(incoming.description(), "Transfer from alice");
}

#[test]
fn test_recipient_is_notified() {
    let (store, catalog, alice, bob) = setup();
    transfer(&store, &catalog, &alice.id, &bob.account_number, 10_000, USD).unwrap();

    let notifications = store.take_notifications(&bob.id);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Transfer received");
    assert!(notifications[0].message.contains("100.00 USD"));
    assert_eq!(notifications[0].payload["amount"], 10_000);
    assert_eq!(notifications[0].payload["currency"], "USD");
    assert!(store.take_notifications(&alice.id).is_empty());
}

#[test]
fn test_unaffordable_transfer_commits_nothing() {
    let (store, catalog, alice, bob) = setup();

    // the amount alone fits the balance but amount + fee does not
    let err = transfer(&store, &catalog, &alice.id, &bob.account_number, OPENING_BONUS, USD)
        .unwrap_err();
    assert!(matches!(err, OpError::Balance(_)));

    assert_eq!(store.read_account(&alice.id).unwrap().balance(USD), OPENING_BONUS);
    assert_eq!(store.read_account(&bob.id).unwrap().balance(USD), OPENING_BONUS);
    assert_eq!(store.fee_pool(), 0);
    assert!(store.take_notifications(&bob.id).is_empty());
}

#[test]
fn test_self_transfer_rejected() {
    let (store, catalog, alice, _) = setup();
    let err = transfer(&store, &catalog, &alice.id, &alice.account_number, 1_000, USD).unwrap_err();
    assert_eq!(err, OpError::SelfTransfer);
}

#[test]
fn test_unknown_recipient_rejected() {
    let (store, catalog, alice, _) = setup();
    let err = transfer(&store, &catalog, &alice.id, "9999999999", 1_000, USD).unwrap_err();
    assert_eq!(err, OpError::RecipientNotFound("9999999999".to_string()));
}

#[test]
fn test_non_positive_amount_rejected() {
    let (store, catalog, alice, bob) = setup();
    let err = transfer(&store, &catalog, &alice.id, &bob.account_number, 0, USD).unwrap_err();
    assert_eq!(err, OpError::NonPositiveAmount);
}
