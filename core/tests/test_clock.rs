//! Shared clock and timekeeper election

use bank_sim_core_rs::core::clock::{self, Timekeeper};
use bank_sim_core_rs::store::MemoryStore;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_clock_reads_epoch_before_first_write() {
    let store = MemoryStore::new();
    assert_eq!(store.read_clock(), clock::epoch());
}

#[test]
fn test_single_timekeeper_elected() {
    let store = MemoryStore::new();
    let keeper = Timekeeper::elect(&store, "session-a");
    assert!(keeper.is_some());
    assert!(Timekeeper::elect(&store, "session-b").is_none());
}

#[test]
fn test_tick_advances_one_day() {
    let store = MemoryStore::new();
    store.write_clock(date(1900, 1, 1));
    let keeper = Timekeeper::elect(&store, "session-a").unwrap();

    assert_eq!(keeper.tick(&store), Some(date(1900, 1, 2)));
    assert_eq!(keeper.tick(&store), Some(date(1900, 1, 3)));
    assert_eq!(store.read_clock(), date(1900, 1, 3));
}

#[test]
fn test_tick_stops_after_lease_loss() {
    let store = MemoryStore::new();
    store.write_clock(date(1900, 1, 1));
    let keeper = Timekeeper::elect(&store, "session-a").unwrap();
    keeper.resign(&store);

    // another session takes over; the old handle self-cancels
    let successor = Timekeeper::elect(&store, "session-b").unwrap();
    assert_eq!(keeper.tick(&store), None);
    assert_eq!(store.read_clock(), date(1900, 1, 1));
    assert_eq!(successor.tick(&store), Some(date(1900, 1, 2)));
}

#[test]
fn test_clock_survives_timekeeper_handover() {
    let store = MemoryStore::new();
    store.write_clock(date(1900, 6, 15));
    let first = Timekeeper::elect(&store, "session-a").unwrap();
    first.tick(&store);
    first.resign(&store);

    let second = Timekeeper::elect(&store, "session-b").unwrap();
    assert_eq!(second.tick(&store), Some(date(1900, 6, 17)));
}
